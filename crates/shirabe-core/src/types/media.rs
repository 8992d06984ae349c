//! Closed vocabularies for technical release metadata.
//!
//! Each enum maps a small set of well-known filename tokens onto a
//! canonical variant. Tokens outside the vocabulary never produce a
//! variant; callers keep the field empty instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Parsing engine selector, also recorded on each output record so a
/// caller can tell which backend produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParseMode {
    /// The CRF tagger.
    Full,
    /// The regex heuristics.
    Light,
    /// CRF first, heuristic fallback when confidence is low.
    #[default]
    Auto,
}

/// Video resolution class. Serializes to the variant name itself
/// (`"FHD1080"`), while [`Display`](fmt::Display) renders the familiar
/// `"1080p"` form for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    UHD2160,
    FHD1080,
    HD720,
    SD480,
}

impl Resolution {
    /// Map a lowercased token to a resolution, if it names one.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "2160p" | "2160" | "4k" | "uhd" => Some(Self::UHD2160),
            "1080p" | "1080i" | "1080" | "fhd" => Some(Self::FHD1080),
            "720p" | "720" | "hd" => Some(Self::HD720),
            "480p" | "480" | "sd" => Some(Self::SD480),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UHD2160 => "2160p",
            Self::FHD1080 => "1080p",
            Self::HD720 => "720p",
            Self::SD480 => "480p",
        };
        f.write_str(s)
    }
}

/// Video codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoCodec {
    #[serde(rename = "HEVC")]
    Hevc,
    #[serde(rename = "H264")]
    H264,
    #[serde(rename = "AV1")]
    Av1,
    #[serde(rename = "VP9")]
    Vp9,
}

impl VideoCodec {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "hevc" | "h265" | "h.265" | "x265" => Some(Self::Hevc),
            "h264" | "h.264" | "x264" | "avc" => Some(Self::H264),
            "av1" => Some(Self::Av1),
            "vp9" => Some(Self::Vp9),
            _ => None,
        }
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Hevc => "HEVC",
            Self::H264 => "H264",
            Self::Av1 => "AV1",
            Self::Vp9 => "VP9",
        };
        f.write_str(s)
    }
}

/// Audio codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCodec {
    #[serde(rename = "FLAC")]
    Flac,
    #[serde(rename = "AAC")]
    Aac,
    #[serde(rename = "Opus")]
    Opus,
    #[serde(rename = "DTS")]
    Dts,
    #[serde(rename = "TrueHD")]
    TrueHd,
    #[serde(rename = "AC3")]
    Ac3,
    #[serde(rename = "MP3")]
    Mp3,
}

impl AudioCodec {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "flac" => Some(Self::Flac),
            "aac" => Some(Self::Aac),
            "opus" => Some(Self::Opus),
            "dts" => Some(Self::Dts),
            "truehd" => Some(Self::TrueHd),
            "ac3" | "dd" | "eac3" | "ddp" => Some(Self::Ac3),
            "mp3" => Some(Self::Mp3),
            _ => None,
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Flac => "FLAC",
            Self::Aac => "AAC",
            Self::Opus => "Opus",
            Self::Dts => "DTS",
            Self::TrueHd => "TrueHD",
            Self::Ac3 => "AC3",
            Self::Mp3 => "MP3",
        };
        f.write_str(s)
    }
}

/// Distribution source of the encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaSource {
    BluRay,
    WebDL,
    WebRip,
    #[serde(rename = "HDTV")]
    Hdtv,
    #[serde(rename = "DVD")]
    Dvd,
}

impl MediaSource {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "bluray" | "blu-ray" | "bdrip" | "bd" | "bdmv" => Some(Self::BluRay),
            "webdl" | "web-dl" | "web" => Some(Self::WebDL),
            "webrip" | "web-rip" => Some(Self::WebRip),
            "hdtv" | "tvrip" => Some(Self::Hdtv),
            "dvd" | "dvdrip" => Some(Self::Dvd),
            _ => None,
        }
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BluRay => "BluRay",
            Self::WebDL => "WebDL",
            Self::WebRip => "WebRip",
            Self::Hdtv => "HDTV",
            Self::Dvd => "DVD",
        };
        f.write_str(s)
    }
}
