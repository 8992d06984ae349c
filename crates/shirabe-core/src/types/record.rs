//! The typed parse result.

use serde::{Deserialize, Serialize};

use super::episode::EpisodeSpec;
use super::media::{AudioCodec, MediaSource, ParseMode, Resolution, VideoCodec};

/// Structured fields recovered from a release filename.
///
/// Every metadata field is optional; a field stays `None` when the input
/// carries no evidence for it. An empty input parses to a record with
/// every field `None` and zero confidence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedRecord {
    /// The input string this record was parsed from.
    pub input: String,
    /// Which engine produced the record.
    pub mode: ParseMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<EpisodeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<VideoCodec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<AudioCodec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<MediaSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crc32: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Fraction of fields populated, in `[0.0, 1.0]`.
    pub confidence: f32,
}

impl ParsedRecord {
    /// Number of optional fields a record can populate.
    pub const FIELD_COUNT: usize = 12;

    /// An empty record carrying its source input and producing mode.
    pub fn new(input: impl Into<String>, mode: ParseMode) -> Self {
        Self {
            input: input.into(),
            mode,
            ..Default::default()
        }
    }

    /// How many optional fields are populated.
    pub fn populated_fields(&self) -> usize {
        [
            self.title.is_some(),
            self.group.is_some(),
            self.season.is_some(),
            self.episode.is_some(),
            self.resolution.is_some(),
            self.video_codec.is_some(),
            self.audio_codec.is_some(),
            self.source.is_some(),
            self.year.is_some(),
            self.crc32.is_some(),
            self.extension.is_some(),
            self.version.is_some(),
        ]
        .iter()
        .filter(|&&b| b)
        .count()
    }

    /// Recompute `confidence` from the populated field count.
    pub fn update_confidence(&mut self) {
        self.confidence = self.populated_fields() as f32 / Self::FIELD_COUNT as f32;
    }

    /// True when no field was recovered at all.
    pub fn is_empty(&self) -> bool {
        self.populated_fields() == 0
    }
}
