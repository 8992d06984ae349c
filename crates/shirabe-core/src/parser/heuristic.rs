use std::collections::BTreeSet;

use regex::Regex;

use crate::error::Result;
use crate::types::{
    AudioCodec, EpisodeSpec, MediaSource, ParseMode, ParsedRecord, Resolution, VideoCodec,
};

/// Heuristic parser using pre-compiled regex patterns and scene naming rules.
///
/// This is the fast fallback engine: no model artifact, no decoding pass,
/// just pattern extraction. Accuracy is lower than the CRF tagger but it
/// needs nothing loaded and runs in well under a microsecond.
pub struct HeuristicParser {
    re_resolution: Regex,
    re_vcodec: Regex,
    re_acodec: Regex,
    re_source: Regex,
    re_crc32: Regex,
    re_episode_range: Regex,
    re_episode_version: Regex,
    re_episode: Regex,
    re_season: Regex,
    re_version: Regex,
    re_year: Regex,
    re_extension: Regex,
    re_group: Regex,
    re_brackets: Regex,
}

impl HeuristicParser {
    /// Constructs a new `HeuristicParser` with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `ShirabeError::Regex` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_resolution: Regex::new(r"(?i)\b(2160|1080|720|480)[pi]\b")?,
            re_vcodec: Regex::new(r"(?i)\b(x\.?264|x\.?265|h\.?264|h\.?265|hevc|avc|av1|vp9)\b")?,
            re_acodec: Regex::new(
                r"(?i)\b(flac|aac|opus|ac3|e-?ac-?3|ddp?|dts(?:-?hd)?|truehd|true\shd|mp3)\b",
            )?,
            re_source: Regex::new(
                r"(?i)\b(blu-?ray|bd(?:rip|mv)?|web-?dl|webrip|web-?rip|web|hdtv|tvrip|dvd(?:rip)?)\b",
            )?,
            re_crc32: Regex::new(r"\[([0-9A-Fa-f]{8})\]")?,
            re_episode_range: Regex::new(
                r"(?i)(?:[\s\-_\.]|(?:^|[\s\-_\.\[\(])ep?\.?\s*)(\d{1,4})\s*[-~]\s*(\d{1,4})\b",
            )?,
            re_episode_version: Regex::new(
                r"(?i)(?:[\s\-_\.]|(?:^|[\s\-_\.\[\(])ep?\.?\s*)(\d{1,4})v(\d)\b",
            )?,
            re_episode: Regex::new(
                r"(?i)(?:[\s\-_\.]|(?:^|[\s\-_\.\[\(])(?:ep?\.?|episode)\s*)(\d{1,4})(?:\b|[^0-9v\-~])",
            )?,
            re_season: Regex::new(r"(?i)(?:\bS|season\s*)(\d{1,2})\b")?,
            re_version: Regex::new(r"(?i)\[v(\d)\]|\bv(\d)\b")?,
            re_year: Regex::new(r"\b((?:19|20)\d{2})\b")?,
            re_extension: Regex::new(r"\.(\w{2,4})$")?,
            re_group: Regex::new(r"^\[([^\]]+)\]")?,
            re_brackets: Regex::new(r"\[[^\]]*\]|\([^\)]*\)")?,
        })
    }

    /// Parses the given filename using heuristic regex patterns.
    ///
    /// An empty or whitespace-only input yields a record with every field
    /// empty; this path never fails.
    pub fn parse(&self, input: &str) -> ParsedRecord {
        let trimmed = input.trim();
        let mut record = ParsedRecord::new(trimmed, ParseMode::Light);
        if trimmed.is_empty() {
            return record;
        }

        // Extraction order matters for disambiguation.
        record.group = self.extract_group(trimmed);
        record.extension = self.extract_extension(trimmed);
        record.crc32 = self.extract_crc32(trimmed);
        record.resolution = self.extract_resolution(trimmed);
        record.video_codec = self.extract_video_codec(trimmed);
        record.audio_codec = self.extract_audio_codec(trimmed);
        record.source = self.extract_source(trimmed);
        record.season = self.extract_season(trimmed);
        record.year = self.extract_year(trimmed);
        let (episode, episode_version) = self.extract_episode(trimmed);
        record.episode = episode;
        record.version = episode_version.or_else(|| self.extract_version(trimmed));

        // Title: the text region between the group tag and the first
        // metadata token.
        record.title = self.extract_title(trimmed, &record);

        record.update_confidence();
        record
    }

    fn extract_group(&self, input: &str) -> Option<String> {
        self.re_group
            .captures(input)
            .map(|c| c[1].trim().to_string())
    }

    fn extract_extension(&self, input: &str) -> Option<String> {
        self.re_extension
            .captures(input)
            .map(|c| c[1].to_lowercase())
    }

    fn extract_crc32(&self, input: &str) -> Option<String> {
        self.re_crc32.captures(input).map(|c| c[1].to_uppercase())
    }

    fn extract_resolution(&self, input: &str) -> Option<Resolution> {
        self.re_resolution.captures(input).and_then(|c| match &c[1] {
            "2160" => Some(Resolution::UHD2160),
            "1080" => Some(Resolution::FHD1080),
            "720" => Some(Resolution::HD720),
            "480" => Some(Resolution::SD480),
            _ => None,
        })
    }

    fn extract_video_codec(&self, input: &str) -> Option<VideoCodec> {
        self.re_vcodec
            .captures(input)
            .and_then(|c| VideoCodec::from_token(&c[1].to_lowercase().replace('.', "")))
    }

    fn extract_audio_codec(&self, input: &str) -> Option<AudioCodec> {
        self.re_acodec.captures(input).and_then(|c| {
            let codec = c[1].to_lowercase().replace([' ', '-'], "");
            match codec.as_str() {
                s if s.starts_with("dts") => Some(AudioCodec::Dts),
                s if s.starts_with("truehd") => Some(AudioCodec::TrueHd),
                s => AudioCodec::from_token(s),
            }
        })
    }

    fn extract_source(&self, input: &str) -> Option<MediaSource> {
        self.re_source.captures(input).and_then(|c| {
            let source = c[1].to_lowercase().replace([' ', '-'], "");
            MediaSource::from_token(&source)
        })
    }

    fn extract_season(&self, input: &str) -> Option<u32> {
        self.re_season
            .captures(input)
            .and_then(|c| c[1].parse().ok())
    }

    fn extract_year(&self, input: &str) -> Option<u32> {
        // Accept only plausible release years, not arbitrary 4-digit runs.
        self.re_year.captures(input).and_then(|c| {
            let year: u32 = c[1].parse().ok()?;
            (1980..=2030).contains(&year).then_some(year)
        })
    }

    /// Episode extraction, also capturing a `"12v2"` style release
    /// version riding on the episode number.
    fn extract_episode(&self, input: &str) -> (Option<EpisodeSpec>, Option<String>) {
        // Range first: "01-12" expands to the full set.
        if let Some(caps) = self.re_episode_range.captures(input) {
            let lo: Option<u32> = caps[1].parse().ok();
            let hi: Option<u32> = caps[2].parse().ok();
            if let (Some(lo), Some(hi)) = (lo, hi) {
                if lo == hi {
                    // A degenerate range like "05-05" is one episode.
                    return (Some(EpisodeSpec::Single(lo)), None);
                }
                if lo < hi && hi - lo < 1000 {
                    let set: BTreeSet<u32> = (lo..=hi).collect();
                    return (Some(EpisodeSpec::Multi(set)), None);
                }
            }
        }

        if let Some(caps) = self.re_episode_version.captures(input) {
            let episode: Option<u32> = caps[1].parse().ok();
            if let Some(episode) = episode {
                let version = format!("v{}", &caps[2]);
                return (Some(EpisodeSpec::Single(episode)), Some(version));
            }
        }

        if let Some(caps) = self.re_episode.captures(input) {
            if let Ok(episode) = caps[1].parse() {
                return (Some(EpisodeSpec::Single(episode)), None);
            }
        }

        (None, None)
    }

    fn extract_version(&self, input: &str) -> Option<String> {
        self.re_version.captures(input).and_then(|c| {
            // Group 1 is the bracket form [v2], group 2 the bare v2.
            c.get(1)
                .or_else(|| c.get(2))
                .map(|m| format!("v{}", m.as_str()))
        })
    }

    /// Extracts the title by blanking every recognized metadata region
    /// with a sentinel and keeping the text before the first one.
    fn extract_title(&self, input: &str, record: &ParsedRecord) -> Option<String> {
        let mut work = input.to_string();

        // Remove the group tag from the start.
        if record.group.is_some() {
            if let Some(end) = work.find(']') {
                work = work[end + 1..].to_string();
            }
        }

        // Remove the file extension from the end.
        if let Some(ref ext) = record.extension {
            if let Some(pos) = work.rfind(&format!(".{ext}")) {
                work = work[..pos].to_string();
            }
        }

        let patterns_to_strip: Vec<&Regex> = vec![
            &self.re_resolution,
            &self.re_vcodec,
            &self.re_acodec,
            &self.re_source,
            &self.re_crc32,
            &self.re_episode_range,
            &self.re_episode_version,
            &self.re_season,
            &self.re_version,
        ];
        for pattern in &patterns_to_strip {
            work = pattern.replace_all(&work, "\x00").to_string();
        }
        work = self.re_episode.replace_all(&work, "\x00").to_string();

        // Strip a bracketed year so "(2020)" never leaks into the title.
        if let Some(year) = record.year {
            work = work.replace(&format!("({year})"), "\x00");
            work = work.replace(&format!("[{year}]"), "\x00");
        }

        // Remaining bracketed content is metadata tagging, not title.
        work = self.re_brackets.replace_all(&work, " ").to_string();

        let title_region = work.split('\x00').next().unwrap_or("");

        let cleaned = title_region
            .replace(['.', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .trim_matches(|c: char| c == '-' || c == ' ')
            .to_string();

        if cleaned.is_empty() { None } else { Some(cleaned) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> HeuristicParser {
        HeuristicParser::new().unwrap()
    }

    #[test]
    fn empty_input_yields_empty_record() {
        let p = parser();
        assert!(p.parse("").is_empty());
        assert!(p.parse("   ").is_empty());
    }

    #[test]
    fn subsplease_standard_format() {
        let r = parser().parse("[SubsPlease] Jujutsu Kaisen - 24 (1080p) [A1B2C3D4].mkv");

        assert_eq!(r.title.as_deref(), Some("Jujutsu Kaisen"));
        assert_eq!(r.group.as_deref(), Some("SubsPlease"));
        assert_eq!(r.episode, Some(EpisodeSpec::Single(24)));
        assert_eq!(r.resolution, Some(Resolution::FHD1080));
        assert_eq!(r.crc32.as_deref(), Some("A1B2C3D4"));
        assert_eq!(r.extension.as_deref(), Some("mkv"));
    }

    #[test]
    fn versioned_episode() {
        let r = parser()
            .parse("[Erai-raws] Shingeki no Kyojin - The Final Season - 28v2 [1080p][HEVC].mkv");

        assert_eq!(r.group.as_deref(), Some("Erai-raws"));
        assert_eq!(r.episode, Some(EpisodeSpec::Single(28)));
        assert_eq!(r.version.as_deref(), Some("v2"));
        assert_eq!(r.resolution, Some(Resolution::FHD1080));
        assert_eq!(r.video_codec, Some(VideoCodec::Hevc));
        assert_eq!(r.extension.as_deref(), Some("mkv"));
    }

    #[test]
    fn batch_episode_range_expands() {
        let r = parser().parse("[Judas] Golden Kamuy S3 - 01-12 (1080p) [Batch]");

        assert_eq!(r.group.as_deref(), Some("Judas"));
        assert_eq!(r.season, Some(3));
        assert_eq!(
            r.episode,
            Some(EpisodeSpec::Multi((1..=12).collect())),
        );
        assert_eq!(r.resolution, Some(Resolution::FHD1080));
    }

    #[test]
    fn degenerate_episode_range_is_single() {
        let r = parser().parse("[Judas] Golden Kamuy - 05-05 (1080p)");
        assert_eq!(r.episode, Some(EpisodeSpec::Single(5)));
    }

    #[test]
    fn dot_separated_format() {
        let r = parser().parse("One.Piece.1084.VOSTFR.1080p.WEB.x264-AAC.mkv");

        assert_eq!(r.title.as_deref(), Some("One Piece"));
        assert_eq!(r.episode, Some(EpisodeSpec::Single(1084)));
        assert_eq!(r.resolution, Some(Resolution::FHD1080));
        assert_eq!(r.video_codec, Some(VideoCodec::H264));
        assert_eq!(r.audio_codec, Some(AudioCodec::Aac));
        assert_eq!(r.extension.as_deref(), Some("mkv"));
    }

    #[test]
    fn resolution_variants() {
        let p = parser();

        let r = p.parse("[Test] Show - 01 (480p).mkv");
        assert_eq!(r.resolution, Some(Resolution::SD480));

        let r = p.parse("[Test] Show - 01 (720p).mkv");
        assert_eq!(r.resolution, Some(Resolution::HD720));

        let r = p.parse("[Test] Show - 01 (2160p).mkv");
        assert_eq!(r.resolution, Some(Resolution::UHD2160));
    }

    #[test]
    fn video_codec_variants() {
        let p = parser();

        for (input, expected) in [
            ("x264", VideoCodec::H264),
            ("H.264", VideoCodec::H264),
            ("x265", VideoCodec::Hevc),
            ("HEVC", VideoCodec::Hevc),
            ("H.265", VideoCodec::Hevc),
            ("AV1", VideoCodec::Av1),
            ("VP9", VideoCodec::Vp9),
        ] {
            let r = p.parse(&format!("[Group] Title - 01 [{input}].mkv"));
            assert_eq!(r.video_codec, Some(expected), "failed for input: {input}");
        }
    }

    #[test]
    fn audio_codec_variants() {
        let p = parser();

        for (input, expected) in [
            ("FLAC", AudioCodec::Flac),
            ("AAC", AudioCodec::Aac),
            ("Opus", AudioCodec::Opus),
            ("AC3", AudioCodec::Ac3),
            ("DTS", AudioCodec::Dts),
            ("DTS-HD", AudioCodec::Dts),
            ("TrueHD", AudioCodec::TrueHd),
            ("MP3", AudioCodec::Mp3),
        ] {
            let r = p.parse(&format!("[Group] Title - 01 [{input}].mkv"));
            assert_eq!(r.audio_codec, Some(expected), "failed for input: {input}");
        }
    }

    #[test]
    fn source_extraction() {
        let p = parser();

        let r = p.parse("[Group] Title - 01 Blu-ray 1080p.mkv");
        assert_eq!(r.source, Some(MediaSource::BluRay));

        let r = p.parse("[Group] Title - 01 WEB-DL 1080p.mkv");
        assert_eq!(r.source, Some(MediaSource::WebDL));

        let r = p.parse("[Group] Title - 01 HDTV 720p.mkv");
        assert_eq!(r.source, Some(MediaSource::Hdtv));
    }

    #[test]
    fn year_extraction() {
        let r = parser().parse("[Group] Title (2024) - 01 (1080p).mkv");
        assert_eq!(r.year, Some(2024));
        assert_eq!(r.title.as_deref(), Some("Title"));
    }

    #[test]
    fn unknown_codec_stays_null() {
        let r = parser().parse("Movie.Title.2020.1080p.BluRay.xvid-GROUP.mkv");
        assert_eq!(r.video_codec, None);
        assert_eq!(r.resolution, Some(Resolution::FHD1080));
        assert_eq!(r.source, Some(MediaSource::BluRay));
    }

    #[test]
    fn confidence_scales_with_fields() {
        let p = parser();

        let sparse = p.parse("Some Random Title.mkv");
        let rich = p.parse("[SubsPlease] Jujutsu Kaisen - 24 (1080p) [AAC] [A1B2C3D4].mkv");
        assert!(sparse.confidence < rich.confidence);
    }

    #[test]
    fn record_is_serializable() {
        let r = parser().parse("[SubsPlease] Jujutsu Kaisen - 24 (1080p) [A1B2C3D4].mkv");
        let json = serde_json::to_string(&r).unwrap();
        let back: ParsedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
