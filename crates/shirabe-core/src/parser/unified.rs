//! # Unified Parser Interface
//!
//! One front door over both parsing backends, with automatic mode
//! selection and confidence-based fallback.

use crate::error::Result;
use crate::model::ModelWeights;
use crate::parser::crf::CrfTagger;
use crate::parser::heuristic::HeuristicParser;
use crate::types::{ParseMode, ParsedRecord};

/// Configuration for the parser.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Which parsing mode to use.
    pub mode: ParseMode,
    /// In `Auto` mode, a CRF result below this confidence is compared
    /// against the heuristic result and the better one wins.
    pub confidence_threshold: f32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::Auto,
            confidence_threshold: 0.3,
        }
    }
}

impl ParserConfig {
    /// Create a new parser configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parse mode.
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the confidence threshold for heuristic fallback.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

/// Unified parser over the CRF tagger and the heuristic fallback.
pub struct Parser {
    config: ParserConfig,
    heuristic: HeuristicParser,
    tagger: CrfTagger,
}

impl Parser {
    /// Create a parser backed by the built-in reference weights.
    pub fn new(config: ParserConfig) -> Result<Self> {
        Ok(Self {
            config,
            heuristic: HeuristicParser::new()?,
            tagger: CrfTagger::with_reference_weights(),
        })
    }

    /// Create a parser backed by a loaded weight artifact.
    pub fn with_weights(config: ParserConfig, weights: ModelWeights) -> Result<Self> {
        Ok(Self {
            config,
            heuristic: HeuristicParser::new()?,
            tagger: CrfTagger::new(weights)?,
        })
    }

    /// Create a parser with default configuration and reference weights.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ParserConfig::default())
    }

    /// Parse a filename using the configured mode.
    ///
    /// # Examples
    /// ```
    /// use shirabe_core::parser::Parser;
    ///
    /// let parser = Parser::with_defaults().unwrap();
    /// let record = parser
    ///     .parse("[SubsPlease] Attack on Titan - 01 [1080p].mkv")
    ///     .unwrap();
    ///
    /// assert_eq!(record.title.as_deref(), Some("Attack on Titan"));
    /// assert_eq!(record.group.as_deref(), Some("SubsPlease"));
    /// ```
    pub fn parse(&self, input: &str) -> Result<ParsedRecord> {
        match self.config.mode {
            ParseMode::Full => self.tagger.parse(input),
            ParseMode::Light => Ok(self.heuristic.parse(input)),
            ParseMode::Auto => self.parse_auto(input),
        }
    }

    /// CRF first; when its confidence falls below the threshold, keep
    /// whichever of the two results is the more confident.
    fn parse_auto(&self, input: &str) -> Result<ParsedRecord> {
        let tagged = self.tagger.parse(input)?;
        if tagged.confidence >= self.config.confidence_threshold {
            return Ok(tagged);
        }
        let heuristic = self.heuristic.parse(input);
        if heuristic.confidence > tagged.confidence {
            Ok(heuristic)
        } else {
            Ok(tagged)
        }
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

/// Convenience function to parse a filename with default settings.
pub fn parse(input: &str) -> Result<ParsedRecord> {
    Parser::with_defaults()?.parse(input)
}

/// Parse with a specific mode.
pub fn parse_with_mode(input: &str, mode: ParseMode) -> Result<ParsedRecord> {
    Parser::new(ParserConfig::new().with_mode(mode))?.parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_creation() {
        assert!(Parser::with_defaults().is_ok());
    }

    #[test]
    fn config_builder() {
        let config = ParserConfig::new()
            .with_mode(ParseMode::Light)
            .with_confidence_threshold(0.7);

        assert_eq!(config.mode, ParseMode::Light);
        assert_eq!(config.confidence_threshold, 0.7);
    }

    #[test]
    fn confidence_threshold_clamps() {
        let config = ParserConfig::new().with_confidence_threshold(1.5);
        assert_eq!(config.confidence_threshold, 1.0);

        let config = ParserConfig::new().with_confidence_threshold(-0.5);
        assert_eq!(config.confidence_threshold, 0.0);
    }

    #[test]
    fn light_mode_uses_heuristics() {
        let parser = Parser::new(ParserConfig::new().with_mode(ParseMode::Light)).unwrap();
        let record = parser
            .parse("[SubsPlease] Jujutsu Kaisen - 24 (1080p) [A1B2C3D4].mkv")
            .unwrap();

        assert_eq!(record.group.as_deref(), Some("SubsPlease"));
        assert_eq!(record.title.as_deref(), Some("Jujutsu Kaisen"));
        assert_eq!(record.mode, ParseMode::Light);
    }

    #[test]
    fn full_mode_uses_tagger() {
        let parser = Parser::new(ParserConfig::new().with_mode(ParseMode::Full)).unwrap();
        let record = parser
            .parse("[SubsPlease] Attack on Titan - 01 [1080p].mkv")
            .unwrap();

        assert_eq!(record.group.as_deref(), Some("SubsPlease"));
        assert_eq!(record.title.as_deref(), Some("Attack on Titan"));
        assert_eq!(record.mode, ParseMode::Full);
        assert_eq!(record.input, "[SubsPlease] Attack on Titan - 01 [1080p].mkv");
    }

    #[test]
    fn auto_mode_extracts_basic_metadata() {
        let parser = Parser::new(ParserConfig::new().with_mode(ParseMode::Auto)).unwrap();
        let record = parser
            .parse("[SubsPlease] Attack on Titan - 01 [1080p].mkv")
            .unwrap();

        assert!(record.group.is_some());
        assert!(record.resolution.is_some());
    }

    #[test]
    fn empty_input_is_not_an_error() {
        for mode in [ParseMode::Full, ParseMode::Light, ParseMode::Auto] {
            let parser = Parser::new(ParserConfig::new().with_mode(mode)).unwrap();
            let record = parser.parse("").unwrap();
            assert!(record.is_empty());
        }
    }

    #[test]
    fn convenience_functions() {
        let record = parse("[Erai-raws] Test Anime - 01 (720p).mp4").unwrap();
        assert_eq!(record.group.as_deref(), Some("Erai-raws"));
        assert_eq!(record.extension.as_deref(), Some("mp4"));

        assert!(parse_with_mode("[Test] Anime - 01.mkv", ParseMode::Light).is_ok());
    }

    #[test]
    fn rejects_invalid_injected_weights() {
        let mut weights = ModelWeights::reference();
        weights.labels.swap(2, 3);
        assert!(Parser::with_weights(ParserConfig::default(), weights).is_err());
    }
}
