//! # Linear-CRF Tagger
//!
//! The statistical parsing backend: tokenize, score each significant
//! token against the weight artifact, Viterbi-decode the best label
//! sequence, then resolve spans into a typed record.

use tracing::trace;

use crate::error::{Result, ShirabeError};
use crate::model::ModelWeights;
use crate::parser::features;
use crate::parser::labels::Label;
use crate::parser::resolver::{self, TaggedToken};
use crate::parser::tokenizer::{Token, Tokenizer};
use crate::parser::viterbi::ViterbiDecoder;
use crate::types::{ParseMode, ParsedRecord};

/// A tagger bound to one validated weight artifact.
///
/// Construction validates the artifact once; parsing then never fails on
/// weight shape. The tagger is cheap to share behind a reference from
/// many call sites.
#[derive(Debug, Clone)]
pub struct CrfTagger {
    weights: ModelWeights,
    tokenizer: Tokenizer,
    decoder: ViterbiDecoder,
}

impl CrfTagger {
    /// Build a tagger from a weight artifact, validating it.
    pub fn new(weights: ModelWeights) -> Result<Self> {
        weights.validate()?;
        let decoder = ViterbiDecoder::new(weights.num_labels());
        Ok(Self {
            weights,
            tokenizer: Tokenizer::new(),
            decoder,
        })
    }

    /// A tagger over the built-in reference weights.
    pub fn with_reference_weights() -> Self {
        // The reference artifact is validated by construction.
        Self {
            decoder: ViterbiDecoder::new(Label::COUNT),
            weights: ModelWeights::reference(),
            tokenizer: Tokenizer::new(),
        }
    }

    pub fn weights(&self) -> &ModelWeights {
        &self.weights
    }

    /// Decode the label for every significant token of `input`.
    pub fn tag(&self, input: &str) -> Result<Vec<TaggedToken>> {
        let tokens: Vec<Token> = self
            .tokenizer
            .tokenize(input)
            .into_iter()
            .filter(Token::is_significant)
            .collect();
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let emissions: Vec<Vec<f32>> = (0..tokens.len())
            .map(|i| {
                let prev = i.checked_sub(1).map(|p| tokens[p].text.as_str());
                let next = tokens.get(i + 1).map(|t| t.text.as_str());
                let features = features::extract(&tokens[i].text, prev, next);
                self.weights.emissions(&features)
            })
            .collect();

        let path = self.decoder.decode(&emissions, &self.weights.transition)?;

        path.into_iter()
            .zip(tokens)
            .map(|(idx, token)| {
                let label = Label::from_index(idx).ok_or_else(|| {
                    ShirabeError::Decode(format!("decoded label index {idx} out of range"))
                })?;
                trace!(token = %token.text, %label, "tagged");
                Ok(TaggedToken { token, label })
            })
            .collect()
    }

    /// Parse `input` into a typed record.
    ///
    /// An empty or whitespace-only input yields a record with every
    /// field empty rather than an error.
    pub fn parse(&self, input: &str) -> Result<ParsedRecord> {
        let tagged = self.tag(input)?;
        let mut record = resolver::resolve(&tagged);
        record.input = input.to_string();
        record.mode = ParseMode::Full;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EpisodeSpec, MediaSource, Resolution, VideoCodec};
    use std::collections::BTreeSet;

    fn reference() -> CrfTagger {
        CrfTagger::with_reference_weights()
    }

    fn labels_of(tagger: &CrfTagger, input: &str) -> Vec<String> {
        tagger
            .tag(input)
            .unwrap()
            .iter()
            .map(|tt| tt.label.to_string())
            .collect()
    }

    #[test]
    fn rejects_invalid_weights() {
        let mut weights = ModelWeights::reference();
        weights.bias.pop();
        assert!(CrfTagger::new(weights).is_err());
    }

    #[test]
    fn empty_input_parses_to_empty_record() {
        let record = reference().parse("").unwrap();
        assert!(record.is_empty());
        assert_eq!(record.confidence, 0.0);
    }

    #[test]
    fn whitespace_only_input_parses_to_empty_record() {
        let record = reference().parse("   ").unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn tags_fansub_layout() {
        let labels = labels_of(&reference(), "[SubsPlease] Attack on Titan - 01 [1080p].mkv");
        assert_eq!(
            labels,
            [
                "B-GROUP", "B-TITLE", "I-TITLE", "I-TITLE", "O", "B-EPISODE", "RESOLUTION",
                "O", "EXTENSION",
            ],
        );
    }

    #[test]
    fn parses_fansub_layout() {
        let record = reference()
            .parse("[SubsPlease] Attack on Titan - 01 [1080p].mkv")
            .unwrap();
        assert_eq!(record.group.as_deref(), Some("SubsPlease"));
        assert_eq!(record.title.as_deref(), Some("Attack on Titan"));
        assert_eq!(record.episode, Some(EpisodeSpec::Single(1)));
        assert_eq!(record.resolution, Some(Resolution::FHD1080));
        assert_eq!(record.extension.as_deref(), Some("mkv"));
    }

    #[test]
    fn parses_scene_layout() {
        let record = reference()
            .parse("Movie.Title.2020.1080p.BluRay.x264-GROUP.mkv")
            .unwrap();
        assert_eq!(record.year, Some(2020));
        assert_eq!(record.resolution, Some(Resolution::FHD1080));
        assert_eq!(record.source, Some(MediaSource::BluRay));
        assert_eq!(record.video_codec, Some(VideoCodec::H264));
        assert_eq!(record.group.as_deref(), Some("GROUP"));
        assert_eq!(record.extension.as_deref(), Some("mkv"));
    }

    #[test]
    fn parses_episode_range() {
        let record = reference().parse("Show - 01-03 [720p]").unwrap();
        assert_eq!(
            record.episode,
            Some(EpisodeSpec::Multi(BTreeSet::from([1, 2, 3]))),
        );
        assert_eq!(record.resolution, Some(Resolution::HD720));
    }

    #[test]
    fn unknown_codec_token_stays_null() {
        let record = reference()
            .parse("Movie.Title.2020.1080p.BluRay.xvid-GROUP.mkv")
            .unwrap();
        assert_eq!(record.video_codec, None);
        assert_eq!(record.year, Some(2020));
        assert_eq!(record.resolution, Some(Resolution::FHD1080));
        assert_eq!(record.group.as_deref(), Some("GROUP"));
    }

    #[test]
    fn tags_crc_token() {
        let record = reference()
            .parse("[SubsPlease] Attack on Titan - 01 [1080p] [A1B2C3D4].mkv")
            .unwrap();
        assert_eq!(record.crc32.as_deref(), Some("A1B2C3D4"));
        assert_eq!(record.episode, Some(EpisodeSpec::Single(1)));
    }

    #[test]
    fn parsing_is_deterministic() {
        let tagger = reference();
        let input = "[SubsPlease] Attack on Titan - 01 [1080p].mkv";
        let a = tagger.parse(input).unwrap();
        let b = tagger.parse(input).unwrap();
        assert_eq!(a, b);
    }
}
