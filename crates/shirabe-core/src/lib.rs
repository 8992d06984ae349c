//! # Shirabe Core
//!
//! Structured metadata extraction from media release filenames. A linear
//! CRF tagger (tokenizer, feature extractor, Viterbi decoder, span
//! resolver) does the heavy lifting; a regex heuristic engine backs it up
//! when no trained weights are available or confidence is low.
//!
//! ## Quick Start
//!
//! ```rust
//! use shirabe_core::parser::Parser;
//!
//! let parser = Parser::with_defaults().unwrap();
//! let record = parser
//!     .parse("[SubsPlease] Attack on Titan - 01 [1080p].mkv")
//!     .unwrap();
//!
//! assert_eq!(record.title.as_deref(), Some("Attack on Titan"));
//! assert_eq!(record.group.as_deref(), Some("SubsPlease"));
//! ```
pub mod error;
pub mod model;
pub mod parser;
pub mod types;

// Re-export primary API
pub use error::{Result, ShirabeError};
pub use model::ModelWeights;
pub use parser::{
    CrfTagger, HeuristicParser, Label, ParseMode, Parser, ParserConfig, TaggedToken, Tokenizer,
    ViterbiDecoder,
};
pub use types::{
    AudioCodec, EpisodeSpec, MediaSource, ParsedRecord, Resolution, VideoCodec,
};
