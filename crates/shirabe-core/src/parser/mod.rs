pub mod crf;
pub mod features;
pub mod heuristic;
pub mod labels;
pub mod resolver;
pub mod tokenizer;
pub mod unified;
pub mod viterbi;

pub use crf::CrfTagger;
pub use heuristic::HeuristicParser;
pub use labels::{EntityType, Label};
pub use resolver::TaggedToken;
pub use tokenizer::{Token, TokenKind, Tokenizer};
pub use unified::{parse, parse_with_mode, Parser, ParserConfig};

pub use crate::types::ParseMode;
pub use viterbi::ViterbiDecoder;
