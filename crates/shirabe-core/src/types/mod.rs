//! Result types shared by every parsing backend.

mod episode;
mod media;
mod record;

pub use episode::EpisodeSpec;
pub use media::{AudioCodec, MediaSource, ParseMode, Resolution, VideoCodec};
pub use record::ParsedRecord;
