//! # BIO Label Set
//!
//! The tag inventory for sequence labeling of release filename components,
//! using the BIO (Begin-Inside-Outside) scheme for multi-token entities and
//! flat labels for single-token attributes.
//!
//! The integer index of each label is part of the model contract: a weight
//! artifact produced against a different ordering silently corrupts every
//! prediction without raising an error. The canonical order is the one below,
//! with `Outside` LAST at index 16. Artifact loaders must verify their label
//! table against [`Label::all`] and refuse to load on any mismatch.

use std::fmt;

/// Sequence labels for tokens in release filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    // Title entity
    BeginTitle,
    InsideTitle,
    // Group entity
    BeginGroup,
    InsideGroup,
    // Episode entity
    BeginEpisode,
    InsideEpisode,
    // Season entity
    BeginSeason,
    InsideSeason,
    // Flat labels (single token, no BIO variants)
    Resolution,
    VCodec,
    ACodec,
    Source,
    Year,
    Crc32,
    Extension,
    Version,
    // Outside (irrelevant token), canonically the last index
    Outside,
}

impl Label {
    /// Total number of distinct labels.
    pub const COUNT: usize = 17;

    /// All labels in canonical index order.
    pub fn all() -> &'static [Label] {
        &[
            Label::BeginTitle,
            Label::InsideTitle,
            Label::BeginGroup,
            Label::InsideGroup,
            Label::BeginEpisode,
            Label::InsideEpisode,
            Label::BeginSeason,
            Label::InsideSeason,
            Label::Resolution,
            Label::VCodec,
            Label::ACodec,
            Label::Source,
            Label::Year,
            Label::Crc32,
            Label::Extension,
            Label::Version,
            Label::Outside,
        ]
    }

    /// The canonical index of this label.
    pub fn index(&self) -> usize {
        match self {
            Label::BeginTitle => 0,
            Label::InsideTitle => 1,
            Label::BeginGroup => 2,
            Label::InsideGroup => 3,
            Label::BeginEpisode => 4,
            Label::InsideEpisode => 5,
            Label::BeginSeason => 6,
            Label::InsideSeason => 7,
            Label::Resolution => 8,
            Label::VCodec => 9,
            Label::ACodec => 10,
            Label::Source => 11,
            Label::Year => 12,
            Label::Crc32 => 13,
            Label::Extension => 14,
            Label::Version => 15,
            Label::Outside => 16,
        }
    }

    /// Label from canonical index.
    pub fn from_index(idx: usize) -> Option<Self> {
        Label::all().get(idx).copied()
    }

    /// Whether this is a `B-*` label.
    pub fn is_begin(&self) -> bool {
        matches!(
            self,
            Label::BeginTitle | Label::BeginGroup | Label::BeginEpisode | Label::BeginSeason
        )
    }

    /// Whether this is an `I-*` label.
    pub fn is_inside(&self) -> bool {
        matches!(
            self,
            Label::InsideTitle | Label::InsideGroup | Label::InsideEpisode | Label::InsideSeason
        )
    }

    /// The entity type this label contributes to, if any.
    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            Label::BeginTitle | Label::InsideTitle => Some(EntityType::Title),
            Label::BeginGroup | Label::InsideGroup => Some(EntityType::Group),
            Label::BeginEpisode | Label::InsideEpisode => Some(EntityType::Episode),
            Label::BeginSeason | Label::InsideSeason => Some(EntityType::Season),
            Label::Resolution => Some(EntityType::Resolution),
            Label::VCodec => Some(EntityType::VCodec),
            Label::ACodec => Some(EntityType::ACodec),
            Label::Source => Some(EntityType::Source),
            Label::Year => Some(EntityType::Year),
            Label::Crc32 => Some(EntityType::Crc32),
            Label::Extension => Some(EntityType::Extension),
            Label::Version => Some(EntityType::Version),
            Label::Outside => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Label::BeginTitle => "B-TITLE",
            Label::InsideTitle => "I-TITLE",
            Label::BeginGroup => "B-GROUP",
            Label::InsideGroup => "I-GROUP",
            Label::BeginEpisode => "B-EPISODE",
            Label::InsideEpisode => "I-EPISODE",
            Label::BeginSeason => "B-SEASON",
            Label::InsideSeason => "I-SEASON",
            Label::Resolution => "RESOLUTION",
            Label::VCodec => "VCODEC",
            Label::ACodec => "ACODEC",
            Label::Source => "SOURCE",
            Label::Year => "YEAR",
            Label::Crc32 => "CRC32",
            Label::Extension => "EXTENSION",
            Label::Version => "VERSION",
            Label::Outside => "O",
        };
        f.write_str(name)
    }
}

/// Entity types that can be extracted from filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Title,
    Group,
    Episode,
    Season,
    Resolution,
    VCodec,
    ACodec,
    Source,
    Year,
    Crc32,
    Extension,
    Version,
}
