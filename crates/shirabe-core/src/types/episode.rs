//! Episode numbering for a parsed release.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Episode number(s) carried by a filename.
///
/// A contiguous range in the source text (`"01-03"`) is expanded into
/// `Multi` with every member present, so `Multi` always enumerates the
/// full set in ascending order.
///
/// Serializes as its display form, `"Single(n)"` or `"Multi(n1,n2,...)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeSpec {
    /// A single episode number.
    Single(u32),
    /// Several episode numbers, deduplicated and sorted.
    Multi(BTreeSet<u32>),
}

impl EpisodeSpec {
    /// Smallest episode number covered.
    pub fn first(&self) -> Option<u32> {
        match self {
            Self::Single(n) => Some(*n),
            Self::Multi(set) => set.iter().next().copied(),
        }
    }

    /// Number of episodes covered.
    pub fn count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(set) => set.len(),
        }
    }
}

impl fmt::Display for EpisodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(n) => write!(f, "Single({n})"),
            Self::Multi(set) => {
                write!(f, "Multi(")?;
                for (i, n) in set.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{n}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl FromStr for EpisodeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = |prefix: &str| {
            s.strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(')'))
        };
        if let Some(body) = inner("Single(") {
            let n = body
                .parse()
                .map_err(|_| format!("bad episode number {body:?}"))?;
            return Ok(Self::Single(n));
        }
        if let Some(body) = inner("Multi(") {
            let set = body
                .split(',')
                .map(|part| {
                    part.trim()
                        .parse()
                        .map_err(|_| format!("bad episode number {part:?}"))
                })
                .collect::<Result<BTreeSet<u32>, _>>()?;
            if set.is_empty() {
                return Err("empty episode set".to_string());
            }
            return Ok(Self::Multi(set));
        }
        Err(format!("unrecognized episode spec {s:?}"))
    }
}

impl Serialize for EpisodeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EpisodeSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
