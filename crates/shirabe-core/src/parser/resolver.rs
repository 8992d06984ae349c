//! # Label Resolution
//!
//! Turns a decoded `(token, label)` sequence into a [`ParsedRecord`].
//! BIO spans are grouped into field text, flat labels attach to their
//! single carrier token, and every field goes through its own
//! normalization (bracket stripping, case folding, numeric parsing).

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::parser::labels::{EntityType, Label};
use crate::parser::tokenizer::Token;
use crate::types::{
    AudioCodec, EpisodeSpec, MediaSource, ParsedRecord, Resolution, VideoCodec,
};

/// A token paired with its decoded label.
#[derive(Debug, Clone)]
pub struct TaggedToken {
    pub token: Token,
    pub label: Label,
}

/// `"01-03"` style episode ranges inside a single span.
static EPISODE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\D*(\d+)\s*[-~]\s*(\d+)\D*$").expect("valid regex"));

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// A maximal run of tokens sharing one entity type.
#[derive(Debug)]
struct Span<'a> {
    entity: EntityType,
    tokens: Vec<&'a Token>,
}

impl Span<'_> {
    /// Join token texts, reinserting one space wherever source text was
    /// discarded between neighbors (the only discarded tokens are
    /// whitespace runs, so an offset gap means whitespace).
    fn joined_text(&self) -> String {
        let mut out = String::new();
        let mut prev_end = None;
        for token in &self.tokens {
            if prev_end.is_some_and(|end| token.start > end) {
                out.push(' ');
            }
            out.push_str(&token.text);
            prev_end = Some(token.end);
        }
        out
    }
}

/// Resolve a tagged significant-token sequence into a typed record.
///
/// Duplicate evidence follows a first-occurrence-wins policy: for title,
/// group, and season the first span is kept, for flat labels only the
/// first token carrying the label is consulted, and later duplicates are
/// ignored even when that token failed to map (the field stays null).
/// Episode spans are the exception and accumulate into one
/// [`EpisodeSpec`].
pub fn resolve(tagged: &[TaggedToken]) -> ParsedRecord {
    let mut record = ParsedRecord::default();
    let mut episodes = BTreeSet::new();

    for span in collect_spans(tagged) {
        match span.entity {
            EntityType::Title => {
                if record.title.is_none() {
                    let text = span.joined_text();
                    if !text.is_empty() {
                        record.title = Some(text);
                    }
                }
            }
            EntityType::Group => {
                if record.group.is_none() {
                    let text = strip_brackets(&span.joined_text());
                    if !text.is_empty() {
                        record.group = Some(text);
                    }
                }
            }
            EntityType::Season => {
                if record.season.is_none() {
                    record.season = first_number(&span.joined_text());
                }
            }
            EntityType::Episode => {
                collect_episode_numbers(&span.joined_text(), &mut episodes);
            }
            _ => unreachable!("collect_spans only groups BIO entities"),
        }
    }

    let mut iter = episodes.into_iter();
    record.episode = match (iter.next(), iter.next()) {
        (Some(only), None) => Some(EpisodeSpec::Single(only)),
        (Some(a), Some(b)) => {
            let mut set = BTreeSet::from([a, b]);
            set.extend(iter);
            Some(EpisodeSpec::Multi(set))
        }
        _ => None,
    };

    let mut seen = [false; Label::COUNT];
    for tt in tagged {
        resolve_flat(tt, &mut seen, &mut record);
    }

    record.update_confidence();
    record
}

/// Group `B-X` starts and following `I-X` continuations into spans.
/// A bare `I-X` with no open `X` span starts one anyway; that is a
/// decoder wobble worth noticing but not an error.
fn collect_spans(tagged: &[TaggedToken]) -> Vec<Span<'_>> {
    let mut spans: Vec<Span<'_>> = Vec::new();
    let mut open: Option<EntityType> = None;

    for tt in tagged {
        let Some(entity) = tt.label.entity_type() else {
            open = None;
            continue;
        };
        if !tt.label.is_begin() && !tt.label.is_inside() {
            // Flat labels break any open span and are handled separately.
            open = None;
            continue;
        }

        let continues = tt.label.is_inside() && open == Some(entity);
        if continues {
            if let Some(span) = spans.last_mut() {
                span.tokens.push(&tt.token);
            }
        } else {
            if tt.label.is_inside() {
                debug!(token = %tt.token.text, label = %tt.label, "inside label without span start");
            }
            spans.push(Span {
                entity,
                tokens: vec![&tt.token],
            });
            open = Some(entity);
        }
    }
    spans
}

/// Attach a flat-label token to its record field. Only the first token
/// carrying each label counts; a later duplicate never fills in for one
/// that failed to map.
fn resolve_flat(tt: &TaggedToken, seen: &mut [bool; Label::COUNT], record: &mut ParsedRecord) {
    let idx = tt.label.index();
    if seen[idx] {
        return;
    }
    seen[idx] = true;

    let bare = strip_brackets(&tt.token.text);
    let lower = bare.to_lowercase();
    match tt.label {
        Label::Resolution => record.resolution = Resolution::from_token(&lower),
        Label::VCodec => record.video_codec = VideoCodec::from_token(&lower),
        Label::ACodec => record.audio_codec = AudioCodec::from_token(&lower),
        Label::Source => record.source = MediaSource::from_token(&lower),
        Label::Year => record.year = bare.parse().ok(),
        Label::Crc32 => {
            if !bare.is_empty() {
                record.crc32 = Some(bare.to_uppercase());
            }
        }
        Label::Extension => {
            if !lower.is_empty() {
                record.extension = Some(lower);
            }
        }
        Label::Version => {
            if !bare.is_empty() {
                record.version = Some(bare);
            }
        }
        _ => {}
    }
}

fn strip_brackets(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '[' | ']' | '(' | ')'))
        .collect()
}

fn first_number(s: &str) -> Option<u32> {
    DIGIT_RUN.find(s).and_then(|m| m.as_str().parse().ok())
}

/// Pull episode numbers out of one span's text. A two-ended range like
/// `"01-03"` expands to every covered number; anything else contributes
/// each digit run individually.
fn collect_episode_numbers(text: &str, out: &mut BTreeSet<u32>) {
    if let Some(caps) = EPISODE_RANGE.captures(text) {
        let lo: Option<u32> = caps[1].parse().ok();
        let hi: Option<u32> = caps[2].parse().ok();
        if let (Some(lo), Some(hi)) = (lo, hi) {
            if lo <= hi && hi - lo < 1000 {
                out.extend(lo..=hi);
                return;
            }
        }
    }
    for m in DIGIT_RUN.find_iter(text) {
        if let Ok(n) = m.as_str().parse() {
            out.insert(n);
        }
    }
}
