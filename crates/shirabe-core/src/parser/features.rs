//! # Token Feature Extraction
//!
//! Derives the fixed-order numeric feature vector consumed by the emission
//! scorer. The predicates are part of the model contract: a weight artifact
//! is trained against these exact definitions, so changing any of them (or
//! their order) silently breaks numeric compatibility.

/// Number of features per token.
pub const NUM_FEATURES: usize = 9;

/// Feature vector indices, in artifact order.
pub mod idx {
    pub const IS_ALL_CAPS: usize = 0;
    pub const HAS_BRACKET_START: usize = 1;
    pub const HAS_BRACKET_END: usize = 2;
    pub const IS_EPISODE_PATTERN: usize = 3;
    pub const IS_QUALITY_PATTERN: usize = 4;
    pub const HAS_DIGIT: usize = 5;
    pub const LONG_TOKEN: usize = 6;
    pub const PREV_IS_BRACKET_START: usize = 7;
    pub const NEXT_IS_BRACKET_START: usize = 8;
}

/// Extract the feature vector for `token` with its neighbors in the
/// significant-token sequence (`None` at sequence edges).
pub fn extract(token: &str, prev: Option<&str>, next: Option<&str>) -> [f32; NUM_FEATURES] {
    let lower = token.to_lowercase();
    let char_count = token.chars().count();

    let mut f = [0.0f32; NUM_FEATURES];
    f[idx::IS_ALL_CAPS] = bit(
        char_count > 1
            && token
                .chars()
                .filter(|c| c.is_alphabetic())
                .all(|c| c.is_uppercase()),
    );
    f[idx::HAS_BRACKET_START] = bit(token.starts_with('[') || token.starts_with('('));
    f[idx::HAS_BRACKET_END] = bit(token.ends_with(']') || token.ends_with(')'));
    f[idx::IS_EPISODE_PATTERN] = bit(
        lower.contains("e0")
            || lower.contains("s0")
            || (!token.is_empty()
                && char_count <= 2
                && token.chars().all(|c| c.is_ascii_digit())),
    );
    f[idx::IS_QUALITY_PATTERN] = bit(
        lower.contains("720p")
            || lower.contains("1080p")
            || lower.contains("480p")
            || lower == "bd"
            || lower == "web",
    );
    f[idx::HAS_DIGIT] = bit(token.chars().any(|c| c.is_ascii_digit()));
    f[idx::LONG_TOKEN] = bit(char_count > 3);
    f[idx::PREV_IS_BRACKET_START] =
        bit(prev.is_some_and(|p| p.starts_with('[') || p.starts_with('(')));
    f[idx::NEXT_IS_BRACKET_START] =
        bit(next.is_some_and(|n| n.starts_with('[') || n.starts_with('(')));
    f
}

fn bit(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}
