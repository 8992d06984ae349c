//! # Weight Artifacts
//!
//! Linear-CRF weights are distributed as a JSON document holding the label
//! table, per-label bias, per-label feature weights, and the dense label
//! transition matrix. Everything is validated at load time so a malformed
//! or mismatched artifact fails fast instead of producing silent garbage.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ShirabeError};
use crate::parser::features::NUM_FEATURES;
use crate::parser::labels::Label;

/// A complete set of tagger weights.
///
/// The `labels` table pins the artifact to a label ordering; `validate`
/// rejects any artifact whose table differs from the one this build was
/// compiled against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelWeights {
    /// Label names in index order. Must match [`Label::all`] exactly.
    pub labels: Vec<String>,
    /// Per-label emission bias, length `L`.
    pub bias: Vec<f32>,
    /// Per-label feature weights, `L` rows of [`NUM_FEATURES`] columns.
    pub feature_weights: Vec<Vec<f32>>,
    /// Transition scores, `L x L`, indexed `[from][to]`.
    pub transition: Vec<Vec<f32>>,
}

impl ModelWeights {
    /// Parse and validate an artifact from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let weights: Self = serde_json::from_str(json)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Load and validate an artifact from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading weight artifact");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Check the label table and every dimension.
    pub fn validate(&self) -> Result<()> {
        let expected = Label::all();
        if self.labels.len() != expected.len() {
            return Err(ShirabeError::ModelLoad(format!(
                "label table has {} entries, expected {}",
                self.labels.len(),
                expected.len()
            )));
        }
        for (i, (found, want)) in self.labels.iter().zip(expected).enumerate() {
            let want = want.to_string();
            if *found != want {
                return Err(ShirabeError::ModelLoad(format!(
                    "label {i} is {found:?}, expected {want:?}"
                )));
            }
        }

        let l = self.labels.len();
        if self.bias.len() != l {
            return Err(ShirabeError::ModelLoad(format!(
                "bias has {} entries, expected {l}",
                self.bias.len()
            )));
        }
        if self.feature_weights.len() != l {
            return Err(ShirabeError::ModelLoad(format!(
                "feature_weights has {} rows, expected {l}",
                self.feature_weights.len()
            )));
        }
        for (i, row) in self.feature_weights.iter().enumerate() {
            if row.len() != NUM_FEATURES {
                return Err(ShirabeError::ModelLoad(format!(
                    "feature_weights row {i} has {} columns, expected {NUM_FEATURES}",
                    row.len()
                )));
            }
        }
        if self.transition.len() != l || self.transition.iter().any(|row| row.len() != l) {
            return Err(ShirabeError::ModelLoad(format!(
                "transition matrix must be {l}x{l}"
            )));
        }
        Ok(())
    }

    /// Score every label for one token's feature vector.
    pub fn emissions(&self, features: &[f32; NUM_FEATURES]) -> Vec<f32> {
        self.feature_weights
            .iter()
            .zip(&self.bias)
            .map(|(row, bias)| {
                bias + row
                    .iter()
                    .zip(features)
                    .map(|(w, f)| w * f)
                    .sum::<f32>()
            })
            .collect()
    }

    /// The built-in hand-tuned reference weights.
    ///
    /// These cover common release-name layouts (bracketed fansub style and
    /// dot-separated scene style) and exist so the tagger works out of the
    /// box; a trained artifact loaded with [`from_path`](Self::from_path)
    /// replaces them wholesale.
    pub fn reference() -> Self {
        let labels: Vec<String> = Label::all().iter().map(|l| l.to_string()).collect();
        let l = labels.len();

        // Feature column order: is_all_caps, has_bracket_start,
        // has_bracket_end, is_episode_pattern, is_quality_pattern,
        // has_digit, long_token, prev_is_bracket_start,
        // next_is_bracket_start.
        let mut bias = vec![0.0f32; l];
        let mut fw = vec![vec![0.0f32; NUM_FEATURES]; l];
        let set = |label: Label, row: [f32; NUM_FEATURES], b: f32, fw: &mut Vec<Vec<f32>>, bias: &mut Vec<f32>| {
            fw[label.index()] = row.to_vec();
            bias[label.index()] = b;
        };
        use Label::*;
        set(BeginTitle, [0.5, -2.0, -2.0, -3.0, -3.0, 0.0, 1.75, 1.5, 0.0], -0.5, &mut fw, &mut bias);
        set(InsideTitle, [0.0, -2.0, -2.0, -4.0, -3.0, -1.0, 1.0, 0.0, 0.0], -1.0, &mut fw, &mut bias);
        set(BeginGroup, [2.5, 3.0, 0.0, -2.0, -2.0, -3.0, 0.0, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(InsideGroup, [0.0, 0.0, 0.0, -2.0, -2.0, 0.0, 0.5, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(BeginEpisode, [0.0, -1.0, 0.0, 4.0, -2.0, 1.0, -1.0, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(InsideEpisode, [0.0, 0.0, 0.0, 4.0, -2.0, 1.0, -1.0, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(BeginSeason, [1.0, 0.0, 0.0, 0.0, -2.0, 1.0, -1.0, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(InsideSeason, [0.0, 0.0, 0.0, 0.0, -2.0, 1.0, -1.0, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(Resolution, [0.0, 0.0, 0.0, 0.0, 3.5, 1.5, 0.0, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(VCodec, [0.0, 0.0, 0.0, -1.0, -1.0, 1.5, 0.25, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(ACodec, [1.0, 0.0, 0.0, -1.0, -1.0, 0.0, 0.5, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(Source, [0.5, 0.0, 0.0, -1.0, 0.0, 0.0, 1.0, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(Year, [0.5, 0.0, 0.0, -2.0, -2.0, 2.5, 0.5, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(Crc32, [0.5, 1.0, 1.0, -1.0, -1.0, 2.5, 0.0, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(Extension, [0.0, -2.0, -2.0, -1.0, -1.0, 0.5, -1.0, 0.0, 0.0], 1.5, &mut fw, &mut bias);
        set(Version, [0.0, 0.0, 0.0, 0.0, -1.0, 1.5, -1.0, 0.0, 0.0], 0.0, &mut fw, &mut bias);
        set(Outside, [-0.5, 0.0, 2.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0], 0.5, &mut fw, &mut bias);

        let mut tr = vec![vec![0.0f32; l]; l];
        let t = |from: Label, to: Label, score: f32, tr: &mut Vec<Vec<f32>>| {
            tr[from.index()][to.index()] = score;
        };

        t(BeginTitle, BeginTitle, -2.0, &mut tr);
        t(BeginTitle, InsideTitle, 3.0, &mut tr);
        t(BeginTitle, InsideGroup, -4.0, &mut tr);
        t(BeginTitle, BeginEpisode, -3.0, &mut tr);
        t(BeginTitle, InsideEpisode, -4.0, &mut tr);
        t(BeginTitle, InsideSeason, -4.0, &mut tr);
        t(BeginTitle, VCodec, -2.0, &mut tr);
        t(BeginTitle, Source, -2.0, &mut tr);
        t(BeginTitle, Extension, -3.0, &mut tr);
        t(BeginTitle, Outside, 1.0, &mut tr);

        t(InsideTitle, BeginTitle, -2.0, &mut tr);
        t(InsideTitle, InsideTitle, 2.25, &mut tr);
        t(InsideTitle, InsideGroup, -4.0, &mut tr);
        t(InsideTitle, BeginEpisode, -3.0, &mut tr);
        t(InsideTitle, InsideEpisode, -4.0, &mut tr);
        t(InsideTitle, InsideSeason, -4.0, &mut tr);
        t(InsideTitle, VCodec, -2.0, &mut tr);
        t(InsideTitle, Source, -2.0, &mut tr);
        t(InsideTitle, Year, 0.75, &mut tr);
        t(InsideTitle, Extension, -3.0, &mut tr);
        t(InsideTitle, Outside, 1.0, &mut tr);

        t(BeginGroup, BeginTitle, 2.0, &mut tr);
        t(BeginGroup, InsideTitle, -4.0, &mut tr);
        t(BeginGroup, BeginGroup, -2.0, &mut tr);
        t(BeginGroup, InsideGroup, 0.25, &mut tr);
        t(BeginGroup, InsideEpisode, -4.0, &mut tr);
        t(BeginGroup, InsideSeason, -4.0, &mut tr);
        t(BeginGroup, Extension, -1.0, &mut tr);
        t(BeginGroup, Outside, 1.0, &mut tr);

        t(InsideGroup, InsideTitle, -4.0, &mut tr);
        t(InsideGroup, BeginGroup, -2.0, &mut tr);
        t(InsideGroup, InsideGroup, 0.25, &mut tr);
        t(InsideGroup, InsideEpisode, -4.0, &mut tr);
        t(InsideGroup, InsideSeason, -4.0, &mut tr);

        t(BeginEpisode, InsideTitle, -4.0, &mut tr);
        t(BeginEpisode, InsideGroup, -4.0, &mut tr);
        t(BeginEpisode, BeginEpisode, -2.0, &mut tr);
        t(BeginEpisode, InsideEpisode, 2.0, &mut tr);
        t(BeginEpisode, InsideSeason, -4.0, &mut tr);
        t(BeginEpisode, Outside, 1.0, &mut tr);

        t(InsideEpisode, InsideTitle, -4.0, &mut tr);
        t(InsideEpisode, InsideGroup, -4.0, &mut tr);
        t(InsideEpisode, BeginEpisode, -2.0, &mut tr);
        t(InsideEpisode, InsideEpisode, 2.0, &mut tr);
        t(InsideEpisode, InsideSeason, -4.0, &mut tr);
        t(InsideEpisode, Outside, 1.0, &mut tr);

        t(BeginSeason, InsideTitle, -4.0, &mut tr);
        t(BeginSeason, InsideGroup, -4.0, &mut tr);
        t(BeginSeason, InsideEpisode, -4.0, &mut tr);
        t(BeginSeason, BeginSeason, -2.0, &mut tr);
        t(BeginSeason, InsideSeason, 1.5, &mut tr);

        t(InsideSeason, InsideTitle, -4.0, &mut tr);
        t(InsideSeason, InsideGroup, -4.0, &mut tr);
        t(InsideSeason, InsideEpisode, -4.0, &mut tr);
        t(InsideSeason, BeginSeason, -2.0, &mut tr);
        t(InsideSeason, InsideSeason, 1.5, &mut tr);

        for flat in [
            Resolution,
            VCodec,
            ACodec,
            Source,
            Year,
            Crc32,
            Version,
        ] {
            t(flat, BeginTitle, -3.0, &mut tr);
            t(flat, InsideTitle, -4.0, &mut tr);
            t(flat, InsideGroup, -4.0, &mut tr);
            t(flat, InsideEpisode, -4.0, &mut tr);
            t(flat, InsideSeason, -4.0, &mut tr);
            t(flat, Extension, -1.0, &mut tr);
            t(flat, Outside, 1.0, &mut tr);
        }

        t(Extension, BeginTitle, -3.0, &mut tr);
        t(Extension, InsideTitle, -4.0, &mut tr);
        t(Extension, InsideGroup, -4.0, &mut tr);
        t(Extension, InsideEpisode, -4.0, &mut tr);
        t(Extension, InsideSeason, -4.0, &mut tr);

        t(Outside, InsideTitle, -4.0, &mut tr);
        t(Outside, BeginGroup, 0.75, &mut tr);
        t(Outside, InsideGroup, -4.0, &mut tr);
        t(Outside, BeginEpisode, 1.0, &mut tr);
        t(Outside, InsideEpisode, -4.0, &mut tr);
        t(Outside, BeginSeason, 0.5, &mut tr);
        t(Outside, InsideSeason, -4.0, &mut tr);
        t(Outside, Resolution, 1.0, &mut tr);
        t(Outside, VCodec, 2.0, &mut tr);
        t(Outside, ACodec, 1.0, &mut tr);
        t(Outside, Source, 1.5, &mut tr);
        t(Outside, Year, -1.0, &mut tr);
        t(Outside, Extension, 1.0, &mut tr);
        t(Outside, Version, 0.5, &mut tr);
        t(Outside, Outside, 1.0, &mut tr);

        Self {
            labels,
            bias,
            feature_weights: fw,
            transition: tr,
        }
    }
}
