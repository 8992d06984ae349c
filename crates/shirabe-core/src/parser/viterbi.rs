//! # Viterbi Decoding
//!
//! Exact maximum-score path decoding over a sequence of per-token emission
//! score vectors and a dense label-transition matrix. Runs in `O(N * L^2)`
//! for `N` tokens and `L` labels.
//!
//! Ties are broken toward the smallest label index: a candidate only
//! replaces the incumbent when its score is strictly greater, and
//! candidates are scanned in ascending index order. Decoding is therefore
//! fully deterministic.

use crate::error::{Result, ShirabeError};

/// Decoder fixed to a label-set size at construction.
#[derive(Debug, Clone)]
pub struct ViterbiDecoder {
    num_labels: usize,
}

impl ViterbiDecoder {
    pub fn new(num_labels: usize) -> Self {
        Self { num_labels }
    }

    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    /// Decode the best label index per token.
    ///
    /// `emissions[t][l]` is the score for label `l` at token `t`;
    /// `transition[a][b]` the score for label `b` following label `a`.
    /// An empty emission sequence decodes to an empty path.
    pub fn decode(&self, emissions: &[Vec<f32>], transition: &[Vec<f32>]) -> Result<Vec<usize>> {
        let l = self.num_labels;
        if emissions.is_empty() {
            return Ok(Vec::new());
        }
        for (t, row) in emissions.iter().enumerate() {
            if row.len() != l {
                return Err(ShirabeError::Decode(format!(
                    "emission row {} has {} scores, expected {}",
                    t,
                    row.len(),
                    l
                )));
            }
        }
        if transition.len() != l || transition.iter().any(|row| row.len() != l) {
            return Err(ShirabeError::Decode(format!(
                "transition matrix must be {l}x{l}"
            )));
        }

        let n = emissions.len();
        // score[t][l]: best path score ending at token t with label l.
        // back[t][l]: predecessor label on that path.
        let mut score = vec![vec![f32::NEG_INFINITY; l]; n];
        let mut back = vec![vec![0usize; l]; n];

        score[0].copy_from_slice(&emissions[0]);

        for t in 1..n {
            for cur in 0..l {
                let mut best_prev = 0usize;
                let mut best_score = f32::NEG_INFINITY;
                for prev in 0..l {
                    let s = score[t - 1][prev] + transition[prev][cur];
                    if s > best_score {
                        best_score = s;
                        best_prev = prev;
                    }
                }
                score[t][cur] = best_score + emissions[t][cur];
                back[t][cur] = best_prev;
            }
        }

        let mut last = 0usize;
        let mut best_final = f32::NEG_INFINITY;
        for (label, &s) in score[n - 1].iter().enumerate() {
            if s > best_final {
                best_final = s;
                last = label;
            }
        }

        let mut path = vec![0usize; n];
        path[n - 1] = last;
        for t in (1..n).rev() {
            path[t - 1] = back[t][path[t]];
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_transition(l: usize) -> Vec<Vec<f32>> {
        vec![vec![0.0; l]; l]
    }

    #[test]
    fn empty_sequence_decodes_empty() {
        let decoder = ViterbiDecoder::new(3);
        let path = decoder.decode(&[], &uniform_transition(3)).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn single_token_picks_max_emission() {
        let decoder = ViterbiDecoder::new(3);
        let path = decoder
            .decode(&[vec![0.1, 2.0, 0.5]], &uniform_transition(3))
            .unwrap();
        assert_eq!(path, vec![1]);
    }

    #[test]
    fn ties_break_to_smallest_index() {
        let decoder = ViterbiDecoder::new(3);
        let path = decoder
            .decode(&[vec![1.0, 1.0, 1.0], vec![1.0, 1.0, 1.0]], &uniform_transition(3))
            .unwrap();
        assert_eq!(path, vec![0, 0]);
    }

    #[test]
    fn transition_overrides_greedy_emission() {
        // Greedy would pick label 1 at t=0, but the transition out of
        // label 0 is worth more than the emission difference.
        let decoder = ViterbiDecoder::new(2);
        let emissions = vec![vec![1.0, 1.5], vec![0.0, 0.0]];
        let transition = vec![vec![2.0, 2.0], vec![0.0, 0.0]];
        let path = decoder.decode(&emissions, &transition).unwrap();
        assert_eq!(path, vec![0, 0]);
    }

    #[test]
    fn rejects_bad_emission_width() {
        let decoder = ViterbiDecoder::new(3);
        let err = decoder
            .decode(&[vec![0.0, 0.0]], &uniform_transition(3))
            .unwrap_err();
        assert!(matches!(err, ShirabeError::Decode(_)));
    }

    #[test]
    fn rejects_bad_transition_shape() {
        let decoder = ViterbiDecoder::new(2);
        let err = decoder
            .decode(&[vec![0.0, 0.0]], &[vec![0.0, 0.0]])
            .unwrap_err();
        assert!(matches!(err, ShirabeError::Decode(_)));
    }

    /// Brute-force check: enumerate every path for small inputs and
    /// confirm the decoder returns the highest-scoring one. Tie-breaking
    /// picks the smallest label index per step working backward from the
    /// final token, so exact ties compare on the reversed path.
    #[test]
    fn matches_brute_force_on_small_inputs() {
        let l = 3;
        let decoder = ViterbiDecoder::new(l);
        let emissions = vec![
            vec![0.3, 0.1, 0.2],
            vec![0.0, 0.4, 0.4],
            vec![0.2, 0.2, 0.5],
            vec![0.1, 0.3, 0.1],
        ];
        let transition = vec![
            vec![0.5, -0.2, 0.0],
            vec![0.0, 0.5, -0.1],
            vec![-0.3, 0.2, 0.4],
        ];

        let n = emissions.len();
        let mut best_path = Vec::new();
        let mut best_score = f32::NEG_INFINITY;
        for mut code in 0..l.pow(n as u32) {
            let mut path = Vec::with_capacity(n);
            for _ in 0..n {
                path.push(code % l);
                code /= l;
            }
            let mut s = emissions[0][path[0]];
            for t in 1..n {
                s += transition[path[t - 1]][path[t]] + emissions[t][path[t]];
            }
            let rev_smaller = path.iter().rev().lt(best_path.iter().rev());
            if s > best_score || (s == best_score && rev_smaller) {
                best_score = s;
                best_path = path;
            }
        }

        let decoded = decoder.decode(&emissions, &transition).unwrap();
        assert_eq!(decoded, best_path);
    }
}
