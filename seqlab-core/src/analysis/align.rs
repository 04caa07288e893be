//! Global pairwise alignment (Needleman-Wunsch) with a linear gap penalty
//!
//! Only the optimal score is computed. No traceback is kept, so ties between
//! the diagonal, up and left moves have no observable effect.

use serde::{Deserialize, Serialize};

/// Scores used by the global aligner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringScheme {
    /// Reward for aligning two identical characters
    pub match_score: i32,
    /// Score for aligning two different characters
    pub mismatch: i32,
    /// Cost of each gap position
    pub gap: i32,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch: -1,
            gap: -2,
        }
    }
}

impl ScoringScheme {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self {
            match_score,
            mismatch,
            gap,
        }
    }

    #[inline]
    fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch
        }
    }
}

/// Global aligner bound to a scoring scheme
#[derive(Debug, Clone, Default)]
pub struct PairwiseAligner {
    scheme: ScoringScheme,
}

impl PairwiseAligner {
    pub fn new(scheme: ScoringScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &ScoringScheme {
        &self.scheme
    }

    /// Optimal global alignment score of `a` against `b`
    pub fn score(&self, a: &[u8], b: &[u8]) -> i32 {
        align(a, b, &self.scheme)
    }
}

/// Compute the optimal global alignment score between two sequences.
///
/// If either sequence is empty, the score is the other sequence's length
/// multiplied by the gap cost.
pub fn align(a: &[u8], b: &[u8], scheme: &ScoringScheme) -> i32 {
    let rows = a.len() + 1;
    let cols = b.len() + 1;
    log::trace!("global alignment table {}x{}", rows, cols);

    let mut table = vec![0i32; rows * cols];
    let idx = |i: usize, j: usize| i * cols + j;

    for i in 0..rows {
        table[idx(i, 0)] = i as i32 * scheme.gap;
    }
    for j in 0..cols {
        table[idx(0, j)] = j as i32 * scheme.gap;
    }

    for i in 1..rows {
        for j in 1..cols {
            let diag = table[idx(i - 1, j - 1)] + scheme.substitution(a[i - 1], b[j - 1]);
            let up = table[idx(i - 1, j)] + scheme.gap;
            let left = table[idx(i, j - 1)] + scheme.gap;
            table[idx(i, j)] = diag.max(up).max(left);
        }
    }

    table[idx(rows - 1, cols - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme() {
        let scheme = ScoringScheme::default();
        assert_eq!(scheme, ScoringScheme::new(1, -1, -2));
    }

    #[test]
    fn test_align_identical() {
        let scheme = ScoringScheme::default();
        assert_eq!(align(b"ATGCTAGC", b"ATGCTAGC", &scheme), 8);
    }

    #[test]
    fn test_align_single_mismatch() {
        // ATGCTAGC vs ATGCGAGC: 7 matches, 1 mismatch
        let scheme = ScoringScheme::default();
        assert_eq!(align(b"ATGCTAGC", b"ATGCGAGC", &scheme), 6);
    }

    #[test]
    fn test_align_with_gap() {
        // ATGC vs ATC: best is 3 matches and one gap
        let scheme = ScoringScheme::default();
        assert_eq!(align(b"ATGC", b"ATC", &scheme), 1);
    }

    #[test]
    fn test_align_empty_inputs() {
        let scheme = ScoringScheme::default();
        assert_eq!(align(b"", b"", &scheme), 0);
        assert_eq!(align(b"ATG", b"", &scheme), -6);
        assert_eq!(align(b"", b"ATGCA", &scheme), -10);
    }

    #[test]
    fn test_aligner_uses_custom_scheme() {
        let aligner = PairwiseAligner::new(ScoringScheme::new(2, -3, -1));
        // AAA vs AAT: two matches plus one mismatch (-3) or two gaps (-2)
        assert_eq!(aligner.score(b"AAA", b"AAT"), 2);
        assert_eq!(aligner.scheme().match_score, 2);
    }
}
