//! Mismatch-proportion evolutionary distance
//!
//! A simplified proxy rather than a phylogenetic model: the fraction of
//! mismatching positions over the overlapping prefix of the two sequences.

use super::utils::matching_positions;
use super::{AnalysisError, AnalysisResult};

/// Fraction of mismatches over the first `min(|a|, |b|)` positions.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if either sequence is empty.
pub fn evolutionary_distance(a: &[u8], b: &[u8]) -> AnalysisResult<f64> {
    let length = a.len().min(b.len());
    if length == 0 {
        return Err(AnalysisError::EmptyInput(
            "evolutionary distance requires two non-empty sequences".to_string(),
        ));
    }
    let mismatches = length - matching_positions(a, b);
    Ok(mismatches as f64 / length as f64)
}
