//! Greedy suffix-prefix fragment assembly
//!
//! Fragments are merged strictly in input order. Each fragment is joined at
//! the longest prefix that matches a suffix of the sequence assembled so far.
//! A fragment never overlaps by its full length, so every non-empty fragment
//! extends the assembly by at least one base.

use super::{AnalysisError, AnalysisResult};

/// Length of the longest proper prefix of `fragment` that is also a suffix
/// of `assembled`. Zero when nothing overlaps.
pub fn overlap_length(assembled: &[u8], fragment: &[u8]) -> usize {
    let max_overlap = fragment.len().saturating_sub(1).min(assembled.len());
    (1..=max_overlap)
        .rev()
        .find(|&len| assembled.ends_with(&fragment[..len]))
        .unwrap_or(0)
}

/// Assemble an ordered list of fragments into one sequence.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidArgument`] if `fragments` is empty.
pub fn assemble<S: AsRef<[u8]>>(fragments: &[S]) -> AnalysisResult<Vec<u8>> {
    let (first, rest) = fragments.split_first().ok_or_else(|| {
        AnalysisError::InvalidArgument("assembly requires at least one fragment".to_string())
    })?;

    let mut assembled = first.as_ref().to_vec();
    for (i, fragment) in rest.iter().enumerate() {
        let fragment = fragment.as_ref();
        let overlap = overlap_length(&assembled, fragment);
        log::debug!(
            "fragment {} ({} bp) overlaps assembly by {} bp",
            i + 1,
            fragment.len(),
            overlap
        );
        assembled.extend_from_slice(&fragment[overlap..]);
    }

    Ok(assembled)
}
