//! Repeat counting and palindrome enumeration over a single sequence
//!
//! Matching is case-sensitive; no normalization is applied here.

use std::collections::BTreeMap;

use super::utils::{is_palindrome, is_reverse_complement_palindrome};
use super::{AnalysisError, AnalysisResult};

/// Substrings of a fixed length mapped to how often they occur (always > 1)
pub type RepeatTable = BTreeMap<Vec<u8>, usize>;

/// A palindromic region `[start, end)` of a scanned sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palindrome {
    pub start: usize,
    pub end: usize,
    pub sequence: Vec<u8>,
}

impl Palindrome {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Count every window of `length` and keep those seen at least twice.
///
/// A window longer than the sequence yields an empty table.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidArgument`] if `length` is zero.
pub fn find_repeats(sequence: &[u8], length: usize) -> AnalysisResult<RepeatTable> {
    if length == 0 {
        return Err(AnalysisError::InvalidArgument(
            "repeat window length must be positive".to_string(),
        ));
    }

    let mut counts: BTreeMap<&[u8], usize> = BTreeMap::new();
    for window in sequence.windows(length) {
        *counts.entry(window).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(window, count)| (window.to_vec(), count))
        .collect())
}

/// Enumerate every substring of at least `min_len` that equals its own reversal.
///
/// Results are ordered by start, then end, ascending. Nested and overlapping
/// regions are all reported.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidArgument`] if `min_len` is zero.
pub fn find_palindromes(sequence: &[u8], min_len: usize) -> AnalysisResult<Vec<Palindrome>> {
    scan_regions(sequence, min_len, is_palindrome)
}

/// Enumerate every substring of at least `min_len` that equals its own
/// reverse complement (restriction-site style palindromes such as `GAATTC`).
///
/// Ordering and error behaviour match [`find_palindromes`].
pub fn find_reverse_complement_palindromes(
    sequence: &[u8],
    min_len: usize,
) -> AnalysisResult<Vec<Palindrome>> {
    scan_regions(sequence, min_len, is_reverse_complement_palindrome)
}

fn scan_regions(
    sequence: &[u8],
    min_len: usize,
    predicate: fn(&[u8]) -> bool,
) -> AnalysisResult<Vec<Palindrome>> {
    if min_len == 0 {
        return Err(AnalysisError::InvalidArgument(
            "minimum palindrome length must be positive".to_string(),
        ));
    }

    let n = sequence.len();
    let mut hits = Vec::new();
    for start in 0..n {
        for end in (start + min_len)..=n {
            let region = &sequence[start..end];
            if predicate(region) {
                hits.push(Palindrome {
                    start,
                    end,
                    sequence: region.to_vec(),
                });
            }
        }
    }

    log::debug!("found {} palindromic regions (min length {})", hits.len(), min_len);
    Ok(hits)
}
