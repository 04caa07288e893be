//! All-pairs similarity over a named collection of sequences

use serde::{Deserialize, Serialize};

use super::utils::{matching_positions, round_to};
use super::{AnalysisError, AnalysisResult};

/// Similarity score for one unordered pair of named sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEntry {
    pub first: String,
    pub second: String,
    /// Position-wise identity in [0, 1], rounded to 3 decimals
    pub score: f64,
}

/// One entry per combination of names, in input combination order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    pub entries: Vec<SimilarityEntry>,
}

impl SimilarityMatrix {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the score for a pair regardless of argument order
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| (e.first == a && e.second == b) || (e.first == b && e.second == a))
            .map(|e| e.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimilarityEntry> {
        self.entries.iter()
    }
}

/// Unrounded identity over the first `min(|a|, |b|)` positions.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if either sequence is empty.
pub fn pairwise_identity(a: &[u8], b: &[u8]) -> AnalysisResult<f64> {
    let length = a.len().min(b.len());
    if length == 0 {
        return Err(AnalysisError::EmptyInput(
            "similarity requires two non-empty sequences".to_string(),
        ));
    }
    Ok(matching_positions(a, b) as f64 / length as f64)
}

/// Build the similarity matrix for every pair `(i, j)` with `i < j` in input order.
///
/// Fewer than two entries produce an empty matrix.
///
/// A name given more than once keeps its first position and its last
/// sequence, so each unordered pair of names is scored once.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] naming the pair if any sequence in a
/// pair is empty. No partial matrix is returned.
pub fn similarity_matrix<N, S>(named: &[(N, S)]) -> AnalysisResult<SimilarityMatrix>
where
    N: AsRef<str>,
    S: AsRef<[u8]>,
{
    let named = unique_names(named);
    let mut entries = Vec::with_capacity(named.len() * named.len().saturating_sub(1) / 2);

    for (i, &(name_a, seq_a)) in named.iter().enumerate() {
        for &(name_b, seq_b) in &named[i + 1..] {
            let identity = pairwise_identity(seq_a, seq_b).map_err(|_| {
                AnalysisError::EmptyInput(format!(
                    "cannot score pair ({}, {}): empty sequence",
                    name_a, name_b
                ))
            })?;
            entries.push(SimilarityEntry {
                first: name_a.to_string(),
                second: name_b.to_string(),
                score: round_to(identity, 3),
            });
        }
    }

    Ok(SimilarityMatrix { entries })
}

fn unique_names<N, S>(named: &[(N, S)]) -> Vec<(&str, &[u8])>
where
    N: AsRef<str>,
    S: AsRef<[u8]>,
{
    let mut unique: Vec<(&str, &[u8])> = Vec::with_capacity(named.len());
    for (name, sequence) in named {
        let (name, sequence) = (name.as_ref(), sequence.as_ref());
        match unique.iter_mut().find(|(seen, _)| *seen == name) {
            Some(slot) => {
                log::debug!("duplicate name {} replaces its earlier sequence", name);
                slot.1 = sequence;
            }
            None => unique.push((name, sequence)),
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_set() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Seq1", "ATGCTAGC"),
            ("Seq2", "ATGCGAGC"),
            ("Seq3", "TTGCTAGT"),
        ]
    }

    #[test]
    fn test_similarity_reference_set() {
        let matrix = similarity_matrix(&reference_set()).unwrap();
        assert_eq!(matrix.len(), 3);

        let pairs: Vec<(&str, &str)> = matrix
            .iter()
            .map(|e| (e.first.as_str(), e.second.as_str()))
            .collect();
        assert_eq!(pairs, vec![("Seq1", "Seq2"), ("Seq1", "Seq3"), ("Seq2", "Seq3")]);

        assert_eq!(matrix.get("Seq1", "Seq2"), Some(0.875));
        assert_eq!(matrix.get("Seq3", "Seq1"), Some(0.75));
        assert_eq!(matrix.get("Seq2", "Seq3"), Some(0.625));
        assert!(matrix.iter().all(|e| (0.0..=1.0).contains(&e.score)));
    }

    #[test]
    fn test_similarity_rounds_to_three_digits() {
        let matrix = similarity_matrix(&[("a", "AAA"), ("b", "AAT")]).unwrap();
        assert_eq!(matrix.get("a", "b"), Some(0.667));
    }

    #[test]
    fn test_similarity_needs_two_entries() {
        let none: [(&str, &str); 0] = [];
        assert!(similarity_matrix(&none).unwrap().is_empty());
        assert!(similarity_matrix(&[("only", "ATGC")]).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_names_keep_last_sequence() {
        let matrix = similarity_matrix(&[("a", "ATGC"), ("a", "ATGA"), ("b", "ATTT")]).unwrap();
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.entries[0].first, "a");
        assert_eq!(matrix.entries[0].second, "b");
        assert_eq!(matrix.get("a", "b"), Some(0.5));
    }

    #[test]
    fn test_similarity_empty_sequence_fails() {
        let result = similarity_matrix(&[("a", "ATGC"), ("b", "")]);
        assert!(matches!(result, Err(AnalysisError::EmptyInput(_))));
    }

    #[test]
    fn test_pairwise_identity_unrounded() {
        let identity = pairwise_identity(b"AAA", b"AAT").unwrap();
        assert!((identity - 2.0 / 3.0).abs() < 1e-12);
    }
}
