//! Sequence comparison and pattern analysis for SeqLab
//!
//! Each submodule is a set of pure functions over byte slices. None of them
//! share state, so every operation is safe to call from multiple threads.

pub mod utils;
pub mod align;
pub mod lcs;
pub mod consensus;
pub mod distance;
pub mod pattern;
pub mod assembly;
pub mod similarity;


pub use align::{align, PairwiseAligner, ScoringScheme};
pub use lcs::longest_common_subsequence;
pub use consensus::consensus;
pub use distance::evolutionary_distance;
pub use pattern::{
    find_palindromes, find_repeats, find_reverse_complement_palindromes, Palindrome, RepeatTable,
};
pub use assembly::{assemble, overlap_length};
pub use similarity::{pairwise_identity, similarity_matrix, SimilarityEntry, SimilarityMatrix};

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur during analysis
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),
}
