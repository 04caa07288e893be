//! SeqLab Core Library
//!
//! Sequence comparison and pattern analysis algorithms, FASTA I/O, and a
//! validating sequence store for SeqLab.

pub mod types;
pub mod analysis;
pub mod io;
pub mod store;

// Re-export commonly used types and functions
pub use types::SequenceRecord;
pub use analysis::{
    align, assemble, consensus, evolutionary_distance, find_palindromes, find_repeats,
    find_reverse_complement_palindromes, longest_common_subsequence, similarity_matrix,
    AnalysisError, AnalysisResult, PairwiseAligner, Palindrome, RepeatTable, ScoringScheme,
    SimilarityEntry, SimilarityMatrix,
};
pub use io::{FastaError, FastaParser, SequenceStatistics};
pub use store::{InsertOutcome, RejectReason, SequenceStore, StoreError};

/// Version information for the SeqLab core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
