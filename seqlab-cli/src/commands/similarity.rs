//! Similarity matrix command implementation

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use seqlab_core::{similarity_matrix, SequenceRecord, SimilarityMatrix};

use super::input::SequenceArgs;
use super::Output;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
pub struct SimilarityReport {
    pub sequences: usize,
    #[serde(flatten)]
    pub matrix: SimilarityMatrix,
}

impl fmt::Display for SimilarityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matrix.is_empty() {
            return write!(f, "Need at least 2 sequences for a similarity matrix");
        }
        for (i, entry) in self.matrix.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}\t{}\t{:.3}", entry.first, entry.second, entry.score)?;
        }
        Ok(())
    }
}

pub fn build(records: &[SequenceRecord]) -> CliResult<SimilarityReport> {
    let named: Vec<(&str, &[u8])> = records
        .iter()
        .map(|r| (r.header.as_str(), r.sequence.as_slice()))
        .collect();

    Ok(SimilarityReport {
        sequences: records.len(),
        matrix: similarity_matrix(&named)?,
    })
}

pub fn execute(output: &Output, sequences: &SequenceArgs) -> Result<()> {
    let records = sequences.load()?;
    log::info!("Computing similarity over {} sequences", records.len());
    output.emit(&build(&records)?)
}
