//! Consensus command implementation

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use seqlab_core::{consensus, SequenceRecord};

use super::input::{require_some, SequenceArgs};
use super::Output;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
pub struct ConsensusReport {
    pub sequences: usize,
    pub consensus: String,
}

impl fmt::Display for ConsensusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.consensus)
    }
}

pub fn build(records: &[SequenceRecord]) -> CliResult<ConsensusReport> {
    require_some(records, "consensus")?;

    let lengths_differ = records.iter().any(|r| r.len() != records[0].len());
    if lengths_differ {
        log::warn!(
            "Sequences differ in length; consensus follows the first ({} bases)",
            records[0].len()
        );
    }

    let sequences: Vec<&[u8]> = records.iter().map(|r| r.sequence.as_slice()).collect();
    Ok(ConsensusReport {
        sequences: records.len(),
        consensus: String::from_utf8_lossy(&consensus(&sequences)).into_owned(),
    })
}

pub fn execute(output: &Output, sequences: &SequenceArgs) -> Result<()> {
    let records = sequences.load()?;
    log::info!("Building consensus over {} sequences", records.len());
    output.emit(&build(&records)?)
}
