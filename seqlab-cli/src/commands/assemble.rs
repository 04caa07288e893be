//! Fragment assembly command implementation

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use seqlab_core::{assemble, SequenceRecord};

use super::input::SequenceArgs;
use super::Output;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
pub struct AssemblyReport {
    pub fragments: usize,
    pub length: usize,
    pub assembled: String,
}

impl fmt::Display for AssemblyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.assembled)
    }
}

pub fn build(records: &[SequenceRecord]) -> CliResult<AssemblyReport> {
    let fragments: Vec<&[u8]> = records.iter().map(|r| r.sequence.as_slice()).collect();
    let assembled = assemble(&fragments)?;

    Ok(AssemblyReport {
        fragments: records.len(),
        length: assembled.len(),
        assembled: String::from_utf8_lossy(&assembled).into_owned(),
    })
}

pub fn execute(output: &Output, sequences: &SequenceArgs) -> Result<()> {
    let records = sequences.load()?;
    log::info!("Assembling {} fragments", records.len());
    output.emit(&build(&records)?)
}
