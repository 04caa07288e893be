//! Search command implementation - keyword match over FASTA sequences

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;

use seqlab_core::io::{search_records, write_fasta};
use seqlab_core::SequenceRecord;

use super::input::load_fasta;
use super::Output;

/// A record as printed by the search and db commands
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub header: String,
    pub sequence: String,
}

impl From<&SequenceRecord> for RecordView {
    fn from(record: &SequenceRecord) -> Self {
        Self {
            header: record.header.clone(),
            sequence: record.sequence_str(),
        }
    }
}

/// Matching records, rendered as FASTA in text mode
#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub keyword: String,
    pub matches: Vec<RecordView>,
    #[serde(skip)]
    pub fasta: String,
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matches.is_empty() {
            return write!(f, "No sequences contain '{}'", self.keyword);
        }
        write!(f, "{}", self.fasta.trim_end())
    }
}

pub fn build(records: &[SequenceRecord], keyword: &str, line_width: usize) -> Result<SearchReport> {
    let hits = search_records(records, keyword);
    log::info!("{} of {} records contain '{}'", hits.len(), records.len(), keyword);

    let owned: Vec<SequenceRecord> = hits.iter().map(|r| (*r).clone()).collect();
    let mut buffer = Vec::new();
    write_fasta(&owned, &mut buffer, line_width).context("Failed to render FASTA")?;

    Ok(SearchReport {
        keyword: keyword.to_string(),
        matches: hits.into_iter().map(RecordView::from).collect(),
        fasta: String::from_utf8_lossy(&buffer).into_owned(),
    })
}

pub fn execute(output: &Output, input: &Path, keyword: &str, line_width: usize) -> Result<()> {
    let records = load_fasta(input)?;
    output.emit(&build(&records, keyword, line_width)?)
}
