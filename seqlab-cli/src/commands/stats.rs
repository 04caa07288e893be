//! Stats command implementation - per-record composition and file summary

use anyhow::Result;
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use seqlab_core::analysis::utils::{gc_content, round_to};
use seqlab_core::{SequenceRecord, SequenceStatistics};

use super::input::load_fasta;
use super::Output;

/// Composition of a single record
#[derive(Debug, Clone, Serialize)]
pub struct RecordStats {
    pub header: String,
    pub length: usize,
    /// GC percentage over the full record length; absent for empty records
    pub gc_percent: Option<f64>,
}

/// Summary over the whole file, mirrored from [`SequenceStatistics`]
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_sequences: usize,
    pub total_length: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub mean_length: f64,
    pub n50: usize,
    pub gc_content: f64,
}

impl From<&SequenceStatistics> for Summary {
    fn from(stats: &SequenceStatistics) -> Self {
        Self {
            total_sequences: stats.total_sequences,
            total_length: stats.total_length,
            min_length: stats.min_length,
            max_length: stats.max_length,
            mean_length: round_to(stats.mean_length, 2),
            n50: stats.n50,
            gc_content: round_to(stats.gc_content, 2),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub records: Vec<RecordStats>,
    pub summary: Summary,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "header\tlength\tgc%")?;
        for record in &self.records {
            match record.gc_percent {
                Some(gc) => writeln!(f, "{}\t{}\t{:.2}", record.header, record.length, gc)?,
                None => writeln!(f, "{}\t{}\t-", record.header, record.length)?,
            }
        }

        let s = &self.summary;
        writeln!(f)?;
        writeln!(f, "Sequences:    {}", s.total_sequences)?;
        writeln!(f, "Total length: {}", s.total_length)?;
        writeln!(f, "Min length:   {}", s.min_length)?;
        writeln!(f, "Max length:   {}", s.max_length)?;
        writeln!(f, "Mean length:  {:.2}", s.mean_length)?;
        writeln!(f, "N50:          {}", s.n50)?;
        write!(f, "GC content:   {:.2}%", s.gc_content)
    }
}

fn record_stats(record: &SequenceRecord) -> RecordStats {
    RecordStats {
        header: record.header.clone(),
        length: record.len(),
        gc_percent: gc_content(&record.sequence).map(|gc| round_to(gc * 100.0, 2)),
    }
}

/// Per-record statistics computed on the current rayon pool, in input order
pub fn build(records: &[SequenceRecord], progress: &ProgressBar) -> StatsReport {
    let per_record: Vec<RecordStats> = records
        .par_iter()
        .map(|record| {
            let stats = record_stats(record);
            progress.inc(1);
            stats
        })
        .collect();

    let summary = SequenceStatistics::from_records(records);
    StatsReport {
        records: per_record,
        summary: Summary::from(&summary),
    }
}

pub fn execute(output: &Output, input: &Path) -> Result<()> {
    log::info!("Computing statistics for {}", input.display());
    let records = load_fasta(input)?;
    log::info!(
        "Processing {} records on {} threads",
        records.len(),
        rayon::current_num_threads()
    );

    let progress = output.progress_bar(records.len() as u64)?;
    progress.set_message("records");
    let report = build(&records, &progress);
    progress.finish_and_clear();

    output.emit(&report)
}
