//! Pairwise comparison commands: align, lcs and distance

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use seqlab_core::{
    evolutionary_distance, longest_common_subsequence, PairwiseAligner, ScoringScheme,
    SequenceRecord,
};

use super::input::{require_pair, SequenceArgs};
use super::Output;
use crate::error::CliResult;

/// Global alignment score of two sequences
#[derive(Debug, Serialize)]
pub struct AlignReport {
    pub first: String,
    pub second: String,
    pub scheme: ScoringScheme,
    pub score: i32,
}

impl fmt::Display for AlignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.score)
    }
}

#[derive(Debug, Serialize)]
pub struct LcsReport {
    pub first: String,
    pub second: String,
    pub length: usize,
    pub subsequence: String,
}

impl fmt::Display for LcsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subsequence)
    }
}

#[derive(Debug, Serialize)]
pub struct DistanceReport {
    pub first: String,
    pub second: String,
    pub distance: f64,
}

impl fmt::Display for DistanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.distance)
    }
}

pub fn build_align(records: &[SequenceRecord], scheme: ScoringScheme) -> CliResult<AlignReport> {
    let (a, b) = require_pair(records, "align")?;
    let aligner = PairwiseAligner::new(scheme);
    let score = aligner.score(&a.sequence, &b.sequence);
    log::debug!("align {} vs {}: {}", a.header, b.header, score);

    Ok(AlignReport {
        first: a.header.clone(),
        second: b.header.clone(),
        scheme,
        score,
    })
}

pub fn build_lcs(records: &[SequenceRecord]) -> CliResult<LcsReport> {
    let (a, b) = require_pair(records, "lcs")?;
    let lcs = longest_common_subsequence(&a.sequence, &b.sequence);

    Ok(LcsReport {
        first: a.header.clone(),
        second: b.header.clone(),
        length: lcs.len(),
        subsequence: String::from_utf8_lossy(&lcs).into_owned(),
    })
}

pub fn build_distance(records: &[SequenceRecord]) -> CliResult<DistanceReport> {
    let (a, b) = require_pair(records, "distance")?;
    let distance = evolutionary_distance(&a.sequence, &b.sequence)?;

    Ok(DistanceReport {
        first: a.header.clone(),
        second: b.header.clone(),
        distance,
    })
}

pub fn execute_align(output: &Output, sequences: &SequenceArgs, scheme: ScoringScheme) -> Result<()> {
    log::info!(
        "Aligning with match={} mismatch={} gap={}",
        scheme.match_score,
        scheme.mismatch,
        scheme.gap
    );
    let records = sequences.load()?;
    output.emit(&build_align(&records, scheme)?)
}

pub fn execute_lcs(output: &Output, sequences: &SequenceArgs) -> Result<()> {
    let records = sequences.load()?;
    output.emit(&build_lcs(&records)?)
}

pub fn execute_distance(output: &Output, sequences: &SequenceArgs) -> Result<()> {
    let records = sequences.load()?;
    output.emit(&build_distance(&records)?)
}
