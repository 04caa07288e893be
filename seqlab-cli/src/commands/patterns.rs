//! Repeat and palindrome scanning commands

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use seqlab_core::{
    find_palindromes, find_repeats, find_reverse_complement_palindromes, SequenceRecord,
};

use super::input::{require_one, SequenceArgs};
use super::Output;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
pub struct RepeatEntry {
    pub pattern: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct RepeatReport {
    pub sequence: String,
    pub length: usize,
    pub repeats: Vec<RepeatEntry>,
}

impl fmt::Display for RepeatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeats.is_empty() {
            return write!(f, "No repeats of length {} found", self.length);
        }
        for (i, entry) in self.repeats.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}\t{}", entry.pattern, entry.count)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PalindromeEntry {
    pub start: usize,
    pub end: usize,
    pub bases: String,
}

#[derive(Debug, Serialize)]
pub struct PalindromeReport {
    pub sequence: String,
    pub min_length: usize,
    pub reverse_complement: bool,
    pub palindromes: Vec<PalindromeEntry>,
}

impl fmt::Display for PalindromeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.palindromes.is_empty() {
            return write!(f, "No palindromes of length >= {} found", self.min_length);
        }
        for (i, hit) in self.palindromes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}\t{}\t{}", hit.start, hit.end, hit.bases)?;
        }
        Ok(())
    }
}

pub fn build_repeats(records: &[SequenceRecord], length: usize) -> CliResult<RepeatReport> {
    let record = require_one(records, "repeats")?;
    let table = find_repeats(&record.sequence, length)?;

    let repeats = table
        .into_iter()
        .map(|(pattern, count)| RepeatEntry {
            pattern: String::from_utf8_lossy(&pattern).into_owned(),
            count,
        })
        .collect();

    Ok(RepeatReport {
        sequence: record.header.clone(),
        length,
        repeats,
    })
}

pub fn build_palindromes(
    records: &[SequenceRecord],
    min_length: usize,
    reverse_complement: bool,
) -> CliResult<PalindromeReport> {
    let record = require_one(records, "palindromes")?;
    let hits = if reverse_complement {
        find_reverse_complement_palindromes(&record.sequence, min_length)?
    } else {
        find_palindromes(&record.sequence, min_length)?
    };

    let palindromes = hits
        .into_iter()
        .map(|hit| PalindromeEntry {
            start: hit.start,
            end: hit.end,
            bases: String::from_utf8_lossy(&hit.sequence).into_owned(),
        })
        .collect();

    Ok(PalindromeReport {
        sequence: record.header.clone(),
        min_length,
        reverse_complement,
        palindromes,
    })
}

pub fn execute_repeats(output: &Output, sequences: &SequenceArgs, length: usize) -> Result<()> {
    log::info!("Counting repeats of length {}", length);
    let records = sequences.load()?;
    output.emit(&build_repeats(&records, length)?)
}

pub fn execute_palindromes(
    output: &Output,
    sequences: &SequenceArgs,
    min_length: usize,
    reverse_complement: bool,
) -> Result<()> {
    log::info!(
        "Scanning for {}palindromes of length >= {}",
        if reverse_complement { "reverse-complement " } else { "" },
        min_length
    );
    let records = sequences.load()?;
    output.emit(&build_palindromes(&records, min_length, reverse_complement)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn single(seq: &str) -> Vec<SequenceRecord> {
        vec![SequenceRecord::new("seq1", seq)]
    }

    #[test]
    fn test_repeat_report_is_sorted() {
        let report = build_repeats(&single("ATATAT"), 2).unwrap();
        assert_eq!(report.to_string(), "AT\t3\nTA\t2");
    }

    #[test]
    fn test_repeat_length_zero_is_invalid() {
        let err = build_repeats(&single("ATATAT"), 0).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn test_mirror_palindromes() {
        let report = build_palindromes(&single("AGTTGA"), 4, false).unwrap();
        assert_eq!(report.palindromes.len(), 3);
        assert_eq!(report.to_string().lines().next(), Some("0\t6\tAGTTGA"));
    }

    #[test]
    fn test_reverse_complement_palindromes() {
        let report = build_palindromes(&single("ATGCGAATTCGCAT"), 8, true).unwrap();
        assert!(report
            .palindromes
            .iter()
            .any(|p| p.start == 3 && p.end == 11 && p.bases == "CGAATTCG"));
    }

    #[test]
    fn test_empty_report_message() {
        let report = build_palindromes(&single("ATGC"), 4, false).unwrap();
        assert!(report.to_string().starts_with("No palindromes"));
    }
}
