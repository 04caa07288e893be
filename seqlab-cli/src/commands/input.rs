//! Sequence input shared by the analysis commands

use clap::Args;
use std::path::{Path, PathBuf};

use seqlab_core::{FastaParser, SequenceRecord};

use crate::error::{CliError, CliResult};

/// Sequences given inline and/or read from a FASTA file
#[derive(Args, Debug, Clone, Default)]
pub struct SequenceArgs {
    /// Sequences given directly on the command line
    pub sequences: Vec<String>,

    /// FASTA/FASTQ file whose records follow the inline sequences
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

impl SequenceArgs {
    /// Resolve to records: inline sequences first (named seq1, seq2, ...),
    /// then the records of the input file in file order
    pub fn load(&self) -> CliResult<Vec<SequenceRecord>> {
        let mut records: Vec<SequenceRecord> = self
            .sequences
            .iter()
            .enumerate()
            .map(|(i, seq)| SequenceRecord::new(format!("seq{}", i + 1), seq))
            .collect();

        if let Some(path) = &self.input {
            let from_file = load_fasta(path)?;
            log::info!("Loaded {} records from {}", from_file.len(), path.display());
            records.extend(from_file);
        }

        Ok(records)
    }
}

/// Parse a FASTA file, reporting a missing path as [`CliError::FileNotFound`]
pub fn load_fasta(path: &Path) -> CliResult<Vec<SequenceRecord>> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }
    Ok(FastaParser::parse_file(path)?)
}

/// Exactly two sequences, or a validation error naming the command
pub fn require_pair<'a>(
    records: &'a [SequenceRecord],
    command: &str,
) -> CliResult<(&'a SequenceRecord, &'a SequenceRecord)> {
    match records {
        [a, b] => Ok((a, b)),
        _ => Err(CliError::validation(format!(
            "{} needs exactly 2 sequences, got {}",
            command,
            records.len()
        ))),
    }
}

/// Exactly one sequence
pub fn require_one<'a>(records: &'a [SequenceRecord], command: &str) -> CliResult<&'a SequenceRecord> {
    match records {
        [only] => Ok(only),
        _ => Err(CliError::validation(format!(
            "{} needs exactly 1 sequence, got {}",
            command,
            records.len()
        ))),
    }
}

/// At least one sequence
pub fn require_some(records: &[SequenceRecord], command: &str) -> CliResult<()> {
    if records.is_empty() {
        return Err(CliError::validation(format!("{} needs at least 1 sequence", command)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn inline(seqs: &[&str]) -> SequenceArgs {
        SequenceArgs {
            sequences: seqs.iter().map(|s| s.to_string()).collect(),
            input: None,
        }
    }

    #[test]
    fn test_inline_sequences_are_named_in_order() {
        let records = inline(&["ATGC", "GGCC"]).load().unwrap();
        assert_eq!(records[0].header, "seq1");
        assert_eq!(records[1].header, "seq2");
        assert_eq!(records[1].sequence, b"GGCC");
    }

    #[test]
    fn test_file_records_follow_inline() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">from_file\nTTTT").unwrap();

        let args = SequenceArgs {
            sequences: vec!["AAAA".to_string()],
            input: Some(file.path().to_path_buf()),
        };
        let records = args.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].header, "from_file");
    }

    #[test]
    fn test_missing_file() {
        let args = SequenceArgs {
            sequences: vec![],
            input: Some(PathBuf::from("/nonexistent/input.fa")),
        };
        assert!(matches!(args.load(), Err(CliError::FileNotFound { .. })));
    }

    #[test]
    fn test_arity_checks() {
        let records = inline(&["A", "C", "G"]).load().unwrap();
        assert!(require_pair(&records, "align").is_err());
        assert!(require_pair(&records[..2], "align").is_ok());
        assert!(require_one(&records[..1], "repeats").is_ok());
        assert!(require_some(&[], "consensus").is_err());
    }
}
