//! File format I/O modules for SeqLab

pub mod fasta;

pub use fasta::{
    looks_like_fasta, search_records, write_fasta, write_fasta_file, FastaError, FastaParser,
    FastaResult, SequenceStatistics, DEFAULT_LINE_WIDTH,
};

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::path::Path;

use crate::types::SequenceRecord;

/// Read a sequence file after a quick format check.
///
/// Uncompressed input must start with a `>` or `@` header line; gzipped
/// input is handed straight to the parser.
pub fn read_sequence_file<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("Sequence file does not exist: {}", path.display());
    }

    let compressed = path.to_string_lossy().to_lowercase().ends_with(".gz");
    if !compressed {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        if !looks_like_fasta(&file) && !looks_like_fastq(path)? {
            bail!("{} does not look like a FASTA or FASTQ file", path.display());
        }
    }

    FastaParser::parse_file(path)
        .with_context(|| format!("Failed to parse sequence file: {}", path.display()))
}

fn looks_like_fastq(path: &Path) -> Result<bool> {
    use std::io::{BufRead, BufReader};

    let mut first_line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut first_line)?;
    Ok(first_line.trim_start().starts_with('@'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_fasta_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">seq1\nATGC\nATGC\n>seq2\nGGCC").unwrap();

        let records = read_sequence_file(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence, b"ATGCATGC");
    }

    #[test]
    fn test_read_rejects_non_fasta() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not a sequence file").unwrap();

        let err = read_sequence_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("does not look like"));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_sequence_file("/nonexistent/seqs.fa").is_err());
    }
}
