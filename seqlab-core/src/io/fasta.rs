//! FASTA sequence file reading and writing
//!
//! Parsing goes through the needletail library, which also accepts FASTQ
//! input. Gzipped files are decoded with flate2 before parsing.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use needletail::errors::ParseErrorKind;
use needletail::parse_fastx_reader;
use thiserror::Error;

use crate::types::SequenceRecord;

/// Default number of sequence characters per FASTA line
pub const DEFAULT_LINE_WIDTH: usize = 60;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
}

pub type FastaResult<T> = Result<T, FastaError>;

/// FASTA/FASTQ parser producing [`SequenceRecord`]s in file order
pub struct FastaParser;

impl FastaParser {
    /// Parse a FASTA/FASTQ file, decompressing `.gz` input
    pub fn parse_file<P: AsRef<Path>>(path: P) -> FastaResult<Vec<SequenceRecord>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        log::debug!("parsing sequence file {}", path.display());

        if path.to_string_lossy().ends_with(".gz") {
            Self::parse_reader(BufReader::new(GzDecoder::new(file)))
        } else {
            Self::parse_reader(BufReader::new(file))
        }
    }

    /// Parse FASTA/FASTQ data from any readable source
    pub fn parse_reader<R: Read + Send>(reader: R) -> FastaResult<Vec<SequenceRecord>> {
        let mut fastx_reader = parse_fastx_reader(reader).map_err(|e| {
            if matches!(e.kind, ParseErrorKind::EmptyFile) {
                FastaError::EmptyFile
            } else {
                FastaError::Parse(e.to_string())
            }
        })?;

        let mut records = Vec::new();
        while let Some(record) = fastx_reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            let header = String::from_utf8_lossy(record.id()).to_string();
            records.push(SequenceRecord::new(header, record.seq()));
        }

        if records.is_empty() {
            Err(FastaError::EmptyFile)
        } else {
            log::debug!("parsed {} records", records.len());
            Ok(records)
        }
    }
}

/// Write records as FASTA, wrapping sequence lines at `line_width` characters.
///
/// A `line_width` of zero writes each sequence on a single line.
pub fn write_fasta<W: Write>(
    records: &[SequenceRecord],
    writer: &mut W,
    line_width: usize,
) -> FastaResult<()> {
    for record in records {
        writeln!(writer, ">{}", record.header)?;
        if line_width == 0 {
            writer.write_all(&record.sequence)?;
            writer.write_all(b"\n")?;
            continue;
        }
        for line in record.sequence.chunks(line_width) {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a FASTA file at `path`
pub fn write_fasta_file<P: AsRef<Path>>(
    records: &[SequenceRecord],
    path: P,
    line_width: usize,
) -> FastaResult<()> {
    let mut writer = std::io::BufWriter::new(File::create(path)?);
    write_fasta(records, &mut writer, line_width)
}

/// Records whose sequence contains `keyword`, compared case-insensitively
pub fn search_records<'a>(records: &'a [SequenceRecord], keyword: &str) -> Vec<&'a SequenceRecord> {
    let needle = keyword.to_ascii_uppercase().into_bytes();
    records
        .iter()
        .filter(|record| {
            if needle.is_empty() {
                return true;
            }
            let haystack = record.sequence.to_ascii_uppercase();
            haystack.windows(needle.len()).any(|w| w == needle.as_slice())
        })
        .collect()
}

/// Cheap format check: the first line of the input starts with `>`
pub fn looks_like_fasta<R: Read>(reader: R) -> bool {
    let mut first_line = String::new();
    match BufReader::new(reader).read_line(&mut first_line) {
        Ok(_) => first_line.trim_start().starts_with('>'),
        Err(_) => false,
    }
}

/// Statistics about sequences in a FASTA/FASTQ file
#[derive(Debug, Clone)]
pub struct SequenceStatistics {
    pub total_sequences: usize,
    pub total_length: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub mean_length: f64,
    pub n50: usize,
    /// GC percentage over unambiguous bases (0.0 to 100.0)
    pub gc_content: f64,

    // Internal fields for calculation
    lengths: Vec<usize>,
    total_gc: u64,
    total_at: u64,
}

impl SequenceStatistics {
    fn new() -> Self {
        Self {
            total_sequences: 0,
            total_length: 0,
            min_length: usize::MAX,
            max_length: 0,
            mean_length: 0.0,
            n50: 0,
            gc_content: 0.0,
            lengths: Vec::new(),
            total_gc: 0,
            total_at: 0,
        }
    }

    /// Compute summary statistics over a set of records
    pub fn from_records(records: &[SequenceRecord]) -> Self {
        let mut stats = Self::new();
        for record in records {
            stats.add_sequence(record);
        }
        stats.finalize();
        stats
    }

    fn add_sequence(&mut self, record: &SequenceRecord) {
        let length = record.len();
        self.total_sequences += 1;
        self.total_length += length;
        self.lengths.push(length);

        self.min_length = self.min_length.min(length);
        self.max_length = self.max_length.max(length);

        for &base in &record.sequence {
            match base.to_ascii_uppercase() {
                b'G' | b'C' => self.total_gc += 1,
                b'A' | b'T' | b'U' => self.total_at += 1,
                _ => {} // Skip ambiguous or gap characters
            }
        }
    }

    fn finalize(&mut self) {
        if self.total_sequences == 0 {
            self.min_length = 0;
            return;
        }

        self.mean_length = self.total_length as f64 / self.total_sequences as f64;

        // N50 over lengths sorted longest first
        self.lengths.sort_by(|a, b| b.cmp(a));
        let mut cumulative_length = 0;
        let half_total = self.total_length.div_ceil(2);
        for &length in &self.lengths {
            cumulative_length += length;
            if cumulative_length >= half_total {
                self.n50 = length;
                break;
            }
        }

        let total_bases = self.total_gc + self.total_at;
        if total_bases > 0 {
            self.gc_content = (self.total_gc as f64 / total_bases as f64) * 100.0;
        }
    }
}
