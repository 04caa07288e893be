//! Validating sequence store and its binary file format (.seqdb)
//!
//! Layout:
//! - Header  { magic="SQDB", version, build timestamp, build metadata }
//! - Records { zstd_len u64, zstd payload of: count u32, then per record a
//!   length-prefixed header and a length-prefixed sequence }
//!
//! All integers are little-endian.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use regex::bytes::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

use crate::types::SequenceRecord;

/// Magic bytes for the SeqLab store format
const SEQDB_MAGIC: &[u8] = b"SQDB";

/// Current binary format version
const SEQDB_VERSION: u32 = 1;

/// Default zstd level for the records section
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Errors that can occur during store file operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid magic bytes: expected SQDB")]
    InvalidMagic,

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u32),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Decompression error: {0}")]
    Decompression(String),

    #[error("Data corruption: {0}")]
    Corruption(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Why an insert was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Sequence is empty or contains characters outside A/C/G/T
    InvalidAlphabet,
    /// A record with the same header is already stored
    DuplicateHeader,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::InvalidAlphabet => write!(f, "sequence is empty or contains non-ATGC characters"),
            RejectReason::DuplicateHeader => write!(f, "header already exists"),
        }
    }
}

/// Outcome of [`SequenceStore::insert`]; rejection is a value, not an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Rejected(RejectReason),
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// Counts from a bulk import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub rejected: Vec<(String, RejectReason)>,
}

/// Header section of the store file
#[derive(Debug, Clone)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: u32,
    pub build_timestamp: u64,
    pub build_metadata: String,
}

impl Header {
    pub fn new() -> Self {
        Self {
            magic: *b"SQDB",
            version: SEQDB_VERSION,
            build_timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            build_metadata: format!("seqlab-core-{}", env!("CARGO_PKG_VERSION")),
        }
    }

    fn write<W: Write>(&self, writer: &mut W) -> StoreResult<()> {
        writer.write_all(&self.magic)?;
        writer.write_u32::<LittleEndian>(self.version)?;
        writer.write_u64::<LittleEndian>(self.build_timestamp)?;
        write_bytes(writer, self.build_metadata.as_bytes())?;
        Ok(())
    }

    fn read<R: Read>(reader: &mut R) -> StoreResult<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;

        if &magic != SEQDB_MAGIC {
            return Err(StoreError::InvalidMagic);
        }

        let version = reader.read_u32::<LittleEndian>()?;
        if version != SEQDB_VERSION {
            return Err(StoreError::UnsupportedVersion(version));
        }

        let build_timestamp = reader.read_u64::<LittleEndian>()?;
        let build_metadata = String::from_utf8_lossy(&read_bytes(reader)?).to_string();

        Ok(Self {
            magic,
            version,
            build_timestamp,
            build_metadata,
        })
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

fn write_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> StoreResult<()> {
    writer.write_u32::<LittleEndian>(bytes.len() as u32)?;
    writer.write_all(bytes)?;
    Ok(())
}

/// Read a u32 length-prefixed field; only the bytes actually present are buffered
fn read_bytes<R: Read>(reader: &mut R) -> StoreResult<Vec<u8>> {
    let len = reader.read_u32::<LittleEndian>()? as usize;
    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(StoreError::Corruption(format!(
            "field truncated: expected {} bytes, found {}",
            len,
            bytes.len()
        )));
    }
    Ok(bytes)
}

fn nucleotide_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i-u)^[ATGC]+$").expect("static pattern is valid"))
}

/// Check that a sequence is a non-empty run of A/T/G/C, ignoring case
pub fn validate_sequence(sequence: &[u8]) -> bool {
    nucleotide_pattern().is_match(sequence)
}

/// In-memory sequence store keyed by header, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    header: Header,
    records: Vec<SequenceRecord>,
    index: HashMap<String, usize>,
}

impl SequenceStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a validated sequence under `header`
    pub fn insert<H: Into<String>, S: Into<Vec<u8>>>(&mut self, header: H, sequence: S) -> InsertOutcome {
        let header = header.into();
        let sequence = sequence.into();

        if !validate_sequence(&sequence) {
            log::warn!("Rejected {}: sequence contains non-ATGC characters", header);
            return InsertOutcome::Rejected(RejectReason::InvalidAlphabet);
        }
        if self.index.contains_key(&header) {
            log::warn!("Rejected {}: header already exists", header);
            return InsertOutcome::Rejected(RejectReason::DuplicateHeader);
        }

        log::debug!("Inserted {} ({} bp)", header, sequence.len());
        self.index.insert(header.clone(), self.records.len());
        self.records.push(SequenceRecord { header, sequence });
        InsertOutcome::Inserted
    }

    /// Insert every record, collecting the rejected headers
    pub fn import_records<I>(&mut self, records: I) -> ImportSummary
    where
        I: IntoIterator<Item = SequenceRecord>,
    {
        let mut summary = ImportSummary::default();
        for record in records {
            let header = record.header.clone();
            match self.insert(record.header, record.sequence) {
                InsertOutcome::Inserted => summary.inserted += 1,
                InsertOutcome::Rejected(reason) => summary.rejected.push((header, reason)),
            }
        }
        summary
    }

    pub fn get(&self, header: &str) -> Option<&SequenceRecord> {
        self.index.get(header).map(|&i| &self.records[i])
    }

    /// Records whose header contains `keyword`, ignoring case
    pub fn search(&self, keyword: &str) -> Vec<&SequenceRecord> {
        let needle = keyword.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.header.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get_header(&self) -> &Header {
        &self.header
    }

    /// Write the store to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, compression_level: i32) -> StoreResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer, compression_level)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize the store to any writer
    pub fn write<W: Write>(&self, writer: &mut W, compression_level: i32) -> StoreResult<()> {
        Header::new().write(writer)?;

        let mut buffer = Vec::new();
        buffer.write_u32::<LittleEndian>(self.records.len() as u32)?;
        for record in &self.records {
            write_bytes(&mut buffer, record.header.as_bytes())?;
            write_bytes(&mut buffer, &record.sequence)?;
        }

        let compressed = zstd::encode_all(&buffer[..], compression_level)
            .map_err(|e| StoreError::Compression(e.to_string()))?;

        writer.write_u64::<LittleEndian>(compressed.len() as u64)?;
        writer.write_all(&compressed)?;
        Ok(())
    }

    /// Read store from file
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let file = File::open(path)?;
        Self::read(&mut BufReader::new(file))
    }

    /// Deserialize a store from any reader
    pub fn read<R: Read>(reader: &mut R) -> StoreResult<Self> {
        let header = Header::read(reader)?;

        let compressed_size = reader.read_u64::<LittleEndian>()? as usize;
        let mut compressed_data = Vec::new();
        reader
            .by_ref()
            .take(compressed_size as u64)
            .read_to_end(&mut compressed_data)?;
        if compressed_data.len() != compressed_size {
            return Err(StoreError::Corruption(format!(
                "records section truncated: expected {} bytes, found {}",
                compressed_size,
                compressed_data.len()
            )));
        }

        let decompressed = zstd::decode_all(&compressed_data[..])
            .map_err(|e| StoreError::Decompression(e.to_string()))?;

        let mut buffer = Cursor::new(decompressed);
        let count = buffer.read_u32::<LittleEndian>()? as usize;

        let mut store = Self {
            header,
            records: Vec::with_capacity(count),
            index: HashMap::with_capacity(count),
        };
        for _ in 0..count {
            let header = String::from_utf8(read_bytes(&mut buffer)?)
                .map_err(|e| StoreError::Corruption(format!("header is not UTF-8: {}", e)))?;
            let sequence = read_bytes(&mut buffer)?;
            if store.index.contains_key(&header) {
                return Err(StoreError::Corruption(format!("duplicate header: {}", header)));
            }
            store.index.insert(header.clone(), store.records.len());
            store.records.push(SequenceRecord { header, sequence });
        }

        if (buffer.position() as usize) != buffer.get_ref().len() {
            return Err(StoreError::Corruption(
                "trailing bytes after records".to_string(),
            ));
        }

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_sequence() {
        assert!(validate_sequence(b"ATGC"));
        assert!(validate_sequence(b"atgcATGC"));
        assert!(!validate_sequence(b"ATGN"));
        assert!(!validate_sequence(b"ATG C"));
        assert!(!validate_sequence(b""));
    }

    #[test]
    fn test_insert_and_reject() {
        let mut store = SequenceStore::new();
        assert_eq!(store.insert("seq1", "ATGCATGC"), InsertOutcome::Inserted);
        assert_eq!(
            store.insert("seq2", "ATGXATGC"),
            InsertOutcome::Rejected(RejectReason::InvalidAlphabet)
        );
        assert_eq!(
            store.insert("seq1", "GGGG"),
            InsertOutcome::Rejected(RejectReason::DuplicateHeader)
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("seq1").map(|r| r.sequence.as_slice()), Some(b"ATGCATGC".as_slice()));
        assert!(store.get("seq2").is_none());
    }

    #[test]
    fn test_search_by_header() {
        let mut store = SequenceStore::new();
        store.insert("Seq1 human", "ATGC");
        store.insert("seq10 mouse", "GGCC");
        store.insert("other", "TTAA");

        let hits: Vec<&str> = store.search("SEQ1").iter().map(|r| r.header.as_str()).collect();
        assert_eq!(hits, vec!["Seq1 human", "seq10 mouse"]);
        assert!(store.search("zebrafish").is_empty());
    }

    #[test]
    fn test_import_records_summary() {
        let mut store = SequenceStore::new();
        let summary = store.import_records(vec![
            SequenceRecord::new("a", "ATGC"),
            SequenceRecord::new("b", "NNNN"),
            SequenceRecord::new("a", "GGCC"),
        ]);
        assert_eq!(summary.inserted, 1);
        assert_eq!(
            summary.rejected,
            vec![
                ("b".to_string(), RejectReason::InvalidAlphabet),
                ("a".to_string(), RejectReason::DuplicateHeader),
            ]
        );
    }

    #[test]
    fn test_store_roundtrip() -> StoreResult<()> {
        let mut store = SequenceStore::new();
        store.insert("chr1", "ATGCATGCATGC");
        store.insert("chr2", "ggccggcc");

        let temp_file = NamedTempFile::new()?;
        store.write_to_file(temp_file.path(), DEFAULT_COMPRESSION_LEVEL)?;

        let loaded = SequenceStore::read_from_file(temp_file.path())?;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.records(), store.records());
        assert_eq!(loaded.get_header().version, SEQDB_VERSION);
        assert!(loaded.get("chr2").is_some());
        Ok(())
    }

    #[test]
    fn test_invalid_magic() {
        let mut data = Cursor::new(b"NOPE\x01\x00\x00\x00".to_vec());
        assert!(matches!(SequenceStore::read(&mut data), Err(StoreError::InvalidMagic)));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(SEQDB_MAGIC);
        bytes.write_u32::<LittleEndian>(99).unwrap();
        let result = SequenceStore::read(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(StoreError::UnsupportedVersion(99))));
    }

    #[test]
    fn test_oversized_field_length_is_corruption() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(SEQDB_MAGIC);
        bytes.write_u32::<LittleEndian>(SEQDB_VERSION).unwrap();
        bytes.write_u64::<LittleEndian>(0).unwrap();
        bytes.write_u32::<LittleEndian>(u32::MAX).unwrap();
        bytes.extend_from_slice(b"short");

        let result = SequenceStore::read(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(StoreError::Corruption(_))));
    }

    #[test]
    fn test_truncated_records_section() {
        let mut store = SequenceStore::new();
        store.insert("a", "ATGC");
        let mut bytes = Vec::new();
        store.write(&mut bytes, DEFAULT_COMPRESSION_LEVEL).unwrap();
        bytes.truncate(bytes.len() - 2);

        let result = SequenceStore::read(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(StoreError::Corruption(_))));
    }
}
