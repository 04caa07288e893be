use serde::{Deserialize, Serialize};

/// A named nucleotide sequence, as read from FASTA or kept in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub header: String,
    pub sequence: Vec<u8>,
}

impl SequenceRecord {
    /// Build a record, trimming the header and dropping every line break and
    /// stray whitespace byte from the sequence
    pub fn new<H: AsRef<str>, S: AsRef<[u8]>>(header: H, sequence: S) -> Self {
        let sequence = sequence
            .as_ref()
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        Self {
            header: header.as_ref().trim().to_string(),
            sequence,
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Sequence bytes rendered as text; non-UTF-8 bytes are replaced
    pub fn sequence_str(&self) -> String {
        String::from_utf8_lossy(&self.sequence).into_owned()
    }
}
