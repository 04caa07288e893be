//! Sequence store commands: import, search and list against a .seqdb file

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use seqlab_core::store::ImportSummary;
use seqlab_core::{SequenceRecord, SequenceStore};

use super::input::load_fasta;
use super::search::RecordView;
use super::Output;
use crate::error::{CliError, CliResult};

#[derive(Debug, Serialize)]
pub struct RejectedRecord {
    pub header: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub rejected: Vec<RejectedRecord>,
    pub total: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inserted {} records, rejected {} ({} stored)",
            self.inserted,
            self.rejected.len(),
            self.total
        )
    }
}

/// Records listed from the store
#[derive(Debug, Serialize)]
pub struct ListReport {
    pub records: Vec<RecordView>,
}

impl fmt::Display for ListReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.records.is_empty() {
            return write!(f, "No records");
        }
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}\t{}", record.header, record.sequence)?;
        }
        Ok(())
    }
}

/// Open an existing store, or start an empty one if the file is absent
pub fn open_or_create(db: &Path) -> CliResult<SequenceStore> {
    if db.exists() {
        log::info!("Opening store {}", db.display());
        read_store(db)
    } else {
        log::info!("Creating new store {}", db.display());
        Ok(SequenceStore::new())
    }
}

fn open_existing(db: &Path) -> CliResult<SequenceStore> {
    if !db.exists() {
        return Err(CliError::file_not_found(db.to_path_buf()));
    }
    read_store(db)
}

fn read_store(db: &Path) -> CliResult<SequenceStore> {
    SequenceStore::read_from_file(db)
        .map_err(|e| CliError::database(format!("Failed to read {}: {}", db.display(), e)))
}

pub fn import_into(store: &mut SequenceStore, records: Vec<SequenceRecord>) -> ImportReport {
    let ImportSummary { inserted, rejected } = store.import_records(records);
    for (header, reason) in &rejected {
        log::warn!("Skipped {}: {}", header, reason);
    }

    ImportReport {
        inserted,
        rejected: rejected
            .into_iter()
            .map(|(header, reason)| RejectedRecord {
                header,
                reason: reason.to_string(),
            })
            .collect(),
        total: store.len(),
    }
}

pub fn list_matching(store: &SequenceStore, keyword: Option<&str>) -> ListReport {
    let records = match keyword {
        Some(keyword) => store.search(keyword).into_iter().map(RecordView::from).collect(),
        None => store.iter().map(RecordView::from).collect(),
    };
    ListReport { records }
}

pub fn execute_import(output: &Output, input: &Path, db: &Path, compression_level: i32) -> Result<()> {
    let records = load_fasta(input)?;
    log::info!("Importing {} records from {}", records.len(), input.display());

    let mut store = open_or_create(db)?;
    let report = import_into(&mut store, records);

    store
        .write_to_file(db, compression_level)
        .map_err(|e| CliError::database(format!("Failed to write {}: {}", db.display(), e)))?;
    log::info!("Store written to: {}", db.display());

    output.emit(&report)
}

pub fn execute_search(output: &Output, db: &Path, keyword: &str) -> Result<()> {
    let store = open_existing(db)?;
    output.emit(&list_matching(&store, Some(keyword)))
}

pub fn execute_list(output: &Output, db: &Path) -> Result<()> {
    let store = open_existing(db)?;
    log::info!("{} records in {}", store.len(), db.display());
    output.emit(&list_matching(&store, None))
}
