//! Durable results file
//!
//! Keeps the output collection as a pretty-printed JSON array and rewrites it
//! after every accepted entry, so an interrupted batch loses nothing that
//! already finished and a later run can skip what is already there.
//! Entries that failed on a collaborator error are not stored, so the next
//! run retries them.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::modules::mapping::application::pipeline::RecordSink;
use crate::modules::mapping::domain::{EntryStatus, MappedEntry, MappingRecord};
use crate::modules::matching::SourceId;
use crate::shared::errors::{AppError, AppResult};

pub struct ResultsStore {
    path: PathBuf,
    records: Vec<MappingRecord>,
    processed: HashSet<SourceId>,
}

impl ResultsStore {
    /// Open the results file at `path`, loading what a previous run wrote.
    ///
    /// A missing file starts an empty store. A file that does not parse is an
    /// error rather than something to overwrite.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let records: Vec<MappingRecord> = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    AppError::SerializationError(format!(
                        "Existing results file {} is not a valid results array: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            Vec::new()
        };

        if !records.is_empty() {
            log::info!(
                "Loaded {} existing records from {}",
                records.len(),
                path.display()
            );
        }

        let processed = records.iter().map(|r| r.source_id).collect();
        Ok(Self {
            path,
            records,
            processed,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[MappingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn processed_ids(&self) -> &HashSet<SourceId> {
        &self.processed
    }

    /// Ids of `source_ids` not yet in the store, in their original order, without duplicates
    pub fn filter_unprocessed(&self, source_ids: &[SourceId]) -> Vec<SourceId> {
        let mut seen = HashSet::new();
        source_ids
            .iter()
            .copied()
            .filter(|id| !self.processed.contains(id) && seen.insert(*id))
            .collect()
    }

    /// Append a record and persist the whole collection
    pub fn append(&mut self, record: MappingRecord) -> AppResult<()> {
        self.processed.insert(record.source_id);
        self.records.push(record);
        self.persist()
    }

    /// Write to a sibling temp file first, then rename over the target
    fn persist(&self) -> AppResult<()> {
        let body = serde_json::to_string_pretty(&self.records)?;

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "results.json".into());
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, body)?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl RecordSink for ResultsStore {
    fn accept(&mut self, entry: &MappedEntry) -> AppResult<()> {
        if let EntryStatus::Failed(reason) = &entry.status {
            log::warn!(
                "AniList {}: not saved ({}), it will be retried on the next run",
                entry.source_id(),
                reason
            );
            return Ok(());
        }
        self.append(entry.record.clone())
    }
}
