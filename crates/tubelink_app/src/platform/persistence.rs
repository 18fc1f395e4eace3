use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tubelink_core::{SubmissionRecord, SubmissionStatus};
use tubelink_engine::{AtomicFileWriter, PersistError};
use tubelink_logging::{tl_debug, tl_info, tl_warn};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Write(#[from] PersistError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PersistedStatus {
    // Aliases read histories written by the earlier browser form.
    #[serde(alias = "✅ berhasil")]
    Succeeded,
    #[serde(alias = "❌ gagal")]
    Failed,
    #[serde(alias = "❌ error")]
    Errored,
}

/// Field order is the on-disk order: `url`, `status`, `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedRecord {
    url: String,
    status: PersistedStatus,
    timestamp: String,
}

impl From<&SubmissionRecord> for PersistedRecord {
    fn from(record: &SubmissionRecord) -> Self {
        let status = match record.status {
            SubmissionStatus::Succeeded => PersistedStatus::Succeeded,
            SubmissionStatus::Failed => PersistedStatus::Failed,
            SubmissionStatus::Errored => PersistedStatus::Errored,
        };
        Self {
            url: record.url.clone(),
            status,
            timestamp: record.timestamp.clone(),
        }
    }
}

impl From<PersistedRecord> for SubmissionRecord {
    fn from(record: PersistedRecord) -> Self {
        let status = match record.status {
            PersistedStatus::Succeeded => SubmissionStatus::Succeeded,
            PersistedStatus::Failed => SubmissionStatus::Failed,
            PersistedStatus::Errored => SubmissionStatus::Errored,
        };
        Self {
            url: record.url,
            status,
            timestamp: record.timestamp,
        }
    }
}

/// The submission history as one JSON array in one file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    writer: AtomicFileWriter,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.writer.target()
    }

    /// Reads the stored history. Missing or unreadable content yields an empty list.
    pub fn load(&self) -> Vec<SubmissionRecord> {
        let path = self.path();
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tl_debug!("No history at {:?}", path);
                return Vec::new();
            }
            Err(err) => {
                tl_warn!("Failed to read history from {:?}: {}", path, err);
                return Vec::new();
            }
        };

        let records: Vec<PersistedRecord> = match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(err) => {
                tl_warn!("Ignoring malformed history in {:?}: {}", path, err);
                return Vec::new();
            }
        };

        tl_info!("Loaded {} history records from {:?}", records.len(), path);
        records.into_iter().map(SubmissionRecord::from).collect()
    }

    /// Overwrites the stored history with `records`, in order.
    pub fn save(&self, records: &[SubmissionRecord]) -> Result<(), HistoryError> {
        let persisted: Vec<PersistedRecord> = records.iter().map(PersistedRecord::from).collect();
        let content = serde_json::to_string(&persisted)?;
        self.writer.write(&content)?;
        tl_debug!("Saved {} history records to {:?}", records.len(), self.path());
        Ok(())
    }
}
