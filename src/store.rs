// src/store.rs

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::record::TestRecord;

/// Read/write interface over the record store.
///
/// The aggregation and report code only sees this trait, so the on-disk
/// layout (single file today, directory-of-files tomorrow) can change
/// without touching any derived logic.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Loads every record currently persisted. A store that has never
    /// been written to yields an empty list, not an error.
    async fn load_all(&self) -> Result<Vec<TestRecord>, AppError>;

    /// Appends one record and persists the full collection.
    async fn append(&self, record: TestRecord) -> Result<(), AppError>;
}

/// Stores all records as a single pretty-printed JSON array file.
///
/// Matches the original on-disk schema (`tests.json`). Writes are
/// serialized through a mutex so two simultaneous submissions cannot
/// clobber each other's append.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_records(&self) -> Result<Vec<TestRecord>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_records(&self, records: &[TestRecord]) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<TestRecord>, AppError> {
        self.read_records().await
    }

    async fn append(&self, record: TestRecord) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records().await?;
        records.push(record);
        self.write_records(&records).await?;

        tracing::debug!("Persisted record #{}", records.len());
        Ok(())
    }
}
