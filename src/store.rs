//! Backing stores for player records.
//!
//! The ledger loads and saves the whole record map through the
//! [`RecordStore`] trait, so the storage medium can change without
//! touching engine logic. The default is a single flat JSON document;
//! [`MemoryStore`] backs tests and ephemeral runs.

use crate::ledger::PlayerRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub type RecordMap = HashMap<String, PlayerRecord>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// Whole-map load/save against a keyed document.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load every record. A missing backing document is an empty map,
    /// not an error.
    async fn load(&self) -> Result<RecordMap, StoreError>;

    /// Replace the backing document with `records`.
    async fn save(&self, records: &RecordMap) -> Result<(), StoreError>;
}

/// Flat JSON file, rewritten wholesale on every save.
///
/// Writes go to a temp file in the same directory and are renamed into
/// place, so a crashed save can't truncate the previous document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self) -> Result<RecordMap, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(RecordMap::new());
            }
            Err(e) => return Err(StoreError::ReadFailed(e.to_string())),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::CorruptedData(e.to_string()))
    }

    async fn save(&self, records: &RecordMap) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        let path = self.path.clone();

        // File replacement is synchronous; push it off the async
        // workers.
        tokio::task::spawn_blocking(move || {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let mut temp = tempfile::NamedTempFile::new_in(dir)
                .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
            std::io::Write::write_all(&mut temp, &json)
                .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
            temp.persist(&path)
                .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?
    }
}

/// In-memory store. Keeps whatever was last saved; used by tests and
/// callers that don't want durability.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<RecordMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: RecordMap) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load(&self) -> Result<RecordMap, StoreError> {
        Ok(self.records.lock().await.clone())
    }

    async fn save(&self, records: &RecordMap) -> Result<(), StoreError> {
        *self.records.lock().await = records.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_records() -> RecordMap {
        let mut records = RecordMap::new();
        let mut record = PlayerRecord::new(1000);
        record.cash = 4200;
        record.xp = 1500;
        record.level = 1;
        record.wins = 3;
        record.losses = 2;
        record.total_bet = 900;
        record.total_won = 1200;
        record.last_daily = Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        records.insert("111222333".to_string(), record);
        records.insert("444555666".to_string(), PlayerRecord::new(1000));
        records
    }

    #[tokio::test]
    async fn json_store_round_trips_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("players.json"));

        let records = sample_records();
        store.save(&records).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn absent_timestamps_deserialize_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.json");
        // A document written before the reward fields existed.
        let legacy = r#"{
            "777": {
                "cash": 250,
                "level": 0,
                "xp": 100,
                "wins": 1,
                "losses": 0,
                "total_bet": 50,
                "total_won": 100
            }
        }"#;
        tokio::fs::write(&path, legacy).await.unwrap();

        let store = JsonFileStore::new(&path);
        let loaded = store.load().await.unwrap();
        let record = &loaded["777"];
        assert_eq!(record.cash, 250);
        assert!(record.last_daily.is_none());
        assert!(record.last_work.is_none());
    }

    #[tokio::test]
    async fn corrupt_document_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.load().await,
            Err(StoreError::CorruptedData(_))
        ));
    }

    #[tokio::test]
    async fn saves_replace_the_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("players.json"));

        store.save(&sample_records()).await.unwrap();
        let mut smaller = RecordMap::new();
        smaller.insert("999".to_string(), PlayerRecord::new(1000));
        store.save(&smaller).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("999"));
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new();
        let records = sample_records();
        store.save(&records).await.unwrap();
        assert_eq!(store.load().await.unwrap(), records);
    }
}
