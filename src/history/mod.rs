use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis::AnalysisResult;

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

pub const HISTORY_KEY: &str = "haircut-analysis-history";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub frontal_photo: String,
    pub side_photo: String,
    pub result: AnalysisResult,
}

impl AnalysisRecord {
    pub fn new(frontal_photo: String, side_photo: String, result: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            frontal_photo,
            side_photo,
            result,
        }
    }
}

/// Newest-first list of past analyses, mirrored to durable storage after
/// every mutation.
pub struct HistoryStore {
    storage: Box<dyn KeyValueStore>,
    records: Vec<AnalysisRecord>,
}

impl HistoryStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            records: Vec::new(),
        }
    }

    /// Replaces the in-memory list with the stored one. A value that does not
    /// parse, or is not text at all, is removed from storage and the list
    /// starts empty.
    pub fn load(&mut self) -> &[AnalysisRecord] {
        self.records = match self.storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<AnalysisRecord>>(&raw) {
                Ok(records) => records,
                Err(err) => self.discard_corrupt(&err),
            },
            Ok(None) => Vec::new(),
            Err(StoreError::Unreadable(reason)) => self.discard_corrupt(&reason),
            Err(err) => {
                error!("failed to read stored history: {err}");
                Vec::new()
            }
        };

        info!(count = self.records.len(), "history loaded");
        &self.records
    }

    fn discard_corrupt(&mut self, reason: &dyn std::fmt::Display) -> Vec<AnalysisRecord> {
        error!("failed to parse stored history, discarding it: {reason}");
        if let Err(err) = self.storage.remove(HISTORY_KEY) {
            warn!("failed to remove corrupt history: {err}");
        }
        Vec::new()
    }

    pub fn append(&mut self, record: AnalysisRecord) {
        info!(record_id = %record.id, "history record added");
        self.records.insert(0, record);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
    }

    /// Drops the in-memory list without touching storage.
    pub fn unload(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn latest(&self, count: usize) -> &[AnalysisRecord] {
        &self.records[..count.min(self.records.len())]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.records) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!("failed to serialize history: {err}");
                return;
            }
        };

        if let Err(err) = self.storage.set(HISTORY_KEY, &serialized) {
            error!("failed to save history: {err}");
        }
    }
}
