use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::model::HistoryRecord;
use crate::domain::ports::HistoryStore;
use crate::utils::error::{CalcError, Result};

/// History kept as a pretty-printed JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records = serde_json::from_str(&content)?;
        Ok(records)
    }

    fn store(&self, records: &[HistoryRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, data)?;
        tracing::debug!("Wrote {} history record(s) to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Process-local history, for tests and runs with persistence turned off.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<HistoryRecord>>,
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<HistoryRecord>> {
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|_| CalcError::config("history store lock poisoned"))
    }

    fn store(&self, records: &[HistoryRecord]) -> Result<()> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| CalcError::config("history store lock poisoned"))?;
        *guard = records.to_vec();
        Ok(())
    }
}
