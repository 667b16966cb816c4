use chrono::Utc;
use uuid::Uuid;

use crate::domain::model::{CalendarDate, HistoryRecord, IntervalRequest};
use crate::domain::ports::HistoryStore;
use crate::utils::error::{CalcError, Result};

/// Number of calculations kept.
pub const HISTORY_LIMIT: usize = 5;

/// Most-recent-first list of saved calculations over a [`HistoryStore`].
pub struct History<S: HistoryStore> {
    store: S,
}

impl<S: HistoryStore> History<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saved records, newest first. A store that cannot be read is treated as
    /// empty so a damaged file never blocks a calculation.
    pub fn list(&self) -> Vec<HistoryRecord> {
        match self.store.load() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("History unreadable, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    pub fn record(
        &self,
        start: CalendarDate,
        end: CalendarDate,
        diff: u32,
        intervals: IntervalRequest,
    ) -> Result<HistoryRecord> {
        let record = HistoryRecord {
            id: Uuid::new_v4().simple().to_string(),
            saved_at: Utc::now(),
            start,
            end,
            diff,
            intervals,
        };

        let mut records = self.list();
        records.insert(0, record.clone());
        records.truncate(HISTORY_LIMIT);
        self.store.store(&records)?;

        tracing::debug!("Saved history record {} ({} kept)", record.id, records.len());
        Ok(record)
    }

    pub fn find(&self, id: &str) -> Result<HistoryRecord> {
        self.list()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CalcError::HistoryNotFoundError { id: id.to_string() })
    }

    /// Returns whether a record was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.list();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.store.store(&records)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.store(&[])
    }
}
