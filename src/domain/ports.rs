use crate::domain::model::HistoryRecord;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Backing storage for saved calculations. Implementations persist the whole
/// list at once; ordering and capping belong to the caller.
pub trait HistoryStore: Send + Sync {
    fn load(&self) -> Result<Vec<HistoryRecord>>;
    fn store(&self, records: &[HistoryRecord]) -> Result<()>;
}

/// How a reached date is printed in the terminal table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DateStyle {
    #[default]
    Iso,
    Numeric,
    Word,
    Both,
}

pub trait ConfigProvider: Send + Sync {
    fn history_path(&self) -> &str;
    fn history_enabled(&self) -> bool;
    fn delimiter(&self) -> char;
    fn date_style(&self) -> DateStyle;
    fn default_intervals(&self) -> Option<&str>;
}
