pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use app::{App, Rendered};
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::{JsonFileStore, MemoryStore};
pub use config::toml_config::TomlConfig;
pub use crate::core::calculator::{Calculation, Calculator, Report, ReportStatus};
pub use crate::core::engine::{
    add_months, evaluate_intervals, month_difference, parse_interval_spec, years_months,
};
pub use crate::core::history::History;
pub use domain::model::{CalendarDate, HistoryRecord, IntervalRequest, IntervalResult};
pub use utils::error::{CalcError, Result};
