pub mod calculator;
pub mod engine;
pub mod export;
pub mod history;
pub mod timeline;

pub use crate::domain::model::{CalendarDate, HistoryRecord, IntervalRequest, IntervalResult};
pub use crate::domain::ports::{ConfigProvider, DateStyle, HistoryStore};
pub use crate::utils::error::Result;
