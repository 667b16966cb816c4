//! Input gate in front of the engine: decides whether a pair of dates can be
//! evaluated and packages the outcome for renderers.

use serde::Serialize;

use crate::core::engine::{self, DEFAULT_DELIMITER};
use crate::domain::model::{CalendarDate, IntervalRequest, IntervalResult, YearsMonths};
use crate::utils::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Good,
    Warn,
    Bad,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "count", rename_all = "snake_case")]
pub enum ReportStatus {
    NoIntervals,
    AllWithin,
    Exceeding(usize),
}

/// A fully evaluated range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub start: CalendarDate,
    pub end: CalendarDate,
    pub total_months: u32,
    pub breakdown: YearsMonths,
    pub intervals: IntervalRequest,
    pub results: Vec<IntervalResult>,
}

impl Report {
    pub fn status(&self) -> ReportStatus {
        if self.results.is_empty() {
            return ReportStatus::NoIntervals;
        }
        match self.results.iter().filter(|r| r.over).count() {
            0 => ReportStatus::AllWithin,
            n => ReportStatus::Exceeding(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Calculation {
    /// One or both dates missing; the engine was not run.
    Incomplete {
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
    },
    /// End precedes start; reported as zero months with no intervals.
    InvalidRange {
        start: CalendarDate,
        end: CalendarDate,
    },
    Computed(Report),
}

impl Calculation {
    pub fn total_months(&self) -> u32 {
        match self {
            Calculation::Computed(report) => report.total_months,
            _ => 0,
        }
    }

    pub fn breakdown(&self) -> YearsMonths {
        engine::years_months(self.total_months())
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            Calculation::Computed(report) => Some(report),
            _ => None,
        }
    }

    /// The status line a caller shows after calculating. `None` is the idle
    /// state with nothing entered yet.
    pub fn message(&self) -> Option<Message> {
        match self {
            Calculation::Incomplete {
                start: None,
                end: None,
            } => None,
            Calculation::Incomplete { .. } => Some(Message::new(
                MessageKind::Info,
                "Select both Start Date and End Date.",
            )),
            Calculation::InvalidRange { .. } => Some(Message::new(
                MessageKind::Bad,
                "End Date is earlier than Start Date. Please correct it.",
            )),
            Calculation::Computed(report) => Some(match report.status() {
                ReportStatus::NoIntervals => Message::new(
                    MessageKind::Good,
                    "Dates calculated. Add custom intervals (optional) like: 3,6,9,12",
                ),
                ReportStatus::AllWithin => Message::new(
                    MessageKind::Good,
                    "Done. All intervals are within the selected date range.",
                ),
                ReportStatus::Exceeding(n) => Message::new(
                    MessageKind::Warn,
                    format!("Done. {} interval(s) exceed the end date range.", n),
                ),
            }),
        }
    }

    /// Converts the non-computed outcomes into errors for callers that need a
    /// report to proceed.
    pub fn into_report(self) -> Result<Report, CalcError> {
        match self {
            Calculation::Computed(report) => Ok(report),
            Calculation::Incomplete { .. } => Err(CalcError::IncompleteInputError),
            Calculation::InvalidRange { start, end } => Err(CalcError::InvalidRangeError {
                start: start.to_string(),
                end: end.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Calculator {
    delimiter: char,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Calculator {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Parses `raw_intervals` and evaluates them once both dates are present
    /// and in order.
    pub fn calculate(
        &self,
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
        raw_intervals: &str,
    ) -> Calculation {
        let intervals = engine::parse_interval_spec_with(raw_intervals, self.delimiter);
        self.calculate_request(start, end, intervals)
    }

    pub fn calculate_request(
        &self,
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
        intervals: IntervalRequest,
    ) -> Calculation {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            (start, end) => {
                tracing::debug!("Skipping calculation: start={:?} end={:?}", start, end);
                return Calculation::Incomplete { start, end };
            }
        };

        if end < start {
            tracing::debug!("Rejecting range {} -> {}", start, end);
            return Calculation::InvalidRange { start, end };
        }

        let total_months = engine::month_difference(start, end);
        let results = engine::evaluate_intervals(start, end, &intervals);
        tracing::debug!(
            "Evaluated {} interval(s) over {} month(s)",
            results.len(),
            total_months
        );

        Calculation::Computed(Report {
            start,
            end,
            total_months,
            breakdown: engine::years_months(total_months),
            intervals,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_both_dates_missing_is_silent_idle() {
        let calc = Calculator::default().calculate(None, None, "3,6");
        assert_eq!(calc, Calculation::Incomplete { start: None, end: None });
        assert_eq!(calc.total_months(), 0);
        assert!(calc.message().is_none());
        assert!(matches!(calc.into_report(), Err(CalcError::IncompleteInputError)));
    }

    #[test]
    fn test_one_date_missing_prompts() {
        let calc = Calculator::default().calculate(Some(date("2024-01-01")), None, "");
        let message = calc.message().unwrap();
        assert_eq!(message.kind, MessageKind::Info);
        assert!(calc.report().is_none());
    }

    #[test]
    fn test_invalid_range_reports_zero() {
        let calc = Calculator::default().calculate(
            Some(date("2023-05-31")),
            Some(date("2023-05-30")),
            "3,6",
        );
        assert!(matches!(calc, Calculation::InvalidRange { .. }));
        assert_eq!(calc.total_months(), 0);
        assert_eq!(calc.breakdown().to_string(), "0 years 0 months");
        assert!(calc.report().is_none());
        assert_eq!(calc.message().unwrap().kind, MessageKind::Bad);
    }

    #[test]
    fn test_no_intervals_is_informational() {
        let calc = Calculator::default().calculate(
            Some(date("2024-01-15")),
            Some(date("2025-03-20")),
            " , abc",
        );
        let report = calc.report().unwrap();
        assert_eq!(report.total_months, 14);
        assert_eq!(report.breakdown.to_string(), "1 years 2 months");
        assert_eq!(report.status(), ReportStatus::NoIntervals);
        assert_eq!(calc.message().unwrap().kind, MessageKind::Good);
    }

    #[test]
    fn test_exceeding_intervals_warn() {
        let calc = Calculator::default().calculate(
            Some(date("2024-01-15")),
            Some(date("2024-07-15")),
            "9,3,6",
        );
        let report = calc.report().unwrap();
        assert_eq!(report.intervals.offsets(), &[3, 6, 9]);
        assert_eq!(report.status(), ReportStatus::Exceeding(1));
        let message = calc.message().unwrap();
        assert_eq!(message.kind, MessageKind::Warn);
        assert_eq!(message.text, "Done. 1 interval(s) exceed the end date range.");
    }

    #[test]
    fn test_custom_delimiter() {
        let calc = Calculator::new(';').calculate(
            Some(date("2024-01-15")),
            Some(date("2024-07-15")),
            "3;6",
        );
        assert_eq!(calc.report().unwrap().status(), ReportStatus::AllWithin);
    }

    #[test]
    fn test_same_day_range_is_valid() {
        let d = date("2024-02-29");
        let report = Calculator::default()
            .calculate(Some(d), Some(d), "1")
            .into_report()
            .unwrap();
        assert_eq!(report.total_months, 0);
        assert!(report.results[0].over);
    }
}
