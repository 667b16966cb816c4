use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::CalcError;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A day on the proleptic Gregorian calendar, without time of day.
///
/// Field order makes the derived `Ord` the calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        if day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Values produced by month arithmetic; may run past `MAX_YEAR`.
    pub(crate) fn from_parts_unchecked(year: i32, month: u32, day: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        debug_assert!(day >= 1 && day <= days_in_month(year, month));
        Self { year, month, day }
    }

    /// Reads a date the way a date input does: an empty or malformed value
    /// counts as no date at all.
    pub fn parse_input(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        match text.parse() {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!("Ignoring date input: {}", e);
                None
            }
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// `DD/MM/YYYY`
    pub fn to_numeric_string(&self) -> String {
        format!("{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }

    /// `DD/Month/YYYY`
    pub fn to_word_string(&self) -> String {
        format!("{:02}/{}/{:04}", self.day, self.month_name(), self.year)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalcError::InvalidDateError {
            value: s.to_string(),
        };
        let parsed = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
        Self::from_ymd(parsed.year(), parsed.month(), parsed.day()).ok_or_else(invalid)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Requested month offsets: unique, positive, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct IntervalRequest(Vec<u32>);

impl IntervalRequest {
    pub fn new<I: IntoIterator<Item = u32>>(offsets: I) -> Self {
        let mut offsets: Vec<u32> = offsets.into_iter().filter(|&m| m > 0).collect();
        offsets.sort_unstable();
        offsets.dedup();
        Self(offsets)
    }

    pub fn offsets(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for IntervalRequest {
    fn from(offsets: Vec<u32>) -> Self {
        Self::new(offsets)
    }
}

impl From<IntervalRequest> for Vec<u32> {
    fn from(request: IntervalRequest) -> Self {
        request.0
    }
}

impl FromIterator<u32> for IntervalRequest {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a IntervalRequest {
    type Item = u32;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

/// Comma-joined, the inverse of parsing with the default delimiter.
impl fmt::Display for IntervalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(u32::to_string).collect();
        f.write_str(&joined.join(","))
    }
}

/// One evaluated offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalResult {
    pub interval: u32,
    pub date: CalendarDate,
    pub over: bool,
}

impl IntervalResult {
    pub fn status_label(&self) -> &'static str {
        if self.over {
            "Exceeds end date"
        } else {
            "Within range"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsMonths {
    pub years: u32,
    pub months: u32,
}

impl fmt::Display for YearsMonths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years {} months", self.years, self.months)
    }
}

/// Durable shape of one saved calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub saved_at: DateTime<Utc>,
    pub start: CalendarDate,
    pub end: CalendarDate,
    pub diff: u32,
    pub intervals: IntervalRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ymd_rejects_impossible_days() {
        assert!(CalendarDate::from_ymd(2023, 2, 29).is_none());
        assert!(CalendarDate::from_ymd(2024, 2, 29).is_some());
        assert!(CalendarDate::from_ymd(2024, 4, 31).is_none());
        assert!(CalendarDate::from_ymd(2024, 13, 1).is_none());
        assert!(CalendarDate::from_ymd(0, 1, 1).is_none());
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        let a = CalendarDate::from_ymd(2023, 12, 31).unwrap();
        let b = CalendarDate::from_ymd(2024, 1, 1).unwrap();
        let c = CalendarDate::from_ymd(2024, 1, 2).unwrap();
        assert!(a < b && b < c);
        assert_eq!(b, CalendarDate::from_ymd(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_and_format() {
        let date: CalendarDate = "2024-02-09".parse().unwrap();
        assert_eq!(date.to_string(), "2024-02-09");
        assert_eq!(date.to_numeric_string(), "09/02/2024");
        assert_eq!(date.to_word_string(), "09/February/2024");
        assert!("2024-02-30".parse::<CalendarDate>().is_err());
        assert!("09/02/2024".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_parse_input_treats_bad_values_as_absent() {
        assert!(CalendarDate::parse_input("").is_none());
        assert!(CalendarDate::parse_input("   ").is_none());
        assert!(CalendarDate::parse_input("not-a-date").is_none());
        assert_eq!(
            CalendarDate::parse_input(" 2023-05-31 "),
            CalendarDate::from_ymd(2023, 5, 31)
        );
    }

    #[test]
    fn test_serde_uses_iso_string() {
        let date = CalendarDate::from_ymd(2024, 7, 15).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-07-15\"");
        let back: CalendarDate = serde_json::from_str("\"2024-07-15\"").unwrap();
        assert_eq!(back, date);
        assert!(serde_json::from_str::<CalendarDate>("\"2024-07-32\"").is_err());
    }

    #[test]
    fn test_interval_request_normalizes() {
        let request = IntervalRequest::new([9, 3, 0, 6, 3]);
        assert_eq!(request.offsets(), &[3, 6, 9]);
        assert_eq!(request.to_string(), "3,6,9");
        assert!(IntervalRequest::default().is_empty());
        let from_json: IntervalRequest = serde_json::from_str("[12, 6, 6]").unwrap();
        assert_eq!(from_json.offsets(), &[6, 12]);
    }

    #[test]
    fn test_years_months_display() {
        let ym = YearsMonths { years: 2, months: 5 };
        assert_eq!(ym.to_string(), "2 years 5 months");
    }
}
