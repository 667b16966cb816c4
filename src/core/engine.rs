//! Calendar interval arithmetic.
//!
//! Every function here is pure: no I/O, no shared state.

use crate::domain::model::{
    days_in_month, CalendarDate, IntervalRequest, IntervalResult, YearsMonths,
};

/// Largest accepted offset (10 000 years). Keeps every reachable date
/// representable for any start date.
pub const MAX_OFFSET: u32 = 120_000;

pub const DEFAULT_DELIMITER: char = ',';

/// Presets never list more than this many offsets.
pub const PRESET_LIMIT: usize = 16;

/// Whole months elapsed from `start` to `end`. A month only counts once the
/// day-of-month of `end` reaches that of `start`. Never negative.
pub fn month_difference(start: CalendarDate, end: CalendarDate) -> u32 {
    let mut months = (i64::from(end.year()) - i64::from(start.year())) * 12
        + (i64::from(end.month()) - i64::from(start.month()));
    if end.day() < start.day() {
        months -= 1;
    }
    u32::try_from(months.max(0)).unwrap_or(u32::MAX)
}

/// Advances `date` by `n` months, clamping the day to the target month's length
/// (Jan 31 + 1 month is the last day of February).
pub fn add_months(date: CalendarDate, n: u32) -> CalendarDate {
    // Work from day 1 of the target month so a long source day cannot spill
    // into the month after.
    let index = i64::from(date.year()) * 12 + i64::from(date.month() - 1) + i64::from(n);
    let year = i32::try_from(index.div_euclid(12)).unwrap_or(i32::MAX);
    let month = (index.rem_euclid(12) + 1) as u32;
    let last_day = days_in_month(year, month);
    CalendarDate::from_parts_unchecked(year, month, date.day().min(last_day))
}

/// Evaluates each requested offset against the range. Offsets are deduplicated
/// and sorted first, so the output is ascending whatever the input order.
pub fn evaluate_intervals<I>(start: CalendarDate, end: CalendarDate, offsets: I) -> Vec<IntervalResult>
where
    I: IntoIterator<Item = u32>,
{
    let request: IntervalRequest = offsets.into_iter().collect();
    let total = month_difference(start, end);
    request
        .offsets()
        .iter()
        .map(|&interval| IntervalResult {
            interval,
            date: add_months(start, interval),
            over: interval > total,
        })
        .collect()
}

/// Parses a comma separated list of offsets.
pub fn parse_interval_spec(text: &str) -> IntervalRequest {
    parse_interval_spec_with(text, DEFAULT_DELIMITER)
}

/// Permissive parsing: tokens that are empty, not numeric, not whole, not
/// positive or above [`MAX_OFFSET`] are dropped without error.
pub fn parse_interval_spec_with(text: &str, delimiter: char) -> IntervalRequest {
    let mut dropped = 0usize;
    let request: IntervalRequest = text
        .split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let parsed = parse_offset(token);
            if parsed.is_none() {
                dropped += 1;
            }
            parsed
        })
        .collect();
    if dropped > 0 {
        tracing::debug!("Dropped {} malformed interval token(s)", dropped);
    }
    request
}

fn parse_offset(token: &str) -> Option<u32> {
    let value: f64 = token.parse().ok()?;
    if !value.is_finite() || value <= 0.0 || value.fract() != 0.0 || value > f64::from(MAX_OFFSET) {
        return None;
    }
    Some(value as u32)
}

/// Inverse of [`parse_interval_spec`].
pub fn format_interval_spec(request: &IntervalRequest) -> String {
    request.to_string()
}

pub fn years_months(months: u32) -> YearsMonths {
    YearsMonths {
        years: months / 12,
        months: months % 12,
    }
}

/// Quarterly offsets up to `total`, ending on `total` itself.
pub fn preset_intervals(total: u32) -> Vec<u32> {
    let mut offsets: Vec<u32> = (3..=total).step_by(3).collect();
    if total > 0 && !offsets.contains(&total) {
        offsets.push(total);
    }
    offsets.truncate(PRESET_LIMIT);
    offsets
}
