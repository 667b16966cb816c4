use month_interval::core::engine::{format_interval_spec, parse_interval_spec_with};
use month_interval::{
    add_months, evaluate_intervals, month_difference, parse_interval_spec, years_months,
    Calculation, CalendarDate, Calculator, IntervalResult, ReportStatus,
};

fn date(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

#[test]
fn test_reference_schedule() {
    let start = date("2024-01-15");
    let end = date("2024-07-15");
    let offsets = parse_interval_spec("3,6,9");

    assert_eq!(month_difference(start, end), 6);
    assert_eq!(
        evaluate_intervals(start, end, &offsets),
        vec![
            IntervalResult {
                interval: 3,
                date: date("2024-04-15"),
                over: false
            },
            IntervalResult {
                interval: 6,
                date: date("2024-07-15"),
                over: false
            },
            IntervalResult {
                interval: 9,
                date: date("2024-10-15"),
                over: true
            },
        ]
    );
}

#[test]
fn test_month_end_clamping_by_leap_year() {
    assert_eq!(add_months(date("2024-01-31"), 1), date("2024-02-29"));
    assert_eq!(add_months(date("2023-01-31"), 1), date("2023-02-28"));
    assert_eq!(add_months(date("2100-01-31"), 1), date("2100-02-28"));
    assert_eq!(add_months(date("2000-01-31"), 1), date("2000-02-29"));
}

#[test]
fn test_month_difference_inverts_add_months_without_clamping() {
    let starts = ["2020-01-01", "2021-06-28", "1999-12-15"];
    for start in starts.map(date) {
        for n in (0..=120).step_by(7) {
            assert_eq!(month_difference(start, add_months(start, n)), n);
        }
    }
}

#[test]
fn test_month_difference_after_chained_clamping() {
    // 03-31 -> 04-30 -> 05-30 ... -> 2023-02-28 -> 03-28 ...: once clamped the
    // end day stays below 31, so every later step is one month short.
    let start = date("2022-03-31");
    let mut end = start;
    for n in 0..40u32 {
        let expected = if n == 0 { 0 } else { n - 1 };
        assert!(n == 0 || end.day() < start.day(), "step {n}: {end}");
        assert_eq!(month_difference(start, end), expected, "step {n}: {end}");
        end = add_months(end, 1);
    }
    assert_eq!(end, date("2025-07-28"));
}

#[test]
fn test_parse_drops_malformed_tokens() {
    assert_eq!(parse_interval_spec("6,3,3,-1,abc,9").offsets(), &[3, 6, 9]);
    assert_eq!(parse_interval_spec_with("12 | 6 | x", '|').offsets(), &[6, 12]);

    let once = parse_interval_spec(" 24, 1e1 ,oops,,3.0");
    assert_eq!(parse_interval_spec(&format_interval_spec(&once)), once);
}

#[test]
fn test_invalid_range_scenario() {
    let calc = Calculator::default().calculate(
        CalendarDate::parse_input("2023-05-31"),
        CalendarDate::parse_input("2023-05-30"),
        "3,6,9",
    );
    assert!(matches!(calc, Calculation::InvalidRange { .. }));
    assert_eq!(calc.total_months(), 0);
    assert!(calc.report().is_none());
}

#[test]
fn test_incomplete_input_scenario() {
    let calc = Calculator::default().calculate(
        CalendarDate::parse_input(""),
        CalendarDate::parse_input(""),
        "",
    );
    assert_eq!(
        calc,
        Calculation::Incomplete {
            start: None,
            end: None
        }
    );
}

#[test]
fn test_no_intervals_still_reports_difference() {
    let report = Calculator::default()
        .calculate(Some(date("2021-02-28")), Some(date("2024-03-27")), "")
        .into_report()
        .unwrap();
    assert_eq!(report.total_months, 36);
    assert_eq!(report.breakdown, years_months(36));
    assert_eq!(report.status(), ReportStatus::NoIntervals);
}
