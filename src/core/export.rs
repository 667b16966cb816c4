use crate::core::calculator::Report;
use crate::domain::model::CalendarDate;
use crate::domain::ports::DateStyle;
use crate::utils::error::{CalcError, Result};

pub const CSV_FILENAME: &str = "month-interval-results.csv";

pub fn format_date(date: CalendarDate, style: DateStyle) -> String {
    match style {
        DateStyle::Iso => date.to_string(),
        DateStyle::Numeric => date.to_numeric_string(),
        DateStyle::Word => date.to_word_string(),
        DateStyle::Both => format!("{} | {}", date.to_numeric_string(), date.to_word_string()),
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| CalcError::IoError(e.into_error()))
}

/// Two CSV sections separated by a blank line: the range summary, then one
/// row per interval.
pub fn render_csv(report: &Report) -> Result<String> {
    let mut summary = csv::Writer::from_writer(Vec::new());
    summary.write_record(["Start", "End", "TotalMonths", "YearsMonths"])?;
    summary.write_record([
        report.start.to_string(),
        report.end.to_string(),
        report.total_months.to_string(),
        report.breakdown.to_string(),
    ])?;
    let mut out = finish(summary)?;
    out.push(b'\n');

    let mut rows = csv::Writer::from_writer(Vec::new());
    rows.write_record(["IntervalMonths", "DateReached", "Status"])?;
    if report.results.is_empty() {
        rows.write_record(["", "", "No intervals"])?;
    }
    for result in &report.results {
        rows.write_record([
            result.interval.to_string(),
            result.date.to_string(),
            result.status_label().to_string(),
        ])?;
    }
    out.extend(finish(rows)?);

    String::from_utf8(out)
        .map_err(|e| CalcError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Plain text block for pasting into chats or spreadsheets.
pub fn render_text(report: &Report) -> String {
    let mut text = format!(
        "Start: {}\nEnd: {}\nTotal Months: {}\nYears+Months: {}\n\n",
        report.start, report.end, report.total_months, report.breakdown
    );
    text.push_str("Interval (Months)\tDate Reached\tStatus\n");
    if report.results.is_empty() {
        text.push_str("—\t—\tNo intervals\n");
    }
    for result in &report.results {
        text.push_str(&format!(
            "{}\t{}\t{}\n",
            result.interval,
            result.date,
            if result.over { "Exceeds" } else { "OK" }
        ));
    }
    text
}

/// Aligned table for terminal output.
pub fn render_table(report: &Report, style: DateStyle) -> String {
    let header = ["Interval (Months)", "Date Reached", "Status"];
    let rows: Vec<[String; 3]> = report
        .results
        .iter()
        .map(|r| {
            [
                r.interval.to_string(),
                format_date(r.date, style),
                if r.over { "Exceeds" } else { "OK" }.to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format!(
        "Start: {}\nEnd: {}\nTotal Months: {} ({})\n",
        format_date(report.start, style),
        format_date(report.end, style),
        report.total_months,
        report.breakdown
    );
    if rows.is_empty() {
        return out;
    }
    out.push('\n');
    let line = |cells: [&str; 3]| {
        format!(
            "{:<w0$}  {:<w1$}  {}\n",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1]
        )
    };
    out.push_str(&line(header));
    for row in &rows {
        out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    out
}
