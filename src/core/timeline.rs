use serde::Serialize;

use crate::domain::model::{CalendarDate, IntervalResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineMarker {
    pub interval: u32,
    /// Position along the range, 0 to 100.
    pub percent: f64,
    pub over: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineLabels {
    pub start: String,
    pub end: String,
}

impl TimelineLabels {
    pub fn new(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        Self {
            start: start.map_or_else(|| "Start".to_string(), |d| d.to_string()),
            end: end.map_or_else(|| "End".to_string(), |d| d.to_string()),
        }
    }
}

/// Places each result on a 0-100 scale of `total_months`. Offsets past the end
/// sit at 100. An empty range yields no markers.
pub fn timeline_markers(total_months: u32, results: &[IntervalResult]) -> Vec<TimelineMarker> {
    if total_months == 0 {
        return Vec::new();
    }
    let total = f64::from(total_months);
    results
        .iter()
        .map(|r| TimelineMarker {
            interval: r.interval,
            percent: (f64::from(r.interval) / total * 100.0).clamp(0.0, 100.0),
            over: r.over,
            label: format!("{}m", r.interval),
        })
        .collect()
}

/// Draws the markers on a fixed-width text bar.
pub fn render_bar(labels: &TimelineLabels, markers: &[TimelineMarker], width: usize) -> String {
    let width = width.max(2);
    let mut bar = vec!['-'; width];
    for marker in markers {
        let slot = ((marker.percent / 100.0) * (width - 1) as f64).round() as usize;
        bar[slot.min(width - 1)] = if marker.over { '!' } else { '|' };
    }
    let bar: String = bar.into_iter().collect();
    let legend: Vec<String> = markers
        .iter()
        .map(|m| format!("{}@{:.0}%", m.label, m.percent))
        .collect();
    let mut out = format!("{} [{}] {}", labels.start, bar, labels.end);
    if !legend.is_empty() {
        out.push('\n');
        out.push_str(&legend.join(" "));
    }
    out
}
