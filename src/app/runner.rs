use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::cli::{Command, HistoryCommand, OutputFormat, RangeArgs};
use crate::core::calculator::{Calculation, Calculator, Message, MessageKind, Report};
use crate::core::engine;
use crate::core::export::{self, CSV_FILENAME};
use crate::core::history::History;
use crate::core::timeline::{render_bar, timeline_markers, TimelineLabels};
use crate::core::{CalendarDate, ConfigProvider, DateStyle, HistoryRecord, HistoryStore};
use crate::utils::error::Result;

const TIMELINE_WIDTH: usize = 40;

/// What a command produced: text for stdout plus an optional status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub body: String,
    pub message: Option<Message>,
}

impl Rendered {
    fn new(body: String, message: Option<Message>) -> Self {
        Self { body, message }
    }

    fn notice(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            body: String::new(),
            message: Some(Message {
                kind,
                text: text.into(),
            }),
        }
    }
}

struct RenderOptions {
    format: OutputFormat,
    date_style: DateStyle,
    timeline: bool,
}

pub struct App<S: HistoryStore, C: ConfigProvider> {
    calculator: Calculator,
    history: History<S>,
    config: C,
}

impl<S: HistoryStore, C: ConfigProvider> App<S, C> {
    pub fn new(store: S, config: C) -> Self {
        Self {
            calculator: Calculator::new(config.delimiter()),
            history: History::new(store),
            config,
        }
    }

    pub fn history(&self) -> &History<S> {
        &self.history
    }

    pub fn run(&self, command: Command) -> Result<Rendered> {
        match command {
            Command::Calc {
                range,
                intervals,
                format,
                date_style,
                output,
                timeline,
                no_save,
            } => {
                let options = RenderOptions {
                    format,
                    date_style: date_style.unwrap_or_else(|| self.config.date_style()),
                    timeline,
                };
                let rendered = self.calc(&range, intervals.as_deref(), &options, !no_save)?;
                match output {
                    Some(path) => self.write_output(&path, format, rendered),
                    None => Ok(rendered),
                }
            }
            Command::Preset { total, range } => self.preset(total, &range),
            Command::History { action } => self.history_command(action),
        }
    }

    fn calc(
        &self,
        range: &RangeArgs,
        intervals: Option<&str>,
        options: &RenderOptions,
        save: bool,
    ) -> Result<Rendered> {
        let start = CalendarDate::parse_input(&range.start);
        let end = CalendarDate::parse_input(&range.end);
        let raw = intervals
            .or_else(|| self.config.default_intervals())
            .unwrap_or("");

        let calculation = self.calculator.calculate(start, end, raw);
        let message = calculation.message();
        if let Calculation::Incomplete { .. } = calculation {
            return Ok(Rendered::new(String::new(), message));
        }
        let report = calculation.into_report()?;

        tracing::info!(
            "Calculated {} -> {}: {} month(s), {} interval(s)",
            report.start,
            report.end,
            report.total_months,
            report.results.len()
        );
        let body = self.render(&report, options)?;

        // Saving comes last; a store that cannot be written only costs the
        // history entry.
        let mut message = message;
        if save && self.config.history_enabled() {
            if let Err(e) = self.history.record(
                report.start,
                report.end,
                report.total_months,
                report.intervals.clone(),
            ) {
                tracing::warn!("History not saved: {}", e);
                let note = format!("History not saved: {}", e.user_friendly_message());
                message = Some(Message {
                    kind: MessageKind::Warn,
                    text: match message {
                        Some(m) => format!("{} {}", m.text, note),
                        None => note,
                    },
                });
            }
        }

        Ok(Rendered::new(body, message))
    }

    fn render(&self, report: &Report, options: &RenderOptions) -> Result<String> {
        let body = match options.format {
            OutputFormat::Table => {
                let mut out = export::render_table(report, options.date_style);
                if options.timeline {
                    let labels = TimelineLabels::new(Some(report.start), Some(report.end));
                    let markers = timeline_markers(report.total_months, &report.results);
                    out.push('\n');
                    out.push_str(&render_bar(&labels, &markers, TIMELINE_WIDTH));
                    out.push('\n');
                }
                out
            }
            OutputFormat::Csv => export::render_csv(report)?,
            OutputFormat::Text => export::render_text(report),
            OutputFormat::Json => {
                let mut json = serde_json::to_value(report)?;
                if options.timeline {
                    let markers = timeline_markers(report.total_months, &report.results);
                    json["timeline"] = serde_json::to_value(markers)?;
                }
                let mut out = serde_json::to_string_pretty(&json)?;
                out.push('\n');
                out
            }
        };
        Ok(body)
    }

    fn write_output(&self, path: &Path, format: OutputFormat, rendered: Rendered) -> Result<Rendered> {
        if rendered.body.is_empty() {
            return Ok(rendered);
        }
        let target: PathBuf = if path.is_dir() && format == OutputFormat::Csv {
            path.join(CSV_FILENAME)
        } else {
            path.to_path_buf()
        };
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, rendered.body.as_bytes())?;
        tracing::info!("Output saved to: {}", target.display());

        let note = format!("Output saved to: {}", target.display());
        let message = match rendered.message {
            Some(m) => Message {
                kind: m.kind,
                text: format!("{} {}", m.text, note),
            },
            None => Message {
                kind: MessageKind::Good,
                text: note,
            },
        };
        Ok(Rendered::new(String::new(), Some(message)))
    }

    fn preset(&self, total: Option<u32>, range: &RangeArgs) -> Result<Rendered> {
        let total = match total {
            Some(total) => total,
            None => {
                let start = CalendarDate::parse_input(&range.start);
                let end = CalendarDate::parse_input(&range.end);
                let calculation = self.calculator.calculate(start, end, "");
                if let Calculation::Incomplete { .. } = calculation {
                    return Ok(Rendered::notice(
                        MessageKind::Info,
                        "Pass a month count or both --start and --end.",
                    ));
                }
                calculation.into_report()?.total_months
            }
        };

        let offsets = engine::preset_intervals(total);
        if offsets.is_empty() {
            return Ok(Rendered::notice(
                MessageKind::Info,
                "Range is shorter than one month; no presets.",
            ));
        }
        let delimiter = self.calculator.delimiter().to_string();
        let body: Vec<String> = offsets.iter().map(u32::to_string).collect();
        Ok(Rendered::new(format!("{}\n", body.join(&delimiter)), None))
    }

    fn history_command(&self, action: HistoryCommand) -> Result<Rendered> {
        match action {
            HistoryCommand::List => {
                let records = self.history.list();
                if records.is_empty() {
                    return Ok(Rendered::notice(
                        MessageKind::Info,
                        "No history yet. Run 'calc' to save.",
                    ));
                }
                let blocks: Vec<String> = records.iter().map(describe_record).collect();
                Ok(Rendered::new(blocks.join("\n"), None))
            }
            HistoryCommand::Show { id } => {
                let record = self.history.find(&id)?;
                Ok(Rendered::new(describe_record(&record), None))
            }
            HistoryCommand::Load { id, format } => {
                let record = self.history.find(&id)?;
                let report = self
                    .calculator
                    .calculate_request(Some(record.start), Some(record.end), record.intervals)
                    .into_report()?;
                let options = RenderOptions {
                    format,
                    date_style: self.config.date_style(),
                    timeline: false,
                };
                Ok(Rendered::new(
                    self.render(&report, &options)?,
                    Some(Message {
                        kind: MessageKind::Good,
                        text: "Loaded from history.".to_string(),
                    }),
                ))
            }
            HistoryCommand::Delete { id } => {
                if self.history.delete(&id)? {
                    Ok(Rendered::notice(MessageKind::Good, "Deleted one history item."))
                } else {
                    Ok(Rendered::notice(
                        MessageKind::Warn,
                        format!("No history item with id '{}'.", id),
                    ))
                }
            }
            HistoryCommand::Clear => {
                self.history.clear()?;
                Ok(Rendered::notice(MessageKind::Good, "History cleared."))
            }
        }
    }
}

fn describe_record(record: &HistoryRecord) -> String {
    let intervals = if record.intervals.is_empty() {
        "—".to_string()
    } else {
        record
            .intervals
            .offsets()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "[{}] {} → {}\n  Total: {} months ({})\n  Intervals: {}\n  Saved: {}\n",
        record.id,
        record.start,
        record.end,
        record.diff,
        engine::years_months(record.diff),
        intervals,
        record.saved_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    )
}
