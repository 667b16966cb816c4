use crate::core::DateStyle;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Text,
    Json,
}

/// Start and end as typed by the user. Empty or malformed values count as
/// missing.
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// Start date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub start: String,

    /// End date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub end: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compute the month difference and evaluate interval offsets
    Calc {
        #[command(flatten)]
        range: RangeArgs,

        /// Delimited month offsets, e.g. "3,6,9,12"
        #[arg(short, long)]
        intervals: Option<String>,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Date rendering for the table format
        #[arg(long, value_enum)]
        date_style: Option<DateStyle>,

        /// Write the rendered output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the timeline bar under the table
        #[arg(long)]
        timeline: bool,

        /// Do not record this calculation in history
        #[arg(long)]
        no_save: bool,
    },

    /// Print quarterly preset offsets for a month count or for the range
    Preset {
        /// Month count to build presets for; computed from the range when omitted
        total: Option<u32>,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Inspect saved calculations
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum HistoryCommand {
    /// List saved calculations, newest first
    List,
    /// Show one saved calculation
    Show { id: String },
    /// Re-run a saved calculation without saving it again
    Load {
        id: String,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Delete one saved calculation
    Delete { id: String },
    /// Delete all saved calculations
    Clear,
}
