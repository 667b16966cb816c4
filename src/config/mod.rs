#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "month-interval")]
#[command(about = "Whole-month differences and interval schedules between two dates")]
pub struct CliConfig {
    /// Path to a TOML configuration file (defaults to ./month-interval.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value = "compact")]
    pub log_format: cli::LogFormat,

    #[command(subcommand)]
    pub command: cli::Command,
}
