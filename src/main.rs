use anyhow::Context;
use clap::Parser;
use month_interval::config::cli::LogFormat;
use month_interval::core::calculator::MessageKind;
use month_interval::core::ConfigProvider;
use month_interval::utils::error::ErrorSeverity;
use month_interval::utils::{logger, validation::Validate};
use month_interval::{App, CliConfig, JsonFileStore, MemoryStore, TomlConfig};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = TomlConfig::discover(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("failed to load config file '{}'", path.display()),
        None => "failed to load month-interval.toml".to_string(),
    })?;

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let outcome = if config.history_enabled() {
        let store = JsonFileStore::new(config.history_path());
        tracing::debug!("History file: {}", store.path().display());
        App::new(store, config).run(cli.command)
    } else {
        App::new(MemoryStore::default(), config).run(cli.command)
    };

    match outcome {
        Ok(rendered) => {
            print!("{}", rendered.body);
            if let Some(message) = rendered.message {
                eprintln!("{} {}", prefix(message.kind), message.text);
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn prefix(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "ℹ",
        MessageKind::Good => "✅",
        MessageKind::Warn => "⚠",
        MessageKind::Bad => "❌",
    }
}
