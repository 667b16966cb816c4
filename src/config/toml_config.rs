use crate::core::engine::DEFAULT_DELIMITER;
use crate::core::{ConfigProvider, DateStyle};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "month-interval.toml";
pub const DEFAULT_HISTORY_FILE: &str = "month-interval-history.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub history: HistoryConfig,
    pub intervals: IntervalsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_HISTORY_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalsConfig {
    pub delimiter: String,
    /// Used by `calc` when no `--intervals` is given.
    pub default: Option<String>,
}

impl Default for IntervalsConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            default: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub date_style: DateStyle,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CalcError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given, otherwise `month-interval.toml` in the working
    /// directory if present, otherwise defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CalcError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references (e.g. `${HOME}`) with environment values.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| CalcError::config(format!("env pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.history.enabled {
            validation::validate_path("history.path", &self.history.path)?;
        }

        validation::validate_delimiter("intervals.delimiter", &self.intervals.delimiter)?;

        if let Some(default) = &self.intervals.default {
            validation::validate_non_empty_string("intervals.default", default)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn history_path(&self) -> &str {
        &self.history.path
    }

    fn history_enabled(&self) -> bool {
        self.history.enabled
    }

    fn delimiter(&self) -> char {
        self.intervals
            .delimiter
            .chars()
            .next()
            .unwrap_or(DEFAULT_DELIMITER)
    }

    fn date_style(&self) -> DateStyle {
        self.output.date_style
    }

    fn default_intervals(&self) -> Option<&str> {
        self.intervals.default.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.history_enabled());
        assert_eq!(config.history_path(), DEFAULT_HISTORY_FILE);
        assert_eq!(config.delimiter(), ',');
        assert_eq!(config.date_style(), DateStyle::Iso);
        assert!(config.default_intervals().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[history]
enabled = false
path = "/tmp/history.json"

[intervals]
delimiter = ";"
default = "3;6;9;12"

[output]
date_style = "both"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(!config.history_enabled());
        assert_eq!(config.delimiter(), ';');
        assert_eq!(config.default_intervals(), Some("3;6;9;12"));
        assert_eq!(config.date_style(), DateStyle::Both);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MONTH_INTERVAL_TEST_DIR", "/var/lib/mi");

        let toml_content = r#"
[history]
path = "${MONTH_INTERVAL_TEST_DIR}/history.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.history.path, "/var/lib/mi/history.json");

        std::env::remove_var("MONTH_INTERVAL_TEST_DIR");
    }

    #[test]
    fn test_unknown_env_var_left_in_place() {
        let config = TomlConfig::from_toml_str(
            "[history]\npath = \"${MONTH_INTERVAL_SURELY_UNSET}/h.json\"\n",
        )
        .unwrap();
        assert_eq!(config.history.path, "${MONTH_INTERVAL_SURELY_UNSET}/h.json");
    }

    #[test]
    fn test_config_validation() {
        let bad_delimiter = TomlConfig::from_toml_str("[intervals]\ndelimiter = \"ab\"\n").unwrap();
        assert!(bad_delimiter.validate().is_err());

        let empty_path = TomlConfig::from_toml_str("[history]\npath = \"\"\n").unwrap();
        assert!(empty_path.validate().is_err());

        let disabled = TomlConfig::from_toml_str("[history]\nenabled = false\npath = \"\"\n").unwrap();
        assert!(disabled.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[output]\ndate_style = \"fancy\"\n").unwrap_err();
        assert!(matches!(err, CalcError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\ndate_style = \"word\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.date_style(), DateStyle::Word);

        let discovered = TomlConfig::discover(Some(temp_file.path())).unwrap();
        assert_eq!(discovered.date_style(), DateStyle::Word);
    }
}
