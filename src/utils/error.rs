use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDateError { value: String },

    #[error("Both start and end dates are required")]
    IncompleteInputError,

    #[error("End date {end} is earlier than start date {start}")]
    InvalidRangeError { start: String, end: String },

    #[error("No history record with id '{id}'")]
    HistoryNotFoundError { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn config(message: impl Into<String>) -> Self {
        CalcError::ConfigError {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CalcError::IncompleteInputError => ErrorSeverity::Low,
            CalcError::InvalidRangeError { .. }
            | CalcError::InvalidDateError { .. }
            | CalcError::HistoryNotFoundError { .. } => ErrorSeverity::Medium,
            CalcError::ConfigError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::CsvError(_)
            | CalcError::SerializationError(_) => ErrorSeverity::High,
            CalcError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for stderr.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::IncompleteInputError => "Select both Start Date and End Date.".to_string(),
            CalcError::InvalidRangeError { .. } => {
                "End Date is earlier than Start Date. Please correct it.".to_string()
            }
            CalcError::InvalidDateError { value } => format!("'{}' is not a valid date", value),
            CalcError::HistoryNotFoundError { id } => format!("History item '{}' not found", id),
            CalcError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CalcError::IncompleteInputError => "Pass both --start and --end",
            CalcError::InvalidRangeError { .. } => "Swap the dates or pick a later end date",
            CalcError::InvalidDateError { .. } => "Use the YYYY-MM-DD format, e.g. 2024-01-31",
            CalcError::HistoryNotFoundError { .. } => "Run 'history list' to see saved ids",
            CalcError::ConfigError { .. }
            | CalcError::InvalidConfigValueError { .. } => "Check the configuration file",
            CalcError::IoError(_) => "Check that the path exists and is writable",
            CalcError::CsvError(_) | CalcError::SerializationError(_) => {
                "Re-run with --verbose for details"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(CalcError::IncompleteInputError.severity(), ErrorSeverity::Low);
        let range = CalcError::InvalidRangeError {
            start: "2023-05-31".into(),
            end: "2023-05-30".into(),
        };
        assert_eq!(range.severity(), ErrorSeverity::Medium);
        let io = CalcError::from(std::io::Error::other("disk"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_messages() {
        let err = CalcError::HistoryNotFoundError { id: "abc".into() };
        assert_eq!(err.user_friendly_message(), "History item 'abc' not found");
        assert_eq!(err.to_string(), "No history record with id 'abc'");
    }
}
