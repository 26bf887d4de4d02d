use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvJsonError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid file type for '{path}' (expected .{expected})")]
    InvalidFileType { path: String, expected: String },

    #[error("File does not exist: {path}")]
    FileNotFound { path: String },

    #[error("Either an output file or table output must be requested")]
    MissingOutputTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Processing,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CsvJsonError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CsvError(_) => ErrorCategory::Processing,
            Self::IoError(_) => ErrorCategory::Input,
            Self::SerializationError(_) => ErrorCategory::Output,
            Self::InvalidFileType { .. } | Self::FileNotFound { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingOutputTarget => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IoError(_) => ErrorSeverity::Critical,
            _ if self.category() == ErrorCategory::Configuration => ErrorSeverity::Medium,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::CsvError(e) => format!("Failed to parse CSV file: {}", e),
            Self::IoError(e) => format!("Could not access a file: {}", e),
            Self::SerializationError(e) => format!("Could not produce JSON output: {}", e),
            Self::InvalidFileType { path, expected } if expected == "csv" => {
                format!("Input file type is invalid: {}", path)
            }
            Self::InvalidFileType { path, .. } => format!("Output file type is invalid: {}", path),
            Self::FileNotFound { path } => format!("Input file does not exist: {}", path),
            Self::MissingOutputTarget => {
                "Either 'output-file' or 'output-table' arguments must be passed!".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check that the input path exists and ends with .csv",
            ErrorCategory::Configuration => "Run 'csvjson parse --help' to review the options",
            ErrorCategory::Processing => {
                "Check the delimiter and quote settings match the CSV file"
            }
            ErrorCategory::Output => "Check that the output path ends with .json and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, CsvJsonError>;
