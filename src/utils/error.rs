use std::path::PathBuf;
use thiserror::Error;

/// 載入資料集時的錯誤，對整個工作階段而言都是致命的。
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read data file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parsing error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Missing required columns in {}: {}", path.display(), columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error("Malformed row at line {line} in {}: {message}", path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Configuration,
    System,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::DataLoad(_) => ErrorCategory::Data,
            DashboardError::IoError(_) => ErrorCategory::System,
            DashboardError::SerializationError(_) => ErrorCategory::Output,
            DashboardError::TomlError(_)
            | DashboardError::ConfigError { .. }
            | DashboardError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應嚴重程度的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DashboardError::DataLoad(DataLoadError::NotFound { .. }) => {
                "Check the --data path or the [data] path entry in the config file".to_string()
            }
            DashboardError::DataLoad(DataLoadError::MissingColumns { .. }) => format!(
                "The CSV header must contain: {}",
                crate::domain::model::REQUIRED_COLUMNS.join(", ")
            ),
            DashboardError::DataLoad(DataLoadError::Malformed { .. })
            | DashboardError::DataLoad(DataLoadError::Csv { .. }) => {
                "Fix the offending row; count columns must be non-negative integers".to_string()
            }
            DashboardError::DataLoad(DataLoadError::Unreadable { .. })
            | DashboardError::IoError(_) => "Check file permissions and disk state".to_string(),
            DashboardError::TomlError(_) => "Make sure the config file is valid TOML".to_string(),
            DashboardError::ConfigError { .. }
            | DashboardError::InvalidConfigValueError { .. } => {
                "Run with --help to see the accepted values".to_string()
            }
            DashboardError::SerializationError(_) => "Try a different --format".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashboardError::DataLoad(e) => format!("Could not load the dataset. {}", e),
            DashboardError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
