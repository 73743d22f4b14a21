use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("A view is already attached to this presenter")]
    AlreadyAttached,

    #[error("No tokio runtime is available to drive subscriptions")]
    NoRuntime,

    #[error("Repository command failed: {message}")]
    Repository { message: String },

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

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lifecycle,
    Repository,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PresenterError {
    pub fn repository(message: impl Into<String>) -> Self {
        PresenterError::Repository {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PresenterError::AlreadyAttached | PresenterError::NoRuntime => ErrorCategory::Lifecycle,
            PresenterError::Repository { .. } => ErrorCategory::Repository,
            PresenterError::IoError(_) | PresenterError::SerializationError(_) => {
                ErrorCategory::System
            }
            PresenterError::ConfigError { .. }
            | PresenterError::ConfigValidationError { .. }
            | PresenterError::InvalidConfigValueError { .. }
            | PresenterError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lifecycle => ErrorSeverity::Low,
            ErrorCategory::Repository => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PresenterError::AlreadyAttached => "Detach the current view before attaching another",
            PresenterError::NoRuntime => "Call attach_view from inside a tokio runtime",
            PresenterError::Repository { .. } => {
                "The repository owns retries; check its logs and try the action again"
            }
            PresenterError::IoError(_) => "Check that the file exists and is readable",
            PresenterError::SerializationError(_) => "Check the report or scenario encoding",
            PresenterError::ConfigError { .. } | PresenterError::ConfigValidationError { .. } => {
                "Check the scenario file for TOML syntax errors"
            }
            PresenterError::InvalidConfigValueError { .. } => {
                "Fix the highlighted value in the scenario file"
            }
            PresenterError::MissingConfigError { .. } => "Add the missing field to the scenario file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PresenterError::ConfigValidationError { field, .. }
            | PresenterError::InvalidConfigValueError { field, .. }
            | PresenterError::MissingConfigError { field } => {
                format!("設定錯誤 ({}): {}", field, self)
            }
            PresenterError::IoError(_) => format!("檔案讀取失敗: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PresenterError>;
