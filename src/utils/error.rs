use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GistError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Bad or missing parameter: {message}")]
    BadParameter { message: String },

    #[error("GitHub user not found: {username}")]
    UserNotFound { username: String },

    #[error("Upstream request to {url} failed: {message}")]
    ExternalError { url: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Request,
    Upstream,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GistError {
    pub fn bad_parameter(message: impl Into<String>) -> Self {
        Self::BadParameter {
            message: message.into(),
        }
    }

    pub fn external(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalError {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::BadParameter { .. } | Self::InvalidPattern(_) | Self::UserNotFound { .. } => {
                ErrorCategory::Request
            }
            Self::ApiError(_) | Self::ExternalError { .. } => ErrorCategory::Upstream,
            Self::IoError(_) | Self::ProcessingError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Internal => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// HTTP status reported to API callers.
    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Request => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::BadParameter { .. } | Self::InvalidPattern(_) => "Bad or missing parameter",
            Self::UserNotFound { .. } => "Invalid username",
            Self::ApiError(_) | Self::ExternalError { .. } => {
                "Information could not be retrieved from Github"
            }
            _ => "Your request could not be processed",
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags, environment variables and config file"
            }
            ErrorCategory::Request => "Fix the request parameters and try again",
            ErrorCategory::Upstream => {
                "Check network access to GitHub, or configure GITHUB_TOKEN to raise rate limits"
            }
            ErrorCategory::Internal => "Re-run with --verbose and inspect the logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, GistError>;
