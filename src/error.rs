//! Error types for rdskit
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The taxonomy mirrors how failures surface to callers: transport-level
//! problems (connection, non-2xx status, malformed JSON), schema problems
//! (response arrived but the configured record path had the wrong shape),
//! and timeouts from the job-poll workflow. The fetcher never retries and
//! never suppresses an error; translating a 404 into "legitimately absent"
//! is a caller decision made via [`Error::is_not_found`].

use thiserror::Error;

/// The main error type for rdskit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Schema Errors
    // ============================================================================
    #[error("Record path '{path}' did not resolve to an array: {message}")]
    Schema { path: String, message: String },

    // ============================================================================
    // Poll Workflow Errors
    // ============================================================================
    #[error("Job did not finish within {deadline_secs}s (last status: {last_status})")]
    Timeout {
        deadline_secs: u64,
        last_status: String,
    },

    #[error("Job failed: {message}")]
    JobFailed { message: String },

    // ============================================================================
    // Template Errors
    // ============================================================================
    #[error("Undefined placeholder in path template: {placeholder}")]
    UndefinedPlaceholder { placeholder: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a schema error for a record path
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a job failure error
    pub fn job_failed(message: impl Into<String>) -> Self {
        Self::JobFailed {
            message: message.into(),
        }
    }

    /// Create an undefined placeholder error
    pub fn undefined_placeholder(placeholder: impl Into<String>) -> Self {
        Self::UndefinedPlaceholder {
            placeholder: placeholder.into(),
        }
    }

    /// Whether this error is a 404-class "resource does not exist" response.
    ///
    /// The fetcher surfaces these verbatim; callers that treat a missing
    /// sub-resource as legitimately absent check this and substitute an
    /// empty result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::HttpStatus { status: 404, .. })
    }
}

/// Result type alias for rdskit
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
