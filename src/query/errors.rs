//! Query executor error types
//!
//! Error codes:
//! - CATALOG_QUERY_CONFIGURATION (FATAL)
//!
//! Backend failures are not wrapped here; `execute` hands them back in the
//! backend's own error type.

use std::fmt;

/// Severity levels for executor errors
///
/// Per-call failures belong to the backend, so every executor error is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The executor instance cannot be used
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Executor error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Executor wired without a required collaborator
    CatalogQueryConfiguration,
}

impl QueryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::CatalogQueryConfiguration => "CATALOG_QUERY_CONFIGURATION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            QueryErrorCode::CatalogQueryConfiguration => Severity::Fatal,
        }
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with full context
#[derive(Debug)]
pub struct QueryError {
    code: QueryErrorCode,
    message: String,
}

impl QueryError {
    /// Create a configuration error (FATAL)
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::CatalogQueryConfiguration,
            message: reason.into(),
        }
    }

    /// Create the error raised when no backend was supplied
    pub fn missing_backend() -> Self {
        Self::configuration("The index search backend cannot be absent")
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for QueryError {}

/// Result type for executor construction
pub type QueryResult<T> = Result<T, QueryError>;
