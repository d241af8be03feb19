//! Reference index error types

use thiserror::Error;

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors raised by the in-memory product index
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Page or page size is zero
    #[error("Invalid paging: page {page}, items per page {items_per_page} (both must be at least 1)")]
    InvalidPaging { page: u64, items_per_page: u64 },

    /// Index settings failed validation
    #[error("Invalid index configuration: {0}")]
    InvalidConfig(String),

    /// Index state cannot be read or written
    #[error("Index unavailable: {0}")]
    Unavailable(String),
}

impl IndexError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexError::InvalidPaging { .. } => "CATALOG_INDEX_INVALID_PAGING",
            IndexError::InvalidConfig(_) => "CATALOG_INDEX_INVALID_CONFIG",
            IndexError::Unavailable(_) => "CATALOG_INDEX_UNAVAILABLE",
        }
    }
}
