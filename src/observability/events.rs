//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events emitted by the query engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded and validated
    ConfigLoaded,

    // Reference index
    /// Product inserted or replaced in the in-memory index
    IndexDocumentInserted,
    /// Product removed from the in-memory index
    IndexDocumentRemoved,

    // Query
    /// Query routed to a backend operation
    QueryDispatched,
    /// Backend operation returned an error
    QueryFailed,
    /// Unrecognised clusivity value replaced by the all-collections rule
    ClusivityFallback,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::IndexDocumentInserted => "INDEX_DOCUMENT_INSERTED",
            Event::IndexDocumentRemoved => "INDEX_DOCUMENT_REMOVED",
            Event::QueryDispatched => "QUERY_DISPATCHED",
            Event::QueryFailed => "QUERY_FAILED",
            Event::ClusivityFallback => "CLUSIVITY_FALLBACK",
        }
    }

    /// Severity an event is logged at by default
    pub fn severity(&self) -> super::Severity {
        use super::Severity;

        match self {
            Event::ConfigLoaded => Severity::Info,
            Event::IndexDocumentInserted | Event::IndexDocumentRemoved => Severity::Trace,
            Event::QueryDispatched => Severity::Trace,
            Event::QueryFailed => Severity::Error,
            Event::ClusivityFallback => Severity::Warn,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
