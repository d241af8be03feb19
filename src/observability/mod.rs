//! Observability for the query engine
//!
//! Structured JSON-lines logging with typed events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on query results
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use storefront_query::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::QueryDispatched, &[("route", "SEARCH")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

#[cfg(test)]
pub(crate) use logger::threshold_guard;

/// Log a typed event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a typed event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
