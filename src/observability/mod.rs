//! Observability subsystem for rosterview
//!
//! Structured JSON logging of lifecycle events and session changes.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on the view state
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use rosterview::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::SortChanged, &[("column", "salary")]);
//!
//! let scope = ObservationScope::new("EXPORT");
//! // ... write the file ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
