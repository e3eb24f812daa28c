//! Observable events for rosterview
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded and validated
    ConfigLoaded,

    // Data
    /// Dataset parsed and validated
    DatasetLoaded,
    /// Schema registry built over the dataset
    SchemaBuilt,

    // Session controls
    /// Column filter installed or removed
    FilterApplied,
    /// Column filter rejected, state unchanged
    FilterRejected,
    /// Other setter input rejected, state unchanged
    RequestRejected,
    /// Quick-search query changed
    SearchChanged,
    /// Sort column or direction changed
    SortChanged,
    /// Requested page was out of range and clamped
    PageClamped,
    /// Page size changed
    PageSizeChanged,

    // Export
    /// CSV export written
    ExportWritten,
    /// CSV export failed
    ExportFailed,
}

impl Event {
    /// Returns the event name as used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::SchemaBuilt => "SCHEMA_BUILT",
            Event::FilterApplied => "FILTER_APPLIED",
            Event::FilterRejected => "FILTER_REJECTED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::SearchChanged => "SEARCH_CHANGED",
            Event::SortChanged => "SORT_CHANGED",
            Event::PageClamped => "PAGE_CLAMPED",
            Event::PageSizeChanged => "PAGE_SIZE_CHANGED",
            Event::ExportWritten => "EXPORT_WRITTEN",
            Event::ExportFailed => "EXPORT_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::FilterRejected | Event::RequestRejected => Severity::Warn,
            Event::ExportFailed => Severity::Error,
            Event::SearchChanged | Event::PageClamped => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
