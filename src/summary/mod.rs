//! Aggregation Summary for rosterview
//!
//! A pure function of the full collection; filter and view state never
//! reach it.

mod aggregate;

pub use aggregate::{summarize, DatasetSummary, TopDepartment};
