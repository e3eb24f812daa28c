//! Static data source for rosterview
//!
//! The employee collection is loaded once at process start and shared
//! read-only for the lifetime of the session. Nothing in the crate mutates
//! a record after load.
//!
//! # Ingestion invariants
//!
//! - `id` is unique across the collection
//! - `email` contains exactly one `@`
//! - `performanceRating` is finite and within [0, 5]
//! - `age` is positive
//!
//! The loader enforces these once; the view core relies on them and does
//! not re-validate.

mod errors;
mod loader;
mod record;

pub use errors::{DataError, DataResult};
pub use loader::{Dataset, DatasetLoader};
pub use record::Employee;
