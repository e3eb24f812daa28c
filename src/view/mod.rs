//! View Pipeline for rosterview
//!
//! Composes filter, stable sort and clamped pagination into one
//! deterministic transformation, and wraps it in a session that owns the
//! mutable filter and view state.
//!
//! # Invariants
//!
//! - Filtering preserves collection order and is idempotent
//! - Sorting is stable; ties keep their filtered order in both directions
//! - Pagination never errors; out-of-range pages clamp to the last page
//! - Total filtered count is taken before pagination

mod errors;
mod pipeline;
mod result;
mod session;
mod sorter;
mod state;

pub use errors::{ViewError, ViewResult};
pub use pipeline::ViewPipeline;
pub use result::Page;
pub use session::ViewSession;
pub use sorter::ResultSorter;
pub use state::{PageSize, SortDirection, SortSpec, ViewState};
