//! Batch editing for gazetteer property records
//!
//! This crate turns a selection of UPRNs plus one edit intent into a batch
//! run: fetch each record, apply the transformation, save the result, and
//! reconcile the canonical responses into the client-side caches. Failures
//! are accumulated per record on an [`ErrorSurface`] rather than aborting
//! the run.

pub mod batch;
pub mod intent;
pub mod reconcile;
pub mod surface;

pub use batch::{BatchEditor, BatchRun, SkipPolicy, SkippedRecord};
pub use intent::{CrossRefMatcher, EditIntent, ParentPolicy, Transformed};
pub use reconcile::{MapSearchCache, ReconcileSinks, SandboxCache, SearchResultsCache};
pub use surface::{ErrorSurface, RecordFailure};
