//! Simulation utilities and program loading.
//!
//! Provides the file loader for program images and the summary types
//! returned when a run ends.

pub mod loader;

/// Run summaries and termination reasons.
pub mod summary;

pub use summary::{FaultReport, RunSummary, Termination};
