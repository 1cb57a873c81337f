//! Pipeline module.
//!
//! Sequences the loader, feature derivation, aggregation, text analysis and
//! rendering into one run, with optional progress reporting.

mod builder;
pub mod progress;

pub use builder::{DashboardPipeline, DashboardPipelineBuilder, PreparedDashboard, RunSummary};
pub use progress::{ClosureProgressReporter, DashboardStage, ProgressReporter, ProgressUpdate};
