//! Progress reporting for a dashboard run.
//!
//! A run is short and single-threaded, but callers embedding the pipeline
//! (a CLI spinner, a desktop shell) still want to know which stage is
//! running. Updates carry the stage and the overall progress in `0.0..=1.0`.
//!
//! # Example
//!
//! ```rust,ignore
//! use review_dashboard::DashboardPipeline;
//!
//! let summary = DashboardPipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of a dashboard run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardStage {
    /// Reading and parsing the review table
    Loading,
    /// Attaching sentiment labels
    DerivingFeatures,
    /// KPIs, histograms, time series and top reviews
    Aggregating,
    /// Word-frequency rankings
    AnalyzingText,
    /// Sampling and classifying review languages
    DetectingLanguages,
    /// Building and writing the document
    Rendering,
    /// Run completed successfully
    Complete,
    /// Run failed with an error
    Failed,
}

impl DashboardStage {
    /// Stages that do work, in order.
    pub const WORKING: [DashboardStage; 6] = [
        DashboardStage::Loading,
        DashboardStage::DerivingFeatures,
        DashboardStage::Aggregating,
        DashboardStage::AnalyzingText,
        DashboardStage::DetectingLanguages,
        DashboardStage::Rendering,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Reviews",
            Self::DerivingFeatures => "Deriving Sentiment",
            Self::Aggregating => "Aggregating",
            Self::AnalyzingText => "Ranking Words",
            Self::DetectingLanguages => "Detecting Languages",
            Self::Rendering => "Rendering Dashboard",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Share of the whole run spent in this stage.
    ///
    /// Weights of the working stages sum to 1.0.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.25,
            Self::DerivingFeatures => 0.05,
            Self::Aggregating => 0.25,
            Self::AnalyzingText => 0.20,
            Self::DetectingLanguages => 0.10,
            Self::Rendering => 0.15,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Complete => 1.0,
            Self::Failed => 0.0,
            stage => Self::WORKING
                .iter()
                .take_while(|s| *s != stage)
                .map(|s| s.weight())
                .sum(),
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub stage: DashboardStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within the current stage (0.0 - 1.0)
    pub stage_progress: f32,

    pub message: String,
}

impl ProgressUpdate {
    pub fn new(stage: DashboardStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let stage_progress = stage_progress.clamp(0.0, 1.0);
        let progress = stage.base_progress() + stage.weight() * stage_progress;
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress,
            message: message.into(),
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: DashboardStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: DashboardStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }
}

/// Receives progress updates from a run.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// [`ProgressReporter`] backed by a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
