//! Customer Review Dashboard Library
//!
//! Turns a processed table of app-store style customer reviews into one
//! self-contained HTML dashboard, built with Rust and Polars.
//!
//! # Overview
//!
//! A run is a one-shot batch over a single input table:
//!
//! - **Loading**: schema validation, strict numeric checks, tolerant date parsing
//! - **Features**: a sentiment label derived from each star rating
//! - **Aggregation**: KPIs, rating histograms, yearly/monthly series, a
//!   year x month heatmap and the most-endorsed reviews
//! - **Text analysis**: stopword-filtered word rankings and a marker-based
//!   language breakdown over a seeded sample
//! - **Rendering**: every aggregate embedded as one JSON literal in a static
//!   HTML/CSS/JS template
//!
//! Every stage below the pipeline is a pure function of its input, so the
//! same table and configuration always give a byte-identical document.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use review_dashboard::{DashboardConfig, DashboardPipeline};
//!
//! let config = DashboardConfig::builder()
//!     .input_path("data/reviews.csv")
//!     .output_path("out/dashboard.html")
//!     .reference_year(2025)
//!     .build()?;
//!
//! let summary = DashboardPipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//!
//! println!("{} reviews, avg {:?}", summary.rows, summary.avg_rating);
//! ```
//!
//! # Using the stages directly
//!
//! ```rust,ignore
//! use review_dashboard::aggregator::{AggregateOptions, build_aggregates};
//! use review_dashboard::{ReviewLoader, derive_features};
//!
//! let loaded = ReviewLoader::default().load("reviews.csv")?;
//! let reviews = derive_features(loaded.rows);
//! let aggregates = build_aggregates(&reviews, &AggregateOptions::new(2025));
//! println!("{:?}", aggregates.kpis);
//! ```
//!
//! # Language detection
//!
//! The default [`MarkerLanguageClassifier`] scores French and English
//! function-word markers and falls back to an Arabic-script check. Plug in
//! another implementation of [`LanguageClassifier`] through
//! [`DashboardPipelineBuilder::language_classifier`].

pub mod aggregator;
pub mod config;
pub mod error;
pub mod features;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod text;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregator::{AggregateOptions, ReviewAggregates, build_aggregates};
pub use config::{ConfigValidationError, DashboardConfig, DashboardConfigBuilder};
pub use error::{DashboardError, Result as DashboardResult, ResultExt};
pub use features::derive_features;
pub use loader::{LoadSummary, LoadedReviews, REQUIRED_COLUMNS, ReviewLoader};
pub use pipeline::{
    ClosureProgressReporter, DashboardPipeline, DashboardPipelineBuilder, DashboardStage,
    PreparedDashboard, ProgressReporter, ProgressUpdate, RunSummary,
};
pub use reporting::{DashboardData, DashboardRenderer};
pub use text::{LanguageClassifier, MarkerLanguageClassifier, Stopwords, Tokenizer};
pub use types::{
    Heatmap, HeatmapCell, Kpis, Language, LanguageDistribution, MonthlySeries, RatingHistogram,
    Review, ReviewRow, Sentiment, StackedComposition, TopReview, WordCount, WordRankings,
    YearlyVolume,
};
