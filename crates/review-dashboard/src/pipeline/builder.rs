//! The dashboard pipeline and its builder.
//!
//! One run is strictly linear: load, derive, aggregate, analyze text,
//! render. Each stage is a pure function of the previous stage's output;
//! the pipeline only sequences them and reports progress.

use chrono::{Datelike, Local};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::aggregator::{AggregateOptions, build_aggregates};
use crate::config::{ConfigValidationError, DashboardConfig};
use crate::error::{Result, ResultExt};
use crate::features::derive_features;
use crate::loader::{LoadSummary, ReviewLoader};
use crate::pipeline::progress::{
    ClosureProgressReporter, DashboardStage, ProgressReporter, ProgressUpdate,
};
use crate::reporting::{DashboardData, DashboardRenderer};
use crate::text::{
    LanguageClassifier, MarkerLanguageClassifier, Stopwords, detect_languages, word_rankings,
};

/// Outcome of a successful [`DashboardPipeline::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub rows: usize,
    pub unparseable_dates: usize,
    /// Number of reviews classified for the language breakdown.
    pub language_sample_size: usize,
    pub bytes_written: usize,
    pub avg_rating: Option<f64>,
    pub pct_positive: f64,
    pub pct_negative: f64,
    pub duration_ms: u64,
}

/// Dashboard data together with what the loader recovered from.
#[derive(Debug, Clone)]
pub struct PreparedDashboard {
    pub data: DashboardData,
    pub load: LoadSummary,
}

/// Turns a review table into the dashboard document.
///
/// Use [`DashboardPipeline::builder()`] to create one.
///
/// # Example
///
/// ```rust,ignore
/// use review_dashboard::{DashboardConfig, DashboardPipeline};
///
/// let config = DashboardConfig::builder()
///     .input_path("reviews.csv")
///     .output_path("dashboard.html")
///     .build()?;
///
/// let summary = DashboardPipeline::builder().config(config).build()?.run()?;
/// println!("{} reviews -> {}", summary.rows, summary.output_path.display());
/// ```
pub struct DashboardPipeline {
    config: DashboardConfig,
    classifier: Arc<dyn LanguageClassifier>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(DashboardPipeline: Send, Sync);

impl DashboardPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> DashboardPipelineBuilder {
        DashboardPipelineBuilder::default()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Run every stage and write the document to the configured output path.
    pub fn run(&self) -> Result<RunSummary> {
        match self.run_internal() {
            Ok(summary) => {
                self.report_progress(ProgressUpdate::complete("Dashboard generated"));
                Ok(summary)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Run every stage except the final write.
    pub fn build_data(&self) -> Result<DashboardData> {
        self.prepare().map(|prepared| prepared.data)
    }

    /// Like [`build_data`](Self::build_data), also returning the load summary.
    pub fn prepare(&self) -> Result<PreparedDashboard> {
        let config = &self.config;

        self.report_progress(ProgressUpdate::new(
            DashboardStage::Loading,
            0.0,
            format!("Loading {}", config.input_path.display()),
        ));
        let loaded = ReviewLoader::new(config.delimiter_byte())
            .load(&config.input_path)
            .context("Loading reviews")?;

        self.report_progress(ProgressUpdate::new(
            DashboardStage::DerivingFeatures,
            0.0,
            "Deriving sentiment labels",
        ));
        let reviews = derive_features(loaded.rows);

        let reference_year = config.reference_year.unwrap_or_else(|| Local::now().year());
        self.report_progress(ProgressUpdate::new(
            DashboardStage::Aggregating,
            0.0,
            format!("Aggregating {} reviews", reviews.len()),
        ));
        let options = AggregateOptions::new(reference_year).with_top_reviews(config.top_reviews);
        let aggregates = build_aggregates(&reviews, &options);
        debug!("Aggregates built with reference year {}", reference_year);

        self.report_progress(ProgressUpdate::new(
            DashboardStage::AnalyzingText,
            0.0,
            "Ranking words",
        ));
        let stopwords = match &config.stopwords_path {
            Some(path) => Stopwords::from_file(path)?,
            None => Stopwords::default(),
        };
        let words = word_rankings(
            &reviews,
            &stopwords,
            config.top_words_all,
            config.top_words_sentiment,
        );

        self.report_progress(ProgressUpdate::new(
            DashboardStage::DetectingLanguages,
            0.0,
            "Detecting review languages",
        ));
        let languages = detect_languages(
            &reviews,
            config.sample_size,
            config.sample_seed,
            self.classifier.as_ref(),
        );
        info!(
            "Classified {} sampled reviews into {} languages",
            languages.sample_size,
            languages.labels.len()
        );

        Ok(PreparedDashboard {
            data: DashboardData::new(aggregates, words, languages),
            load: loaded.summary,
        })
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        info!("Starting dashboard generation...");

        let prepared = self.prepare()?;
        let data = &prepared.data;

        self.report_progress(ProgressUpdate::new(
            DashboardStage::Rendering,
            0.0,
            "Rendering dashboard",
        ));
        let bytes_written =
            DashboardRenderer::new(&self.config.title).write(data, &self.config.output_path)?;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!("Dashboard generation completed in {}ms", duration_ms);

        Ok(RunSummary {
            input_path: self.config.input_path.clone(),
            output_path: self.config.output_path.clone(),
            rows: prepared.load.rows,
            unparseable_dates: prepared.load.unparseable_dates,
            language_sample_size: data.languages.sample_size,
            bytes_written,
            avg_rating: data.meta.avg_rating,
            pct_positive: data.meta.pct_positive,
            pct_negative: data.meta.pct_negative,
            duration_ms,
        })
    }
}

/// Builder for [`DashboardPipeline`].
#[derive(Default)]
pub struct DashboardPipelineBuilder {
    config: Option<DashboardConfig>,
    classifier: Option<Arc<dyn LanguageClassifier>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(DashboardPipelineBuilder: Send);

impl DashboardPipelineBuilder {
    /// Set the run configuration.
    pub fn config(mut self, config: DashboardConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default marker-based language classifier.
    pub fn language_classifier(mut self, classifier: Arc<dyn LanguageClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Set a progress reporter for receiving updates during a run.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<DashboardPipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(DashboardPipeline {
            config,
            classifier: self
                .classifier
                .unwrap_or_else(|| Arc::new(MarkerLanguageClassifier::new())),
            progress_reporter: self.progress_reporter,
        })
    }
}
