//! Configuration types for the review dashboard pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup. Configurations can also be
//! loaded from a JSON file, with CLI flags layered on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result, ResultExt};

/// Default location of the processed reviews table.
pub const DEFAULT_INPUT_PATH: &str = "../data/processed/yassir_customers_processed.csv";

/// Default location of the generated dashboard.
pub const DEFAULT_OUTPUT_PATH: &str = "yassir_dashboard.html";

/// Default number of reviews sampled for language detection.
pub const DEFAULT_SAMPLE_SIZE: usize = 1500;

/// Default seed for the language-detection sample.
pub const DEFAULT_SAMPLE_SEED: u64 = 42;

/// Default number of reviews in the top-N engagement list.
pub const DEFAULT_TOP_REVIEWS: usize = 12;

/// Configuration for a dashboard run.
///
/// Use [`DashboardConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use review_dashboard::config::DashboardConfig;
///
/// let config = DashboardConfig::builder()
///     .input_path("data/reviews.csv")
///     .output_path("out/dashboard.html")
///     .sample_size(500)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Source table location.
    /// Default: "../data/processed/yassir_customers_processed.csv"
    pub input_path: PathBuf,

    /// Destination for the generated document. Overwritten if present.
    /// Default: "yassir_dashboard.html"
    pub output_path: PathBuf,

    /// Number of records sampled for language detection.
    /// The effective size is `min(sample_size, total records)`.
    /// Default: 1500
    pub sample_size: usize,

    /// Seed for the language-detection sample.
    /// Default: 42
    pub sample_seed: u64,

    /// Field delimiter of the input table.
    /// Default: ','
    pub delimiter: char,

    /// Calendar year treated as "current" when deciding which years are
    /// fully elapsed. `None` uses the local clock at run time.
    /// Default: None
    pub reference_year: Option<i32>,

    /// Number of reviews in the top-N by thumbs-up list.
    /// Default: 12
    pub top_reviews: usize,

    /// Length of the ranked word list over all reviews.
    /// Default: 20
    pub top_words_all: usize,

    /// Length of the ranked word lists over positive/negative reviews.
    /// Default: 15
    pub top_words_sentiment: usize,

    /// Optional newline-separated stopword file replacing the built-in list.
    /// Default: None
    pub stopwords_path: Option<PathBuf>,

    /// Document title.
    /// Default: "Customer Reviews Dashboard"
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            sample_size: DEFAULT_SAMPLE_SIZE,
            sample_seed: DEFAULT_SAMPLE_SEED,
            delimiter: ',',
            reference_year: None,
            top_reviews: DEFAULT_TOP_REVIEWS,
            top_words_all: 20,
            top_words_sentiment: 15,
            stopwords_path: None,
            title: "Customer Reviews Dashboard".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder.
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Reading config file {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| DashboardError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        for (field, value) in [
            ("sample_size", self.sample_size),
            ("top_reviews", self.top_reviews),
            ("top_words_all", self.top_words_all),
            ("top_words_sentiment", self.top_words_sentiment),
        ] {
            if value == 0 {
                return Err(ConfigValidationError::ZeroCount {
                    field: field.to_string(),
                });
            }
        }

        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConfigValidationError::InvalidDelimiter(self.delimiter));
        }

        if self.input_path == self.output_path {
            return Err(ConfigValidationError::OutputOverwritesInput(
                self.input_path.clone(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': must be at least 1")]
    ZeroCount { field: String },

    #[error("Invalid delimiter {0:?}: must be a single ASCII character other than a quote or newline")]
    InvalidDelimiter(char),

    #[error("Output path {0:?} would overwrite the input table")]
    OutputOverwritesInput(PathBuf),
}

impl From<ConfigValidationError> for DashboardError {
    fn from(error: ConfigValidationError) -> Self {
        DashboardError::InvalidConfig(error.to_string())
    }
}

/// Builder for [`DashboardConfig`] with fluent API.
///
/// Starts from [`DashboardConfig::default()`], or from an existing
/// configuration via [`DashboardConfigBuilder::from_config`].
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    base: Option<DashboardConfig>,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    sample_size: Option<usize>,
    sample_seed: Option<u64>,
    delimiter: Option<char>,
    reference_year: Option<i32>,
    top_reviews: Option<usize>,
    top_words_all: Option<usize>,
    top_words_sentiment: Option<usize>,
    stopwords_path: Option<PathBuf>,
    title: Option<String>,
}

impl DashboardConfigBuilder {
    /// Start from an existing configuration (e.g. one loaded from JSON).
    pub fn from_config(config: DashboardConfig) -> Self {
        Self {
            base: Some(config),
            ..Self::default()
        }
    }

    /// Set the input table path.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the output document path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set the language-detection sample size.
    pub fn sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    /// Set the language-detection sampling seed.
    pub fn sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    /// Set the input field delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Pin the "current" year used to select fully elapsed years.
    pub fn reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Set the length of the top-N engagement list.
    pub fn top_reviews(mut self, n: usize) -> Self {
        self.top_reviews = Some(n);
        self
    }

    /// Set the length of the all-reviews word ranking.
    pub fn top_words_all(mut self, n: usize) -> Self {
        self.top_words_all = Some(n);
        self
    }

    /// Set the length of the positive/negative word rankings.
    pub fn top_words_sentiment(mut self, n: usize) -> Self {
        self.top_words_sentiment = Some(n);
        self
    }

    /// Replace the built-in stopword list with the contents of a file.
    pub fn stopwords_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopwords_path = Some(path.into());
        self
    }

    /// Set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `DashboardConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<DashboardConfig, ConfigValidationError> {
        let base = self.base.unwrap_or_default();
        let config = DashboardConfig {
            input_path: self.input_path.unwrap_or(base.input_path),
            output_path: self.output_path.unwrap_or(base.output_path),
            sample_size: self.sample_size.unwrap_or(base.sample_size),
            sample_seed: self.sample_seed.unwrap_or(base.sample_seed),
            delimiter: self.delimiter.unwrap_or(base.delimiter),
            reference_year: self.reference_year.or(base.reference_year),
            top_reviews: self.top_reviews.unwrap_or(base.top_reviews),
            top_words_all: self.top_words_all.unwrap_or(base.top_words_all),
            top_words_sentiment: self.top_words_sentiment.unwrap_or(base.top_words_sentiment),
            stopwords_path: self.stopwords_path.or(base.stopwords_path),
            title: self.title.unwrap_or(base.title),
        };

        config.validate()?;
        Ok(config)
    }
}
