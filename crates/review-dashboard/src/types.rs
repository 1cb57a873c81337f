//! Record and aggregate types shared across the pipeline stages.
//!
//! Rows come out of the loader as [`ReviewRow`], gain their derived
//! sentiment in [`crate::features`] to become [`Review`], and every aggregate
//! the renderer embeds has an explicit struct here. Field names of the
//! aggregate structs are the keys the dashboard script reads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Review records
// ============================================================================

/// A review as parsed from the input table, before feature derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    /// Zero-based position in the input table.
    pub id: usize,
    /// Author display name; `None` when missing or blank.
    pub author: Option<String>,
    /// Star rating in 1..=5.
    pub rating: u8,
    /// Review body; empty when missing.
    pub text: String,
    /// Parsed review date; `None` when the raw value was unparseable.
    pub review_date: Option<NaiveDate>,
    pub review_year: i32,
    /// Month in 1..=12.
    pub review_month: u32,
    pub thumbs_up_count: u64,
    pub text_length: u64,
}

/// A fully derived review record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: usize,
    pub author: Option<String>,
    pub rating: u8,
    pub text: String,
    pub review_date: Option<NaiveDate>,
    pub review_year: i32,
    pub review_month: u32,
    pub thumbs_up_count: u64,
    pub text_length: u64,
    /// Derived from `rating`, see [`Sentiment::from_rating`].
    pub sentiment: Sentiment,
}

/// Three-way sentiment label derived from a star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Ratings of 4 and above are positive, 2 and below negative.
    pub fn from_rating(rating: u8) -> Self {
        if rating >= 4 {
            Sentiment::Positive
        } else if rating <= 2 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language label assigned by the heuristic classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Arabic,
    French,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Arabic => "Arabic",
            Language::French => "French",
            Language::English => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Aggregate report types
// ============================================================================

/// Counts of ratings 1..=5, index 0 holding the 1-star count.
pub type RatingHistogram = [usize; 5];

/// Scalar KPIs shown at the top of the dashboard.
///
/// Means over an empty group are `None` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total: usize,
    pub avg_rating: Option<f64>,
    pub pct_positive: f64,
    pub pct_negative: f64,
    pub pct_neutral: f64,
    pub count_pos: usize,
    pub count_neg: usize,
    pub count_neu: usize,
    /// Earliest parseable review date as `YYYY-MM-DD`.
    pub date_min: Option<String>,
    /// Latest parseable review date as `YYYY-MM-DD`.
    pub date_max: Option<String>,
    /// Number of distinct review years.
    pub n_years: usize,
    pub avg_len_pos: Option<u64>,
    pub avg_len_neu: Option<u64>,
    pub avg_len_neg: Option<u64>,
}

/// Review count per year, in ascending year order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyVolume {
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
    /// Share of all reviews per year, in percent to one decimal.
    pub pct: Vec<f64>,
}

/// Per-month series keyed by `YYYY-MM`, all aligned on `labels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub all: Vec<usize>,
    pub pos: Vec<usize>,
    pub neg: Vec<usize>,
    /// Mean rating per month, forward-filled over months without data.
    pub avg_rating: Vec<Option<f64>>,
    /// Mean of the monthly averages of the calendar months either side of
    /// each key and the key itself, skipping months without reviews.
    pub avg_rating_rolling: Vec<Option<f64>>,
}

/// One non-empty cell of the year x month density grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// Index into `Heatmap::year_labels`.
    pub x: usize,
    /// Month index, 0 for January.
    pub y: usize,
    /// Bubble radius, `sqrt(v) * 1.5` rounded to one decimal.
    pub r: f64,
    /// Raw review count.
    pub v: usize,
}

/// Sparse year x month density grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub data: Vec<HeatmapCell>,
    pub year_labels: Vec<String>,
    pub month_labels: Vec<String>,
}

/// Per-star counts for each fully elapsed year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedComposition {
    pub years: Vec<String>,
    /// Keyed by star value `"1"`..`"5"`, each aligned on `years`.
    pub by_star: BTreeMap<String, Vec<usize>>,
}

/// A ranked token with its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Word rankings over all, positive and negative reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRankings {
    pub all: Vec<WordCount>,
    pub pos: Vec<WordCount>,
    pub neg: Vec<WordCount>,
}

/// Projection of a highly upvoted review for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopReview {
    pub author: String,
    pub rating: u8,
    pub thumbs: u64,
    pub date: String,
    pub text: String,
}

/// Language breakdown of the sampled reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageDistribution {
    pub labels: Vec<Language>,
    pub counts: Vec<usize>,
    pub avg_ratings: Vec<Option<f64>>,
    /// Share of the sample per language, in percent to one decimal.
    pub pct: Vec<f64>,
    /// Number of reviews that were classified.
    pub sample_size: usize,
}
