//! Aggregate queries over the derived review set.
//!
//! Every function here is a pure query over `&[Review]`; [`build_aggregates`]
//! composes them into the [`ReviewAggregates`] snapshot consumed by the
//! renderer. Nothing reads the clock: the year used to decide which years
//! are fully elapsed is passed in through [`AggregateOptions`].

pub mod distribution;
pub mod engagement;
pub mod kpis;
pub mod temporal;

pub use distribution::{full_years, rating_by_year, rating_histogram, stacked_composition};
pub use engagement::top_reviews;
pub use kpis::compute_kpis;
pub use temporal::{forward_fill, heatmap, month_key, monthly_series, yearly_volume};

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::DEFAULT_TOP_REVIEWS;
use crate::types::{
    Heatmap, Kpis, MonthlySeries, RatingHistogram, Review, StackedComposition, TopReview,
    YearlyVolume,
};

/// Inputs to aggregation that do not come from the data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Years strictly before this one count as fully elapsed.
    pub reference_year: i32,
    /// Length of the top reviews list.
    pub top_reviews: usize,
}

impl AggregateOptions {
    pub fn new(reference_year: i32) -> Self {
        Self {
            reference_year,
            top_reviews: DEFAULT_TOP_REVIEWS,
        }
    }

    pub fn with_top_reviews(mut self, n: usize) -> Self {
        self.top_reviews = n;
        self
    }
}

/// Immutable snapshot of every numeric aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewAggregates {
    pub kpis: Kpis,
    pub rating_all: RatingHistogram,
    pub rating_by_year: BTreeMap<String, RatingHistogram>,
    pub yearly: YearlyVolume,
    pub monthly: MonthlySeries,
    pub heatmap: Heatmap,
    pub stacked: StackedComposition,
    pub top_reviews: Vec<TopReview>,
}

/// Run every aggregate query over `reviews`.
pub fn build_aggregates(reviews: &[Review], options: &AggregateOptions) -> ReviewAggregates {
    let years = full_years(reviews, options.reference_year);
    debug!(
        "Full years before {}: {:?}",
        options.reference_year, years
    );

    ReviewAggregates {
        kpis: compute_kpis(reviews),
        rating_all: rating_histogram(reviews),
        rating_by_year: rating_by_year(reviews, &years),
        yearly: yearly_volume(reviews),
        monthly: monthly_series(reviews),
        heatmap: heatmap(reviews),
        stacked: stacked_composition(reviews, &years),
        top_reviews: top_reviews(reviews, options.top_reviews),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::review;
    use super::*;

    #[test]
    fn test_build_aggregates_is_consistent() {
        let reviews = vec![
            review(0, 5, 2022, 4),
            review(1, 4, 2022, 9),
            review(2, 3, 2023, 1),
            review(3, 2, 2024, 6),
            review(4, 1, 2024, 6),
        ];
        let aggregates = build_aggregates(&reviews, &AggregateOptions::new(2024));

        assert_eq!(aggregates.kpis.total, 5);
        assert_eq!(aggregates.rating_all, [1, 1, 1, 1, 1]);
        assert_eq!(
            aggregates.rating_by_year.keys().collect::<Vec<_>>(),
            vec!["2022", "2023"]
        );
        assert_eq!(aggregates.stacked.years, vec!["2022", "2023"]);
        assert_eq!(aggregates.yearly.counts.iter().sum::<usize>(), 5);
        assert_eq!(aggregates.monthly.all.iter().sum::<usize>(), 5);
        assert_eq!(aggregates.heatmap.data.iter().map(|c| c.v).sum::<usize>(), 5);
        assert_eq!(aggregates.top_reviews.len(), 5);
    }

    #[test]
    fn test_top_reviews_option() {
        let reviews: Vec<Review> = (0..8).map(|i| review(i, 4, 2023, 1)).collect();
        let options = AggregateOptions::new(2024).with_top_reviews(3);
        assert_eq!(build_aggregates(&reviews, &options).top_reviews.len(), 3);
    }
}
