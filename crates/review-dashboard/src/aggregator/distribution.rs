//! Rating histograms, overall and per fully elapsed year.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{RatingHistogram, Review, StackedComposition};

/// Count reviews by star rating, index 0 holding 1-star reviews.
pub fn rating_histogram<'a, I>(reviews: I) -> RatingHistogram
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut histogram = [0usize; 5];
    for review in reviews {
        // ratings are validated to 1..=5 by the loader
        if let Some(bucket) = histogram.get_mut(usize::from(review.rating).wrapping_sub(1)) {
            *bucket += 1;
        }
    }
    histogram
}

/// Distinct observed years strictly before `reference_year`, ascending.
///
/// Years are included whether or not the data covers all of their months.
pub fn full_years(reviews: &[Review], reference_year: i32) -> Vec<i32> {
    reviews
        .iter()
        .map(|r| r.review_year)
        .filter(|&year| year < reference_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Rating histogram for each of `years`, keyed by the year as a string.
pub fn rating_by_year(reviews: &[Review], years: &[i32]) -> BTreeMap<String, RatingHistogram> {
    years
        .iter()
        .map(|&year| {
            let histogram = rating_histogram(reviews.iter().filter(|r| r.review_year == year));
            (year.to_string(), histogram)
        })
        .collect()
}

/// Per-star counts for each of `years`, one series per star value.
pub fn stacked_composition(reviews: &[Review], years: &[i32]) -> StackedComposition {
    let mut by_star: BTreeMap<String, Vec<usize>> = (1..=5)
        .map(|star| (star.to_string(), Vec::with_capacity(years.len())))
        .collect();

    for &year in years {
        let histogram = rating_histogram(reviews.iter().filter(|r| r.review_year == year));
        for (idx, count) in histogram.into_iter().enumerate() {
            if let Some(series) = by_star.get_mut(&(idx + 1).to_string()) {
                series.push(count);
            }
        }
    }

    StackedComposition {
        years: years.iter().map(|y| y.to_string()).collect(),
        by_star,
    }
}
