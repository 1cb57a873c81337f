//! Headline scalar statistics.

use std::collections::BTreeSet;

use crate::types::{Kpis, Review, Sentiment};
use crate::utils::{mean, percentage, round_to};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Compute the KPI block over the full review set.
///
/// Means over empty groups are `None`. Date bounds ignore reviews whose
/// date could not be parsed.
pub fn compute_kpis(reviews: &[Review]) -> Kpis {
    let total = reviews.len();
    let count_of = |sentiment: Sentiment| reviews.iter().filter(|r| r.sentiment == sentiment).count();
    let count_pos = count_of(Sentiment::Positive);
    let count_neg = count_of(Sentiment::Negative);
    let count_neu = count_of(Sentiment::Neutral);

    let dates = reviews.iter().filter_map(|r| r.review_date);
    let date_min = dates.clone().min().map(|d| d.format(DATE_FORMAT).to_string());
    let date_max = dates.max().map(|d| d.format(DATE_FORMAT).to_string());

    let n_years = reviews
        .iter()
        .map(|r| r.review_year)
        .collect::<BTreeSet<_>>()
        .len();

    Kpis {
        total,
        avg_rating: mean(reviews.iter().map(|r| f64::from(r.rating))).map(|avg| round_to(avg, 2)),
        pct_positive: percentage(count_pos, total),
        pct_negative: percentage(count_neg, total),
        pct_neutral: percentage(count_neu, total),
        count_pos,
        count_neg,
        count_neu,
        date_min,
        date_max,
        n_years,
        avg_len_pos: mean_length(reviews, Sentiment::Positive),
        avg_len_neu: mean_length(reviews, Sentiment::Neutral),
        avg_len_neg: mean_length(reviews, Sentiment::Negative),
    }
}

/// Mean `text_length` of one sentiment group, rounded to an integer.
fn mean_length(reviews: &[Review], sentiment: Sentiment) -> Option<u64> {
    mean(
        reviews
            .iter()
            .filter(|r| r.sentiment == sentiment)
            .map(|r| r.text_length as f64),
    )
    .map(|avg| avg.round_ties_even() as u64)
}
