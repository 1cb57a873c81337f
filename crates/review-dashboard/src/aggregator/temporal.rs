//! Yearly and monthly volume series and the year x month density grid.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Heatmap, HeatmapCell, MonthlySeries, Review, Sentiment, YearlyVolume};
use crate::utils::{mean, percentage, round_to};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `YYYY-MM` key for a review's year and zero-padded month.
///
/// Keys sort lexicographically in calendar order for four-digit years.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

/// Review count and share per observed year, ascending.
pub fn yearly_volume(reviews: &[Review]) -> YearlyVolume {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for review in reviews {
        *counts.entry(review.review_year).or_default() += 1;
    }

    YearlyVolume {
        labels: counts.keys().map(|y| y.to_string()).collect(),
        pct: counts
            .values()
            .map(|&count| percentage(count, reviews.len()))
            .collect(),
        counts: counts.into_values().collect(),
    }
}

#[derive(Default)]
struct MonthBucket {
    all: usize,
    pos: usize,
    neg: usize,
    ratings: Vec<f64>,
}

/// Per-month counts, sentiment splits and mean rating over every observed
/// `YYYY-MM` key.
///
/// Positive and negative counts are zero where a month has none of that
/// sentiment. The mean rating is rounded to two decimals and forward-filled.
/// The rolling mean spans calendar neighbours, so a month with no reviews
/// is skipped rather than bridged.
pub fn monthly_series(reviews: &[Review]) -> MonthlySeries {
    let mut buckets: BTreeMap<(i32, u32), MonthBucket> = BTreeMap::new();
    for review in reviews {
        let bucket = buckets
            .entry((review.review_year, review.review_month))
            .or_default();
        bucket.all += 1;
        match review.sentiment {
            Sentiment::Positive => bucket.pos += 1,
            Sentiment::Negative => bucket.neg += 1,
            Sentiment::Neutral => {}
        }
        bucket.ratings.push(f64::from(review.rating));
    }

    let monthly_means: BTreeMap<(i32, u32), f64> = buckets
        .iter()
        .filter_map(|(&key, bucket)| mean(bucket.ratings.iter().copied()).map(|avg| (key, avg)))
        .collect();

    let mut series = MonthlySeries {
        labels: Vec::with_capacity(buckets.len()),
        all: Vec::with_capacity(buckets.len()),
        pos: Vec::with_capacity(buckets.len()),
        neg: Vec::with_capacity(buckets.len()),
        avg_rating: Vec::with_capacity(buckets.len()),
        avg_rating_rolling: Vec::with_capacity(buckets.len()),
    };

    for (&(year, month), bucket) in &buckets {
        series.labels.push(month_key(year, month));
        series.all.push(bucket.all);
        series.pos.push(bucket.pos);
        series.neg.push(bucket.neg);
        series
            .avg_rating
            .push(monthly_means.get(&(year, month)).map(|&avg| round_to(avg, 2)));

        let window = [
            shift_month(year, month, -1),
            (year, month),
            shift_month(year, month, 1),
        ];
        let rolling = mean(window.iter().filter_map(|key| monthly_means.get(key).copied()));
        series.avg_rating_rolling.push(rolling.map(|avg| round_to(avg, 2)));
    }

    series.avg_rating = forward_fill(&series.avg_rating);
    series
}

/// The calendar month `delta` months away from `year`-`month`.
fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

/// Replace each gap with the last preceding value.
///
/// Gaps before the first value stay empty.
pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|value| {
            if value.is_some() {
                last = *value;
            }
            last
        })
        .collect()
}

/// Sparse year x month grid; only cells with at least one review are emitted.
pub fn heatmap(reviews: &[Review]) -> Heatmap {
    let years: Vec<i32> = reviews
        .iter()
        .map(|r| r.review_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for review in reviews {
        *counts
            .entry((review.review_year, review.review_month))
            .or_default() += 1;
    }

    let mut data = Vec::new();
    for (x, &year) in years.iter().enumerate() {
        for month in 1..=12u32 {
            let Some(&v) = counts.get(&(year, month)) else {
                continue;
            };
            data.push(HeatmapCell {
                x,
                y: (month - 1) as usize,
                r: bubble_radius(v),
                v,
            });
        }
    }

    Heatmap {
        data,
        year_labels: years.iter().map(|y| y.to_string()).collect(),
        month_labels: MONTH_LABELS.iter().map(|m| m.to_string()).collect(),
    }
}

/// Area-scaled radius, `sqrt(count) * 1.5` to one decimal.
fn bubble_radius(count: usize) -> f64 {
    round_to((count as f64).sqrt() * 1.5, 1)
}
