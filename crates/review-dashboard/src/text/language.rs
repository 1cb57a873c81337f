//! Heuristic language classification of sampled reviews.
//!
//! The default classifier is a script and marker count, not a statistical
//! model. It is kept behind [`LanguageClassifier`] so the pipeline can be
//! given a different implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

use crate::types::{Language, LanguageDistribution, Review};
use crate::utils::{mean, percentage, round_to};

const FRENCH_MARKERS: [&str; 11] = [
    "le ", "la ", "les ", "est ", "pas ", "que ", "une ", "très ", "avec ", "pour ", "dans ",
];

const ENGLISH_MARKERS: [&str; 10] = [
    "the ", "and ", "this ", "that ", "very ", "not ", "good ", "was ", "have ", "you ",
];

const ACCENTED_LATIN: &str = "éèàùôâêîûïëüœ";

/// Assigns exactly one [`Language`] to a text.
pub trait LanguageClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Language;
}

/// Arabic when Arabic-script code points outnumber Latin letters,
/// otherwise French or English by marker count.
///
/// Each marker counts once however often it occurs. French wins ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerLanguageClassifier;

impl MarkerLanguageClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageClassifier for MarkerLanguageClassifier {
    fn classify(&self, text: &str) -> Language {
        let arabic = text.chars().filter(|&c| is_arabic(c)).count();
        let latin = text.chars().filter(|&c| is_latin_letter(c)).count();
        if arabic > latin {
            return Language::Arabic;
        }

        let lowered = text.to_lowercase();
        let french = marker_score(&lowered, &FRENCH_MARKERS);
        let english = marker_score(&lowered, &ENGLISH_MARKERS);
        if french >= english {
            Language::French
        } else {
            Language::English
        }
    }
}

fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ACCENTED_LATIN.contains(c)
}

fn marker_score(text: &str, markers: &[&str]) -> usize {
    markers.iter().filter(|marker| text.contains(*marker)).count()
}

/// Row indices of a uniform sample without replacement.
///
/// The sample holds `min(size, total)` indices and depends only on
/// `total`, `size` and `seed`.
pub fn sample_indices(total: usize, size: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let indices: Vec<usize> = (0..total).collect();
    indices
        .choose_multiple(&mut rng, size.min(total))
        .copied()
        .collect()
}

/// Classify the sampled reviews and average their ratings per language.
///
/// Languages are ordered by descending count; ties keep the order in which
/// each language first appeared in the sample. Languages absent from the
/// sample are omitted.
pub fn language_distribution(
    reviews: &[Review],
    sample: &[usize],
    classifier: &dyn LanguageClassifier,
) -> LanguageDistribution {
    let mut order: Vec<Language> = Vec::new();
    let mut ratings: HashMap<Language, Vec<f64>> = HashMap::new();
    let mut classified = 0usize;

    for review in sample.iter().filter_map(|&idx| reviews.get(idx)) {
        let language = classifier.classify(&review.text);
        if !order.contains(&language) {
            order.push(language);
        }
        ratings
            .entry(language)
            .or_default()
            .push(f64::from(review.rating));
        classified += 1;
    }

    // stable sort keeps first-appearance order among equal counts
    order.sort_by(|a, b| {
        let count = |lang: &Language| ratings.get(lang).map_or(0, Vec::len);
        count(b).cmp(&count(a))
    });

    let counts: Vec<usize> = order
        .iter()
        .map(|lang| ratings.get(lang).map_or(0, Vec::len))
        .collect();
    let pct = counts
        .iter()
        .map(|&count| percentage(count, classified))
        .collect();
    let avg_ratings = order
        .iter()
        .map(|lang| {
            ratings
                .get(lang)
                .and_then(|values| mean(values.iter().copied()))
                .map(|avg| round_to(avg, 2))
        })
        .collect();

    LanguageDistribution {
        labels: order,
        counts,
        avg_ratings,
        pct,
        sample_size: classified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::test_support::review;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_arabic_script_majority() {
        let classifier = MarkerLanguageClassifier::new();
        assert_eq!(classifier.classify("تطبيق ممتاز جدا"), Language::Arabic);
        assert_eq!(classifier.classify("تطبيق ممتاز جدا ok"), Language::Arabic);
    }

    #[test]
    fn test_latin_transliteration_is_never_arabic() {
        let classifier = MarkerLanguageClassifier::new();
        let language = classifier.classify("Ana nehwes app mliha bezaf");
        assert_ne!(language, Language::Arabic);
        // no markers on either side, French wins the tie
        assert_eq!(language, Language::French);
    }

    #[test]
    fn test_marker_comparison() {
        let classifier = MarkerLanguageClassifier::new();
        assert_eq!(
            classifier.classify("The driver was very kind and the car clean"),
            Language::English
        );
        assert_eq!(
            classifier.classify("Le chauffeur est très gentil avec les clients"),
            Language::French
        );
    }

    #[test]
    fn test_markers_count_once_each() {
        let classifier = MarkerLanguageClassifier::new();
        // "the " repeated three times still scores one against two French markers
        assert_eq!(
            classifier.classify("the the the la course est bien"),
            Language::French
        );
    }

    #[test]
    fn test_sample_indices_deterministic_and_bounded() {
        let first = sample_indices(100, 10, 42);
        let second = sample_indices(100, 10, 42);
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
        assert!(first.iter().all(|&i| i < 100));

        let mut unique = first.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_sample_indices_capped_at_total() {
        let sample = sample_indices(5, 1500, 42);
        assert_eq!(sample.len(), 5);
        assert!(sample_indices(0, 10, 42).is_empty());
    }

    #[test]
    fn test_language_distribution_counts_sum_to_sample() {
        let mut reviews: Vec<Review> = (0..6).map(|i| review(i, 3, 2023, 1)).collect();
        reviews[0].text = "Le service est nul".to_string();
        reviews[0].rating = 1;
        reviews[1].text = "This was good and fast".to_string();
        reviews[1].rating = 5;
        reviews[2].text = "خدمة ممتازة".to_string();
        reviews[2].rating = 4;
        reviews[3].text = "La course pour 200 dinars".to_string();
        reviews[3].rating = 2;
        reviews[4].text = "Very good that you have".to_string();
        reviews[4].rating = 4;
        reviews[5].text = "خدمة سيئة".to_string();
        reviews[5].rating = 1;

        let sample: Vec<usize> = (0..6).collect();
        let dist = language_distribution(&reviews, &sample, &MarkerLanguageClassifier::new());

        assert_eq!(dist.sample_size, 6);
        assert_eq!(dist.counts.iter().sum::<usize>(), 6);
        assert_eq!(
            dist.labels,
            vec![Language::French, Language::English, Language::Arabic]
        );
        assert_eq!(dist.counts, vec![2, 2, 2]);
        assert_eq!(dist.avg_ratings, vec![Some(1.5), Some(4.5), Some(2.5)]);
        assert_eq!(dist.pct, vec![33.3, 33.3, 33.3]);
    }

    #[test]
    fn test_language_shares_of_sample() {
        let mut reviews: Vec<Review> = (0..4).map(|i| review(i, 4, 2023, 1)).collect();
        reviews[0].text = "خدمة ممتازة".to_string();
        for review in &mut reviews[1..] {
            review.text = "The app was good".to_string();
        }

        let sample: Vec<usize> = (0..4).collect();
        let dist = language_distribution(&reviews, &sample, &MarkerLanguageClassifier::new());

        assert_eq!(dist.labels, vec![Language::English, Language::Arabic]);
        assert_eq!(dist.pct, vec![75.0, 25.0]);
    }

    struct AlwaysEnglish;

    impl LanguageClassifier for AlwaysEnglish {
        fn classify(&self, _text: &str) -> Language {
            Language::English
        }
    }

    #[test]
    fn test_custom_classifier() {
        let reviews: Vec<Review> = (0..3).map(|i| review(i, 5, 2023, 1)).collect();
        let dist = language_distribution(&reviews, &[0, 2], &AlwaysEnglish);
        assert_eq!(dist.labels, vec![Language::English]);
        assert_eq!(dist.counts, vec![2]);
        assert_eq!(dist.avg_ratings, vec![Some(5.0)]);
        assert_eq!(dist.pct, vec![100.0]);
    }
}
