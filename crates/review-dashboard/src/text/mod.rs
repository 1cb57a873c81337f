//! Free-text analysis: word rankings and language detection.

pub mod frequency;
pub mod language;
pub mod stopwords;
pub mod tokenizer;

pub use frequency::top_words;
pub use language::{
    LanguageClassifier, MarkerLanguageClassifier, language_distribution, sample_indices,
};
pub use stopwords::Stopwords;
pub use tokenizer::Tokenizer;

use tracing::debug;

use crate::types::{LanguageDistribution, Review, Sentiment, WordRankings};

/// Rank words over all reviews and over the positive and negative subsets.
pub fn word_rankings(
    reviews: &[Review],
    stopwords: &Stopwords,
    top_all: usize,
    top_by_sentiment: usize,
) -> WordRankings {
    let texts_for = |sentiment: Sentiment| {
        reviews
            .iter()
            .filter(move |r| r.sentiment == sentiment)
            .map(|r| r.text.as_str())
    };

    let rankings = WordRankings {
        all: top_words(reviews.iter().map(|r| r.text.as_str()), top_all, stopwords),
        pos: top_words(texts_for(Sentiment::Positive), top_by_sentiment, stopwords),
        neg: top_words(texts_for(Sentiment::Negative), top_by_sentiment, stopwords),
    };
    debug!(
        "Ranked {} / {} / {} words (all / positive / negative)",
        rankings.all.len(),
        rankings.pos.len(),
        rankings.neg.len()
    );
    rankings
}

/// Sample `sample_size` reviews with `seed` and classify their language.
pub fn detect_languages(
    reviews: &[Review],
    sample_size: usize,
    seed: u64,
    classifier: &dyn LanguageClassifier,
) -> LanguageDistribution {
    let sample = sample_indices(reviews.len(), sample_size, seed);
    debug!("Classifying {} sampled reviews (seed {})", sample.len(), seed);
    language_distribution(reviews, &sample, classifier)
}
