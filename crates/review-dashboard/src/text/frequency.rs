//! Word-frequency ranking.

use std::collections::HashMap;

use super::stopwords::Stopwords;
use super::tokenizer::Tokenizer;
use crate::types::WordCount;

/// The `n` most frequent non-stopword tokens across `texts`.
///
/// Ordered by descending count; equal counts keep the order in which the
/// words were first seen.
pub fn top_words<'a, I>(texts: I, n: usize, stopwords: &Stopwords) -> Vec<WordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokenizer = Tokenizer::new();
    // word -> (count, first seen)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut seen = 0usize;

    for text in texts {
        for token in tokenizer.tokenize(text) {
            if stopwords.contains(&token) {
                continue;
            }
            let entry = counts.entry(token).or_insert((0, seen));
            entry.0 += 1;
            seen += 1;
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(n)
        .map(|(word, count, _)| WordCount { word, count })
        .collect()
}
