//! Stopword set used by word-frequency ranking.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, ResultExt};

/// Built-in French and English function words plus the product's own name.
const DEFAULT_STOPWORDS: &[&str] = &[
    "application", "app", "yassir", "les", "des", "est", "une", "pas", "que", "plus",
    "très", "bien", "pour", "sur", "avec", "dans", "par", "qui", "ce", "tout", "mais",
    "cest", "cette", "comme", "avoir", "the", "and", "is", "it", "to", "of", "in", "for",
    "on", "are", "this", "that", "not", "my", "me", "an", "be", "can", "you", "your",
    "have", "had", "was", "but", "just", "all", "when", "they", "dont", "even", "get",
    "got", "been", "has", "aussi", "leur", "leurs", "nous", "vous", "ils", "elles",
    "même", "après", "avant", "encore", "toujours", "jamais", "rien", "trop", "assez",
    "peu", "beaucoup", "moins", "fois", "fait", "faire", "sont", "être", "aller", "voir",
    "venir", "pouvoir", "vouloir", "savoir",
];

/// A membership set of lower-cased words to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl Stopwords {
    /// Build a set from arbitrary words; entries are trimmed and lower-cased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Load a replacement list, one word per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Reading stopword file {}", path.display()))?;
        Ok(Self::from_words(
            content.lines().filter(|line| !line.trim_start().starts_with('#')),
        ))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
