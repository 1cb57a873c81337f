//! Word extraction for frequency ranking.

use once_cell::sync::Lazy;
use regex::Regex;

/// Latin letters plus the accented letters common in French reviews.
pub(crate) const LATIN_LETTER_CLASS: &str = "a-zA-Zéèàùôâêîûïëüœ";

/// Shortest token kept.
pub const MIN_TOKEN_CHARS: usize = 4;

// Runs of at least MIN_TOKEN_CHARS Latin letters
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("[{LATIN_LETTER_CLASS}]{{{MIN_TOKEN_CHARS},}}"))
        .expect("Invalid regex: token pattern")
});

/// Splits review text into lower-cased Latin-script words.
///
/// Arabic-script text yields no tokens; the stopword list and the word
/// cloud are Latin-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Maximal letter runs of the lower-cased text, in order of appearance.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
