//! Top reviews by thumbs-up count.

use crate::types::{Review, TopReview};
use crate::utils::truncate_chars;

pub const AUTHOR_MAX_CHARS: usize = 30;
pub const DATE_MAX_CHARS: usize = 10;
pub const TEXT_MAX_CHARS: usize = 300;

const ANONYMOUS_AUTHOR: &str = "Anonymous";
const UNKNOWN_DATE: &str = "unknown";

/// The `n` most upvoted reviews, most upvoted first.
///
/// Equal counts keep input order.
pub fn top_reviews(reviews: &[Review], n: usize) -> Vec<TopReview> {
    let mut ranked: Vec<&Review> = reviews.iter().collect();
    ranked.sort_by(|a, b| b.thumbs_up_count.cmp(&a.thumbs_up_count));

    ranked.into_iter().take(n).map(project).collect()
}

fn project(review: &Review) -> TopReview {
    let author = review
        .author
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(ANONYMOUS_AUTHOR);

    let date = review
        .review_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());

    TopReview {
        author: truncate_chars(author, AUTHOR_MAX_CHARS),
        rating: review.rating,
        thumbs: review.thumbs_up_count,
        date: truncate_chars(&date, DATE_MAX_CHARS),
        text: truncate_chars(&review.text, TEXT_MAX_CHARS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::test_support::review;
    use pretty_assertions::assert_eq;

    fn with_thumbs(id: usize, rating: u8, thumbs: u64) -> Review {
        let mut r = review(id, rating, 2023, 1);
        r.thumbs_up_count = thumbs;
        r
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let reviews = vec![
            with_thumbs(0, 5, 3),
            with_thumbs(1, 4, 10),
            with_thumbs(2, 2, 3),
            with_thumbs(3, 1, 7),
        ];
        let top = top_reviews(&reviews, 12);
        let thumbs: Vec<u64> = top.iter().map(|r| r.thumbs).collect();
        assert_eq!(thumbs, vec![10, 7, 3, 3]);
        // tie at 3 keeps input order
        assert_eq!(top[2].rating, 5);
        assert_eq!(top[3].rating, 2);
    }

    #[test]
    fn test_most_upvoted_first_regardless_of_rating() {
        let mut reviews: Vec<Review> = (0..20).map(|i| with_thumbs(i, 5, i as u64)).collect();
        reviews.push(with_thumbs(20, 1, 999));
        let top = top_reviews(&reviews, 12);
        assert_eq!(top.len(), 12);
        assert_eq!(top[0].thumbs, 999);
        assert_eq!(top[0].rating, 1);
    }

    #[test]
    fn test_length_is_min_of_n_and_total() {
        let reviews = vec![with_thumbs(0, 3, 1), with_thumbs(1, 3, 2)];
        assert_eq!(top_reviews(&reviews, 12).len(), 2);
    }

    #[test]
    fn test_projection_truncates_and_defaults() {
        let mut r = with_thumbs(0, 4, 5);
        r.author = None;
        r.text = "x".repeat(450);
        r.review_date = None;

        let mut long_author = with_thumbs(1, 4, 1);
        long_author.author = Some("A".repeat(45));

        let top = top_reviews(&[r, long_author], 12);
        assert_eq!(top[0].author, "Anonymous");
        assert_eq!(top[0].text.chars().count(), TEXT_MAX_CHARS);
        assert_eq!(top[0].date, "unknown");
        assert_eq!(top[1].author.chars().count(), AUTHOR_MAX_CHARS);
        assert_eq!(top[1].date, "2023-01-01");
        assert!(top.iter().all(|t| t.date.chars().count() <= DATE_MAX_CHARS));
    }
}
