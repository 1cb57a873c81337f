//! Derived per-review fields.

use crate::types::{Review, ReviewRow, Sentiment};

/// Attach the derived sentiment to every row, preserving order.
pub fn derive_features(rows: Vec<ReviewRow>) -> Vec<Review> {
    rows.into_iter().map(derive_review).collect()
}

fn derive_review(row: ReviewRow) -> Review {
    Review {
        sentiment: Sentiment::from_rating(row.rating),
        id: row.id,
        author: row.author,
        rating: row.rating,
        text: row.text,
        review_date: row.review_date,
        review_year: row.review_year,
        review_month: row.review_month,
        thumbs_up_count: row.thumbs_up_count,
        text_length: row.text_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: usize, rating: u8) -> ReviewRow {
        ReviewRow {
            id,
            author: None,
            rating,
            text: String::new(),
            review_date: None,
            review_year: 2023,
            review_month: 1,
            thumbs_up_count: 0,
            text_length: 0,
        }
    }

    #[test]
    fn test_sentiment_is_function_of_rating() {
        let reviews = derive_features((1..=5).map(|r| row(r as usize, r)).collect());
        let labels: Vec<Sentiment> = reviews.iter().map(|r| r.sentiment).collect();
        assert_eq!(
            labels,
            vec![
                Sentiment::Negative,
                Sentiment::Negative,
                Sentiment::Neutral,
                Sentiment::Positive,
                Sentiment::Positive,
            ]
        );
        for review in &reviews {
            assert_eq!(review.sentiment, Sentiment::from_rating(review.rating));
        }
    }

    #[test]
    fn test_order_and_fields_preserved() {
        let mut input = vec![row(0, 3), row(1, 5)];
        input[1].text = "Top".to_string();
        let reviews = derive_features(input);
        assert_eq!(reviews[0].id, 0);
        assert_eq!(reviews[1].id, 1);
        assert_eq!(reviews[1].text, "Top");
    }
}
