//! Review table loading.
//!
//! Reads the delimited input into a polars [`DataFrame`] with every column
//! kept as text, checks the header for the required columns and parses each
//! row into a typed [`ReviewRow`]. Numeric parsing is done here rather than
//! by schema inference so that a bad rating can be reported with its row
//! number.
//!
//! # Parsing rules
//!
//! | Column            | Missing / bad value                              |
//! |-------------------|--------------------------------------------------|
//! | `rating`          | fatal, must be an integer in 1..=5               |
//! | `review_year`     | fatal, four-digit integer in 1000..=9999         |
//! | `review_month`    | fatal, must be an integer in 1..=12              |
//! | `review_date`     | becomes `None`, counted in the summary           |
//! | `thumbs_up_count` | becomes 0, counted in the summary                |
//! | `text_length`     | becomes the character count of `text`            |
//! | `author`          | becomes `None`                                   |
//! | `text`            | null or blank becomes the empty string           |
//!
//! Four-digit years keep the zero-padded `YYYY-MM` month keys in calendar
//! order. Missing markers such as `NA` apply to the numeric, date and author
//! columns only; in `text` they are kept as written so that `text_length`
//! describes the same string. Slash dates are accepted year-first only.

mod parsers;

pub use parsers::parse_review_date;

use polars::prelude::*;
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result, ResultExt};
use crate::types::ReviewRow;
use parsers::{non_missing, parse_count, require_integer_in_range};

/// Columns the input table must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "rating",
    "text",
    "review_date",
    "review_year",
    "review_month",
    "thumbs_up_count",
    "author",
    "text_length",
];

/// Counters describing what the loader had to recover from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows: usize,
    pub unparseable_dates: usize,
    pub defaulted_thumbs: usize,
    pub defaulted_lengths: usize,
    /// Header columns outside [`REQUIRED_COLUMNS`], in file order.
    pub extra_columns: Vec<String>,
}

/// Parsed rows together with the load summary.
#[derive(Debug, Clone)]
pub struct LoadedReviews {
    pub rows: Vec<ReviewRow>,
    pub summary: LoadSummary,
}

/// Loads review tables from delimited text.
#[derive(Debug, Clone, Copy)]
pub struct ReviewLoader {
    delimiter: u8,
}

impl Default for ReviewLoader {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl ReviewLoader {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn read_options(&self) -> CsvReadOptions {
        // Schema length 0 keeps every column as String.
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(self.delimiter)
                    .with_quote_char(Some(b'"')),
            )
    }

    /// Load and parse the table at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedReviews> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DashboardError::InputNotFound(path.display().to_string()));
        }

        info!("Loading reviews from {}", path.display());
        let df = self
            .read_options()
            .try_into_reader_with_file_path(Some(PathBuf::from(path)))
            .and_then(|reader| reader.finish())
            .map_err(empty_input_to_error)
            .context(format!("Reading {}", path.display()))?;

        Self::from_dataframe(&df)
    }

    /// Load and parse a table held in memory.
    pub fn load_from_str(&self, content: &str) -> Result<LoadedReviews> {
        let df = self
            .read_options()
            .into_reader_with_file_handle(Cursor::new(content.as_bytes().to_vec()))
            .finish()
            .map_err(empty_input_to_error)?;

        Self::from_dataframe(&df)
    }

    /// Parse an already materialized table.
    ///
    /// Columns of any dtype are accepted; they are cast to text before the
    /// row rules above are applied.
    pub fn from_dataframe(df: &DataFrame) -> Result<LoadedReviews> {
        let header: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|required| !header.iter().any(|name| name == *required))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DashboardError::MissingColumns(missing));
        }

        if df.height() == 0 {
            return Err(DashboardError::EmptyDataset);
        }

        let extra_columns: Vec<String> = header
            .into_iter()
            .filter(|name| !REQUIRED_COLUMNS.contains(&name.as_str()))
            .collect();
        if !extra_columns.is_empty() {
            debug!("Ignoring extra columns: {:?}", extra_columns);
        }

        let rating = text_column(df, "rating")?;
        let text = text_column(df, "text")?;
        let review_date = text_column(df, "review_date")?;
        let review_year = text_column(df, "review_year")?;
        let review_month = text_column(df, "review_month")?;
        let thumbs = text_column(df, "thumbs_up_count")?;
        let author = text_column(df, "author")?;
        let text_length = text_column(df, "text_length")?;

        let (rating, text, review_date) = (rating.str()?, text.str()?, review_date.str()?);
        let (review_year, review_month) = (review_year.str()?, review_month.str()?);
        let (thumbs, author, text_length) = (thumbs.str()?, author.str()?, text_length.str()?);

        let mut summary = LoadSummary {
            rows: df.height(),
            extra_columns,
            ..LoadSummary::default()
        };
        let mut rows = Vec::with_capacity(df.height());

        for idx in 0..df.height() {
            let row_number = idx + 1;

            let rating_value =
                require_integer_in_range("rating", row_number, rating.get(idx), 1, 5)?;
            let year_value =
                require_integer_in_range("review_year", row_number, review_year.get(idx), 1000, 9999)?;
            let month_value =
                require_integer_in_range("review_month", row_number, review_month.get(idx), 1, 12)?;

            // Marker words like `None` are plausible review text, so only a
            // null or blank cell counts as missing.
            let text_value = match text.get(idx) {
                Some(raw) if !raw.trim().is_empty() => raw.to_string(),
                _ => String::new(),
            };

            let date_value = match non_missing(review_date.get(idx)) {
                Some(raw) => {
                    let parsed = parse_review_date(raw);
                    if parsed.is_none() {
                        summary.unparseable_dates += 1;
                    }
                    parsed
                }
                None => {
                    summary.unparseable_dates += 1;
                    None
                }
            };

            let thumbs_value = parse_count(thumbs.get(idx)).unwrap_or_else(|| {
                summary.defaulted_thumbs += 1;
                0
            });

            let length_value = parse_count(text_length.get(idx)).unwrap_or_else(|| {
                summary.defaulted_lengths += 1;
                text_value.chars().count() as u64
            });

            rows.push(ReviewRow {
                id: idx,
                author: non_missing(author.get(idx)).map(str::to_string),
                rating: rating_value as u8,
                text: text_value,
                review_date: date_value,
                review_year: year_value as i32,
                review_month: month_value as u32,
                thumbs_up_count: thumbs_value,
                text_length: length_value,
            });
        }

        if summary.unparseable_dates > 0 {
            warn!(
                "{} of {} review dates could not be parsed and were left empty",
                summary.unparseable_dates, summary.rows
            );
        }
        if summary.defaulted_thumbs > 0 {
            debug!("Defaulted {} thumbs_up_count values to 0", summary.defaulted_thumbs);
        }
        info!("Loaded {} reviews", rows.len());

        Ok(LoadedReviews { rows, summary })
    }
}

/// Cast a column to String so every row can be read as raw text.
fn text_column(df: &DataFrame, name: &str) -> Result<Series> {
    let series = df.column(name)?.as_materialized_series().cast(&DataType::String)?;
    Ok(series)
}

/// A file with no header at all is reported as empty rather than as a
/// reader failure.
fn empty_input_to_error(error: PolarsError) -> DashboardError {
    match error {
        PolarsError::NoData(_) => DashboardError::EmptyDataset,
        other => DashboardError::Polars(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const HEADER: &str =
        "rating,text,review_date,review_year,review_month,thumbs_up_count,author,text_length";

    fn csv(rows: &[&str]) -> String {
        let mut content = HEADER.to_string();
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        content
    }

    #[test]
    fn test_load_basic_rows() {
        let content = csv(&[
            "5,Great app,2023-05-14,2023,5,12,Amina,9",
            "1,\"Slow, very slow\",2022-11-02 10:15:00,2022,11,0,Karim,15",
        ]);
        let loaded = ReviewLoader::default().load_from_str(&content).unwrap();

        assert_eq!(loaded.rows.len(), 2);
        let first = &loaded.rows[0];
        assert_eq!(first.id, 0);
        assert_eq!(first.rating, 5);
        assert_eq!(first.text, "Great app");
        assert_eq!(first.review_date, NaiveDate::from_ymd_opt(2023, 5, 14));
        assert_eq!(first.review_year, 2023);
        assert_eq!(first.review_month, 5);
        assert_eq!(first.thumbs_up_count, 12);
        assert_eq!(first.author.as_deref(), Some("Amina"));

        let second = &loaded.rows[1];
        assert_eq!(second.text, "Slow, very slow");
        assert_eq!(second.review_date, NaiveDate::from_ymd_opt(2022, 11, 2));
        assert_eq!(loaded.summary.unparseable_dates, 0);
    }

    #[test]
    fn test_load_preserves_file_order() {
        let content = csv(&[
            "3,b,2021-01-01,2021,1,0,x,1",
            "1,a,2020-01-01,2020,1,0,y,1",
            "5,c,2022-01-01,2022,1,0,z,1",
        ]);
        let loaded = ReviewLoader::default().load_from_str(&content).unwrap();
        let ratings: Vec<u8> = loaded.rows.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![3, 1, 5]);
    }

    #[test]
    fn test_missing_columns_are_all_reported() {
        let content = "rating,text,review_year\n5,ok,2023\n";
        let err = ReviewLoader::default().load_from_str(content).unwrap_err();
        match err {
            DashboardError::MissingColumns(columns) => {
                assert!(columns.contains(&"review_date".to_string()));
                assert!(columns.contains(&"author".to_string()));
                assert!(!columns.contains(&"rating".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_integer_rating_is_fatal() {
        let content = csv(&[
            "5,fine,2023-01-01,2023,1,0,a,4",
            "five,bad,2023-01-01,2023,1,0,b,3",
        ]);
        let err = ReviewLoader::default().load_from_str(&content).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidValue { ref column, row: 2, .. } if column == "rating"
        ));
    }

    #[test]
    fn test_out_of_range_month_is_fatal() {
        let content = csv(&["4,ok,2023-01-01,2023,13,0,a,2"]);
        let err = ReviewLoader::default().load_from_str(&content).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VALUE");
        assert!(err.to_string().contains("review_month"));
    }

    #[test]
    fn test_bad_dates_become_none() {
        let content = csv(&[
            "4,ok,yesterday,2023,1,0,a,2",
            "4,ok,,2023,1,0,a,2",
            "4,ok,2023-01-09,2023,1,0,a,2",
        ]);
        let loaded = ReviewLoader::default().load_from_str(&content).unwrap();
        assert_eq!(loaded.rows[0].review_date, None);
        assert_eq!(loaded.rows[1].review_date, None);
        assert!(loaded.rows[2].review_date.is_some());
        assert_eq!(loaded.summary.unparseable_dates, 2);
    }

    #[test]
    fn test_missing_text_and_author_defaults() {
        let content = csv(&["3,,2023-01-01,2023,1,,,"]);
        let loaded = ReviewLoader::default().load_from_str(&content).unwrap();
        let row = &loaded.rows[0];
        assert_eq!(row.text, "");
        assert_eq!(row.author, None);
        assert_eq!(row.thumbs_up_count, 0);
        assert_eq!(row.text_length, 0);
        assert_eq!(loaded.summary.defaulted_thumbs, 1);
        assert_eq!(loaded.summary.defaulted_lengths, 1);
    }

    #[test]
    fn test_marker_words_in_text_are_kept() {
        let content = csv(&["2,None,2023-01-01,2023,1,0,a,4", "4,NA,2023-01-02,2023,1,0,b,"]);
        let loaded = ReviewLoader::default().load_from_str(&content).unwrap();
        assert_eq!(loaded.rows[0].text, "None");
        assert_eq!(loaded.rows[0].text_length, 4);
        assert_eq!(loaded.rows[1].text, "NA");
        assert_eq!(loaded.rows[1].text_length, 2);
    }

    #[test]
    fn test_year_outside_four_digits_is_fatal() {
        for year in ["999", "10000"] {
            let content = csv(&[&format!("4,ok,2023-01-01,{year},1,0,a,2")]);
            let err = ReviewLoader::default().load_from_str(&content).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_VALUE");
            assert!(err.to_string().contains("review_year"));
            assert!(err.to_string().contains(year));
        }
    }

    #[test]
    fn test_ambiguous_slash_date_is_unparseable() {
        let content = csv(&["4,ok,04/03/2022,2022,4,0,a,2"]);
        let loaded = ReviewLoader::default().load_from_str(&content).unwrap();
        assert_eq!(loaded.rows[0].review_date, None);
        assert_eq!(loaded.summary.unparseable_dates, 1);
    }

    #[test]
    fn test_missing_length_uses_char_count() {
        let content = csv(&["5,très bien,2023-01-01,2023,1,2,a,"]);
        let loaded = ReviewLoader::default().load_from_str(&content).unwrap();
        assert_eq!(loaded.rows[0].text_length, 9);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let content = format!(
            "review_id,{HEADER},lang\nr1,5,ok,2023-01-01,2023,1,3,a,2,fr\n"
        );
        let loaded = ReviewLoader::default().load_from_str(&content).unwrap();
        assert_eq!(loaded.rows.len(), 1);
        assert_eq!(
            loaded.summary.extra_columns,
            vec!["review_id".to_string(), "lang".to_string()]
        );
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let content = format!("{HEADER}\n");
        let err = ReviewLoader::default().load_from_str(&content).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyDataset));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let content = HEADER.replace(',', ";") + "\n4;Bien;2023-02-01;2023;2;1;Sami;4\n";
        let loaded = ReviewLoader::new(b';').load_from_str(&content).unwrap();
        assert_eq!(loaded.rows[0].author.as_deref(), Some("Sami"));
        assert_eq!(loaded.rows[0].review_month, 2);
    }

    #[test]
    fn test_from_dataframe_with_numeric_columns() {
        let df = df! {
            "rating" => [4i64, 2],
            "text" => ["good", "bad"],
            "review_date" => ["2021-03-01", "2021-04-01"],
            "review_year" => [2021i64, 2021],
            "review_month" => [3i64, 4],
            "thumbs_up_count" => [7i64, 1],
            "author" => ["a", "b"],
            "text_length" => [4i64, 3],
        }
        .unwrap();

        let loaded = ReviewLoader::from_dataframe(&df).unwrap();
        assert_eq!(loaded.rows[0].rating, 4);
        assert_eq!(loaded.rows[1].thumbs_up_count, 1);
        assert_eq!(loaded.rows[1].review_month, 4);
    }

    #[test]
    fn test_missing_file() {
        let err = ReviewLoader::default()
            .load("/nonexistent/reviews.csv")
            .unwrap_err();
        assert_eq!(err.error_code(), "INPUT_NOT_FOUND");
    }
}
