use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::aggregator::ReviewAggregates;
use crate::error::{DashboardError, Result, ResultExt};
use crate::types::{
    Heatmap, Kpis, LanguageDistribution, MonthlySeries, RatingHistogram, StackedComposition,
    TopReview, WordRankings, YearlyVolume,
};

const HTML_TEMPLATE: &str = include_str!("templates/dashboard.html");
const STYLES_CSS: &str = include_str!("templates/dashboard.css");
const DASHBOARD_JS: &str = include_str!("templates/dashboard.js");

const STYLES_PLACEHOLDER: &str = "/* __DASHBOARD_STYLES__ */";
const SCRIPT_PLACEHOLDER: &str = "/* __DASHBOARD_SCRIPT__ */";
const TITLE_PLACEHOLDER: &str = "__DASHBOARD_TITLE__";
const DATA_PLACEHOLDER: &str = "\"__DASHBOARD_DATA__\"";

// ============================================================================
// Embedded data record
// ============================================================================

/// Everything the dashboard script reads, serialized as one JSON literal.
///
/// Field names are the keys the client script expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub meta: Kpis,
    pub rating_all: RatingHistogram,
    pub rating_by_year: BTreeMap<String, RatingHistogram>,
    pub yearly: YearlyVolume,
    pub monthly: MonthlySeries,
    pub heatmap: Heatmap,
    pub stacked: StackedComposition,
    pub words: WordRankings,
    pub top_reviews: Vec<TopReview>,
    pub languages: LanguageDistribution,
}

impl DashboardData {
    pub fn new(
        aggregates: ReviewAggregates,
        words: WordRankings,
        languages: LanguageDistribution,
    ) -> Self {
        Self {
            meta: aggregates.kpis,
            rating_all: aggregates.rating_all,
            rating_by_year: aggregates.rating_by_year,
            yearly: aggregates.yearly,
            monthly: aggregates.monthly,
            heatmap: aggregates.heatmap,
            stacked: aggregates.stacked,
            words,
            top_reviews: aggregates.top_reviews,
            languages,
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Builds the self-contained HTML document.
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    title: String,
}

impl DashboardRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Render the full document.
    ///
    /// The output depends only on `data` and the title, so identical inputs
    /// give byte-identical documents.
    pub fn render(&self, data: &DashboardData) -> Result<String> {
        let json = embed_json(data)?;
        debug!("Embedding {} bytes of dashboard data", json.len());

        // data goes in last so nothing inside it is ever treated as a placeholder
        let html = HTML_TEMPLATE
            .replacen(STYLES_PLACEHOLDER, STYLES_CSS, 1)
            .replacen(SCRIPT_PLACEHOLDER, DASHBOARD_JS, 1)
            .replace(TITLE_PLACEHOLDER, &escape_html(&self.title));

        if !html.contains(DATA_PLACEHOLDER) {
            return Err(DashboardError::ReportGenerationFailed(
                "template has no data placeholder".to_string(),
            ));
        }

        Ok(html.replacen(DATA_PLACEHOLDER, &json, 1))
    }

    /// Render and write the document to `path`, replacing any existing file.
    ///
    /// Returns the number of bytes written.
    pub fn write(&self, data: &DashboardData, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let html = self.render(data)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .context(format!("Creating output directory {}", parent.display()))?;
        }

        fs::write(path, &html).context(format!("Writing dashboard {}", path.display()))?;
        info!("Dashboard saved: {}", path.display());
        Ok(html.len())
    }
}

/// Serialize `data` as a JSON literal that is safe inside a `<script>` element.
///
/// `<`, `>` and `&` are written as unicode escapes so the literal can never
/// close the element or open a comment; U+2028 and U+2029 are escaped
/// because older engines treat them as line terminators.
pub fn embed_json<T: Serialize>(data: &T) -> Result<String> {
    let json = serde_json::to_string(data)?;
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            other => escaped.push(other),
        }
    }
    Ok(escaped)
}

/// Escape text for use in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HeatmapCell, Language, WordCount};

    fn sample_data() -> DashboardData {
        DashboardData {
            meta: Kpis {
                total: 2,
                avg_rating: Some(3.0),
                pct_positive: 50.0,
                pct_negative: 50.0,
                pct_neutral: 0.0,
                count_pos: 1,
                count_neg: 1,
                count_neu: 0,
                date_min: Some("2023-01-01".to_string()),
                date_max: Some("2023-02-01".to_string()),
                n_years: 1,
                avg_len_pos: Some(10),
                avg_len_neu: None,
                avg_len_neg: Some(20),
            },
            rating_all: [1, 0, 0, 0, 1],
            rating_by_year: BTreeMap::new(),
            yearly: YearlyVolume {
                labels: vec!["2023".to_string()],
                counts: vec![2],
                pct: vec![100.0],
            },
            monthly: MonthlySeries {
                labels: vec!["2023-01".to_string(), "2023-02".to_string()],
                all: vec![1, 1],
                pos: vec![1, 0],
                neg: vec![0, 1],
                avg_rating: vec![Some(5.0), Some(1.0)],
                avg_rating_rolling: vec![Some(3.0), Some(3.0)],
            },
            heatmap: Heatmap {
                data: vec![HeatmapCell { x: 0, y: 0, r: 1.5, v: 1 }],
                year_labels: vec!["2023".to_string()],
                month_labels: vec!["Jan".to_string()],
            },
            stacked: StackedComposition {
                years: vec![],
                by_star: BTreeMap::new(),
            },
            words: WordRankings {
                all: vec![WordCount { word: "chauffeur".to_string(), count: 2 }],
                pos: vec![],
                neg: vec![],
            },
            top_reviews: vec![TopReview {
                author: "<b>Mallory</b>".to_string(),
                rating: 1,
                thumbs: 40,
                date: "2023-02-01".to_string(),
                text: "</script><script>alert(1)</script>".to_string(),
            }],
            languages: LanguageDistribution {
                labels: vec![Language::French],
                counts: vec![2],
                avg_ratings: vec![Some(3.0)],
                pct: vec![100.0],
                sample_size: 2,
            },
        }
    }

    #[test]
    fn test_embed_json_escapes_markup() {
        let json = embed_json(&"</script> & \u{2028}").unwrap();
        assert!(!json.contains('<'));
        assert!(!json.contains('>'));
        assert!(!json.contains('&'));
        assert!(json.contains("\\u003c/script\\u003e"));
        assert!(json.contains("\\u2028"));

        let back: String = serde_json::from_str(&json).unwrap();
        assert_eq!(back, "</script> & \u{2028}");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_substitutes_every_placeholder() {
        let html = DashboardRenderer::new("Reviews").render(&sample_data()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("__DASHBOARD_"));
        assert!(html.contains("<title>Reviews</title>"));
        assert!(html.contains("const D = {\"meta\":"));
        assert!(html.contains(".kpi-grid"));
    }

    #[test]
    fn test_render_never_leaks_raw_user_markup() {
        let html = DashboardRenderer::new("Reviews").render(&sample_data()).unwrap();
        assert!(!html.contains("</script><script>alert(1)"));
        assert!(!html.contains("<b>Mallory</b>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_render_escapes_title() {
        let html = DashboardRenderer::new("A <b>bold</b> title")
            .render(&sample_data())
            .unwrap();
        assert!(html.contains("<title>A &lt;b&gt;bold&lt;/b&gt; title</title>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = DashboardRenderer::new("Reviews");
        let data = sample_data();
        assert_eq!(renderer.render(&data).unwrap(), renderer.render(&data).unwrap());
    }

    #[test]
    fn test_data_keys_match_client_script() {
        let value = serde_json::to_value(sample_data()).unwrap();
        for key in [
            "meta",
            "rating_all",
            "rating_by_year",
            "yearly",
            "monthly",
            "heatmap",
            "stacked",
            "words",
            "top_reviews",
            "languages",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
            assert!(DASHBOARD_JS.contains(&format!("D.{key}")), "script never reads {key}");
        }
        assert!(value["meta"]["avg_len_neu"].is_null());
    }

    #[test]
    fn test_script_reads_derived_series_from_data() {
        for field in [
            "D.monthly.avg_rating_rolling",
            "D.yearly.pct",
            "L.pct",
        ] {
            assert!(DASHBOARD_JS.contains(field), "script never reads {field}");
        }
        assert!(!DASHBOARD_JS.contains(".reduce("));
        assert!(!DASHBOARD_JS.contains("toFixed("));

        let value = serde_json::to_value(sample_data()).unwrap();
        assert_eq!(value["monthly"]["avg_rating_rolling"][0], 3.0);
        assert_eq!(value["languages"]["pct"][0], 100.0);
        assert_eq!(value["yearly"]["pct"][0], 100.0);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("review-dashboard-render-{}", std::process::id()));
        let path = dir.join("nested").join("dashboard.html");

        let bytes = DashboardRenderer::new("Reviews")
            .write(&sample_data(), &path)
            .unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_dir_all(&dir).ok();

        assert_eq!(bytes, written.len());
        assert!(written.contains("const D = {"));
    }
}
