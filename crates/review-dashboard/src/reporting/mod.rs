//! Dashboard rendering.
//!
//! The aggregates are packed into a single [`DashboardData`] record, embedded
//! as a JSON literal in a static HTML/CSS/JS template and written as one
//! self-contained file. The client script only arranges the embedded data;
//! it never recomputes an aggregate.
//!
//! # Example
//!
//! ```rust,ignore
//! use review_dashboard::reporting::{DashboardData, DashboardRenderer};
//!
//! let data = DashboardData::new(aggregates, words, languages);
//! let bytes = DashboardRenderer::new("Customer Reviews Dashboard")
//!     .write(&data, "out/dashboard.html")?;
//! ```

mod generator;

pub use generator::{DashboardData, DashboardRenderer, embed_json, escape_html};
