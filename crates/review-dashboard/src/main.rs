//! CLI entry point for the review dashboard generator.

use anyhow::{Result, anyhow};
use clap::Parser;
use review_dashboard::{DashboardConfig, DashboardConfigBuilder, DashboardPipeline, RunSummary};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Customer review dashboard generator",
    long_about = "Reads a processed customer-review table and writes one self-contained HTML \
                  dashboard with KPIs, rating distributions, trends, word rankings, top \
                  reviews and a language breakdown.\n\n\
                  EXAMPLES:\n  \
                  # Defaults: ../data/processed/yassir_customers_processed.csv -> yassir_dashboard.html\n  \
                  review-dashboard\n\n  \
                  # Explicit paths and a fixed reference year\n  \
                  review-dashboard -i reviews.csv -o out/dashboard.html --reference-year 2025\n\n  \
                  # Print the embedded data instead of writing a file\n  \
                  review-dashboard -i reviews.csv --json | jq .meta"
)]
struct Args {
    /// Path to the processed review table
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path of the generated HTML document (overwritten if present)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of reviews sampled for language detection
    #[arg(long)]
    sample_size: Option<usize>,

    /// Seed for the language-detection sample
    #[arg(long)]
    seed: Option<u64>,

    /// Field delimiter of the input table
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Treat this year as the current one when selecting fully elapsed years
    ///
    /// Defaults to the current local calendar year
    #[arg(long)]
    reference_year: Option<i32>,

    /// Newline-separated stopword list replacing the built-in one
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// JSON configuration file; flags given on the command line override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Print the dashboard data as JSON to stdout instead of writing the document
    ///
    /// Disables all logging so stdout carries only JSON.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only show warnings, errors and the final summary
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Layer command-line flags over the file or default configuration.
fn build_config(args: &Args) -> Result<DashboardConfig> {
    let base = match &args.config {
        Some(path) => DashboardConfig::from_json_file(path)?,
        None => DashboardConfig::default(),
    };

    let mut builder = DashboardConfigBuilder::from_config(base);

    if let Some(ref input) = args.input {
        builder = builder.input_path(input);
    }
    if let Some(ref output) = args.output {
        builder = builder.output_path(output);
    }
    if let Some(size) = args.sample_size {
        builder = builder.sample_size(size);
    }
    if let Some(seed) = args.seed {
        builder = builder.sample_seed(seed);
    }
    if let Some(delimiter) = args.delimiter {
        builder = builder.delimiter(delimiter);
    }
    if let Some(year) = args.reference_year {
        builder = builder.reference_year(year);
    }
    if let Some(ref stopwords) = args.stopwords {
        builder = builder.stopwords_path(stopwords);
    }
    if let Some(ref title) = args.title {
        builder = builder.title(title);
    }

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    let pipeline = DashboardPipeline::builder().config(config).build()?;

    if args.json {
        let data = pipeline.build_data()?;
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    info!("{}", "=".repeat(80));
    info!("Generating review dashboard...");
    info!("{}", "=".repeat(80));

    match pipeline.run() {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            error!("Dashboard generation failed: {}", e);
            Err(anyhow!("Dashboard generation failed: {}", e))
        }
    }
}

/// Print a human-readable summary of the run.
fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", "=".repeat(80));
    println!("DASHBOARD GENERATED");
    println!("{}", "=".repeat(80));
    println!();
    println!("Input:  {} ({} reviews)", summary.input_path.display(), summary.rows);
    println!(
        "Output: {} ({:.1} KB)",
        summary.output_path.display(),
        summary.bytes_written as f64 / 1024.0
    );
    println!();
    match summary.avg_rating {
        Some(avg) => println!("Average rating: {:.2}", avg),
        None => println!("Average rating: —"),
    }
    println!(
        "Positive: {:.1}%   Negative: {:.1}%",
        summary.pct_positive, summary.pct_negative
    );
    println!("Language sample: {} reviews", summary.language_sample_size);
    if summary.unparseable_dates > 0 {
        println!("  ! {} reviews had an unparseable date", summary.unparseable_dates);
    }
    println!("Duration: {}ms", summary.duration_ms);
    println!("{}", "=".repeat(80));
}
