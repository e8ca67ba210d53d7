//! gridstat Dataset Analyzer
//!
//! This binary runs the full analysis pipeline over dataset files and
//! prints one JSON report per dataset to stdout. Each report covers:
//!
//! - structural shape (single / row / column / multi)
//! - temporal verdicts for both axes, with the resolved date format and
//!   the detected spacing intervals where one format covers the axis
//! - mean, standard deviation and quartiles at all three granularities
//! - Tukey-fence outliers at all three granularities
//!
//! Failures are logged per dataset and analysis continues with the next
//! one; the process exits non-zero if any dataset failed.
//!
//! # Configuration
//!
//! The date-format catalog is read from:
//! 1. `GRIDSTAT_CATALOG` environment variable (path to TOML file)
//! 2. Built-in default patterns
//!
//! A configured catalog that cannot be read or validated aborts startup.
//!
//! # Example Usage
//!
//! ```bash
//! # Analyze a single dataset file
//! ./analyze sales.json
//!
//! # Analyze every .json file in a directory
//! ./analyze data/
//!
//! # Analyze with a custom format catalog
//! GRIDSTAT_CATALOG=/etc/gridstat/formats.toml ./analyze data/
//! ```

use gridstat::{
    catalog::FormatCatalog,
    dataset::{Dataset, DatasetShape},
    source,
    stats::{self, Aggregation, OutlierReport, Quartiles},
    temporal::{detect_intervals, Axis, CheckDepth, Interval, TemporalDetector},
};
use serde::Serialize;
use tracing::{error, info, warn};

// =============================================================================
// Report Types
// =============================================================================

/// Full analysis report for one dataset
#[derive(Debug, Serialize)]
struct DatasetReport {
    /// Dataset name (file stem)
    name: String,
    /// Structural shape
    shape: DatasetShape,
    /// Temporal verdict for the label axis
    labels: AxisReport,
    /// Temporal verdict for the series-identifier axis
    series: AxisReport,
    /// Descriptive statistics at all three granularities
    statistics: StatisticsReport,
    /// Tukey-fence outliers at all three granularities
    outliers: OutlierReport,
}

/// Temporal verdict for one axis
#[derive(Debug, Serialize)]
struct AxisReport {
    /// Whether every label on the axis matched some catalog pattern
    temporal: bool,
    /// Whether one format covers the whole axis (absent when not temporal)
    #[serde(skip_serializing_if = "Option::is_none")]
    consistent: Option<bool>,
    /// The winning date format
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    /// Detected spacing intervals, coarsest unit first
    #[serde(skip_serializing_if = "Option::is_none")]
    intervals: Option<Vec<Interval>>,
}

/// The statistics block of a report
#[derive(Debug, Serialize)]
struct StatisticsReport {
    mean: Aggregation,
    min: Aggregation,
    max: Aggregation,
    /// Absent when some analyzed sequence holds fewer than two values
    /// (sample deviation is undefined there)
    #[serde(skip_serializing_if = "Option::is_none")]
    deviation: Option<Aggregation>,
    quartiles: Quartiles,
}

// =============================================================================
// Analysis
// =============================================================================

/// Run a materialized temporal check on one axis and fold the outcome,
/// including spacing intervals where a format was resolved, into the
/// report shape.
fn axis_report(detector: &TemporalDetector<'_>, dataset: &Dataset, axis: Axis) -> AxisReport {
    let report = detector.check(dataset, axis, CheckDepth::Materialized);
    AxisReport {
        temporal: report.is_temporal(),
        consistent: report.is_consistent(),
        pattern: match &report {
            gridstat::TemporalReport::Consistent { pattern, .. } => Some(pattern.clone()),
            _ => None,
        },
        intervals: report.values().map(detect_intervals),
    }
}

/// Analyze one dataset end to end
fn analyze_dataset(
    name: &str,
    dataset: &Dataset,
    detector: &TemporalDetector<'_>,
) -> gridstat::Result<DatasetReport> {
    Ok(DatasetReport {
        name: name.to_string(),
        shape: dataset.shape()?,
        labels: axis_report(detector, dataset, Axis::Labels),
        series: axis_report(detector, dataset, Axis::Series),
        statistics: StatisticsReport {
            mean: stats::mean(dataset)?,
            min: stats::min(dataset)?,
            max: stats::max(dataset)?,
            // Undefined for sequences of fewer than two values; mean()
            // above has already surfaced any structural error.
            deviation: stats::deviation(dataset).ok(),
            quartiles: stats::quartiles(dataset)?,
        },
        outliers: stats::outliers(dataset)?,
    })
}

// =============================================================================
// Catalog Loading
// =============================================================================

/// Load the format catalog: `GRIDSTAT_CATALOG` if set, defaults otherwise
///
/// Catalog files are validated on load; a broken configured catalog is
/// fatal rather than silently replaced by the defaults.
fn load_catalog() -> gridstat::Result<FormatCatalog> {
    let catalog = FormatCatalog::load()?;
    info!(patterns = catalog.len(), "Loaded format catalog");
    Ok(catalog)
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gridstat=info".parse()?)
                .add_directive("analyze=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: analyze <dataset.json | directory>...");
        std::process::exit(2);
    }

    info!("gridstat analyzer starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let catalog = match load_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "Failed to load format catalog");
            std::process::exit(2);
        }
    };
    let detector = TemporalDetector::new(&catalog);

    let mut analyzed = 0usize;
    let mut failures = 0usize;

    for arg in &args {
        let datasets = match source::load_path(arg) {
            Ok(datasets) => datasets,
            Err(e) => {
                error!(path = %arg, error = %e, "Failed to load datasets");
                failures += 1;
                continue;
            }
        };

        if datasets.is_empty() {
            warn!(path = %arg, "No datasets found");
        }

        for (name, dataset) in &datasets {
            match analyze_dataset(name, dataset, &detector) {
                Ok(report) => match serde_json::to_string_pretty(&report) {
                    Ok(text) => {
                        println!("{text}");
                        analyzed += 1;
                    }
                    Err(e) => {
                        error!(dataset = %name, error = %e, "Failed to render report");
                        failures += 1;
                    }
                },
                Err(e) => {
                    error!(dataset = %name, error = %e, "Analysis failed");
                    failures += 1;
                }
            }
        }
    }

    info!(analyzed, failures, "Analysis complete");
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
