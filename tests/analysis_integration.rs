//! Integration tests for the full dataset analysis pipeline
//!
//! These tests validate the complete pipeline from JSON files to reports:
//! - Dataset loading from files and directories
//! - Structural shape classification
//! - Temporal detection, format resolution and interval detection
//! - Three-granularity statistics and their internal agreement
//! - Tukey-fence outlier detection

use gridstat::catalog::FormatCatalog;
use gridstat::dataset::{Dataset, DatasetShape, Series};
use gridstat::source;
use gridstat::stats;
use gridstat::temporal::{detect_intervals, Axis, CheckDepth, Interval, TemporalDetector, TimeUnit};
use tempfile::TempDir;

const TOL: f64 = 1e-10;

// ============================================================================
// Helper Functions
// ============================================================================

/// A 2x3 dataset with daily ISO labels: series A = [1,2,3], B = [4,5,6]
fn daily_sales() -> Dataset {
    Dataset::new(
        vec![
            "2024-03-01".into(),
            "2024-03-02".into(),
            "2024-03-03".into(),
        ],
        vec![
            Series::new("north", vec![1.0, 2.0, 3.0]),
            Series::new("south", vec![4.0, 5.0, 6.0]),
        ],
    )
}

/// Write a dataset JSON file into a directory and return its path
fn write_dataset(dir: &TempDir, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, json).expect("Failed to write dataset file");
    path
}

// ============================================================================
// Shape Classification Tests
// ============================================================================

#[test]
fn test_shape_classification_end_to_end() {
    let single = Dataset::new(vec!["x".into()], vec![Series::new("A", vec![1.0])]);
    assert_eq!(single.shape().unwrap(), DatasetShape::Single);

    let row = Dataset::new(
        vec!["a".into(), "b".into(), "c".into()],
        vec![Series::new("A", vec![1.0, 2.0, 3.0])],
    );
    assert_eq!(row.shape().unwrap(), DatasetShape::Row);

    let column = Dataset::new(
        vec!["x".into()],
        vec![Series::new("A", vec![1.0]), Series::new("B", vec![2.0])],
    );
    assert_eq!(column.shape().unwrap(), DatasetShape::Column);

    assert_eq!(daily_sales().shape().unwrap(), DatasetShape::Multi);
}

#[test]
fn test_shape_of_deserialized_dataset() {
    let json = r#"{
        "labels": ["a", "b"],
        "series": [
            {"identifier": "A", "values": [1.0, 2.0]},
            {"identifier": "B", "values": [3.0, 4.0]}
        ]
    }"#;
    let dataset: Dataset = serde_json::from_str(json).expect("Failed to parse dataset");
    assert_eq!(dataset.shape().unwrap(), DatasetShape::Multi);
}

// ============================================================================
// Temporal Pipeline Tests
// ============================================================================

#[test]
fn test_daily_labels_resolve_to_one_day_interval() {
    let dataset = daily_sales();
    let detector = TemporalDetector::with_defaults();

    let report = detector.check(&dataset, Axis::Labels, CheckDepth::Materialized);
    assert!(report.is_temporal());
    assert_eq!(report.is_consistent(), Some(true));

    let values = report.values().expect("Materialized values missing");
    let intervals = detect_intervals(values);
    assert_eq!(
        intervals,
        vec![Interval {
            unit: TimeUnit::Days,
            value: 1.0
        }]
    );
}

#[test]
fn test_monthly_labels_resolve_to_one_month_interval() {
    // Month starts across a leap February: day spacing varies (31 then 29)
    // but the month spacing is exactly one.
    let dataset = Dataset::new(
        vec![
            "2024-01-01".into(),
            "2024-02-01".into(),
            "2024-03-01".into(),
        ],
        vec![Series::new("A", vec![10.0, 20.0, 30.0])],
    );
    let report = TemporalDetector::with_defaults().check(
        &dataset,
        Axis::Labels,
        CheckDepth::Materialized,
    );
    let intervals = detect_intervals(report.values().expect("Materialized values missing"));
    assert_eq!(
        intervals,
        vec![Interval {
            unit: TimeUnit::Months,
            value: 1.0
        }]
    );
}

#[test]
fn test_month_end_labels_resolve_to_one_month_interval() {
    // Month ends land on the 31st, 29th and 31st: day spacing varies but
    // each clamped step is exactly one month.
    let dataset = Dataset::new(
        vec![
            "2024-01-31".into(),
            "2024-02-29".into(),
            "2024-03-31".into(),
        ],
        vec![Series::new("A", vec![10.0, 20.0, 30.0])],
    );
    let report = TemporalDetector::with_defaults().check(
        &dataset,
        Axis::Labels,
        CheckDepth::Materialized,
    );
    let intervals = detect_intervals(report.values().expect("Materialized values missing"));
    assert_eq!(
        intervals,
        vec![Interval {
            unit: TimeUnit::Months,
            value: 1.0
        }]
    );
}

#[test]
fn test_inconsistent_axis_yields_no_values() {
    // Both labels are dates, but no single catalog pattern parses both.
    let dataset = Dataset::new(
        vec!["2020-01-01".into(), "01/02/2020".into()],
        vec![Series::new("A", vec![1.0, 2.0])],
    );
    let report = TemporalDetector::with_defaults().check(
        &dataset,
        Axis::Labels,
        CheckDepth::Materialized,
    );
    assert!(report.is_temporal());
    assert_eq!(report.is_consistent(), Some(false));
    assert!(report.values().is_none());
}

#[test]
fn test_series_axis_checked_independently_of_labels() {
    let dataset = Dataset::new(
        vec!["north".into(), "south".into()],
        vec![
            Series::new("2021-01-01", vec![1.0, 2.0]),
            Series::new("2021-01-08", vec![3.0, 4.0]),
        ],
    );
    let detector = TemporalDetector::with_defaults();

    let labels = detector.check(&dataset, Axis::Labels, CheckDepth::Consistency);
    assert!(!labels.is_temporal());

    let series = detector.check(&dataset, Axis::Series, CheckDepth::Materialized);
    assert_eq!(series.is_consistent(), Some(true));
    let intervals = detect_intervals(series.values().expect("Materialized values missing"));
    assert_eq!(
        intervals,
        vec![Interval {
            unit: TimeUnit::Days,
            value: 7.0
        }]
    );
}

#[test]
fn test_custom_catalog_drives_detection() {
    // A catalog with only a day-first slash pattern: ISO labels stop
    // matching entirely.
    let catalog = FormatCatalog {
        patterns: vec!["%d/%m/%Y".to_string()],
    };
    let detector = TemporalDetector::new(&catalog);

    let iso = Dataset::new(
        vec!["2020-01-01".into()],
        vec![Series::new("A", vec![1.0])],
    );
    assert!(!detector
        .check(&iso, Axis::Labels, CheckDepth::Presence)
        .is_temporal());

    let slash = Dataset::new(
        vec!["01/02/2020".into()],
        vec![Series::new("A", vec![1.0])],
    );
    assert!(detector
        .check(&slash, Axis::Labels, CheckDepth::Presence)
        .is_temporal());
}

// ============================================================================
// Statistics Agreement Tests
// ============================================================================

#[test]
fn test_mean_at_all_granularities() {
    let result = stats::mean(&daily_sales()).expect("Mean failed");
    assert!((result.overall - 3.5).abs() < TOL);
    assert_eq!(result.per_series, vec![2.0, 5.0]);
    assert_eq!(result.per_label, vec![2.5, 3.5, 4.5]);
}

#[test]
fn test_sum_granularities_agree_on_total() {
    let result = stats::sum(&daily_sales()).expect("Sum failed");
    let per_series_total: f64 = result.per_series.iter().sum();
    let per_label_total: f64 = result.per_label.iter().sum();
    assert!((result.overall - 21.0).abs() < TOL);
    assert!((per_series_total - result.overall).abs() < TOL);
    assert!((per_label_total - result.overall).abs() < TOL);
}

#[test]
fn test_quartiles_at_all_granularities() {
    let q = stats::quartiles(&daily_sales()).expect("Quartiles failed");
    // Flat values 1..=6 under linear interpolation
    assert!((q.q1.overall - 2.25).abs() < TOL);
    assert!((q.median.overall - 3.5).abs() < TOL);
    assert!((q.q3.overall - 4.75).abs() < TOL);
    // Per-series medians of [1,2,3] and [4,5,6]
    assert_eq!(q.median.per_series, vec![2.0, 5.0]);
}

#[test]
fn test_analysis_is_pure() {
    let dataset = daily_sales();
    let detector = TemporalDetector::with_defaults();

    let first_stats = stats::mean(&dataset).expect("Mean failed");
    let first_report = detector.check(&dataset, Axis::Labels, CheckDepth::Materialized);

    let second_stats = stats::mean(&dataset).expect("Mean failed");
    let second_report = detector.check(&dataset, Axis::Labels, CheckDepth::Materialized);

    assert_eq!(first_stats, second_stats);
    assert_eq!(first_report, second_report);
}

// ============================================================================
// Outlier Detection Tests
// ============================================================================

#[test]
fn test_outlier_pipeline_flags_spike() {
    let dataset = Dataset::new(
        vec![],
        vec![Series::new("A", vec![1.0, 2.0, 3.0, 4.0, 100.0])],
    );
    let report = stats::outliers(&dataset).expect("Outlier detection failed");

    // Flat quartiles of [1,2,3,4,100]: q1 = 2, q3 = 4, fences [-1, 7]
    assert_eq!(report.overall.outliers.len(), 1);
    assert_eq!(report.overall.outliers[0].index, 4);
    assert!((report.overall.outliers[0].value - 100.0).abs() < TOL);

    // The single series sees the same spike
    assert_eq!(report.per_series[0].outliers.len(), 1);

    // Each cross-series column holds one value: a fence of zero width
    // excludes nothing under strict comparison.
    assert!(report.per_label.iter().all(|f| f.outliers.is_empty()));
}

#[test]
fn test_outliers_uneventful_dataset_is_clean() {
    let report = stats::outliers(&daily_sales()).expect("Outlier detection failed");
    assert!(report.overall.outliers.is_empty());
    assert!(report.per_series.iter().all(|f| f.outliers.is_empty()));
}

// ============================================================================
// File Loading Pipeline Tests
// ============================================================================

#[test]
fn test_load_file_then_analyze() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_dataset(
        &dir,
        "sales.json",
        r#"{
            "labels": ["2024-03-01", "2024-03-02", "2024-03-03"],
            "series": [
                {"identifier": "north", "values": [1.0, 2.0, 3.0]},
                {"identifier": "south", "values": [4.0, 5.0, 6.0]}
            ]
        }"#,
    );

    let dataset = source::load_dataset(&path).expect("Failed to load dataset");
    assert_eq!(dataset.shape().unwrap(), DatasetShape::Multi);

    let mean = stats::mean(&dataset).expect("Mean failed");
    assert!((mean.overall - 3.5).abs() < TOL);

    let report = TemporalDetector::with_defaults().check(
        &dataset,
        Axis::Labels,
        CheckDepth::Materialized,
    );
    let intervals = detect_intervals(report.values().expect("Materialized values missing"));
    assert_eq!(intervals[0].unit, TimeUnit::Days);
}

#[test]
fn test_load_legacy_field_names() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_dataset(
        &dir,
        "legacy.json",
        r#"{
            "labels": ["a", "b"],
            "data": [
                {"label": "A", "data": [1.0, 2.0]},
                {"label": "B", "data": [3.0, 4.0]}
            ]
        }"#,
    );

    let dataset = source::load_dataset(&path).expect("Failed to load legacy dataset");
    assert_eq!(dataset.series.len(), 2);
    assert_eq!(dataset.series[0].identifier.to_string(), "A");
}

#[test]
fn test_load_directory_is_sorted_and_filtered() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_dataset(
        &dir,
        "b.json",
        r#"{"labels": [], "series": [{"identifier": "B", "values": [2.0]}]}"#,
    );
    write_dataset(
        &dir,
        "a.json",
        r#"{"labels": [], "series": [{"identifier": "A", "values": [1.0]}]}"#,
    );
    write_dataset(&dir, "notes.txt", "not a dataset");

    let datasets = source::load_path(dir.path()).expect("Failed to load directory");
    let names: Vec<&str> = datasets.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_directory_pipeline_end_to_end() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_dataset(
        &dir,
        "daily.json",
        r#"{
            "labels": ["2024-03-01", "2024-03-02"],
            "series": [{"identifier": "A", "values": [1.0, 9.0]}]
        }"#,
    );
    write_dataset(
        &dir,
        "plain.json",
        r#"{
            "labels": ["a", "b"],
            "series": [{"identifier": "A", "values": [5.0, 7.0]}]
        }"#,
    );

    let detector = TemporalDetector::with_defaults();
    for (name, dataset) in source::load_path(dir.path()).expect("Failed to load directory") {
        // Every loaded dataset must survive the full pipeline.
        let shape = dataset.shape().expect("Shape failed");
        assert_eq!(shape, DatasetShape::Row);

        stats::mean(&dataset).expect("Mean failed");
        stats::quartiles(&dataset).expect("Quartiles failed");
        stats::outliers(&dataset).expect("Outlier detection failed");

        let report = detector.check(&dataset, Axis::Labels, CheckDepth::Materialized);
        match name.as_str() {
            "daily" => assert_eq!(report.is_consistent(), Some(true)),
            "plain" => assert!(!report.is_temporal()),
            other => panic!("unexpected dataset {other}"),
        }
    }
}
