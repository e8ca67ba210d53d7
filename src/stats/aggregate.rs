//! Three-granularity aggregation engine
//!
//! One reduction function, three axes of the same matrix:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   overall                    │  reduce(all values, series order
//! │                              │         then within-series order)
//! ├──────────────────────────────┤
//! │   per series                 │  reduce(each series' values)
//! ├──────────────────────────────┤
//! │   per label position         │  reduce(each cross-series column,
//! │                              │         bounded by the first series)
//! └──────────────────────────────┘
//! ```
//!
//! The engine is generic over the reduction (any `Fn(&[f64]) -> Result<f64>`);
//! parameters such as a quantile probability travel as closure captures. The
//! named wrappers cover the standard descriptive statistics.
//!
//! # Example
//!
//! ```rust
//! use gridstat::dataset::{Dataset, Series};
//! use gridstat::stats::mean;
//!
//! let dataset = Dataset::new(
//!     vec!["a".into(), "b".into(), "c".into()],
//!     vec![
//!         Series::new("A", vec![1.0, 2.0, 3.0]),
//!         Series::new("B", vec![4.0, 5.0, 6.0]),
//!     ],
//! );
//!
//! let result = mean(&dataset).unwrap();
//! assert_eq!(result.overall, 3.5);
//! assert_eq!(result.per_series, vec![2.0, 5.0]);
//! assert_eq!(result.per_label, vec![2.5, 3.5, 4.5]);
//! ```

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats::reduce;

// ============================================================================
// Result types
// ============================================================================

/// One reduction applied along all three granularities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// Reduction over every value in the dataset
    pub overall: f64,

    /// Reduction per series, in series order
    pub per_series: Vec<f64>,

    /// Reduction per label position (cross-series column), in label order
    pub per_label: Vec<f64>,
}

/// The ordered quartile triple: three full three-granularity results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quartiles {
    /// Lower quartile (p = 0.25)
    pub q1: Aggregation,
    /// Median (p = 0.5)
    pub median: Aggregation,
    /// Upper quartile (p = 0.75)
    pub q3: Aggregation,
}

// ============================================================================
// Named statistics
// ============================================================================

/// The named reductions the engine exposes
///
/// Dispatches into [`crate::stats::reduce`]; the quantile variant carries
/// its probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statistic {
    /// Arithmetic mean
    Mean,
    /// Median (0.5 quantile)
    Median,
    /// Sum
    Sum,
    /// Smallest value
    Min,
    /// Largest value
    Max,
    /// Sample variance
    Variance,
    /// Sample standard deviation
    Deviation,
    /// Quantile at the carried probability
    Quantile(f64),
}

impl Statistic {
    /// Apply this statistic to one value sequence
    pub fn reduce(&self, values: &[f64]) -> Result<f64> {
        match self {
            Statistic::Mean => reduce::mean(values),
            Statistic::Median => reduce::median(values),
            Statistic::Sum => reduce::sum(values),
            Statistic::Min => reduce::min(values),
            Statistic::Max => reduce::max(values),
            Statistic::Variance => reduce::variance(values),
            Statistic::Deviation => reduce::deviation(values),
            Statistic::Quantile(p) => reduce::quantile(values, *p),
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Apply a reduction function along all three granularities
///
/// Validates alignment eagerly: every series must hold as many values as
/// the first one before any reduction runs, so a ragged dataset fails fast
/// instead of producing a partially wrong result.
///
/// # Errors
///
/// - [`crate::error::Error::MalformedDataset`] if the dataset has no series
/// - [`crate::error::Error::ShapeMismatch`] if series lengths disagree
/// - whatever `reduce_fn` itself returns (e.g. an empty-reduction error
///   when every series is empty)
///
/// # Example
///
/// ```rust
/// use gridstat::dataset::{Dataset, Series};
/// use gridstat::stats::{aggregate, reduce};
///
/// let dataset = Dataset::new(
///     vec![],
///     vec![Series::new("A", vec![1.0, 5.0]), Series::new("B", vec![3.0, 7.0])],
/// );
///
/// // Value range as a custom reduction
/// let range = aggregate(&dataset, |v| Ok(reduce::max(v)? - reduce::min(v)?)).unwrap();
/// assert_eq!(range.overall, 6.0);
/// assert_eq!(range.per_series, vec![4.0, 4.0]);
/// assert_eq!(range.per_label, vec![2.0, 2.0]);
/// ```
pub fn aggregate<F>(dataset: &Dataset, reduce_fn: F) -> Result<Aggregation>
where
    F: Fn(&[f64]) -> Result<f64>,
{
    let width = dataset.aligned_len()?;

    // Overall: concatenation in series order, then within-series order.
    let mut flat = Vec::with_capacity(width * dataset.series.len());
    for series in &dataset.series {
        flat.extend_from_slice(&series.values);
    }
    let overall = reduce_fn(&flat)?;

    // Per series.
    let mut per_series = Vec::with_capacity(dataset.series.len());
    for series in &dataset.series {
        per_series.push(reduce_fn(&series.values)?);
    }

    // Per label position: one cross-series column per index, bounded by the
    // first series' length (alignment already validated).
    let mut per_label = Vec::with_capacity(width);
    let mut column = Vec::with_capacity(dataset.series.len());
    for i in 0..width {
        column.clear();
        column.extend(dataset.series.iter().map(|s| s.values[i]));
        per_label.push(reduce_fn(&column)?);
    }

    Ok(Aggregation {
        overall,
        per_series,
        per_label,
    })
}

/// Apply a named statistic along all three granularities
pub fn describe(dataset: &Dataset, statistic: Statistic) -> Result<Aggregation> {
    aggregate(dataset, |values| statistic.reduce(values))
}

// ============================================================================
// Named wrappers
// ============================================================================

/// Mean at all three granularities
pub fn mean(dataset: &Dataset) -> Result<Aggregation> {
    describe(dataset, Statistic::Mean)
}

/// Median at all three granularities
pub fn median(dataset: &Dataset) -> Result<Aggregation> {
    describe(dataset, Statistic::Median)
}

/// Sum at all three granularities
pub fn sum(dataset: &Dataset) -> Result<Aggregation> {
    describe(dataset, Statistic::Sum)
}

/// Minimum at all three granularities
pub fn min(dataset: &Dataset) -> Result<Aggregation> {
    describe(dataset, Statistic::Min)
}

/// Maximum at all three granularities
pub fn max(dataset: &Dataset) -> Result<Aggregation> {
    describe(dataset, Statistic::Max)
}

/// Sample variance at all three granularities
pub fn variance(dataset: &Dataset) -> Result<Aggregation> {
    describe(dataset, Statistic::Variance)
}

/// Sample standard deviation at all three granularities
pub fn deviation(dataset: &Dataset) -> Result<Aggregation> {
    describe(dataset, Statistic::Deviation)
}

/// Quantile at probability `p` at all three granularities
pub fn quantile(dataset: &Dataset, p: f64) -> Result<Aggregation> {
    describe(dataset, Statistic::Quantile(p))
}

/// Quartiles: the q1 / median / q3 triple of full three-granularity results
pub fn quartiles(dataset: &Dataset) -> Result<Quartiles> {
    Ok(Quartiles {
        q1: quantile(dataset, 0.25)?,
        median: quantile(dataset, 0.5)?,
        q3: quantile(dataset, 0.75)?,
    })
}
