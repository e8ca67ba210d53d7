//! IQR-fence outlier detection
//!
//! Tukey's rule, applied independently at each aggregation granularity:
//! take that granularity's quartiles, fence at `Q1 - 1.5·IQR` and
//! `Q3 + 1.5·IQR`, and report every value strictly outside the fence. A
//! value can be an outlier of the whole dataset without standing out
//! inside its own series, and vice versa, which is why each granularity
//! fences with its own quartiles.
//!
//! # Example
//!
//! ```rust
//! use gridstat::dataset::{Dataset, Series};
//! use gridstat::stats::outliers;
//!
//! let dataset = Dataset::new(
//!     vec![],
//!     vec![Series::new("A", vec![1.0, 2.0, 3.0, 4.0, 100.0])],
//! );
//!
//! let report = outliers(&dataset).unwrap();
//! assert_eq!(report.overall.outliers.len(), 1);
//! assert_eq!(report.overall.outliers[0].index, 4);
//! assert_eq!(report.overall.outliers[0].value, 100.0);
//! ```

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats::aggregate::quartiles;

/// Multiplier applied to the inter-quartile range when fencing
const FENCE_FACTOR: f64 = 1.5;

/// Lower and upper bounds derived from one granularity's quartiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fence {
    /// `Q1 - 1.5·IQR`
    pub lower: f64,
    /// `Q3 + 1.5·IQR`
    pub upper: f64,
}

impl Fence {
    fn from_quartiles(q1: f64, q3: f64) -> Self {
        let reach = (q3 - q1) * FENCE_FACTOR;
        Self {
            lower: q1 - reach,
            upper: q3 + reach,
        }
    }

    /// Whether a value sits strictly outside this fence
    pub fn excludes(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// A value outside its granularity's fence, with its position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outlier {
    /// Position within the fenced sequence: the flattened concatenation for
    /// the overall granularity, the label position within a series, or the
    /// series position within a label column
    pub index: usize,
    /// The offending value
    pub value: f64,
}

/// One granularity's fence plus the values it excludes, in sequence order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FencedValues {
    /// The fence applied to this sequence
    pub fence: Fence,
    /// Values outside the fence, ordered by index
    pub outliers: Vec<Outlier>,
}

impl FencedValues {
    fn collect<I>(fence: Fence, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let outliers = values
            .into_iter()
            .enumerate()
            .filter(|(_, v)| fence.excludes(*v))
            .map(|(index, value)| Outlier { index, value })
            .collect();
        Self { fence, outliers }
    }
}

/// Outliers at every granularity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    /// Fenced against the whole dataset's quartiles
    pub overall: FencedValues,
    /// One entry per series, fenced against that series' own quartiles
    pub per_series: Vec<FencedValues>,
    /// One entry per label position, fenced against that column's quartiles
    pub per_label: Vec<FencedValues>,
}

/// Detect outliers at all three granularities
///
/// # Errors
///
/// Same preconditions as [`quartiles`]: the dataset must have at least one
/// series, aligned lengths, and at least one value.
pub fn outliers(dataset: &Dataset) -> Result<OutlierReport> {
    let q = quartiles(dataset)?;

    // Overall: the flattened concatenation, in the same order the
    // quartiles saw it (series order, then within-series order).
    let flat = dataset
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied());
    let overall = FencedValues::collect(Fence::from_quartiles(q.q1.overall, q.q3.overall), flat);

    let per_series = dataset
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let fence = Fence::from_quartiles(q.q1.per_series[i], q.q3.per_series[i]);
            FencedValues::collect(fence, series.values.iter().copied())
        })
        .collect();

    let per_label = (0..q.q1.per_label.len())
        .map(|i| {
            let fence = Fence::from_quartiles(q.q1.per_label[i], q.q3.per_label[i]);
            FencedValues::collect(fence, dataset.series.iter().map(|s| s.values[i]))
        })
        .collect();

    Ok(OutlierReport {
        overall,
        per_series,
        per_label,
    })
}
