//! Core dataset model: labels, series and structural shape
//!
//! This module defines the fundamental data structures analyzed across the crate:
//!
//! # Key Types
//!
//! - **`Label`**: One point on a label axis, free text or a number
//! - **`Series`**: One identified sequence of values aligned to the label axis
//! - **`Dataset`**: The shared label axis plus one or more series
//! - **`DatasetShape`**: Structural classification (single/row/column/multi)
//!
//! # Example
//!
//! ```rust
//! use gridstat::dataset::{Dataset, DatasetShape, Series};
//!
//! let dataset = Dataset::new(
//!     vec!["2020-01-01".into(), "2020-01-02".into(), "2020-01-03".into()],
//!     vec![
//!         Series::new("A", vec![1.0, 2.0, 3.0]),
//!         Series::new("B", vec![4.0, 5.0, 6.0]),
//!     ],
//! );
//!
//! assert_eq!(dataset.shape().unwrap(), DatasetShape::Multi);
//! assert_eq!(dataset.aligned_len().unwrap(), 3);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// One point on a label axis
///
/// Labels arrive from dataset files as either JSON strings or JSON numbers,
/// so the type is an untagged union of the two. Temporal detection always
/// operates on the canonical string form the `Display` impl renders, which
/// writes integral numbers without a fractional part.
///
/// # Example
///
/// ```rust
/// use gridstat::dataset::Label;
///
/// let text = Label::from("2020-01-01");
/// let number = Label::from(2020.0);
///
/// assert_eq!(text.to_string(), "2020-01-01");
/// assert_eq!(number.to_string(), "2020");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Free-text label (dates usually arrive this way)
    Text(String),
    /// Numeric label
    Number(f64),
}

impl Label {
    /// Borrow the text form if this label is textual
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Label::Text(s) => Some(s),
            Label::Number(_) => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Text(s) => f.write_str(s),
            // Integral numbers render without a trailing ".0" so that a
            // numeric 2020 still matches a year pattern like a textual "2020".
            Label::Number(n) if n.fract() == 0.0 && n.is_finite() && n.abs() < 9e15 => {
                write!(f, "{}", *n as i64)
            }
            Label::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

impl From<f64> for Label {
    fn from(n: f64) -> Self {
        Label::Number(n)
    }
}

/// One identified sequence of values aligned to the dataset's label axis
///
/// The serde aliases accept the field names used by existing dataset files
/// (`label` for the identifier, `data` for the values).
///
/// # Example
///
/// ```rust
/// use gridstat::dataset::Series;
///
/// let series = Series::new("temperature", vec![21.5, 22.0, 21.8]);
/// assert_eq!(series.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Identifier of this series (its position on the series axis)
    #[serde(alias = "label")]
    pub identifier: Label,

    /// Values, index-aligned with the dataset's `labels`
    #[serde(alias = "data")]
    pub values: Vec<f64>,
}

impl Series {
    /// Create a new series
    pub fn new(identifier: impl Into<Label>, values: Vec<f64>) -> Self {
        Self {
            identifier: identifier.into(),
            values,
        }
    }

    /// Number of values in this series
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether this series holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A dataset: one shared label axis plus one or more value series
///
/// Datasets are read-only snapshots from this crate's perspective: every
/// analysis is a pure function of a `&Dataset` and returns fresh results.
/// The serde alias accepts the legacy field name `data` for `series`, and
/// `labels` may be absent in a file (it defaults to empty, which the
/// temporal detector reports as not temporal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// The shared label axis
    #[serde(default)]
    pub labels: Vec<Label>,

    /// The value series, all index-aligned with `labels`
    #[serde(alias = "data")]
    pub series: Vec<Series>,
}

impl Dataset {
    /// Create a new dataset
    pub fn new(labels: Vec<Label>, series: Vec<Series>) -> Self {
        Self { labels, series }
    }

    /// Classify the structural shape of this dataset
    ///
    /// Precedence is a contract (first match wins, all counts compared
    /// against "at most one"):
    ///
    /// 1. [`DatasetShape::Single`]: at most one label, one series, and one
    ///    value in the first series
    /// 2. [`DatasetShape::Row`]: at most one series, regardless of label
    ///    count
    /// 3. [`DatasetShape::Column`]: first series has at most one value and
    ///    the label axis has at most one label
    /// 4. [`DatasetShape::Multi`]: everything else
    ///
    /// Only the first series' length is consulted; alignment of the
    /// remaining series is the aggregation engine's concern, not the
    /// classifier's.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedDataset`] if the dataset has no series at all.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gridstat::dataset::{Dataset, DatasetShape, Series};
    ///
    /// let row = Dataset::new(vec![], vec![Series::new("A", vec![1.0, 2.0])]);
    /// assert_eq!(row.shape().unwrap(), DatasetShape::Row);
    /// ```
    pub fn shape(&self) -> Result<DatasetShape> {
        let first = self
            .series
            .first()
            .ok_or_else(|| Error::MalformedDataset("dataset has no series".to_string()))?;

        let shape = if self.labels.len() <= 1 && self.series.len() <= 1 && first.len() <= 1 {
            DatasetShape::Single
        } else if self.series.len() <= 1 {
            DatasetShape::Row
        } else if first.len() <= 1 && self.labels.len() <= 1 {
            DatasetShape::Column
        } else {
            DatasetShape::Multi
        };

        Ok(shape)
    }

    /// Project the series-axis labels: one identifier per series, in series order
    ///
    /// Pure projection with no validation; an empty dataset yields an empty
    /// vector.
    pub fn series_labels(&self) -> Vec<Label> {
        self.series.iter().map(|s| s.identifier.clone()).collect()
    }

    /// Validate series alignment and return the shared length
    ///
    /// Every series must hold exactly as many values as the first one,
    /// otherwise per-label-position aggregation is ill-defined.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedDataset`] if the dataset has no series
    /// - [`Error::ShapeMismatch`] naming the first series whose length
    ///   differs from the first series' length
    pub fn aligned_len(&self) -> Result<usize> {
        let first = self
            .series
            .first()
            .ok_or_else(|| Error::MalformedDataset("dataset has no series".to_string()))?;
        let expected = first.len();

        for series in &self.series[1..] {
            if series.len() != expected {
                return Err(Error::ShapeMismatch {
                    identifier: series.identifier.to_string(),
                    expected,
                    actual: series.len(),
                });
            }
        }

        Ok(expected)
    }
}

/// Structural classification of a dataset
///
/// The four shapes partition every well-formed dataset; see
/// [`Dataset::shape`] for the precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetShape {
    /// A lone value: at most one label, one series, one value
    Single,
    /// One series spanning the label axis
    Row,
    /// Several series contributing one value each, label axis collapsed
    Column,
    /// Several series of several values: a full matrix
    Multi,
}

impl fmt::Display for DatasetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DatasetShape::Single => "single",
            DatasetShape::Row => "row",
            DatasetShape::Column => "column",
            DatasetShape::Multi => "multi",
        };
        f.write_str(tag)
    }
}
