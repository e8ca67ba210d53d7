//! gridstat - Descriptive analysis of labeled series frames
//!
//! This library answers three questions about a dataset (a shared label
//! axis plus aligned numeric series):
//! - what structural shape it has (single value, row, column, full matrix)
//! - whether its labels are temporal, uniformly formatted and evenly spaced
//! - the standard descriptive statistics at three granularities
//!   (whole dataset, per series, per label position)
//!
//! Every analysis is a pure function of an immutable dataset snapshot;
//! the crate holds no state between calls.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dataset;
pub mod error;
pub mod stats;
pub mod temporal;

/// Date-format catalog configuration with TOML support
pub mod catalog;

/// Dataset loading from JSON files and directories
pub mod source;

// Re-export main types
pub use dataset::{Dataset, DatasetShape, Label, Series};
pub use error::{Error, Result};
pub use stats::{Aggregation, OutlierReport, Quartiles, Statistic};
pub use temporal::{Axis, CheckDepth, Interval, TemporalDetector, TemporalReport, TimeUnit};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_surface() {
        let ds = Dataset::new(vec![], vec![Series::new("A", vec![1.0])]);
        assert_eq!(ds.shape().unwrap(), DatasetShape::Single);
    }
}
