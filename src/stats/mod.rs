//! Statistical analysis of datasets
//!
//! Three layers, leaf first:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           reduce                    │
//! │  slice -> number (mean, quantile…)  │
//! └─────────────────────────────────────┘
//!                  ↓
//! ┌─────────────────────────────────────┐
//! │           aggregate                 │
//! │  one reduction, three granularities │
//! │  (overall / per series / per label) │
//! └─────────────────────────────────────┘
//!                  ↓
//! ┌─────────────────────────────────────┐
//! │           outlier                   │
//! │  IQR fences per granularity         │
//! └─────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of a `&Dataset`; nothing is cached
//! or mutated, so independent analyses can run in parallel freely.

pub mod aggregate;
pub mod outlier;
pub mod reduce;

// Re-export the engine and its named wrappers
pub use aggregate::{
    aggregate, describe, deviation, max, mean, median, min, quantile, quartiles, sum, variance,
    Aggregation, Quartiles, Statistic,
};

// Re-export outlier detection
pub use outlier::{outliers, Fence, FencedValues, Outlier, OutlierReport};
