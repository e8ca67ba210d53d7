//! Temporal analysis of label axes
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           detect                    │
//! │  labels × catalog -> TemporalReport │
//! │  (candidates, consistency, values)  │
//! └─────────────────────────────────────┘
//!                  ↓ materialized values
//! ┌─────────────────────────────────────┐
//! │           interval                  │
//! │  constant per-pair spacing in the   │
//! │  five fixed calendar units          │
//! └─────────────────────────────────────┘
//! ```
//!
//! Detection failures are report values, never errors: an axis that is not
//! temporal, or temporal without one consistent format, is a normal
//! outcome the caller branches on.

pub mod detect;
pub mod interval;

// Re-export detection
pub use detect::{Axis, CheckDepth, TemporalDetector, TemporalReport, TemporalValue};

// Re-export interval detection
pub use interval::{constant_units, detect_intervals, Interval, TimeUnit};
