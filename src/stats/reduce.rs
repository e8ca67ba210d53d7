//! Numeric reductions over ordered value sequences
//!
//! The leaf library the aggregation engine applies along its three
//! granularities. Every reduction takes a value slice and returns a single
//! number, or an error when the input leaves it undefined: an empty slice,
//! or fewer than two values for the sample-dispersion measures. Failures
//! are surfaced, never masked as NaN.
//!
//! # Example
//!
//! ```rust
//! use gridstat::stats::reduce;
//!
//! let values = [1.0, 2.0, 3.0, 4.0];
//! assert_eq!(reduce::mean(&values).unwrap(), 2.5);
//! assert_eq!(reduce::quantile(&values, 0.25).unwrap(), 1.75);
//! ```

use crate::error::{Error, Result};

// ============================================================================
// Basic reductions
// ============================================================================

/// Sum of all values
///
/// # Errors
///
/// [`Error::EmptyReduction`] on an empty slice.
pub fn sum(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(empty("sum of zero values"));
    }
    Ok(values.iter().sum())
}

/// Arithmetic mean
///
/// # Errors
///
/// [`Error::EmptyReduction`] on an empty slice.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(empty("mean of zero values"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Smallest value
///
/// # Errors
///
/// [`Error::EmptyReduction`] on an empty slice.
pub fn min(values: &[f64]) -> Result<f64> {
    values
        .iter()
        .copied()
        .reduce(f64::min)
        .ok_or_else(|| empty("min of zero values"))
}

/// Largest value
///
/// # Errors
///
/// [`Error::EmptyReduction`] on an empty slice.
pub fn max(values: &[f64]) -> Result<f64> {
    values
        .iter()
        .copied()
        .reduce(f64::max)
        .ok_or_else(|| empty("max of zero values"))
}

// ============================================================================
// Quantiles
// ============================================================================

/// Quantile by linear interpolation between closest ranks
///
/// Uses the same method as the common numeric libraries: the quantile `p`
/// sits at position `p * (n - 1)` of the sorted values, interpolated
/// linearly between the two enclosing order statistics.
///
/// # Arguments
/// * `values` - Value sequence (any order; a sorted copy is taken)
/// * `p` - Probability in `[0, 1]`
///
/// # Errors
///
/// [`Error::InvalidQuantile`] when `p` is outside `[0, 1]`,
/// [`Error::EmptyReduction`] on an empty slice.
///
/// # Example
///
/// ```rust
/// use gridstat::stats::reduce::quantile;
///
/// let values = [3.0, 1.0, 2.0];
/// assert_eq!(quantile(&values, 0.5).unwrap(), 2.0);
/// assert_eq!(quantile(&values, 0.25).unwrap(), 1.5);
/// ```
pub fn quantile(values: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidQuantile(p));
    }
    if values.is_empty() {
        return Err(empty("quantile of zero values"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;

    if lo == hi {
        Ok(sorted[lo])
    } else {
        Ok(sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo]))
    }
}

/// Median (the 0.5 quantile)
///
/// # Errors
///
/// [`Error::EmptyReduction`] on an empty slice.
pub fn median(values: &[f64]) -> Result<f64> {
    quantile(values, 0.5)
}

// ============================================================================
// Dispersion
// ============================================================================

/// Sample variance (Bessel-corrected, divisor `n - 1`)
///
/// # Errors
///
/// [`Error::EmptyReduction`] when fewer than two values are given; the
/// sample variance is undefined there.
pub fn variance(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(empty("sample variance of fewer than two values"));
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let squared_deviations: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Ok(squared_deviations / (values.len() - 1) as f64)
}

/// Sample standard deviation (square root of the sample variance)
///
/// # Errors
///
/// [`Error::EmptyReduction`] when fewer than two values are given.
pub fn deviation(values: &[f64]) -> Result<f64> {
    Ok(variance(values)?.sqrt())
}

fn empty(what: &str) -> Error {
    Error::EmptyReduction(what.to_string())
}
