//! Fixed-unit interval detection over parsed temporal values
//!
//! Given an ordered sequence of parsed label timestamps, work out which
//! calendar units separate every consecutive pair by the exact same
//! amount. Differences are fractional: days, minutes and seconds are fixed
//! ratios of the millisecond delta, while months (and years, as months
//! over twelve) are calendar-aware: the pair is oriented by day-of-month
//! so clamped month ends count whole, then a whole-month count plus a
//! linear interpolation of the remainder across the anchor month.
//! Equality across pairs is exact, not tolerance-based.
//!
//! Two entry points:
//!
//! - [`constant_units`] reports every unit whose per-pair difference is
//!   constant; daily data trivially satisfies minutes and seconds too.
//! - [`detect_intervals`] prunes that set to its canonical form: coarsest
//!   integral units first, suppressing finer units that are fixed-ratio
//!   images of a kept coarser one, so daily data reads as "every 1 day"
//!   rather than "every 86 400 seconds".
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gridstat::temporal::{detect_intervals, TimeUnit};
//!
//! let days: Vec<_> = [1, 2, 3]
//!     .iter()
//!     .map(|d| {
//!         NaiveDate::from_ymd_opt(2020, 1, *d)
//!             .unwrap()
//!             .and_hms_opt(0, 0, 0)
//!             .unwrap()
//!     })
//!     .collect();
//!
//! let intervals = detect_intervals(&days);
//! assert_eq!(intervals.len(), 1);
//! assert_eq!(intervals[0].unit, TimeUnit::Days);
//! assert_eq!(intervals[0].value, 1.0);
//! ```

use chrono::{Datelike, Months, NaiveDateTime};
use serde::Serialize;
use std::fmt;

use super::detect::TemporalValue;

/// The fixed units intervals are reported in, coarsest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Calendar years (months over twelve)
    Years,
    /// Calendar months, day-of-month anchored
    Months,
    /// Fixed 86 400-second days
    Days,
    /// Fixed 60-second minutes
    Minutes,
    /// Seconds
    Seconds,
}

impl TimeUnit {
    /// All units in reporting order
    pub const ALL: [TimeUnit; 5] = [
        TimeUnit::Years,
        TimeUnit::Months,
        TimeUnit::Days,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Years => "years",
            TimeUnit::Months => "months",
            TimeUnit::Days => "days",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        };
        f.write_str(name)
    }
}

/// A unit on which every consecutive pair differs by the same amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    /// The qualifying unit
    pub unit: TimeUnit,
    /// The shared per-pair difference, fractional
    pub value: f64,
}

// ============================================================================
// Difference arithmetic
// ============================================================================

fn millis(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}

/// Shift by whole calendar months, clamping the day-of-month
fn shift_months(value: NaiveDateTime, months: i32) -> NaiveDateTime {
    let shifted = if months >= 0 {
        value.checked_add_months(Months::new(months as u32))
    } else {
        value.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    // Only fails outside the representable year range; keep the input then.
    shifted.unwrap_or(value)
}

/// Fractional month difference `a - b`, calendar-aware
///
/// The pair is first oriented by day-of-month: when `a` sits on an earlier
/// day than `b`, the flipped difference is negated, so clamped month ends
/// (Jan 31 -> Feb 28/29 -> Mar 31) measure as whole months. Whole months
/// by year/month components, anchored at `a`; the remainder is interpolated
/// linearly across the month between the two anchors enclosing `b`.
fn month_diff(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    if a.day() < b.day() {
        return -month_diff(b, a);
    }

    let whole = (b.year() - a.year()) * 12 + (b.month() as i32 - a.month() as i32);
    let anchor = shift_months(a, whole);

    let b_ms = millis(b);
    let anchor_ms = millis(anchor);

    let adjust = if b_ms < anchor_ms {
        let anchor2_ms = millis(shift_months(a, whole - 1));
        (b_ms - anchor_ms) as f64 / (anchor_ms - anchor2_ms) as f64
    } else {
        let anchor2_ms = millis(shift_months(a, whole + 1));
        (b_ms - anchor_ms) as f64 / (anchor2_ms - anchor_ms) as f64
    };

    let diff = -(whole as f64 + adjust);
    // Normalize the negative zero the sign flip can produce.
    if diff == 0.0 {
        0.0
    } else {
        diff
    }
}

/// Fractional difference `later - earlier` in one unit
fn unit_diff(unit: TimeUnit, later: TemporalValue, earlier: TemporalValue) -> f64 {
    match unit {
        TimeUnit::Years => month_diff(later, earlier) / 12.0,
        TimeUnit::Months => month_diff(later, earlier),
        TimeUnit::Days => (millis(later) - millis(earlier)) as f64 / 86_400_000.0,
        TimeUnit::Minutes => (millis(later) - millis(earlier)) as f64 / 60_000.0,
        TimeUnit::Seconds => (millis(later) - millis(earlier)) as f64 / 1_000.0,
    }
}

// ============================================================================
// Detection
// ============================================================================

/// Report every unit whose per-pair difference is exactly constant
///
/// Output follows the fixed unit order; zero, one or many units may
/// qualify simultaneously (a daily sequence is also constant in minutes
/// and seconds). Fewer than two values yield an empty result.
pub fn constant_units(values: &[TemporalValue]) -> Vec<Interval> {
    if values.len() < 2 {
        return Vec::new();
    }

    TimeUnit::ALL
        .iter()
        .filter_map(|&unit| {
            let first = unit_diff(unit, values[1], values[0]);
            let constant = values
                .windows(2)
                .all(|pair| unit_diff(unit, pair[1], pair[0]) == first);
            constant.then_some(Interval { unit, value: first })
        })
        .collect()
}

/// Ratio tying a finer unit to a coarser one, where such a ratio is fixed
fn fixed_ratio(coarse: TimeUnit, fine: TimeUnit) -> Option<f64> {
    match (coarse, fine) {
        (TimeUnit::Years, TimeUnit::Months) => Some(12.0),
        (TimeUnit::Days, TimeUnit::Minutes) => Some(1_440.0),
        (TimeUnit::Days, TimeUnit::Seconds) => Some(86_400.0),
        (TimeUnit::Minutes, TimeUnit::Seconds) => Some(60.0),
        _ => None,
    }
}

/// Detect the canonical spacing of a temporal sequence
///
/// Starts from [`constant_units`] and prunes:
///
/// 1. keep constant units with an integral value, coarsest first;
/// 2. drop a unit whose value is the fixed-ratio image of an already kept
///    coarser unit (years to months, days to minutes and seconds, minutes
///    to seconds);
/// 3. when nothing integral qualifies, report the finest constant unit
///    with its fractional value, so sub-second spacing still surfaces.
///
/// Daily data therefore reads `[{days, 1}]`, hourly `[{minutes, 60}]`,
/// while a genuinely mixed constancy like one month-boundary pair keeps
/// both `{months, 1}` and `{days, 31}`.
pub fn detect_intervals(values: &[TemporalValue]) -> Vec<Interval> {
    let constants = constant_units(values);
    if constants.is_empty() {
        return constants;
    }

    let mut kept: Vec<Interval> = Vec::new();
    for interval in &constants {
        if interval.value.fract() != 0.0 {
            continue;
        }
        let derived = kept.iter().any(|coarse| {
            fixed_ratio(coarse.unit, interval.unit)
                .map(|ratio| interval.value == coarse.value * ratio)
                .unwrap_or(false)
        });
        if !derived {
            kept.push(*interval);
        }
    }

    if kept.is_empty() {
        // constants is non-empty and ordered coarse-to-fine
        vec![constants[constants.len() - 1]]
    } else {
        kept
    }
}
