//! Temporal detection and consistency resolution
//!
//! Decides whether an axis's labels are dates, and whether one catalog
//! format covers all of them. Two pure phases:
//!
//! 1. **Candidates**: every label is strictly matched against every
//!    catalog pattern, in catalog order, collecting the matching pattern
//!    indices per label. All labels are scanned even after a miss, so the
//!    candidate sets are complete and the outcome deterministic. Any label
//!    with no match makes the whole axis non-temporal.
//! 2. **Resolution**: the first label's candidates are walked in catalog
//!    order; the first index present in every other label's candidate set
//!    is the winning format. At most one format wins, even when several
//!    are common; catalog order is the caller's priority list.
//!
//! Ambiguity is never an error here: an empty axis, a non-matching label
//! or a format disagreement all come back as ordinary report values.
//!
//! # Example
//!
//! ```rust
//! use gridstat::catalog::FormatCatalog;
//! use gridstat::dataset::{Dataset, Series};
//! use gridstat::temporal::{Axis, CheckDepth, TemporalDetector};
//!
//! let dataset = Dataset::new(
//!     vec!["2020-01-01".into(), "2020-01-02".into()],
//!     vec![Series::new("A", vec![1.0, 2.0])],
//! );
//!
//! let catalog = FormatCatalog::default();
//! let report = TemporalDetector::new(&catalog).check(
//!     &dataset,
//!     Axis::Labels,
//!     CheckDepth::Consistency,
//! );
//!
//! assert!(report.is_temporal());
//! assert_eq!(report.is_consistent(), Some(true));
//! ```

use chrono::{NaiveDate, NaiveDateTime};

use crate::catalog::{default_catalog, FormatCatalog};
use crate::dataset::{Dataset, Label};

/// A parsed temporal label value
///
/// Labels carry no time zone, so the parsed representation is a naive
/// calendar timestamp; date-only formats promote to midnight.
pub type TemporalValue = NaiveDateTime;

/// Which dataset axis a temporal check inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The shared label axis
    Labels,
    /// The series identifiers, projected in series order
    Series,
}

/// How deep a temporal check goes
///
/// The ladder keeps the meaningless combination (materialize without
/// resolving a format) unrepresentable: materialization implies the
/// consistency pass, and a presence-only check never resolves one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckDepth {
    /// Only decide whether every label matches some catalog pattern
    Presence,
    /// Additionally resolve one common format across all labels
    Consistency,
    /// Additionally parse every label with the winning format
    Materialized,
}

/// Outcome of a temporal check
#[derive(Debug, Clone, PartialEq)]
pub enum TemporalReport {
    /// The axis is empty/absent, or some label matched no pattern
    NotTemporal,
    /// Every label matched at least one pattern (presence-only check)
    Temporal,
    /// Every label matched, but no single format covers all of them
    Inconsistent,
    /// One format parses every label on the axis
    Consistent {
        /// Catalog index of the winning format
        format_index: usize,
        /// The winning pattern itself
        pattern: String,
        /// Labels parsed with the winning format, in label order; present
        /// only when materialization was requested
        values: Option<Vec<TemporalValue>>,
    },
}

impl TemporalReport {
    /// Whether every label on the axis matched some catalog pattern
    pub fn is_temporal(&self) -> bool {
        !matches!(self, TemporalReport::NotTemporal)
    }

    /// Consistency verdict, if the check resolved one
    ///
    /// `None` for non-temporal axes and presence-only checks.
    pub fn is_consistent(&self) -> Option<bool> {
        match self {
            TemporalReport::NotTemporal | TemporalReport::Temporal => None,
            TemporalReport::Inconsistent => Some(false),
            TemporalReport::Consistent { .. } => Some(true),
        }
    }

    /// Materialized values, when they were requested and the axis is consistent
    pub fn values(&self) -> Option<&[TemporalValue]> {
        match self {
            TemporalReport::Consistent {
                values: Some(values),
                ..
            } => Some(values),
            _ => None,
        }
    }
}

/// Temporal detector bound to a format catalog
#[derive(Debug, Clone, Copy)]
pub struct TemporalDetector<'a> {
    catalog: &'a FormatCatalog,
}

impl<'a> TemporalDetector<'a> {
    /// Create a detector over the given catalog
    pub fn new(catalog: &'a FormatCatalog) -> Self {
        Self { catalog }
    }

    /// Create a detector over the process-wide built-in catalog
    pub fn with_defaults() -> TemporalDetector<'static> {
        TemporalDetector {
            catalog: default_catalog(),
        }
    }

    /// Check one axis of a dataset
    pub fn check(&self, dataset: &Dataset, axis: Axis, depth: CheckDepth) -> TemporalReport {
        match axis {
            Axis::Labels => self.check_labels(&dataset.labels, depth),
            Axis::Series => self.check_labels(&dataset.series_labels(), depth),
        }
    }

    /// Check a raw label sequence
    pub fn check_labels(&self, labels: &[Label], depth: CheckDepth) -> TemporalReport {
        if labels.is_empty() {
            return TemporalReport::NotTemporal;
        }

        // Phase 1: per-label candidate formats, parsed as we go. No
        // short-circuit on a miss: every label's set is always built.
        let mut temporal = true;
        let mut candidates: Vec<Vec<(usize, TemporalValue)>> = Vec::with_capacity(labels.len());
        for label in labels {
            let rendered;
            let text = match label.as_text() {
                Some(text) => text,
                None => {
                    rendered = label.to_string();
                    rendered.as_str()
                }
            };
            let matched: Vec<(usize, TemporalValue)> = self
                .catalog
                .patterns
                .iter()
                .enumerate()
                .filter_map(|(index, pattern)| {
                    parse_strict(text, pattern).map(|value| (index, value))
                })
                .collect();
            if matched.is_empty() {
                temporal = false;
            }
            candidates.push(matched);
        }

        if !temporal {
            return TemporalReport::NotTemporal;
        }
        if depth == CheckDepth::Presence {
            return TemporalReport::Temporal;
        }

        // Phase 2: walk the first label's candidates in catalog order; the
        // first format every other label also matched wins. Collecting the
        // parsed values along the way doubles as the membership test.
        let mut winner: Option<(usize, Vec<TemporalValue>)> = None;
        for &(format_index, first_value) in &candidates[0] {
            let mut parsed = Vec::with_capacity(labels.len());
            parsed.push(first_value);
            let common = candidates[1..].iter().all(|set| {
                match set.iter().find(|(index, _)| *index == format_index) {
                    Some(&(_, value)) => {
                        parsed.push(value);
                        true
                    }
                    None => false,
                }
            });
            if common {
                winner = Some((format_index, parsed));
                break;
            }
        }

        match winner {
            None => TemporalReport::Inconsistent,
            Some((format_index, parsed)) => TemporalReport::Consistent {
                format_index,
                pattern: self.catalog.patterns[format_index].clone(),
                values: (depth == CheckDepth::Materialized).then_some(parsed),
            },
        }
    }
}

/// Strict whole-string parse of one label text under one pattern
///
/// Datetime patterns go through `NaiveDateTime`; date-only patterns through
/// `NaiveDate`, promoted to midnight. chrono errors unless the entire input
/// is consumed, which is the strictness contract.
fn parse_strict(text: &str, pattern: &str) -> Option<TemporalValue> {
    NaiveDateTime::parse_from_str(text, pattern).ok().or_else(|| {
        NaiveDate::parse_from_str(text, pattern)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
}
