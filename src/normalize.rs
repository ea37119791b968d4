//! Min-max normalization with benefit/cost polarity.
//!
//! Ranges are derived from the eligible set on every call and never cached:
//! adding one record can shift every other record's normalized values.
//!
//! - benefit: `(v - min) / (max - min)`
//! - cost:    `(max - v) / (max - min)`
//! - `max == min` (degenerate): every record gets exactly `1.0`

use crate::criteria::{CriteriaSet, Polarity};
use crate::record::EligibleRecord;

/// Observed `(min, max)` of one criterion over the eligible set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionRange {
    pub min: f64,
    pub max: f64,
}

impl CriterionRange {
    /// Range over `values`; `None` for an empty slice.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut it = values.into_iter();
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Map a raw value into `[0,1]` in the "goodness" direction of `polarity`.
    pub fn normalize(&self, value: f64, polarity: Polarity) -> f64 {
        if self.is_degenerate() {
            return 1.0;
        }
        let (lo, hi, v) = if (self.max - self.min).is_finite() {
            (self.min, self.max, value)
        } else {
            // Span overflows f64 (e.g. -1e308..1e308): work on halves instead.
            (self.min / 2.0, self.max / 2.0, value / 2.0)
        };
        let span = hi - lo;
        let n = match polarity {
            Polarity::Benefit => (v - lo) / span,
            Polarity::Cost => (hi - v) / span,
        };
        // Rounding guard only; finite inputs inside the range already land in [0,1].
        n.clamp(0.0, 1.0)
    }
}

/// Normalized values: one row per eligible record, one column per criterion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedMatrix {
    pub ranges: Vec<CriterionRange>,
    pub rows: Vec<Vec<f64>>,
}

impl NormalizedMatrix {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    /// All values of column `j` in row order.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.get(j).copied()).collect()
    }
}

/// Normalize the eligible set column by column.
///
/// `eligible[i].values` must follow the order of `criteria` (which
/// `record::eligible_records` guarantees).
pub fn normalize(eligible: &[EligibleRecord<'_>], criteria: &CriteriaSet) -> NormalizedMatrix {
    if eligible.is_empty() {
        return NormalizedMatrix::default();
    }

    let ranges: Vec<CriterionRange> = (0..criteria.len())
        .filter_map(|j| CriterionRange::of(eligible.iter().map(|e| e.values[j])))
        .collect();

    let rows = eligible
        .iter()
        .map(|e| {
            criteria
                .iter()
                .zip(&ranges)
                .zip(&e.values)
                .map(|((c, range), &v)| range.normalize(v, c.polarity))
                .collect()
        })
        .collect();

    NormalizedMatrix { ranges, rows }
}
