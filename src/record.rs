//! # Records
//! Raw package records as handed over by a loader, and the eligibility filter
//! that runs before normalization.
//!
//! A record is eligible only if every configured criterion resolves to a
//! finite number. Anything else (absent field, empty cell, text that does
//! not parse) drops the whole record; it is never partially scored.

use crate::criteria::CriteriaSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A single raw field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Missing,
}

impl RawValue {
    /// Finite numeric view of the value, `None` when missing or malformed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(v) if v.is_finite() => Some(*v),
            RawValue::Number(_) => None,
            RawValue::Text(s) => parse_numeric(s),
            RawValue::Missing => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// Parse a numeric field, accepting a comma as decimal separator ("12,5").
///
/// Empty text, unparseable text and non-finite results all yield `None`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.replace(',', ".");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One package's raw data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Display name.
    pub name: String,
    /// Criterion name → raw value. May hold fields that are not criteria.
    #[serde(default)]
    pub values: HashMap<String, RawValue>,
    /// Descriptive fields passed through unmodified.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style setter for a criterion value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A record that passed the eligibility filter.
#[derive(Debug, Clone)]
pub struct EligibleRecord<'a> {
    /// Position in the input sequence.
    pub index: usize,
    pub record: &'a RawRecord,
    /// Numeric values in configured criteria order.
    pub values: Vec<f64>,
}

/// Why a record was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligible {
    Missing(String),
    Malformed(String),
}

/// Resolve every configured criterion of `record` to a number.
pub fn check_record(record: &RawRecord, criteria: &CriteriaSet) -> Result<Vec<f64>, Ineligible> {
    criteria
        .iter()
        .map(|c| match record.values.get(&c.name) {
            None | Some(RawValue::Missing) => Err(Ineligible::Missing(c.name.clone())),
            Some(v) => v
                .as_number()
                .ok_or_else(|| Ineligible::Malformed(c.name.clone())),
        })
        .collect()
}

/// Filter `records` down to the eligible set, keeping input order.
///
/// Returns the eligible records and the number dropped.
pub fn eligible_records<'a>(
    records: &'a [RawRecord],
    criteria: &CriteriaSet,
) -> (Vec<EligibleRecord<'a>>, usize) {
    let mut out = Vec::with_capacity(records.len());
    let mut dropped = 0usize;
    for (index, record) in records.iter().enumerate() {
        match check_record(record, criteria) {
            Ok(values) => out.push(EligibleRecord {
                index,
                record,
                values,
            }),
            Err(reason) => {
                dropped += 1;
                debug!(target: "saw", name = %record.name, index, ?reason, "record dropped");
            }
        }
    }
    (out, dropped)
}
