//! Weight vectors and their validation policy.
//!
//! Weights travel as plain vectors at the boundary (`{"weights": [0.3, ...]}`)
//! but are bound to their criterion by name as soon as they are validated,
//! so `weight[i]` can never drift away from criterion `i`.
//!
//! JSON weights file shape, either:
//! ```json
//! [0.3, 0.3, 0.2, 0.2]
//! ```
//! or
//! ```json
//! { "weights": [0.3, 0.3, 0.2, 0.2] }
//! ```

use crate::criteria::{CriteriaSet, Criterion};
use crate::error::RankError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};

pub const DEFAULT_SUM_TOLERANCE: f64 = 0.01;
const SUM_EPSILON: f64 = 1e-9;

/// How strictly a weight vector is checked before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPolicy {
    /// Require `|sum - 1.0| <= sum_tolerance`.
    pub enforce_sum: bool,
    pub sum_tolerance: f64,
    /// Reject weights below zero.
    pub reject_negative: bool,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            enforce_sum: true,
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
            reject_negative: true,
        }
    }
}

impl WeightPolicy {
    /// Count check only: any sum, negative weights allowed.
    pub fn lenient() -> Self {
        Self {
            enforce_sum: false,
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
            reject_negative: false,
        }
    }
}

/// A criterion bound to its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedCriterion {
    pub criterion: Criterion,
    pub weight: f64,
}

/// Validated weights, one per criterion, in configured order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSet {
    entries: Vec<WeightedCriterion>,
}

impl WeightSet {
    /// Bind a positional vector to `criteria` and validate it under `policy`.
    ///
    /// Checks run in order: count, individual values, sum.
    pub fn pair(
        criteria: &CriteriaSet,
        weights: &[f64],
        policy: &WeightPolicy,
    ) -> Result<Self, RankError> {
        if weights.len() != criteria.len() {
            return Err(RankError::InvalidWeightCount {
                expected: criteria.len(),
                actual: weights.len(),
            });
        }

        let entries = criteria
            .iter()
            .zip(weights)
            .map(|(c, &w)| {
                if !w.is_finite() || (policy.reject_negative && w < 0.0) {
                    return Err(RankError::InvalidWeightValue {
                        criterion: c.name.clone(),
                        value: w,
                    });
                }
                Ok(WeightedCriterion {
                    criterion: c.clone(),
                    weight: w,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let set = Self { entries };
        if policy.enforce_sum {
            let sum = set.sum();
            // Small slack so a sum exactly on the boundary (e.g. 1.01) is not
            // lost to rounding.
            if (sum - 1.0).abs() > policy.sum_tolerance + SUM_EPSILON {
                return Err(RankError::InvalidWeightSum {
                    sum,
                    tolerance: policy.sum_tolerance,
                });
            }
        }
        Ok(set)
    }

    /// Bind weights given by criterion name.
    pub fn from_named(
        criteria: &CriteriaSet,
        named: &HashMap<String, f64>,
        policy: &WeightPolicy,
    ) -> Result<Self, RankError> {
        if let Some(unknown) = named.keys().find(|k| criteria.position(k).is_none()) {
            return Err(RankError::UnknownCriterion(unknown.clone()));
        }
        let ordered: Vec<f64> = criteria
            .iter()
            .filter_map(|c| named.get(&c.name).copied())
            .collect();
        Self::pair(criteria, &ordered, policy)
    }

    /// True when this set was built for exactly `criteria` (names, polarity, order).
    pub fn matches(&self, criteria: &CriteriaSet) -> bool {
        self.entries.iter().map(|e| &e.criterion).eq(criteria.iter())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightedCriterion> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Weight for a criterion by name.
    pub fn weight_of(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.criterion.name == name)
            .map(|e| e.weight)
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.weight).collect()
    }

    /// `Σ weight_i * normalized_i` over a normalized row in the same order.
    pub fn score(&self, normalized: &[f64]) -> f64 {
        self.entries
            .iter()
            .zip(normalized)
            .map(|(e, n)| e.weight * n)
            .sum()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeightsFile {
    Bare(Vec<f64>),
    Wrapped { weights: Vec<f64> },
}

/// Load a weight vector from a JSON file (no validation; that happens at rank time).
pub fn load_weights_file(path: &Path) -> anyhow::Result<Vec<f64>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading weights from {}", path.display()))?;
    parse_weights_json(&content).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_weights_json(s: &str) -> anyhow::Result<Vec<f64>> {
    let w: WeightsFile = serde_json::from_str(s)?;
    Ok(match w {
        WeightsFile::Bare(v) | WeightsFile::Wrapped { weights: v } => v,
    })
}

/// Parse a comma separated list such as `0.3,0.3,0.2,0.2`.
pub fn parse_weights_list(s: &str) -> anyhow::Result<Vec<f64>> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<f64>()
                .with_context(|| format!("`{p}` is not a number"))
        })
        .collect()
}
