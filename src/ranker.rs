//! # Ranker
//! Validates a weight vector, scores every eligible record as the weighted sum
//! of its normalized values and orders the result by descending score.
//!
//! Order of work for one run:
//! 1) weight validation (fail fast, nothing is computed on error)
//! 2) eligibility filter (records with a missing/malformed criterion are dropped)
//! 3) min-max normalization over the eligible set
//! 4) weighted sum + stable sort (equal scores keep input order)
//!
//! The ranker holds no mutable state; concurrent calls are independent.

use crate::criteria::CriteriaSet;
use crate::error::{ErrorBody, RankError};
use crate::metrics;
use crate::normalize::normalize;
use crate::record::{eligible_records, RawRecord};
use crate::weights::{WeightPolicy, WeightSet};
use rayon::prelude::*;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// A record with its aggregate score. Values are the raw criterion values in
/// configured order; normalized values are not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub name: String,
    pub score: f64,
    pub values: Vec<(String, f64)>,
    pub attributes: BTreeMap<String, String>,
}

impl ScoredRecord {
    pub fn value(&self, criterion: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == criterion)
            .map(|(_, v)| *v)
    }
}

// Flat JSON object: name, score, one key per criterion, then attributes.
impl Serialize for ScoredRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(!self.attributes.is_empty());
        let mut map = serializer.serialize_map(Some(2 + self.values.len() + extra))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("score", &self.score)?;
        for (k, v) in &self.values {
            map.serialize_entry(k, v)?;
        }
        if !self.attributes.is_empty() {
            map.serialize_entry("attributes", &self.attributes)?;
        }
        map.end()
    }
}

/// Incoming request; `weights` falls back to the ranker's default vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

impl RankRequest {
    pub fn with_weights(weights: Vec<f64>) -> Self {
        Self {
            weights: Some(weights),
        }
    }
}

/// Result handed back across the boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankOutcome {
    Results(Vec<ScoredRecord>),
    Error(ErrorBody),
}

impl RankOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, RankOutcome::Error(_))
    }
}

impl From<Result<Vec<ScoredRecord>, RankError>> for RankOutcome {
    fn from(r: Result<Vec<ScoredRecord>, RankError>) -> Self {
        match r {
            Ok(v) => RankOutcome::Results(v),
            Err(e) => RankOutcome::Error(e.to_body()),
        }
    }
}

fn reject(e: RankError) -> RankError {
    warn!(target: "saw", error = %e, "weights rejected");
    metrics::record_rejected(e.kind());
    e
}

#[derive(Debug, Clone)]
pub struct Ranker {
    criteria: CriteriaSet,
    defaults: WeightSet,
    policy: WeightPolicy,
}

impl Ranker {
    /// Build a ranker; the default weights are validated here so a broken
    /// deployment config is caught before the first request.
    pub fn new(
        criteria: CriteriaSet,
        default_weights: &[f64],
        policy: WeightPolicy,
    ) -> Result<Self, RankError> {
        let defaults = WeightSet::pair(&criteria, default_weights, &policy)?;
        Ok(Self {
            criteria,
            defaults,
            policy,
        })
    }

    pub fn criteria(&self) -> &CriteriaSet {
        &self.criteria
    }

    pub fn policy(&self) -> &WeightPolicy {
        &self.policy
    }

    pub fn default_weights(&self) -> &WeightSet {
        &self.defaults
    }

    /// Resolve the weights for one run.
    pub fn weight_set(&self, weights: Option<&[f64]>) -> Result<WeightSet, RankError> {
        match weights {
            Some(w) => WeightSet::pair(&self.criteria, w, &self.policy),
            None => Ok(self.defaults.clone()),
        }
    }

    /// Rank `records` with the given weights (or the defaults).
    pub fn rank(
        &self,
        records: &[RawRecord],
        weights: Option<&[f64]>,
    ) -> Result<Vec<ScoredRecord>, RankError> {
        metrics::record_run();
        let weights = self.weight_set(weights).map_err(reject)?;
        self.rank_with(records, &weights)
    }

    /// Rank with an already validated weight set. The set must have been built
    /// for this ranker's criteria (same names, polarity and order).
    pub fn rank_with(
        &self,
        records: &[RawRecord],
        weights: &WeightSet,
    ) -> Result<Vec<ScoredRecord>, RankError> {
        if !weights.matches(&self.criteria) {
            return Err(reject(RankError::InvalidCriteria(
                "weight set was built for a different criteria list".into(),
            )));
        }

        let (eligible, dropped) = eligible_records(records, &self.criteria);
        let matrix = normalize(&eligible, &self.criteria);

        let mut scored: Vec<ScoredRecord> = eligible
            .iter()
            .zip(&matrix.rows)
            .map(|(e, row)| ScoredRecord {
                name: e.record.name.clone(),
                // `+ 0.0` folds -0.0 into 0.0 so both tie under total_cmp.
                score: weights.score(row) + 0.0,
                values: self
                    .criteria
                    .names()
                    .map(str::to_string)
                    .zip(e.values.iter().copied())
                    .collect(),
                attributes: e.record.attributes.clone(),
            })
            .collect();

        // sort_by is stable: ties keep eligible (= input) order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        metrics::record_records(scored.len(), dropped);
        info!(
            target: "saw",
            criteria = self.criteria.len(),
            eligible = scored.len(),
            dropped,
            "ranking complete"
        );
        Ok(scored)
    }

    /// Request/response form of [`Ranker::rank`].
    pub fn handle(&self, records: &[RawRecord], request: &RankRequest) -> RankOutcome {
        self.rank(records, request.weights.as_deref()).into()
    }

    /// Run independent requests over the same records in parallel.
    /// Output order matches `requests`.
    pub fn rank_batch(&self, records: &[RawRecord], requests: &[RankRequest]) -> Vec<RankOutcome> {
        requests
            .par_iter()
            .map(|req| self.handle(records, req))
            .collect()
    }
}
