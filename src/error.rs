//! Ranking errors.
//!
//! Validation failures abort a ranking run and are reported as a structured
//! `(kind, message)` pair. Data-quality problems (missing or malformed
//! criterion values) never show up here: those records are simply dropped
//! from the eligible set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// Weight vector length does not match the number of configured criteria.
    #[error("expected {expected} weights (one per criterion), got {actual}")]
    InvalidWeightCount { expected: usize, actual: usize },

    /// Weights do not add up to 1.0 within the configured tolerance.
    #[error("weights must sum to 1.0 (±{tolerance}), got {sum}")]
    InvalidWeightSum { sum: f64, tolerance: f64 },

    /// A single weight is not finite, or negative while negatives are rejected.
    #[error("weight for `{criterion}` must be a finite non-negative number, got {value}")]
    InvalidWeightValue { criterion: String, value: f64 },

    /// A named weight refers to a criterion that is not configured.
    #[error("unknown criterion `{0}`")]
    UnknownCriterion(String),

    /// The criteria list itself is unusable (empty, duplicate names, ...).
    #[error("invalid criteria configuration: {0}")]
    InvalidCriteria(String),
}

/// Machine-readable error kind, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidWeightCount,
    InvalidWeightSum,
    InvalidWeightValue,
    UnknownCriterion,
    InvalidCriteria,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidWeightCount => "InvalidWeightCount",
            ErrorKind::InvalidWeightSum => "InvalidWeightSum",
            ErrorKind::InvalidWeightValue => "InvalidWeightValue",
            ErrorKind::UnknownCriterion => "UnknownCriterion",
            ErrorKind::InvalidCriteria => "InvalidCriteria",
        }
    }
}

impl RankError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RankError::InvalidWeightCount { .. } => ErrorKind::InvalidWeightCount,
            RankError::InvalidWeightSum { .. } => ErrorKind::InvalidWeightSum,
            RankError::InvalidWeightValue { .. } => ErrorKind::InvalidWeightValue,
            RankError::UnknownCriterion(_) => ErrorKind::UnknownCriterion,
            RankError::InvalidCriteria(_) => ErrorKind::InvalidCriteria,
        }
    }

    /// Structured form handed across the boundary.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// `{ "kind": "...", "message": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<RankError> for ErrorBody {
    fn from(e: RankError) -> Self {
        e.to_body()
    }
}
