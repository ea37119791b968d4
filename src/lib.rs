// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod criteria;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod normalize;
pub mod ranker;
pub mod record;
pub mod weights;

// ---- Re-exports for stable public API ----
pub use crate::config::SawConfig;
pub use crate::criteria::{CriteriaSet, Criterion, Polarity};
pub use crate::error::{ErrorBody, ErrorKind, RankError};
pub use crate::ranker::{RankOutcome, RankRequest, Ranker, ScoredRecord};
pub use crate::record::{RawRecord, RawValue};
pub use crate::weights::{WeightPolicy, WeightSet};

/// One-shot ranking without keeping a `Ranker` around.
///
/// ```
/// use saw_ranker::{rank, CriteriaSet, Criterion, RawRecord, WeightPolicy};
///
/// let criteria = CriteriaSet::new(vec![
///     Criterion::benefit("downloads"),
///     Criterion::cost("age_days"),
/// ])
/// .unwrap();
/// let records = vec![
///     RawRecord::new("A").with("downloads", 100.0).with("age_days", 10.0),
///     RawRecord::new("B").with("downloads", 50.0).with("age_days", 5.0),
/// ];
/// let ranked = rank(&records, criteria, &[0.5, 0.5], WeightPolicy::default()).unwrap();
/// assert_eq!(ranked[0].name, "A");
/// assert_eq!(ranked[0].score, 0.5);
/// ```
pub fn rank(
    records: &[RawRecord],
    criteria: CriteriaSet,
    weights: &[f64],
    policy: WeightPolicy,
) -> Result<Vec<ScoredRecord>, RankError> {
    Ranker::new(criteria, weights, policy)?.rank(records, None)
}
