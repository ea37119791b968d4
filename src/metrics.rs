//! Ranking counters.
//!
//! Recording goes through the `metrics` facade and is a no-op until a
//! recorder is installed. `Metrics::init` installs the Prometheus recorder so
//! the exposition text can be rendered on demand.

use crate::error::ErrorKind;
use anyhow::Context;
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub const RANK_RUNS: &str = "saw_rank_runs_total";
pub const RANK_REJECTED: &str = "saw_rank_rejected_total";
pub const RECORDS_SCORED: &str = "saw_records_scored_total";
pub const RECORDS_DROPPED: &str = "saw_records_dropped_total";

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Fails if another recorder is
    /// already installed.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Prometheus exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// One-time descriptions so the series carry HELP text.
fn ensure_metrics_described() {
    static ONCE: OnceLock<()> = OnceLock::new();
    ONCE.get_or_init(|| {
        describe_counter!(RANK_RUNS, "Ranking runs started.");
        describe_counter!(RANK_REJECTED, "Ranking runs rejected by weight validation.");
        describe_counter!(RECORDS_SCORED, "Eligible records scored.");
        describe_counter!(
            RECORDS_DROPPED,
            "Records dropped for a missing or malformed criterion value."
        );
    });
}

pub(crate) fn record_run() {
    counter!(RANK_RUNS).increment(1);
}

pub(crate) fn record_rejected(kind: ErrorKind) {
    counter!(RANK_REJECTED, "kind" => kind.as_str()).increment(1);
}

pub(crate) fn record_records(scored: usize, dropped: usize) {
    counter!(RECORDS_SCORED).increment(scored as u64);
    counter!(RECORDS_DROPPED).increment(dropped as u64);
}
