// tests/rank_metrics.rs
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use saw_ranker::metrics::{RANK_REJECTED, RANK_RUNS, RECORDS_DROPPED, RECORDS_SCORED};
use saw_ranker::{CriteriaSet, RawRecord, Ranker, WeightPolicy};

fn counter_value(
    snapshot: &[(
        metrics_util::CompositeKey,
        Option<metrics::Unit>,
        Option<metrics::SharedString>,
        DebugValue,
    )],
    name: &str,
) -> u64 {
    snapshot
        .iter()
        .filter(|(k, _, _, _)| k.key().name() == name)
        .map(|(_, _, _, v)| match v {
            DebugValue::Counter(c) => *c,
            _ => 0,
        })
        .sum()
}

#[test]
fn counters_track_runs_drops_and_rejections() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let ranker = Ranker::new(
            CriteriaSet::npm_packages(),
            &[0.3, 0.3, 0.2, 0.2],
            WeightPolicy::default(),
        )
        .unwrap();
        let records = vec![
            RawRecord::new("a")
                .with("downloads_last_month", 1.0)
                .with("github_stars", 1.0)
                .with("package_size_kb", 1.0)
                .with("days_since_publish", 1.0),
            RawRecord::new("b").with("downloads_last_month", 2.0),
        ];
        ranker.rank(&records, None).unwrap();
        assert!(ranker.rank(&records, Some(&[1.0])).is_err());
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_value(&snapshot, RANK_RUNS), 2);
    assert_eq!(counter_value(&snapshot, RANK_REJECTED), 1);
    assert_eq!(counter_value(&snapshot, RECORDS_SCORED), 1);
    assert_eq!(counter_value(&snapshot, RECORDS_DROPPED), 1);

    let rejected = snapshot
        .iter()
        .find(|(k, _, _, _)| k.key().name() == RANK_REJECTED)
        .unwrap();
    let labels: Vec<_> = rejected.0.key().labels().map(|l| (l.key(), l.value())).collect();
    assert_eq!(labels, vec![("kind", "InvalidWeightCount")]);
}
