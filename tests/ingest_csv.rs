// tests/ingest_csv.rs
use saw_ranker::ingest::{load_csv, CsvSource, RecordSource};
use saw_ranker::{CriteriaSet, RawValue, SawConfig};
use std::fs;
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_packages.csv")
}

#[test]
fn sample_dataset_ranks_with_defaults() {
    let cfg = SawConfig::npm_packages();
    let ranker = cfg.ranker().unwrap();
    let source = CsvSource::new(sample_path(), ranker.criteria().clone(), "name");
    let records = source.load().unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(source.name(), "csv");

    // zod has no star count → dropped, never scored
    assert_eq!(records[5].values["github_stars"], RawValue::Missing);

    let out = ranker.rank(&records, None).unwrap();
    assert_eq!(out.len(), 5);
    assert!(out.iter().all(|r| r.name != "zod"));
    assert_eq!(out.last().map(|r| r.name.as_str()), Some("left-pad"));

    // raw, locale-formatted size comes back as a plain number
    let express = out.iter().find(|r| r.name == "express").unwrap();
    assert_eq!(express.value("package_size_kb"), Some(220.5));
    assert_eq!(express.attributes["license"], "MIT");

    for w in out.windows(2) {
        assert!(w[0].score >= w[1].score);
    }
}

#[test]
fn absent_criterion_column_drops_everything() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("pk.csv");
    fs::write(
        &p,
        "name,downloads_last_month,github_stars,package_size_kb\na,1,2,3\nb,4,5,6\n",
    )
    .unwrap();
    let criteria = CriteriaSet::npm_packages();
    let records = load_csv(&p, &criteria, "name").unwrap();
    assert_eq!(records.len(), 2);

    let ranker = SawConfig::npm_packages().ranker().unwrap();
    assert!(ranker.rank(&records, None).unwrap().is_empty());
}

#[test]
fn unreadable_file_is_an_error() {
    let criteria = CriteriaSet::npm_packages();
    let err = load_csv(&PathBuf::from("does/not/exist.csv"), &criteria, "name").unwrap_err();
    assert!(err.to_string().contains("exist.csv"));
}
