// tests/config_load.rs
use saw_ranker::config::{SawConfig, ENV_CONFIG_PATH, ENV_ENFORCE_WEIGHT_SUM};
use saw_ranker::Polarity;
use std::{env, fs};

const CFG: &str = r#"
[ranking]
enforce_weight_sum = true
weight_sum_tolerance = 0.05
name_field = "package"

[[criteria]]
name = "security"
polarity = "benefit"
weight = 0.5

[[criteria]]
name = "bundle_kb"
polarity = "cost"
weight = 0.5
"#;

#[test]
fn loads_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("saw.toml");
    fs::write(&p, CFG).unwrap();

    let cfg = SawConfig::from_path(&p).unwrap();
    assert_eq!(cfg.ranking.name_field, "package");
    assert_eq!(cfg.ranking.weight_sum_tolerance, 0.05);
    assert_eq!(cfg.criteria[1].polarity, Polarity::Cost);

    let ranker = cfg.ranker().unwrap();
    assert_eq!(ranker.criteria().len(), 2);
    assert_eq!(ranker.default_weights().weight_of("bundle_kb"), Some(0.5));
    assert_eq!(ranker.policy().sum_tolerance, 0.05);
}

#[test]
fn bad_default_weights_fail_at_startup() {
    let broken = CFG.replace("weight = 0.5\n\n[[criteria]]", "weight = 0.1\n\n[[criteria]]");
    let cfg = SawConfig::from_toml_str(&broken).unwrap();
    let err = cfg.ranker().unwrap_err();
    assert!(format!("{err:#}").contains("weights must sum to 1.0"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("nope.toml");
    let err = SawConfig::from_path(&p).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}

#[serial_test::serial]
#[test]
fn env_path_then_default_location() {
    // Isolate CWD so the repo's own config/ does not leak in.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_ENFORCE_WEIGHT_SUM);

    // 1) nothing there → error
    assert!(SawConfig::from_toml().is_err());

    // 2) default config/saw.toml
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("saw.toml"), CFG).unwrap();
    let cfg = SawConfig::from_toml().unwrap();
    assert_eq!(cfg.criteria[0].name, "security");

    // 3) env path wins
    let other = tmp.path().join("other.toml");
    fs::write(&other, CFG.replace("security", "interop")).unwrap();
    env::set_var(ENV_CONFIG_PATH, other.display().to_string());
    let cfg = SawConfig::from_toml().unwrap();
    assert_eq!(cfg.criteria[0].name, "interop");
    env::remove_var(ENV_CONFIG_PATH);

    env::set_current_dir(&old).unwrap();
}

#[test]
fn shipped_config_matches_npm_preset() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/saw.toml");
    let content = fs::read_to_string(path).unwrap();
    let cfg = SawConfig::from_toml_str(&content).unwrap();
    assert_eq!(cfg, SawConfig::npm_packages());
}
