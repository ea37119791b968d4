// src/config.rs
//! Deployment configuration (TOML).
//!
//! ```toml
//! [ranking]
//! enforce_weight_sum = true
//! weight_sum_tolerance = 0.01
//! reject_negative_weights = true
//! name_field = "name"
//!
//! [[criteria]]
//! name = "downloads_last_month"
//! polarity = "benefit"
//! weight = 0.3
//! ```
//!
//! Each criterion carries its own default weight, so the default vector can
//! never be out of step with the criteria list.

use crate::criteria::{CriteriaSet, Criterion, Polarity};
use crate::ranker::Ranker;
use crate::weights::{WeightPolicy, DEFAULT_SUM_TOLERANCE};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/saw.toml";
pub const ENV_CONFIG_PATH: &str = "SAW_CONFIG_PATH";
pub const ENV_ENFORCE_WEIGHT_SUM: &str = "SAW_ENFORCE_WEIGHT_SUM";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SawConfig {
    #[serde(default)]
    pub ranking: RankingSection,
    pub criteria: Vec<CriterionCfg>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankingSection {
    #[serde(default = "default_true")]
    pub enforce_weight_sum: bool,
    #[serde(default = "default_tolerance")]
    pub weight_sum_tolerance: f64,
    #[serde(default = "default_true")]
    pub reject_negative_weights: bool,
    /// CSV column holding the display name.
    #[serde(default = "default_name_field")]
    pub name_field: String,
}

impl Default for RankingSection {
    fn default() -> Self {
        Self {
            enforce_weight_sum: true,
            weight_sum_tolerance: DEFAULT_SUM_TOLERANCE,
            reject_negative_weights: true,
            name_field: default_name_field(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tolerance() -> f64 {
    DEFAULT_SUM_TOLERANCE
}

fn default_name_field() -> String {
    "name".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CriterionCfg {
    pub name: String,
    pub polarity: Polarity,
    pub weight: f64,
}

impl SawConfig {
    /// Load using `SAW_CONFIG_PATH` or `config/saw.toml`, then apply env overrides.
    pub fn from_toml() -> Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::from_path(&path)
    }

    /// Load an explicit file, then apply env overrides.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading SAW config from {}", path.display()))?;
        let mut cfg = Self::from_toml_str(&content)
            .with_context(|| format!("parsing SAW config {}", path.display()))?;
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: SawConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        let tol = self.ranking.weight_sum_tolerance;
        if !tol.is_finite() || tol < 0.0 {
            return Err(anyhow!("weight_sum_tolerance must be a finite number >= 0"));
        }
        if self.ranking.name_field.trim().is_empty() {
            return Err(anyhow!("name_field must not be empty"));
        }
        self.criteria_set()?;
        Ok(())
    }

    /// `SAW_ENFORCE_WEIGHT_SUM` overrides the TOML switch.
    pub fn apply_env(&mut self) {
        if let Some(on) = parse_bool_env(std::env::var(ENV_ENFORCE_WEIGHT_SUM).ok()) {
            self.ranking.enforce_weight_sum = on;
        }
    }

    pub fn criteria_set(&self) -> Result<CriteriaSet> {
        let items = self
            .criteria
            .iter()
            .map(|c| Criterion {
                name: c.name.trim().to_string(),
                polarity: c.polarity,
            })
            .collect();
        Ok(CriteriaSet::new(items)?)
    }

    pub fn default_weights(&self) -> Vec<f64> {
        self.criteria.iter().map(|c| c.weight).collect()
    }

    pub fn policy(&self) -> WeightPolicy {
        WeightPolicy {
            enforce_sum: self.ranking.enforce_weight_sum,
            sum_tolerance: self.ranking.weight_sum_tolerance,
            reject_negative: self.ranking.reject_negative_weights,
        }
    }

    /// Build the ranker; fails if the default weights break the policy.
    pub fn ranker(&self) -> Result<Ranker> {
        let ranker = Ranker::new(self.criteria_set()?, &self.default_weights(), self.policy())
            .context("default weights in config")?;
        Ok(ranker)
    }

    /// npm package dataset preset, default weights `[0.3, 0.3, 0.2, 0.2]`.
    pub fn npm_packages() -> Self {
        Self::preset(CriteriaSet::npm_packages(), &[0.3, 0.3, 0.2, 0.2])
    }

    /// Library quality preset (security, interop, efficiency, docs, popularity).
    pub fn library_quality() -> Self {
        Self::preset(CriteriaSet::library_quality(), &[0.3, 0.2, 0.2, 0.15, 0.15])
    }

    fn preset(set: CriteriaSet, weights: &[f64]) -> Self {
        Self {
            ranking: RankingSection::default(),
            criteria: set
                .iter()
                .zip(weights)
                .map(|(c, &weight)| CriterionCfg {
                    name: c.name.clone(),
                    polarity: c.polarity,
                    weight,
                })
                .collect(),
        }
    }
}

// "1"/"true"/"on"/"yes" and "0"/"false"/"off"/"no"; anything else is ignored.
fn parse_bool_env(raw: Option<String>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
[ranking]
enforce_weight_sum = false

[[criteria]]
name = "downloads"
polarity = "benefit"
weight = 0.6

[[criteria]]
name = "age_days"
polarity = "cost"
weight = 0.4
"#;

    #[test]
    fn parses_criteria_in_order_with_defaults() {
        let cfg = SawConfig::from_toml_str(TOML).unwrap();
        assert!(!cfg.ranking.enforce_weight_sum);
        assert!(cfg.ranking.reject_negative_weights);
        assert_eq!(cfg.ranking.weight_sum_tolerance, DEFAULT_SUM_TOLERANCE);
        assert_eq!(cfg.ranking.name_field, "name");
        assert_eq!(cfg.default_weights(), vec![0.6, 0.4]);
        let set = cfg.criteria_set().unwrap();
        assert_eq!(set.as_slice()[1], Criterion::cost("age_days"));
    }

    #[test]
    fn rejects_bad_polarity_and_duplicates() {
        let bad = TOML.replace("\"cost\"", "\"sideways\"");
        assert!(SawConfig::from_toml_str(&bad).is_err());
        let dup = TOML.replace("age_days", "downloads");
        assert!(SawConfig::from_toml_str(&dup).is_err());
        assert!(SawConfig::from_toml_str("criteria = []").is_err());
    }

    #[test]
    fn rejects_negative_tolerance() {
        let bad = TOML.replace(
            "enforce_weight_sum = false",
            "enforce_weight_sum = false\nweight_sum_tolerance = -1.0",
        );
        assert!(SawConfig::from_toml_str(&bad).is_err());
    }

    #[test]
    fn presets_build_rankers() {
        let npm = SawConfig::npm_packages();
        assert_eq!(npm.default_weights(), vec![0.3, 0.3, 0.2, 0.2]);
        assert_eq!(npm.criteria[3].polarity, Polarity::Cost);
        assert!(npm.ranker().is_ok());
        assert!(SawConfig::library_quality().ranker().is_ok());
    }

    #[test]
    fn bool_env_parsing() {
        assert_eq!(parse_bool_env(Some("1".into())), Some(true));
        assert_eq!(parse_bool_env(Some(" OFF ".into())), Some(false));
        assert_eq!(parse_bool_env(Some("maybe".into())), None);
        assert_eq!(parse_bool_env(None), None);
    }
}
