//! # Criteria
//!
//! A criterion is a named numeric attribute of a package together with its
//! polarity: `benefit` (higher raw value is better) or `cost` (lower is
//! better). Polarity is fixed per deployment, never per record.
//!
//! `CriteriaSet` keeps the configured order; every other component (weights,
//! normalized columns, output values) follows that order.

use crate::error::RankError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Benefit,
    Cost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub polarity: Polarity,
}

impl Criterion {
    pub fn benefit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            polarity: Polarity::Benefit,
        }
    }

    pub fn cost(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            polarity: Polarity::Cost,
        }
    }
}

/// Ordered, non-empty list of uniquely named criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaSet {
    items: Vec<Criterion>,
}

impl CriteriaSet {
    pub fn new(items: Vec<Criterion>) -> Result<Self, RankError> {
        if items.is_empty() {
            return Err(RankError::InvalidCriteria(
                "at least one criterion is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for c in &items {
            let name = c.name.trim();
            if name.is_empty() {
                return Err(RankError::InvalidCriteria(
                    "criterion name must not be empty".into(),
                ));
            }
            if !seen.insert(name) {
                return Err(RankError::InvalidCriteria(format!(
                    "duplicate criterion `{name}`"
                )));
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Criterion] {
        &self.items
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|c| c.name.as_str())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|c| c.name == name)
    }

    /// npm package dataset: three benefit criteria, age in days as cost.
    pub fn npm_packages() -> Self {
        Self {
            items: vec![
                Criterion::benefit("downloads_last_month"),
                Criterion::benefit("github_stars"),
                Criterion::benefit("package_size_kb"),
                Criterion::cost("days_since_publish"),
            ],
        }
    }

    /// Library quality survey: five scored dimensions, all benefit.
    pub fn library_quality() -> Self {
        Self {
            items: vec![
                Criterion::benefit("security"),
                Criterion::benefit("interop"),
                Criterion::benefit("efficiency"),
                Criterion::benefit("docs"),
                Criterion::benefit("popularity"),
            ],
        }
    }
}

impl<'a> IntoIterator for &'a CriteriaSet {
    type Item = &'a Criterion;
    type IntoIter = std::slice::Iter<'a, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_duplicates() {
        assert!(matches!(
            CriteriaSet::new(vec![]),
            Err(RankError::InvalidCriteria(_))
        ));
        let dup = CriteriaSet::new(vec![Criterion::benefit("a"), Criterion::cost("a")]);
        assert!(matches!(dup, Err(RankError::InvalidCriteria(m)) if m.contains("`a`")));
        let blank = CriteriaSet::new(vec![Criterion::benefit("  ")]);
        assert!(blank.is_err());
    }

    #[test]
    fn keeps_configured_order() {
        let set = CriteriaSet::npm_packages();
        let names: Vec<_> = set.names().collect();
        assert_eq!(
            names,
            [
                "downloads_last_month",
                "github_stars",
                "package_size_kb",
                "days_since_publish"
            ]
        );
        assert_eq!(set.position("days_since_publish"), Some(3));
        assert_eq!(set.as_slice()[3].polarity, Polarity::Cost);
    }

    #[test]
    fn polarity_uses_snake_case() {
        let c: Criterion = serde_json::from_str(r#"{"name":"age","polarity":"cost"}"#).unwrap();
        assert_eq!(c, Criterion::cost("age"));
    }
}
