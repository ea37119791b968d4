// src/ingest/csv_source.rs
//! CSV loader.
//!
//! - header row required
//! - `name_field` column → display name
//! - configured criteria columns → raw text values (empty cell = missing)
//! - every other column → pass-through attribute
//!
//! Values are kept as text here; numeric parsing (including "12,5") happens
//! in the eligibility check so a bad cell only drops its own record.

use super::RecordSource;
use crate::criteria::CriteriaSet;
use crate::record::{RawRecord, RawValue};
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct CsvSource {
    pub path: PathBuf,
    pub criteria: CriteriaSet,
    pub name_field: String,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, criteria: CriteriaSet, name_field: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            criteria,
            name_field: name_field.into(),
        }
    }
}

impl RecordSource for CsvSource {
    fn load(&self) -> Result<Vec<RawRecord>> {
        load_csv(&self.path, &self.criteria, &self.name_field)
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

/// Load records from a CSV file.
pub fn load_csv(path: &Path, criteria: &CriteriaSet, name_field: &str) -> Result<Vec<RawRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_csv(file, criteria, name_field).with_context(|| format!("reading {}", path.display()))
}

/// Read records from any CSV byte stream.
pub fn read_csv<R: io::Read>(
    reader: R,
    criteria: &CriteriaSet,
    name_field: &str,
) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let name_idx = headers
        .iter()
        .position(|h| h == name_field)
        .ok_or_else(|| anyhow!("CSV has no `{name_field}` column"))?;

    for missing in criteria.names().filter(|n| !headers.iter().any(|h| h == *n)) {
        warn!(target: "saw", criterion = missing, "criterion column absent; every record will be dropped");
    }

    let mut out = Vec::new();
    for (line, row) in rdr.records().enumerate() {
        let row = row.with_context(|| format!("CSV row {}", line + 1))?;
        let mut rec = RawRecord::new(row.get(name_idx).unwrap_or_default());
        for (idx, (header, cell)) in headers.iter().zip(row.iter()).enumerate() {
            if idx == name_idx {
                continue;
            }
            if criteria.position(header).is_some() {
                let value = if cell.is_empty() {
                    RawValue::Missing
                } else {
                    RawValue::Text(cell.to_string())
                };
                rec.values.insert(header.to_string(), value);
            } else {
                rec.attributes.insert(header.to_string(), cell.to_string());
            }
        }
        out.push(rec);
    }
    Ok(out)
}
