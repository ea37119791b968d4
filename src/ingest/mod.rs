// src/ingest/mod.rs
//! Record sources. The ranking core never parses files itself; a source
//! hands it an ordered `Vec<RawRecord>`.

pub mod csv_source;

use crate::record::RawRecord;
use anyhow::Result;

pub use csv_source::{load_csv, read_csv, CsvSource};

pub trait RecordSource {
    /// Load all records in source order.
    fn load(&self) -> Result<Vec<RawRecord>>;
    fn name(&self) -> &'static str;
}
