//! Parsers for fleet data sources: a JSON array of records, or a spreadsheet
//! CSV export.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::record::FleetRecord;

/// Shape of a raw data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

fn trim_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

impl SourceFormat {
    /// JSON when the first non-blank byte opens an array or object, CSV otherwise.
    pub fn detect(bytes: &[u8]) -> Self {
        match trim_bom(bytes).iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'[') | Some(b'{') => SourceFormat::Json,
            _ => SourceFormat::Csv,
        }
    }
}

/// Parses `bytes` in whichever format they look like.
///
/// # Errors
///
/// Returns an error if the input is not a sequence of records: JSON that is
/// not an array, or unreadable CSV.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<FleetRecord>> {
    match SourceFormat::detect(bytes) {
        SourceFormat::Json => parse_json(bytes),
        SourceFormat::Csv => parse_csv(bytes),
    }
}

/// Parses a JSON array of record objects. Array elements that are not objects
/// are skipped with a warning.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<FleetRecord>> {
    let value: Value =
        serde_json::from_slice(trim_bom(bytes)).context("fleet data is not valid JSON")?;

    let Value::Array(items) = value else {
        bail!("fleet data must be a JSON array of records");
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Object(map) => records.push(FleetRecord::from_map(map)),
            _ => warn!(index, "Skipping fleet entry that is not an object"),
        }
    }

    debug!(records = records.len(), "Parsed JSON fleet data");
    Ok(records)
}

/// Parses a CSV export with a header row. `;` is used as the delimiter when
/// the header has semicolons and no commas.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<FleetRecord>> {
    let bytes = trim_bom(bytes);
    let header = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    let delimiter = if header.contains(&b';') && !header.contains(&b',') {
        b';'
    } else {
        b','
    };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let row: HashMap<String, String> = result.context("failed to read CSV row")?;
        // cells go through JSON strings so that numeric-looking ids keep their text
        let row: serde_json::Map<String, Value> = row
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        records.push(FleetRecord::from_map(&row));
    }

    debug!(records = records.len(), delimiter = %(delimiter as char), "Parsed CSV fleet data");
    Ok(records)
}
