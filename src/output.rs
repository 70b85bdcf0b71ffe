//! Output formatting and persistence for dashboard views.
//!
//! Supports logging JSON, JSON files (optionally gzip-compressed), and CSV
//! export of rankings.

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::engine::ranking::Ranked;

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `value` as pretty JSON to `path`, gzip-compressed when `gzip` is set.
///
/// Parent directories are created as needed and an existing file is replaced.
pub fn write_json<T: Serialize>(path: &str, value: &T, gzip: bool) -> Result<()> {
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("cannot create {path}"))?;
    debug!(path, gzip, "Writing JSON output");

    if gzip {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        serde_json::to_writer_pretty(&mut encoder, value)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }

    Ok(())
}

/// One flat CSV line of a ranking.
#[derive(Debug, Serialize)]
pub struct RankingRow {
    pub position: usize,
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub total_distance: f64,
    pub total_loaded_distance: f64,
    pub standard_deviation: f64,
    pub coefficient_of_variation: f64,
}

/// Flattens ranked entries, numbering positions from 1.
pub fn ranking_rows<'a, T, I>(ranked: I) -> Vec<RankingRow>
where
    T: Ranked + 'a,
    I: IntoIterator<Item = &'a T>,
{
    ranked
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let stats = item.stats();
            RankingRow {
                position: i + 1,
                name: item.label(),
                count: stats.count,
                mean: stats.mean,
                total_distance: stats.total_distance,
                total_loaded_distance: stats.total_loaded_distance,
                standard_deviation: stats.standard_deviation,
                coefficient_of_variation: stats.coefficient_of_variation,
            }
        })
        .collect()
}

/// Writes ranking rows to a CSV file with a header, replacing any existing file.
pub fn write_ranking_csv(path: &str, rows: &[RankingRow]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing ranking CSV");

    let mut writer = csv::Writer::from_path(path).with_context(|| format!("cannot create {path}"))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
