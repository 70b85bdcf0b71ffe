//! HTTP retrieval of remote fleet data (published spreadsheet CSV exports).

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// True when `source` is an `http://` or `https://` URL rather than a local path.
pub fn is_remote(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Performs a GET for `url` and returns the body.
///
/// # Errors
///
/// Fails on an invalid URL, a transport error, or a non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid URL: {url}"))?,
    );

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?.to_vec();
    debug!(url, bytes = bytes.len(), "Fetched remote fleet data");
    Ok(bytes)
}
