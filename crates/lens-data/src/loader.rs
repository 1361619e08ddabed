//! Ledger CSV loading for market-lens.
//!
//! Reads the merged daily trading ledger and converts each row into a
//! [`LedgerRecord`] for the downstream aggregation passes. Rows are never
//! dropped here; classification filtering happens per-aggregator.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use lens_core::models::{LedgerRecord, Platform};
use lens_core::{LensError, Result};
use tracing::debug;

/// Header fields the ledger must declare.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "source",
    "category",
    "subcategory",
    "subsubcategory",
    "notional_volume_usd",
    "open_interest_usd",
    "timestamp",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the ledger at `path` into records, preserving file order.
///
/// Fails with [`LensError::FileRead`] when the file cannot be opened and
/// [`LensError::MissingColumn`] when the header lacks a required field.
/// Individual numeric cells never fail: empty or malformed text coerces
/// to 0.
pub fn load_records(path: &Path) -> Result<Vec<LedgerRecord>> {
    let file = File::open(path).map_err(|e| LensError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records: Vec<LedgerRecord> = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(map_row(&row, &columns));
    }

    debug!("Loaded {} records from {}", records.len(), path.display());

    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the required fields within the header row.
struct ColumnIndex {
    source: usize,
    category: usize,
    subcategory: usize,
    subsubcategory: usize,
    notional_volume_usd: usize,
    open_interest_usd: usize,
    timestamp: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LensError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            source: find("source")?,
            category: find("category")?,
            subcategory: find("subcategory")?,
            subsubcategory: find("subsubcategory")?,
            notional_volume_usd: find("notional_volume_usd")?,
            open_interest_usd: find("open_interest_usd")?,
            timestamp: find("timestamp")?,
        })
    }
}

/// Convert one CSV row into a [`LedgerRecord`].
fn map_row(row: &StringRecord, columns: &ColumnIndex) -> LedgerRecord {
    let cell = |idx: usize| row.get(idx).unwrap_or("");

    let timestamp = cell(columns.timestamp).to_string();

    LedgerRecord {
        source: Platform::from_source(cell(columns.source)),
        category: strip_quote_layer(cell(columns.category)).to_string(),
        subcategory: strip_quote_layer(cell(columns.subcategory)).to_string(),
        subsubcategory: strip_quote_layer(cell(columns.subsubcategory)).to_string(),
        notional_volume_usd: parse_amount(cell(columns.notional_volume_usd)),
        open_interest_usd: parse_amount(cell(columns.open_interest_usd)),
        date: slice_prefix(&timestamp, 10),
        month: slice_prefix(&timestamp, 7),
        timestamp,
    }
}

/// Parse a USD amount cell, coercing empty or malformed text to 0.
fn parse_amount(cell: &str) -> f64 {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(0.0)
}

/// Strip one surrounding layer of double quotes, if present.
fn strip_quote_layer(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// The first `len` bytes of `value`, or the whole string when shorter.
fn slice_prefix(value: &str, len: usize) -> String {
    value.get(..len).unwrap_or(value).to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
