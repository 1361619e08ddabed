//! Daily volume matrix per (category, subcategory) pair.
//!
//! The column index is fixed once over the whole dataset so an animated
//! treemap can re-read the same ordering for every frame; rows are one per
//! calendar date, cells are rounded volumes with 0 for absent pairs.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use lens_core::calculations::round_usd;
use lens_core::models::{is_excluded_category, LedgerRecord};
use serde::Serialize;

/// Output file name for this dataset.
pub const FILE_NAME: &str = "timelapse.json";

/// Pairs below this total volume are dropped from the column index.
const MIN_PAIR_VOLUME: f64 = 100_000.0;

// ── Output shape ──────────────────────────────────────────────────────────────

/// One column of the matrix: a (category, subcategory) pair.
#[derive(Debug, Serialize)]
pub struct PairColumn {
    pub cat: String,
    pub sub: String,
}

/// The full time-lapse dataset in compact columnar form.
#[derive(Debug, Serialize)]
pub struct TimelapseDataset {
    /// Column index, descending by whole-dataset volume.
    pub subcategories: Vec<PairColumn>,
    /// Row index, ascending calendar dates.
    pub dates: Vec<String>,
    /// `dates.len()` rows of `subcategories.len()` rounded volumes.
    pub volumes: Vec<Vec<i64>>,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Build the time-lapse matrix over all non-excluded records.
pub fn build(records: &[LedgerRecord]) -> TimelapseDataset {
    let mut total_by_pair: BTreeMap<(String, String), f64> = BTreeMap::new();
    let mut daily: BTreeMap<String, BTreeMap<(String, String), f64>> = BTreeMap::new();

    for r in records {
        if is_excluded_category(&r.category) {
            continue;
        }
        let pair = (r.category.clone(), r.subcategory.clone());
        *total_by_pair.entry(pair.clone()).or_default() += r.notional_volume_usd;
        *daily
            .entry(r.date.clone())
            .or_default()
            .entry(pair)
            .or_default() += r.notional_volume_usd;
    }

    // Fixed column index: qualifying pairs, descending by total volume.
    let mut keys: Vec<(&(String, String), &f64)> = total_by_pair
        .iter()
        .filter(|(_, &total)| total >= MIN_PAIR_VOLUME)
        .collect();
    keys.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(Ordering::Equal));
    let keys: Vec<&(String, String)> = keys.into_iter().map(|(pair, _)| pair).collect();

    let dates: Vec<String> = daily.keys().cloned().collect();

    let volumes: Vec<Vec<i64>> = daily
        .values()
        .map(|day| {
            keys.iter()
                .map(|pair| round_usd(day.get(*pair).copied().unwrap_or(0.0)))
                .collect()
        })
        .collect();

    TimelapseDataset {
        subcategories: keys
            .into_iter()
            .map(|(cat, sub)| PairColumn {
                cat: cat.clone(),
                sub: sub.clone(),
            })
            .collect(),
        dates,
        volumes,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
