//! Cross-platform volume ratios at (category, subcategory) level.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use lens_core::calculations::{round1, round_usd};
use lens_core::models::{is_excluded_category, LedgerRecord, PlatformTotals};
use serde::Serialize;

/// Output file name for this dataset.
pub const FILE_NAME: &str = "arbitrage.json";

/// Pairs below this combined volume are dropped.
const MIN_PAIR_VOLUME: f64 = 10_000.0;

/// Sort sentinel for single-platform pairs; ranks them above any real ratio.
const ONLY_SORT_VALUE: f64 = 999_999.0;

// ── Output shape ──────────────────────────────────────────────────────────────

/// Volume comparison for one (category, subcategory) pair.
#[derive(Debug, Serialize)]
pub struct MarketRatio {
    pub category: String,
    pub subcategory: String,
    pub kalshi: i64,
    pub polymarket: i64,
    pub total: i64,
    /// Larger-over-smaller volume ratio; `null` when one side is absent.
    pub ratio: Option<f64>,
    /// Platform with greater volume, or `"<Platform>-only"` naming the side
    /// that is present when the other is exactly 0.
    pub leader: String,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Build the arbitrage dataset: one entry per qualifying pair, sorted
/// descending by ratio with single-platform pairs first.
pub fn build(records: &[LedgerRecord]) -> Vec<MarketRatio> {
    let mut pairs: BTreeMap<(String, String), PlatformTotals> = BTreeMap::new();

    for r in records {
        pairs
            .entry((r.category.clone(), r.subcategory.clone()))
            .or_default()
            .add(r.source, r.notional_volume_usd);
    }

    let mut markets: Vec<MarketRatio> = Vec::new();
    for ((category, subcategory), totals) in pairs {
        if is_excluded_category(&category) {
            continue;
        }
        if totals.total() < MIN_PAIR_VOLUME {
            continue;
        }

        let (ratio, leader) = if totals.kalshi == 0.0 {
            (None, "Polymarket-only".to_string())
        } else if totals.polymarket == 0.0 {
            (None, "Kalshi-only".to_string())
        } else {
            let larger_over_smaller = (totals.polymarket / totals.kalshi)
                .max(totals.kalshi / totals.polymarket);
            let leader = if totals.polymarket > totals.kalshi {
                "Polymarket"
            } else {
                "Kalshi"
            };
            (Some(round1(larger_over_smaller)), leader.to_string())
        };

        markets.push(MarketRatio {
            category,
            subcategory,
            kalshi: round_usd(totals.kalshi),
            polymarket: round_usd(totals.polymarket),
            total: round_usd(totals.total()),
            ratio,
            leader,
        });
    }

    // Explicit comparator: missing ratios take the sentinel value rather
    // than relying on Option ordering.
    markets.sort_by(|a, b| {
        sort_value(b)
            .partial_cmp(&sort_value(a))
            .unwrap_or(Ordering::Equal)
    });

    markets
}

fn sort_value(market: &MarketRatio) -> f64 {
    market.ratio.unwrap_or(ONLY_SORT_VALUE)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
