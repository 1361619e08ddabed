//! Turnover screening at (category, subcategory, subsubcategory) level.
//!
//! For each leaf market and platform the pass accumulates total volume,
//! total open interest, and the set of distinct active days, then emits a
//! row per combination that clears the volume / open-interest / activity
//! thresholds.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use lens_core::calculations::{round1, round_usd};
use lens_core::models::{is_excluded_category, LedgerRecord, Platform};
use serde::Serialize;

/// Output file name for this dataset.
pub const FILE_NAME: &str = "wash_trading.json";

/// Minimum total volume for a row to be emitted.
const MIN_VOLUME: f64 = 1_000_000.0;

/// Minimum total open interest for a row to be emitted.
const MIN_OPEN_INTEREST: f64 = 100_000.0;

// ── Output shape ──────────────────────────────────────────────────────────────

/// Turnover figures for one (market, platform) combination.
#[derive(Debug, Serialize)]
pub struct TurnoverRow {
    pub source: &'static str,
    pub category: String,
    pub subcategory: String,
    pub market: String,
    pub volume: i64,
    pub avg_oi: i64,
    pub days: usize,
    pub turnover: f64,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Per-platform accumulator within one leaf market.
#[derive(Debug, Default)]
struct SideStats {
    volume: f64,
    open_interest: f64,
    /// Distinct dates on which this platform's volume was strictly positive.
    active_days: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct MarketStats {
    kalshi: SideStats,
    polymarket: SideStats,
}

impl MarketStats {
    fn side_mut(&mut self, platform: Platform) -> &mut SideStats {
        match platform {
            Platform::Kalshi => &mut self.kalshi,
            Platform::Polymarket => &mut self.polymarket,
        }
    }

    fn side(&self, platform: Platform) -> &SideStats {
        match platform {
            Platform::Kalshi => &self.kalshi,
            Platform::Polymarket => &self.polymarket,
        }
    }
}

/// Build the wash-trading dataset, sorted descending by turnover.
pub fn build(records: &[LedgerRecord]) -> Vec<TurnoverRow> {
    let mut markets: BTreeMap<(String, String, String), MarketStats> = BTreeMap::new();

    for r in records {
        let side = markets
            .entry((
                r.category.clone(),
                r.subcategory.clone(),
                r.subsubcategory.clone(),
            ))
            .or_default()
            .side_mut(r.source);
        side.volume += r.notional_volume_usd;
        side.open_interest += r.open_interest_usd;
        if r.notional_volume_usd > 0.0 {
            side.active_days.insert(r.date.clone());
        }
    }

    let mut rows: Vec<TurnoverRow> = Vec::new();
    for ((category, subcategory, market), stats) in &markets {
        if is_excluded_category(category) {
            continue;
        }

        for platform in [Platform::Kalshi, Platform::Polymarket] {
            let side = stats.side(platform);
            let days = side.active_days.len();
            if side.volume < MIN_VOLUME || side.open_interest < MIN_OPEN_INTEREST || days == 0 {
                continue;
            }

            let avg_oi = side.open_interest / days as f64;
            let turnover = if avg_oi > 0.0 { side.volume / avg_oi } else { 0.0 };

            rows.push(TurnoverRow {
                source: platform.name(),
                category: category.clone(),
                subcategory: subcategory.clone(),
                market: market.clone(),
                volume: round_usd(side.volume),
                avg_oi: round_usd(avg_oi),
                days,
                turnover: round1(turnover),
            });
        }
    }

    rows.sort_by(|a, b| b.turnover.partial_cmp(&a.turnover).unwrap_or(Ordering::Equal));

    rows
}

// ── Tests ─────────────────────────────────────────────────────────────────────
