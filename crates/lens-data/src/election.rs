//! Daily volume time series around the US election cycles.

use std::collections::BTreeMap;

use lens_core::calculations::round_usd;
use lens_core::models::{LedgerRecord, PlatformTotals};
use serde::Serialize;

/// Output file name for this dataset.
pub const FILE_NAME: &str = "election.json";

/// Reference election dates the consuming layer overlays on the series.
const ELECTION_EVENTS: [(&str, &str); 2] = [
    ("2024-11-05", "2024 US Presidential Election"),
    ("2022-11-08", "2022 US Midterms"),
];

// ── Output shape ──────────────────────────────────────────────────────────────

/// One day of a platform-split volume series.
#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub kalshi: i64,
    pub polymarket: i64,
}

/// A fixed election-date marker.
#[derive(Debug, Serialize)]
pub struct ElectionEvent {
    pub date: &'static str,
    pub label: &'static str,
}

/// The full election-impact dataset.
#[derive(Debug, Serialize)]
pub struct ElectionDataset {
    pub total: Vec<DailyPoint>,
    pub politics: Vec<DailyPoint>,
    pub us_elections: Vec<DailyPoint>,
    pub election_events: Vec<ElectionEvent>,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Build three daily series: all records, category "Politics", and
/// subcategory "US Elections". No category exclusion applies here.
pub fn build(records: &[LedgerRecord]) -> ElectionDataset {
    let mut daily_total: BTreeMap<String, PlatformTotals> = BTreeMap::new();
    let mut daily_politics: BTreeMap<String, PlatformTotals> = BTreeMap::new();
    let mut daily_elections: BTreeMap<String, PlatformTotals> = BTreeMap::new();

    for r in records {
        daily_total
            .entry(r.date.clone())
            .or_default()
            .add(r.source, r.notional_volume_usd);
        if r.category == "Politics" {
            daily_politics
                .entry(r.date.clone())
                .or_default()
                .add(r.source, r.notional_volume_usd);
        }
        if r.subcategory == "US Elections" {
            daily_elections
                .entry(r.date.clone())
                .or_default()
                .add(r.source, r.notional_volume_usd);
        }
    }

    ElectionDataset {
        total: build_series(&daily_total),
        politics: build_series(&daily_politics),
        us_elections: build_series(&daily_elections),
        election_events: ELECTION_EVENTS
            .iter()
            .map(|&(date, label)| ElectionEvent { date, label })
            .collect(),
    }
}

/// Flatten a daily map into a series, keeping only days where either
/// platform traded. Dates ascend with the map order.
fn build_series(daily: &BTreeMap<String, PlatformTotals>) -> Vec<DailyPoint> {
    daily
        .iter()
        .filter(|(_, totals)| totals.kalshi > 0.0 || totals.polymarket > 0.0)
        .map(|(date, totals)| DailyPoint {
            date: date.clone(),
            kalshi: round_usd(totals.kalshi),
            polymarket: round_usd(totals.polymarket),
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
