//! Monthly volume split between the two platforms, overall and per-category.

use std::collections::{BTreeMap, BTreeSet};

use lens_core::calculations::{pct_share, round_usd};
use lens_core::models::{is_excluded_category, LedgerRecord, PlatformTotals};
use serde::Serialize;

/// Output file name for this dataset.
pub const FILE_NAME: &str = "platform_war.json";

// ── Output shape ──────────────────────────────────────────────────────────────

/// One month of the overall platform split.
#[derive(Debug, Serialize)]
pub struct MonthlyShare {
    pub month: String,
    pub kalshi: i64,
    pub polymarket: i64,
    pub total: i64,
    pub kalshi_pct: f64,
    pub poly_pct: f64,
}

/// One month of a single category's platform split.
#[derive(Debug, Serialize)]
pub struct CategoryMonth {
    pub month: String,
    pub kalshi: i64,
    pub polymarket: i64,
    pub kalshi_pct: f64,
    pub poly_pct: f64,
}

/// The full platform-war dataset.
#[derive(Debug, Serialize)]
pub struct PlatformWarDataset {
    pub overall: Vec<MonthlyShare>,
    pub by_category: BTreeMap<String, Vec<CategoryMonth>>,
    pub categories: Vec<String>,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Build the platform-war dataset from the full record set.
pub fn build(records: &[LedgerRecord]) -> PlatformWarDataset {
    let mut monthly: BTreeMap<String, PlatformTotals> = BTreeMap::new();
    let mut monthly_cat: BTreeMap<String, BTreeMap<String, PlatformTotals>> = BTreeMap::new();
    let mut categories: BTreeSet<String> = BTreeSet::new();

    for r in records {
        monthly
            .entry(r.month.clone())
            .or_default()
            .add(r.source, r.notional_volume_usd);
        monthly_cat
            .entry(r.month.clone())
            .or_default()
            .entry(r.category.clone())
            .or_default()
            .add(r.source, r.notional_volume_usd);
        if !is_excluded_category(&r.category) {
            categories.insert(r.category.clone());
        }
    }

    let overall: Vec<MonthlyShare> = monthly
        .iter()
        .map(|(month, totals)| MonthlyShare {
            month: month.clone(),
            kalshi: round_usd(totals.kalshi),
            polymarket: round_usd(totals.polymarket),
            total: round_usd(totals.total()),
            kalshi_pct: pct_share(totals.kalshi, totals.total()),
            poly_pct: pct_share(totals.polymarket, totals.total()),
        })
        .collect();

    let mut by_category: BTreeMap<String, Vec<CategoryMonth>> = BTreeMap::new();
    for cat in &categories {
        let mut series: Vec<CategoryMonth> = Vec::new();
        // Iterate the overall month list so every category shares the same
        // month axis, keeping only months where the category traded.
        for month in monthly.keys() {
            let totals = monthly_cat
                .get(month)
                .and_then(|cats| cats.get(cat))
                .copied()
                .unwrap_or_default();
            if totals.total() > 0.0 {
                series.push(CategoryMonth {
                    month: month.clone(),
                    kalshi: round_usd(totals.kalshi),
                    polymarket: round_usd(totals.polymarket),
                    kalshi_pct: pct_share(totals.kalshi, totals.total()),
                    poly_pct: pct_share(totals.polymarket, totals.total()),
                });
            }
        }
        by_category.insert(cat.clone(), series);
    }

    PlatformWarDataset {
        overall,
        by_category,
        categories: categories.into_iter().collect(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::models::Platform;

    fn rec(source: Platform, category: &str, volume: f64, ts: &str) -> LedgerRecord {
        LedgerRecord {
            source,
            category: category.to_string(),
            subcategory: String::new(),
            subsubcategory: String::new(),
            notional_volume_usd: volume,
            open_interest_usd: 0.0,
            timestamp: ts.to_string(),
            date: ts[..10].to_string(),
            month: ts[..7].to_string(),
        }
    }

    #[test]
    fn test_overall_two_record_example() {
        let records = vec![
            rec(Platform::Kalshi, "Politics", 600.0, "2024-01-01T00:00:00Z"),
            rec(Platform::Polymarket, "Politics", 400.0, "2024-01-01T00:00:00Z"),
        ];
        let dataset = build(&records);

        assert_eq!(dataset.overall.len(), 1);
        let m = &dataset.overall[0];
        assert_eq!(m.month, "2024-01");
        assert_eq!(m.kalshi, 600);
        assert_eq!(m.polymarket, 400);
        assert_eq!(m.total, 1000);
        assert_eq!(m.kalshi_pct, 60.0);
        assert_eq!(m.poly_pct, 40.0);
    }

    #[test]
    fn test_percentages_zero_when_month_total_is_zero() {
        let records = vec![rec(Platform::Kalshi, "Politics", 0.0, "2024-01-01T00:00:00Z")];
        let dataset = build(&records);

        let m = &dataset.overall[0];
        assert_eq!(m.total, 0);
        assert_eq!(m.kalshi_pct, 0.0);
        assert_eq!(m.poly_pct, 0.0);
    }

    #[test]
    fn test_percentage_shares_sum_to_100_when_total_positive() {
        let records = vec![
            rec(Platform::Kalshi, "Politics", 1.0, "2024-01-05T00:00:00Z"),
            rec(Platform::Polymarket, "Politics", 2.0, "2024-01-06T00:00:00Z"),
            rec(Platform::Kalshi, "Sports", 333.3, "2024-02-01T00:00:00Z"),
            rec(Platform::Polymarket, "Sports", 666.7, "2024-02-02T00:00:00Z"),
        ];
        let dataset = build(&records);

        for m in &dataset.overall {
            assert!(m.total > 0);
            let sum = m.kalshi_pct + m.poly_pct;
            assert!((sum - 100.0).abs() <= 0.1, "shares sum to {sum}");
        }
    }

    #[test]
    fn test_months_sorted_ascending() {
        let records = vec![
            rec(Platform::Kalshi, "Sports", 10.0, "2024-03-01T00:00:00Z"),
            rec(Platform::Kalshi, "Sports", 10.0, "2023-12-01T00:00:00Z"),
            rec(Platform::Kalshi, "Sports", 10.0, "2024-01-01T00:00:00Z"),
        ];
        let dataset = build(&records);

        let months: Vec<&str> = dataset.overall.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-03"]);
    }

    #[test]
    fn test_excluded_categories_absent_from_category_list() {
        let records = vec![
            rec(Platform::Kalshi, "UNKNOWN", 10.0, "2024-01-01T00:00:00Z"),
            rec(Platform::Kalshi, "Early Polymarket Trades", 10.0, "2024-01-01T00:00:00Z"),
            rec(Platform::Polymarket, "Politics", 10.0, "2024-01-01T00:00:00Z"),
        ];
        let dataset = build(&records);

        assert_eq!(dataset.categories, vec!["Politics"]);
        assert!(!dataset.by_category.contains_key("UNKNOWN"));
        // Excluded volume still counts toward the overall series.
        assert_eq!(dataset.overall[0].total, 30);
    }

    #[test]
    fn test_by_category_skips_months_without_volume() {
        let records = vec![
            rec(Platform::Kalshi, "Politics", 10.0, "2024-01-01T00:00:00Z"),
            rec(Platform::Kalshi, "Sports", 20.0, "2024-02-01T00:00:00Z"),
        ];
        let dataset = build(&records);

        // Politics traded only in 2024-01 even though 2024-02 exists overall.
        let politics = &dataset.by_category["Politics"];
        assert_eq!(politics.len(), 1);
        assert_eq!(politics[0].month, "2024-01");
    }
}
