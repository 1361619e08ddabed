//! Volume concentration treemap: category → subcategory shares.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use lens_core::calculations::{pct_share, round2, round_usd};
use lens_core::models::{is_excluded_category, LedgerRecord, PlatformTotals};
use serde::Serialize;

/// Output file name for this dataset.
pub const FILE_NAME: &str = "concentration.json";

/// Subcategories below this total volume are dropped from the treemap.
const MIN_CHILD_VOLUME: f64 = 100_000.0;

// ── Output shape ──────────────────────────────────────────────────────────────

/// One subcategory leaf of the treemap.
#[derive(Debug, Serialize)]
pub struct SubcategoryNode {
    pub name: String,
    pub value: i64,
    /// Share of the grand total, two decimal places.
    pub pct: f64,
}

/// One category branch of the treemap.
#[derive(Debug, Serialize)]
pub struct CategoryNode {
    pub name: String,
    pub value: i64,
    /// Share of the grand total, one decimal place.
    pub pct: f64,
    /// Kalshi's share of this category's own volume.
    pub kalshi_pct: f64,
    pub children: Vec<SubcategoryNode>,
}

/// The full concentration dataset.
#[derive(Debug, Serialize)]
pub struct ConcentrationDataset {
    /// Grand total over all included categories, rounded.
    pub total: i64,
    pub categories: Vec<CategoryNode>,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Build the concentration treemap over all non-excluded records.
pub fn build(records: &[LedgerRecord]) -> ConcentrationDataset {
    let mut cat_vol: BTreeMap<String, f64> = BTreeMap::new();
    let mut sub_vol: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    let mut cat_split: BTreeMap<String, PlatformTotals> = BTreeMap::new();

    for r in records {
        if is_excluded_category(&r.category) {
            continue;
        }
        *cat_vol.entry(r.category.clone()).or_default() += r.notional_volume_usd;
        *sub_vol
            .entry(r.category.clone())
            .or_default()
            .entry(r.subcategory.clone())
            .or_default() += r.notional_volume_usd;
        cat_split
            .entry(r.category.clone())
            .or_default()
            .add(r.source, r.notional_volume_usd);
    }

    let grand_total: f64 = cat_vol.values().sum();

    // Descending by volume; the stable sort keeps ties in name order.
    let mut ordered: Vec<(&String, &f64)> = cat_vol.iter().collect();
    ordered.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(Ordering::Equal));

    let categories: Vec<CategoryNode> = ordered
        .into_iter()
        .map(|(cat, &volume)| {
            let mut subs: Vec<(&String, &f64)> = sub_vol[cat].iter().collect();
            subs.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(Ordering::Equal));

            let children: Vec<SubcategoryNode> = subs
                .into_iter()
                .filter(|(_, &sv)| sv >= MIN_CHILD_VOLUME)
                .map(|(sub, &sv)| SubcategoryNode {
                    name: sub.clone(),
                    value: round_usd(sv),
                    pct: if grand_total > 0.0 {
                        round2(sv / grand_total * 100.0)
                    } else {
                        0.0
                    },
                })
                .collect();

            let kalshi = cat_split.get(cat).map(|s| s.kalshi).unwrap_or_default();

            CategoryNode {
                name: cat.clone(),
                value: round_usd(volume),
                pct: pct_share(volume, grand_total),
                kalshi_pct: pct_share(kalshi, volume),
                children,
            }
        })
        .collect();

    ConcentrationDataset {
        total: round_usd(grand_total),
        categories,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::models::Platform;

    fn rec(source: Platform, category: &str, subcategory: &str, volume: f64) -> LedgerRecord {
        LedgerRecord {
            source,
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            subsubcategory: String::new(),
            notional_volume_usd: volume,
            open_interest_usd: 0.0,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            date: "2024-01-01".to_string(),
            month: "2024-01".to_string(),
        }
    }

    #[test]
    fn test_grand_total_and_category_shares() {
        let records = vec![
            rec(Platform::Kalshi, "Politics", "US Elections", 600_000.0),
            rec(Platform::Polymarket, "Politics", "US Elections", 200_000.0),
            rec(Platform::Polymarket, "Sports", "NBA", 200_000.0),
        ];
        let dataset = build(&records);

        assert_eq!(dataset.total, 1_000_000);
        assert_eq!(dataset.categories.len(), 2);

        let politics = &dataset.categories[0];
        assert_eq!(politics.name, "Politics");
        assert_eq!(politics.value, 800_000);
        assert_eq!(politics.pct, 80.0);
        assert_eq!(politics.kalshi_pct, 75.0);
    }

    #[test]
    fn test_categories_sorted_descending_by_volume() {
        let records = vec![
            rec(Platform::Kalshi, "Crypto", "Bitcoin", 100_000.0),
            rec(Platform::Kalshi, "Sports", "NBA", 500_000.0),
            rec(Platform::Kalshi, "Politics", "US Elections", 300_000.0),
        ];
        let dataset = build(&records);

        let names: Vec<&str> = dataset.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Sports", "Politics", "Crypto"]);
    }

    #[test]
    fn test_small_subcategories_dropped() {
        let records = vec![
            rec(Platform::Kalshi, "Sports", "NBA", 500_000.0),
            rec(Platform::Kalshi, "Sports", "Darts", 99_999.0),
        ];
        let dataset = build(&records);

        let sports = &dataset.categories[0];
        assert_eq!(sports.children.len(), 1);
        assert_eq!(sports.children[0].name, "NBA");
        // Parent volume keeps the dropped child's contribution.
        assert_eq!(sports.value, 599_999);
    }

    #[test]
    fn test_child_percentages_bounded_by_parent() {
        let records = vec![
            rec(Platform::Kalshi, "Sports", "NBA", 400_000.0),
            rec(Platform::Kalshi, "Sports", "NFL", 300_000.0),
            rec(Platform::Kalshi, "Sports", "Darts", 50_000.0),
            rec(Platform::Kalshi, "Politics", "US Elections", 250_000.0),
        ];
        let dataset = build(&records);

        for cat in &dataset.categories {
            let child_sum: f64 = cat.children.iter().map(|c| c.pct).sum();
            assert!(child_sum <= cat.pct + 0.1, "{}: {child_sum} > {}", cat.name, cat.pct);
        }
    }

    #[test]
    fn test_excluded_categories_ignored_entirely() {
        let records = vec![
            rec(Platform::Kalshi, "Unknown", "x", 900_000.0),
            rec(Platform::Kalshi, "Sports", "NBA", 100_000.0),
        ];
        let dataset = build(&records);

        // Excluded volume is absent from the grand total, not just hidden.
        assert_eq!(dataset.total, 100_000);
        assert_eq!(dataset.categories.len(), 1);
    }

    #[test]
    fn test_kalshi_pct_zero_for_zero_volume_category() {
        let records = vec![rec(Platform::Kalshi, "Sports", "NBA", 0.0)];
        let dataset = build(&records);

        assert_eq!(dataset.categories[0].kalshi_pct, 0.0);
        assert_eq!(dataset.categories[0].pct, 0.0);
    }

    #[test]
    fn test_empty_records() {
        let dataset = build(&[]);
        assert_eq!(dataset.total, 0);
        assert!(dataset.categories.is_empty());
    }
}
