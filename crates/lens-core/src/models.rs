use serde::{Deserialize, Serialize};

/// Categories whose records are excluded from most aggregations.
///
/// The set is shared by every aggregator that filters on classification;
/// it is declared once here rather than re-declared per module.
pub const EXCLUDED_CATEGORIES: [&str; 3] = ["UNKNOWN", "Unknown", "Early Polymarket Trades"];

/// Returns `true` when `category` belongs to the excluded set.
pub fn is_excluded_category(category: &str) -> bool {
    EXCLUDED_CATEGORIES.contains(&category)
}

// ── Platform ──────────────────────────────────────────────────────────────────

/// The trading platform a ledger record originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Kalshi,
    Polymarket,
}

impl Platform {
    /// Map a raw `source` field onto a platform.
    ///
    /// Anything other than the literal `"Kalshi"` accrues to Polymarket,
    /// matching the two-way split the ledger encodes.
    pub fn from_source(source: &str) -> Self {
        if source == "Kalshi" {
            Platform::Kalshi
        } else {
            Platform::Polymarket
        }
    }

    /// Display name used in emitted datasets.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Kalshi => "Kalshi",
            Platform::Polymarket => "Polymarket",
        }
    }
}

// ── LedgerRecord ──────────────────────────────────────────────────────────────

/// One daily trading record from the merged ledger.
///
/// Immutable after load; `date` and `month` are prefix slices of the raw
/// timestamp (`YYYY-MM-DD` / `YYYY-MM`), with no calendar validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Originating platform.
    pub source: Platform,
    /// Top-level classification.
    pub category: String,
    /// Mid-level classification.
    pub subcategory: String,
    /// Leaf classification (individual market).
    pub subsubcategory: String,
    /// USD notional volume traded over the record's period.
    #[serde(default)]
    pub notional_volume_usd: f64,
    /// USD value of outstanding unsettled positions.
    #[serde(default)]
    pub open_interest_usd: f64,
    /// Raw ISO-8601-like timestamp text.
    pub timestamp: String,
    /// First 10 characters of `timestamp`.
    pub date: String,
    /// First 7 characters of `timestamp`.
    pub month: String,
}

// ── PlatformTotals ────────────────────────────────────────────────────────────

/// Volume accumulated per platform within one group-by bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformTotals {
    pub kalshi: f64,
    pub polymarket: f64,
}

impl PlatformTotals {
    /// Add `volume` to the side owned by `platform`.
    pub fn add(&mut self, platform: Platform, volume: f64) {
        match platform {
            Platform::Kalshi => self.kalshi += volume,
            Platform::Polymarket => self.polymarket += volume,
        }
    }

    /// Volume attributed to `platform`.
    pub fn get(&self, platform: Platform) -> f64 {
        match platform {
            Platform::Kalshi => self.kalshi,
            Platform::Polymarket => self.polymarket,
        }
    }

    /// Combined volume across both platforms.
    pub fn total(&self) -> f64 {
        self.kalshi + self.polymarket
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_categories() {
        assert!(is_excluded_category("UNKNOWN"));
        assert!(is_excluded_category("Unknown"));
        assert!(is_excluded_category("Early Polymarket Trades"));
        assert!(!is_excluded_category("Politics"));
        assert!(!is_excluded_category("unknown"));
    }

    #[test]
    fn test_platform_from_source() {
        assert_eq!(Platform::from_source("Kalshi"), Platform::Kalshi);
        assert_eq!(Platform::from_source("Polymarket"), Platform::Polymarket);
        // Any unrecognised source accrues to Polymarket.
        assert_eq!(Platform::from_source("Other"), Platform::Polymarket);
    }

    #[test]
    fn test_platform_name() {
        assert_eq!(Platform::Kalshi.name(), "Kalshi");
        assert_eq!(Platform::Polymarket.name(), "Polymarket");
    }

    #[test]
    fn test_platform_totals_accumulation() {
        let mut totals = PlatformTotals::default();
        totals.add(Platform::Kalshi, 600.0);
        totals.add(Platform::Polymarket, 400.0);
        totals.add(Platform::Kalshi, 100.0);

        assert_eq!(totals.kalshi, 700.0);
        assert_eq!(totals.polymarket, 400.0);
        assert_eq!(totals.total(), 1100.0);
        assert_eq!(totals.get(Platform::Kalshi), 700.0);
    }
}
