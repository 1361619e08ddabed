//! Numeric rounding conventions shared by the emitted datasets.
//!
//! All USD volumes round to whole dollars; percentage shares round to one
//! decimal place (two for treemap children). Half-way values round away
//! from zero (`f64::round`).

/// Round a USD amount to whole dollars.
pub fn round_usd(value: f64) -> i64 {
    value.round() as i64
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage share of `part` in `total`, one decimal place.
///
/// Returns 0 when `total` is not strictly positive, so empty buckets never
/// divide by zero.
pub fn pct_share(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        round1(part / total * 100.0)
    } else {
        0.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
