//! Linear recency decay.

use chrono::{DateTime, NaiveDate};

/// Parse `YYYY-MM-DD`, `MM/DD/YYYY`, or an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// `max * (1 - age/window)`, clamped to `[0, max]`.
///
/// Future dates count as age 0. No date, or a non-positive window, gives 0.
pub fn recency_boost(date: Option<NaiveDate>, today: NaiveDate, max: f64, window_days: i64) -> f64 {
    let Some(date) = date else {
        return 0.0;
    };
    if window_days <= 0 {
        return 0.0;
    }
    let age = (today - date).num_days().max(0);
    let remaining = 1.0 - age as f64 / window_days as f64;
    (max * remaining).max(0.0)
}
