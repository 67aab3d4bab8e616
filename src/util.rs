use std::error::Error;

use chrono::{DateTime, NaiveDate, Utc};

/// Parse a `--since` value into a Unix timestamp.
///
/// Accepts either a duration counted back from `now` ("30d", "6m", "1y";
/// 1 month = 30 days, 1 year = 365 days) or a calendar date
/// ("2024-03-01", taken as midnight UTC).
pub fn parse_since(s: &str, now: DateTime<Utc>) -> Result<i64, Box<dyn Error>> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty --since value".into());
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| format!("invalid --since date: {s:?}"))?;
        return Ok(midnight.and_utc().timestamp());
    }

    let unit = s.chars().last().unwrap_or_default();
    let num_str = &s[..s.len() - unit.len_utf8()];
    let n: u64 = num_str.parse().map_err(|_| {
        format!("invalid --since value: {s:?} (expected e.g. 6m, 1y, 30d or 2024-03-01)")
    })?;

    let seconds = match unit {
        'd' => n.checked_mul(86_400),
        'm' => n.checked_mul(30 * 86_400),
        'y' => n.checked_mul(365 * 86_400),
        _ => return Err(format!("unknown unit in --since: {s:?} (use d, m, or y)").into()),
    }
    .and_then(|secs| i64::try_from(secs).ok())
    .ok_or("--since value too large")?;

    now.timestamp()
        .checked_sub(seconds)
        .ok_or_else(|| "--since value too large".into())
}

/// Whole seconds of an export timestamp such as `"1700000000.000200"`.
/// Returns `None` when the integer part is not a number.
pub fn ts_seconds(ts: &str) -> Option<i64> {
    ts.split('.').next()?.parse().ok()
}

/// Render Unix seconds as a `YYYY-MM-DD` day in UTC.
pub fn format_day(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
#[path = "util_test.rs"]
mod tests;
