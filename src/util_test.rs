use super::*;

fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

#[test]
fn parse_since_days() {
    let ts = parse_since("30d", fixed_now()).unwrap();
    assert_eq!(ts, 1_700_000_000 - 30 * 86_400);
}

#[test]
fn parse_since_months() {
    let ts = parse_since("6m", fixed_now()).unwrap();
    assert_eq!(ts, 1_700_000_000 - 6 * 30 * 86_400);
}

#[test]
fn parse_since_years() {
    let ts = parse_since("1y", fixed_now()).unwrap();
    assert_eq!(ts, 1_700_000_000 - 365 * 86_400);
}

#[test]
fn parse_since_calendar_date() {
    let ts = parse_since("2024-01-01", fixed_now()).unwrap();
    assert_eq!(ts, 1_704_067_200);
}

#[test]
fn parse_since_trims_input() {
    let ts = parse_since("  2d ", fixed_now()).unwrap();
    assert_eq!(ts, 1_700_000_000 - 2 * 86_400);
}

#[test]
fn parse_since_invalid_unit() {
    let err = parse_since("5x", fixed_now()).unwrap_err();
    assert!(
        err.to_string().contains("unknown unit"),
        "should mention unknown unit, got: {err}"
    );
}

#[test]
fn parse_since_invalid_number() {
    let err = parse_since("abcd", fixed_now()).unwrap_err();
    assert!(
        err.to_string().contains("invalid"),
        "should mention invalid value, got: {err}"
    );
}

#[test]
fn parse_since_multibyte_suffix() {
    let err = parse_since("5é", fixed_now()).unwrap_err();
    assert!(err.to_string().contains("unknown unit"), "got: {err}");
}

#[test]
fn parse_since_empty() {
    let err = parse_since("", fixed_now()).unwrap_err();
    assert!(
        err.to_string().contains("empty"),
        "should mention empty value, got: {err}"
    );
}

#[test]
fn parse_since_overflow() {
    let err = parse_since("999999999999999999999y", fixed_now()).unwrap_err();
    assert!(
        err.to_string().contains("too large") || err.to_string().contains("invalid"),
        "should reject overflow, got: {err}"
    );
}

#[test]
fn ts_seconds_fractional() {
    assert_eq!(ts_seconds("1700000000.000200"), Some(1_700_000_000));
    assert_eq!(ts_seconds("42"), Some(42));
}

#[test]
fn ts_seconds_garbage() {
    assert_eq!(ts_seconds(""), None);
    assert_eq!(ts_seconds("abc.123"), None);
}

#[test]
fn format_day_utc() {
    assert_eq!(format_day(1_704_067_200), "2024-01-01");
    assert_eq!(format_day(0), "1970-01-01");
}
