//! Default date parser.
//!
//! Mirrors generic date construction from a raw value: anything that yields
//! a real timestamp is accepted, including epoch milliseconds, partial ISO
//! dates (`2017`, `2017-11`), extended years (`+275760-09-13`) and values
//! far outside sane calendar ranges. Results are epoch milliseconds; `None`
//! is the "invalid date" state.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::value::Value;

/// Largest distance from the epoch a timestamp may have, in milliseconds.
pub const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// The Gregorian calendar repeats every 400 years (146097 days).
const CYCLE_YEARS: i64 = 400;
const CYCLE_MILLIS: f64 = 146_097.0 * 86_400_000.0;

/// Date-time layouts carrying an explicit offset.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Date-time layouts without an offset; read as UTC.
const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn parse_date(raw: &Value) -> Option<f64> {
    match raw {
        Value::Date(d) => Some(d.timestamp_millis() as f64),
        Value::Number(ms) => epoch_millis(*ms),
        Value::String(s) => parse_date_str(s.trim()),
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Clips `ms` to a whole timestamp, or `None` outside ±8.64e15 ms.
pub fn epoch_millis(ms: f64) -> Option<f64> {
    if !ms.is_finite() || ms.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    Some(ms.trunc())
}

pub fn parse_date_str(s: &str) -> Option<f64> {
    if let Some(ms) = parse_extended_year(s) {
        return Some(ms);
    }
    parse_date_time(s)
        .map(|d| d.timestamp_millis() as f64)
        .and_then(epoch_millis)
}

/// `±YYYYYY-…`: shifts the year into chrono's range by whole 400-year
/// cycles, parses the rest as usual and shifts the result back.
fn parse_extended_year(s: &str) -> Option<f64> {
    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits = s.get(1..7)?;
    let rest = &s[7..];
    if !is_digits(digits) || !(rest.is_empty() || rest.starts_with('-')) {
        return None;
    }
    let year = sign * digits.parse::<i64>().ok()?;
    if sign < 0 && year == 0 {
        return None;
    }
    let cycles = (year - 2000).div_euclid(CYCLE_YEARS);
    let shifted = year - cycles * CYCLE_YEARS;
    let ms = parse_date_time(&format!("{shifted}{rest}"))?.timestamp_millis() as f64;
    epoch_millis(ms + cycles as f64 * CYCLE_MILLIS)
}

fn parse_date_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    if let Some(d) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(d.with_timezone(&Utc));
    }
    if let Some(d) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(Utc.from_utc_datetime(&d));
    }
    if let Some(d) = parse_calendar_date(s) {
        return Some(d);
    }
    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`; missing parts default to the first.
fn parse_calendar_date(s: &str) -> Option<DateTime<Utc>> {
    let mut parts = s.split('-');
    let year = parts
        .next()
        .filter(|p| p.len() == 4 && is_digits(p))?
        .parse::<i32>()
        .ok()?;
    let month = match parts.next() {
        Some(p) => two_digits(p)?,
        None => 1,
    };
    let day = match parts.next() {
        Some(p) => two_digits(p)?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

fn two_digits(p: &str) -> Option<u32> {
    if p.len() == 2 && is_digits(p) {
        p.parse().ok()
    } else {
        None
    }
}

fn is_digits(p: &str) -> bool {
    p.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn s(text: &str) -> Value {
        Value::String(text.to_string())
    }

    fn calendar(ms: f64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms as i64).unwrap()
    }

    #[test]
    fn test_iso_date_time() {
        assert_eq!(parse_date(&s("2017-11-11T19:11:33.786Z")), Some(1510427493786.0));
        assert!(parse_date(&s("2017-11-11T19:11:33+09:00")).is_some());
        assert!(parse_date(&s("2017-11-11T19:11")).is_some());
        assert!(parse_date(&s("2017-11-11 19:11:33")).is_some());
    }

    #[test]
    fn test_partial_dates() {
        let d = calendar(parse_date(&s("2017-11")).unwrap());
        assert_eq!((d.year(), d.month(), d.day()), (2017, 11, 1));
        assert_eq!(calendar(parse_date(&s("2017")).unwrap()).year(), 2017);
        assert!(parse_date(&s("2017-11-11")).is_some());
    }

    #[test]
    fn test_rfc2822() {
        assert!(parse_date(&s("Sat, 11 Nov 2017 19:11:33 +0000")).is_some());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_date(&s("not-a-date")).is_none());
        assert!(parse_date(&s("2017-3-111")).is_none());
        assert!(parse_date(&s("2017/11/11")).is_none());
        assert!(parse_date(&s("2017-13")).is_none());
        assert!(parse_date(&s("")).is_none());
    }

    #[test]
    fn test_epoch_millis() {
        assert_eq!(parse_date(&Value::Number(1510427489747.0)), Some(1510427489747.0));
        assert_eq!(parse_date(&Value::Number(1.9)), Some(1.0));
        assert!(parse_date(&Value::Number(-1.0)).is_some());
        assert!(parse_date(&Value::Number(f64::NAN)).is_none());
        assert!(parse_date(&Value::Number(f64::INFINITY)).is_none());
        assert!(parse_date(&Value::Number(1e16)).is_none());
    }

    #[test]
    fn test_epoch_range_boundaries() {
        assert_eq!(parse_date(&Value::Number(8.64e15)), Some(8.64e15));
        assert_eq!(parse_date(&Value::Number(-8.64e15)), Some(-8.64e15));
        assert!(parse_date(&Value::Number(8.5e15)).is_some());
        assert!(parse_date(&Value::Number(8.64e15 + 1.0)).is_none());
        assert!(parse_date(&Value::Number(-8.64e15 - 1.0)).is_none());
    }

    #[test]
    fn test_extended_years() {
        assert_eq!(parse_date(&s("+275760-09-13T00:00:00.000Z")), Some(8.64e15));
        assert_eq!(parse_date(&s("-271821-04-20T00:00:00.000Z")), Some(-8.64e15));
        assert!(parse_date(&s("+275760-09-13T00:00:00.001Z")).is_none());
        assert_eq!(
            parse_date(&s("+002017-11-11T19:11:33.786Z")),
            parse_date(&s("2017-11-11T19:11:33.786Z"))
        );
        assert!(parse_date(&s("-000000-01-01")).is_none());
        assert!(parse_date(&s("+20171-11-11")).is_none());
    }

    #[test]
    fn test_permissive_scalars() {
        assert_eq!(parse_date(&Value::Null), Some(0.0));
        assert_eq!(parse_date(&Value::Bool(true)), Some(1.0));
        assert!(parse_date(&Value::Array(vec![])).is_none());
    }

    #[test]
    fn test_date_instance_passes_through() {
        let now = Utc::now();
        assert_eq!(parse_date(&Value::Date(now)), Some(now.timestamp_millis() as f64));
    }
}
