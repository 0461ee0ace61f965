//! Lenient decoding for records exported from the realtime database.
//!
//! Booking forms stored dates and prices as whatever the browser produced:
//! ISO dates, full JavaScript timestamps, Brazilian `dd/mm/yyyy` dates,
//! numbers, numeric strings or `null`. The helpers here accept all of those
//! and are meant for `#[serde(deserialize_with = "...")]`.
//!
//! Optional fields never fail: anything unrecognised decodes as `None` (or an
//! empty string). Only [`timestamp`] is strict, because `created_at` decides
//! which booking is the most recent one.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

use crate::{Error, Result};

const NAIVE_DATETIME_FORMATS: &[&str] =
  &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

// ─── Parsers ─────────────────────────────────────────────────────────────────

/// Parse a calendar date from `YYYY-MM-DD`, an RFC 3339 timestamp (the local
/// date part is kept), a naive ISO date-time, or `DD/MM/YYYY`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
  let s = input.trim();

  if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Ok(d);
  }
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.date_naive());
  }
  for fmt in NAIVE_DATETIME_FORMATS {
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
      return Ok(ndt.date());
    }
  }
  NaiveDate::parse_from_str(s, "%d/%m/%Y")
    .map_err(|_| Error::InvalidDate(input.to_owned()))
}

/// Parse a creation timestamp. Naive date-times and bare dates are read as
/// UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
  let s = input.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  for fmt in NAIVE_DATETIME_FORMATS {
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
      return Ok(ndt.and_utc());
    }
  }
  if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Ok(d.and_time(NaiveTime::MIN).and_utc());
  }
  if let Ok(millis) = s.parse::<i64>() {
    return timestamp_from_millis(millis);
  }
  Err(Error::InvalidTimestamp(input.to_owned()))
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_millis(millis)
    .ok_or_else(|| Error::InvalidTimestamp(millis.to_string()))
}

/// Parse a price written as a number, `"500"`, `"499.90"` or `"499,90"`.
pub fn parse_amount(input: &str) -> Option<f64> {
  let s = input.trim();
  if s.is_empty() {
    return None;
  }
  s.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

// ─── serde adapters ──────────────────────────────────────────────────────────

/// A string field; `null` and missing become `""`, numbers are stringified.
pub fn text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(deserializer)? {
    Value::String(s) => s,
    Value::Number(n) => n.to_string(),
    Value::Bool(b) => b.to_string(),
    _ => String::new(),
  })
}

/// An optional string field; blank strings become `None`.
pub fn optional_text<'de, D>(
  deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let s = text(deserializer)?;
  Ok((!s.trim().is_empty()).then_some(s))
}

/// An optional date in any shape [`parse_date`] accepts.
pub fn optional_date<'de, D>(
  deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(deserializer)? {
    Value::String(s) => parse_date(&s).ok(),
    Value::Number(n) => n
      .as_i64()
      .and_then(DateTime::from_timestamp_millis)
      .map(|dt| dt.date_naive()),
    _ => None,
  })
}

/// An optional amount; numeric strings are accepted, garbage is `None`.
pub fn optional_amount<'de, D>(
  deserializer: D,
) -> std::result::Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(deserializer)? {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => parse_amount(&s),
    _ => None,
  })
}

/// A required timestamp: any string [`parse_timestamp`] accepts, or epoch
/// milliseconds.
pub fn timestamp<'de, D>(
  deserializer: D,
) -> std::result::Result<DateTime<Utc>, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(deserializer)? {
    Value::String(s) => parse_timestamp(&s).map_err(D::Error::custom),
    Value::Number(n) => n
      .as_i64()
      .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {n}")))
      .and_then(|ms| timestamp_from_millis(ms).map_err(D::Error::custom)),
    other => Err(D::Error::custom(format!("invalid timestamp: {other}"))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Datelike, TimeZone};

  #[test]
  fn parses_iso_and_brazilian_dates() {
    let expected = NaiveDate::from_ymd_opt(1990, 5, 1).unwrap();
    assert_eq!(parse_date("1990-05-01").unwrap(), expected);
    assert_eq!(parse_date("01/05/1990").unwrap(), expected);
    assert_eq!(parse_date("1990-05-01T03:00:00.000Z").unwrap(), expected);
    assert_eq!(parse_date(" 1990-05-01T00:00:00 ").unwrap(), expected);
  }

  #[test]
  fn rejects_garbage_dates() {
    assert!(matches!(parse_date("soon"), Err(Error::InvalidDate(_))));
    assert!(parse_date("").is_err());
  }

  #[test]
  fn timestamps_accept_several_shapes() {
    let ts = parse_timestamp("2023-03-04T10:00:00.000Z").unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2023, 3, 4, 10, 0, 0).unwrap());

    let naive = parse_timestamp("2023-03-04T10:00:00").unwrap();
    assert_eq!(naive, ts);

    let date_only = parse_timestamp("2023-03-04").unwrap();
    assert_eq!(date_only.day(), 4);

    let millis = parse_timestamp("1677924000000").unwrap();
    assert_eq!(millis, ts);

    assert!(matches!(
      parse_timestamp("yesterday"),
      Err(Error::InvalidTimestamp(_))
    ));
  }

  #[test]
  fn amounts_accept_comma_decimals() {
    assert_eq!(parse_amount("499,90"), Some(499.9));
    assert_eq!(parse_amount("500"), Some(500.0));
    assert_eq!(parse_amount("  "), None);
    assert_eq!(parse_amount("abc"), None);
  }

  #[derive(Debug, Deserialize)]
  struct Probe {
    #[serde(default, deserialize_with = "text")]
    name:  String,
    #[serde(default, deserialize_with = "optional_text")]
    email: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    born:  Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_amount")]
    price: Option<f64>,
    #[serde(deserialize_with = "timestamp")]
    at:    DateTime<Utc>,
  }

  #[test]
  fn adapters_default_malformed_optionals() {
    let probe: Probe = serde_json::from_str(
      r#"{"name":null,"email":"  ","born":"not a date","price":"n/a","at":1677924000000}"#,
    )
    .unwrap();
    assert_eq!(probe.name, "");
    assert_eq!(probe.email, None);
    assert_eq!(probe.born, None);
    assert_eq!(probe.price, None);
    assert_eq!(probe.at.year(), 2023);
  }

  #[test]
  fn adapters_tolerate_missing_optionals() {
    let probe: Probe = serde_json::from_str(r#"{"at":"2021-01-01"}"#).unwrap();
    assert_eq!(probe.name, "");
    assert_eq!(probe.price, None);
  }

  #[test]
  fn timestamp_adapter_is_strict() {
    let err = serde_json::from_str::<Probe>(r#"{"at":"someday"}"#).unwrap_err();
    assert!(err.to_string().contains("invalid timestamp"), "{err}");
  }
}
