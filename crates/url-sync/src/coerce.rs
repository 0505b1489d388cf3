//! Primitive coercion engine.
//!
//! Converts raw query-string values to typed values and back, one leaf at
//! a time. All failures degrade to [`QueryValue::Null`]; nothing here
//! returns an error.
//!
//! Absence is not the same as invalidity. A missing key, an empty raw
//! string, and the literal raw string `null` (for the non-enum kinds) all
//! count as *absent* and fall back to the supplied default. A raw value
//! that is present but does not coerce, like `id=abc` against a number,
//! resolves to `Null` directly and never consults the default.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

use crate::schema::Schema;
use crate::value::QueryValue;

/// Coerces one raw leaf value against a primitive schema node.
///
/// `raw` is the flat-map entry for the leaf's path, if any. Container
/// schema nodes coerce to `Null`; the codec never reaches this function
/// with one.
pub fn coerce_value(schema: &Schema, raw: Option<&str>, default: Option<&QueryValue>) -> QueryValue {
    let raw = match raw {
        Some(r) if !is_absent(schema, r) => r,
        _ => return default.map(|d| coerce_default(schema, d)).unwrap_or(QueryValue::Null),
    };
    match schema {
        Schema::Str => QueryValue::Str(raw.to_string()),
        Schema::Num => parse_number(raw).map(QueryValue::Num).unwrap_or(QueryValue::Null),
        Schema::Date => parse_date(raw).map(QueryValue::Date).unwrap_or(QueryValue::Null),
        Schema::Bool => parse_bool(raw).map(QueryValue::Bool).unwrap_or(QueryValue::Null),
        Schema::Enum(e) => {
            if e.contains(raw) {
                QueryValue::Str(raw.to_string())
            } else {
                QueryValue::Null
            }
        }
        Schema::Arr(_) | Schema::Obj(_) => QueryValue::Null,
    }
}

/// Stringifies one typed leaf value against a primitive schema node.
///
/// `None` means the leaf emits no key at all: `Null` values, empty
/// strings, undeclared enum literals, and any value whose variant does not
/// match the schema kind.
pub fn stringify_value(schema: &Schema, value: &QueryValue) -> Option<String> {
    match (schema, value) {
        (_, QueryValue::Null) => None,
        (Schema::Str, QueryValue::Str(s)) => {
            if s.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        (Schema::Num, QueryValue::Num(n)) => Some(format_number(*n)),
        (Schema::Date, QueryValue::Date(d)) => {
            Some(d.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        (Schema::Bool, QueryValue::Bool(b)) => Some(if *b { "true" } else { "false" }.to_string()),
        (Schema::Enum(e), QueryValue::Str(s)) => {
            if e.contains(s) {
                Some(s.clone())
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Raw forms that mean "no value was supplied" rather than "a bad value
/// was supplied". The literal `null` stays meaningful for enums, where it
/// may be a declared member.
fn is_absent(schema: &Schema, raw: &str) -> bool {
    if raw.is_empty() {
        return true;
    }
    raw == "null" && !matches!(schema, Schema::Enum(_))
}

/// Defaults pass through the same per-kind rules as raw values: a string
/// default is parsed, a native default is type-checked, and anything that
/// does not fit the kind degrades to `Null`.
fn coerce_default(schema: &Schema, default: &QueryValue) -> QueryValue {
    match (schema, default) {
        (Schema::Str, QueryValue::Str(s)) => {
            if s.is_empty() {
                QueryValue::Null
            } else {
                QueryValue::Str(s.clone())
            }
        }
        (Schema::Num, QueryValue::Num(n)) => {
            if n.is_nan() {
                QueryValue::Null
            } else {
                QueryValue::Num(*n)
            }
        }
        (Schema::Num, QueryValue::Str(s)) => {
            parse_number(s).map(QueryValue::Num).unwrap_or(QueryValue::Null)
        }
        (Schema::Date, QueryValue::Date(d)) => QueryValue::Date(*d),
        (Schema::Date, QueryValue::Str(s)) => {
            parse_date(s).map(QueryValue::Date).unwrap_or(QueryValue::Null)
        }
        (Schema::Bool, QueryValue::Bool(b)) => QueryValue::Bool(*b),
        (Schema::Bool, QueryValue::Str(s)) => {
            parse_bool(s).map(QueryValue::Bool).unwrap_or(QueryValue::Null)
        }
        (Schema::Enum(e), QueryValue::Str(s)) => {
            if e.contains(s) {
                QueryValue::Str(s.clone())
            } else {
                QueryValue::Null
            }
        }
        _ => QueryValue::Null,
    }
}

/// Accepts decimal and exponent notation plus the `Infinity` spellings.
/// `NaN` parses but is rejected as a value.
fn parse_number(raw: &str) -> Option<f64> {
    let n: f64 = raw.parse().ok()?;
    if n.is_nan() {
        None
    } else {
        Some(n)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

/// Date forms accepted, in order: RFC 3339, RFC 2822, a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` assumed UTC, and a bare `YYYY-MM-DD`
/// resolved to midnight UTC.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(nd) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&nd.and_time(NaiveTime::MIN)));
    }
    None
}

/// Integral finite values within the exactly-representable range print
/// without a decimal point, so `0` stringifies to `"0"` rather than
/// vanishing or gaining a fraction.
fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    const EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if n == n.trunc() && n.abs() <= EXACT {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
