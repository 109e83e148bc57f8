// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort conversions between [`ConfigValue`] and concrete Rust types.
//!
//! Every target type has two functions. `try_to_*` reports a [`CastError`] when the
//! value has no sensible reading as the target. `to_*` never fails: it returns the
//! target's zero value instead (`false`, `0`, `""`, the Unix epoch, a zero duration,
//! an empty collection). Lookups go through the lenient family.

use crate::domain::config_value::{ConfigValue, ValueMap};
use crate::domain::errors::CastError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// Result of a strict cast.
pub type CastResult<T> = std::result::Result<T, CastError>;

fn render(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => s.clone(),
        other => format!("{:?}", other),
    }
}

fn fail<T>(value: &ConfigValue, target: &'static str) -> CastResult<T> {
    Err(CastError::new(value.kind().name(), target, render(value)))
}

fn lenient<T: Default>(result: CastResult<T>) -> T {
    result.unwrap_or_else(|err| {
        tracing::trace!(%err, "cast degraded to zero value");
        T::default()
    })
}

/// Strict conversion to `bool`.
pub fn try_to_bool(value: &ConfigValue) -> CastResult<bool> {
    match value {
        ConfigValue::Bool(b) => Ok(*b),
        ConfigValue::Integer(n) => Ok(*n != 0),
        ConfigValue::Float(f) => Ok(*f != 0.0),
        ConfigValue::Duration(d) => Ok(!d.is_zero()),
        ConfigValue::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "t" | "true" | "yes" | "y" | "on" => Ok(true),
            "0" | "f" | "false" | "no" | "n" | "off" => Ok(false),
            _ => fail(value, "bool"),
        },
        _ => fail(value, "bool"),
    }
}

/// Lenient conversion to `bool`.
pub fn to_bool(value: &ConfigValue) -> bool {
    lenient(try_to_bool(value))
}

/// Parses a signed integer with an optional `0x`, `0o` or `0b` prefix.
fn parse_int(input: &str) -> Option<i64> {
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        Some("0o") | Some("0O") => (8, &unsigned[2..]),
        Some("0b") | Some("0B") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Strict conversion to a native-width integer.
pub fn try_to_int(value: &ConfigValue) -> CastResult<i64> {
    match value {
        ConfigValue::Integer(n) => Ok(*n),
        ConfigValue::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
        ConfigValue::Bool(b) => Ok(i64::from(*b)),
        ConfigValue::Duration(d) => i64::try_from(d.as_nanos()).or_else(|_| fail(value, "integer")),
        ConfigValue::String(s) => match parse_int(s.trim()) {
            Some(n) => Ok(n),
            None => fail(value, "integer"),
        },
        _ => fail(value, "integer"),
    }
}

/// Lenient conversion to a native-width integer.
pub fn to_int(value: &ConfigValue) -> i64 {
    lenient(try_to_int(value))
}

/// Strict conversion to `f64`.
pub fn try_to_float64(value: &ConfigValue) -> CastResult<f64> {
    match value {
        ConfigValue::Float(f) => Ok(*f),
        ConfigValue::Integer(n) => Ok(*n as f64),
        ConfigValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        ConfigValue::String(s) => s.trim().parse::<f64>().or_else(|_| fail(value, "float")),
        _ => fail(value, "float"),
    }
}

/// Lenient conversion to `f64`.
pub fn to_float64(value: &ConfigValue) -> f64 {
    lenient(try_to_float64(value))
}

/// Strict conversion to `String`. Sequences and mappings have no string form.
pub fn try_to_string(value: &ConfigValue) -> CastResult<String> {
    match value {
        ConfigValue::String(s) => Ok(s.clone()),
        ConfigValue::Bool(b) => Ok(b.to_string()),
        ConfigValue::Integer(n) => Ok(n.to_string()),
        ConfigValue::Float(f) => Ok(f.to_string()),
        ConfigValue::Time(t) => Ok(format_time(t)),
        ConfigValue::Duration(d) => Ok(format_duration(*d)),
        _ => fail(value, "string"),
    }
}

/// Lenient conversion to `String`.
pub fn to_string(value: &ConfigValue) -> String {
    lenient(try_to_string(value))
}

/// Renders a timestamp as RFC 3339 with a `Z` suffix.
pub fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_time(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(input) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_rfc2822(input) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(input, format) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

/// Strict conversion to a UTC timestamp. Integers are Unix seconds.
pub fn try_to_time(value: &ConfigValue) -> CastResult<DateTime<Utc>> {
    match value {
        ConfigValue::Time(t) => Ok(*t),
        ConfigValue::Integer(n) => match DateTime::from_timestamp(*n, 0) {
            Some(t) => Ok(t),
            None => fail(value, "time"),
        },
        ConfigValue::String(s) => match parse_time(s.trim()) {
            Some(t) => Ok(t),
            None => fail(value, "time"),
        },
        _ => fail(value, "time"),
    }
}

/// Lenient conversion to a UTC timestamp. The zero value is the Unix epoch.
pub fn to_time(value: &ConfigValue) -> DateTime<Utc> {
    lenient(try_to_time(value))
}

/// Renders a duration the way Go's `time.Duration` prints: `1h30m0s`, `1.5s`, `300ms`.
pub fn format_duration(duration: Duration) -> String {
    fn with_fraction(value: u128, unit: u128) -> String {
        let whole = value / unit;
        let fraction = value % unit;
        if fraction == 0 {
            return whole.to_string();
        }
        let width = unit.to_string().len() - 1;
        let rendered = format!("{whole}.{fraction:0width$}");
        rendered.trim_end_matches('0').to_string()
    }

    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", with_fraction(nanos, 1_000));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", with_fraction(nanos, 1_000_000));
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let second_nanos =
        u128::from(total_secs % 60) * 1_000_000_000 + u128::from(duration.subsec_nanos());

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&with_fraction(second_nanos, 1_000_000_000));
    out.push('s');
    out
}

/// Parses a Go-style duration such as `1h30m`, `1.5s`, `250ms` or `10us`.
///
/// Unit handling is delegated to `humantime`, which also accepts its own longer
/// forms (`5days`, `2 min`). Fractional components are scaled by their unit.
/// Negative durations are rejected.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if trimmed == "0" {
        return Some(Duration::ZERO);
    }
    let normalized = trimmed.replace(['µ', 'μ'], "u");
    if !normalized.contains('.') {
        return humantime::parse_duration(&normalized).ok();
    }

    let mut nanos = 0f64;
    let mut rest = normalized.as_str();
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let unit_end = rest[number_end..]
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .map_or(rest.len(), |i| number_end + i);
        let number: f64 = rest[..number_end].parse().ok()?;
        let unit = rest[number_end..unit_end].trim();
        let unit = humantime::parse_duration(&format!("1{unit}")).ok()?;
        nanos += number * unit.as_nanos() as f64;
        rest = &rest[unit_end..];
    }

    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_nanos(nanos.round() as u64))
}

/// Strict conversion to a duration. Bare numbers count nanoseconds.
pub fn try_to_duration(value: &ConfigValue) -> CastResult<Duration> {
    match value {
        ConfigValue::Duration(d) => Ok(*d),
        ConfigValue::Integer(n) => match u64::try_from(*n) {
            Ok(n) => Ok(Duration::from_nanos(n)),
            Err(_) => fail(value, "duration"),
        },
        ConfigValue::Float(f) if f.is_finite() && *f >= 0.0 => {
            Ok(Duration::from_nanos(f.round() as u64))
        }
        ConfigValue::String(s) => {
            let parsed = if s.chars().any(char::is_alphabetic) {
                parse_duration(s)
            } else {
                parse_duration(&format!("{}ns", s.trim()))
            };
            match parsed {
                Some(d) => Ok(d),
                None => fail(value, "duration"),
            }
        }
        _ => fail(value, "duration"),
    }
}

/// Lenient conversion to a duration.
pub fn to_duration(value: &ConfigValue) -> Duration {
    lenient(try_to_duration(value))
}

/// Strict conversion to a list of strings.
///
/// A plain string is split on whitespace. Items of a mixed list use their display form.
pub fn try_to_string_slice(value: &ConfigValue) -> CastResult<Vec<String>> {
    match value {
        ConfigValue::StringList(items) => Ok(items.clone()),
        ConfigValue::List(items) => Ok(items.iter().map(ConfigValue::to_string).collect()),
        ConfigValue::String(s) => Ok(s.split_whitespace().map(str::to_string).collect()),
        _ => fail(value, "string list"),
    }
}

/// Lenient conversion to a list of strings.
pub fn to_string_slice(value: &ConfigValue) -> Vec<String> {
    lenient(try_to_string_slice(value))
}

/// Strict conversion to a nested mapping.
pub fn try_to_string_map(value: &ConfigValue) -> CastResult<ValueMap> {
    match value {
        ConfigValue::Map(map) => Ok(map.clone()),
        _ => fail(value, "map"),
    }
}

/// Lenient conversion to a nested mapping.
pub fn to_string_map(value: &ConfigValue) -> ValueMap {
    lenient(try_to_string_map(value))
}

/// Strict conversion to a string-to-string mapping.
pub fn try_to_string_map_string(value: &ConfigValue) -> CastResult<HashMap<String, String>> {
    match value {
        ConfigValue::Map(map) => Ok(map
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()),
        _ => fail(value, "string map"),
    }
}

/// Lenient conversion to a string-to-string mapping.
pub fn to_string_map_string(value: &ConfigValue) -> HashMap<String, String> {
    lenient(try_to_string_map_string(value))
}

/// Strict conversion to a string-to-string-list mapping.
///
/// Sequence values become lists; any other value becomes a one-element list.
pub fn try_to_string_map_string_slice(
    value: &ConfigValue,
) -> CastResult<HashMap<String, Vec<String>>> {
    match value {
        ConfigValue::Map(map) => Ok(map
            .iter()
            .map(|(k, v)| {
                let items = match v {
                    ConfigValue::StringList(_) | ConfigValue::List(_) => to_string_slice(v),
                    other => vec![other.to_string()],
                };
                (k.clone(), items)
            })
            .collect()),
        _ => fail(value, "string list map"),
    }
}

/// Lenient conversion to a string-to-string-list mapping.
pub fn to_string_map_string_slice(value: &ConfigValue) -> HashMap<String, Vec<String>> {
    lenient(try_to_string_map_string_slice(value))
}

/// Parses a human-readable byte size such as `10MB`, `1 kb` or `512`.
///
/// `k`, `m` and `g` before a trailing `b` multiply by powers of 1024. Anything
/// unparsable or negative is zero.
pub fn parse_size_in_bytes(input: &str) -> u64 {
    let mut size = input.trim();
    let mut multiplier: u64 = 1;

    if size.len() > 1 && size.ends_with(['b', 'B']) {
        let without_b = &size[..size.len() - 1];
        let (unit_multiplier, unit_len) = match without_b.chars().last() {
            Some('k') | Some('K') => (1 << 10, 1),
            Some('m') | Some('M') => (1 << 20, 1),
            Some('g') | Some('G') => (1 << 30, 1),
            _ => (1, 0),
        };
        multiplier = unit_multiplier;
        size = without_b[..without_b.len() - unit_len].trim();
    }

    match parse_int(size) {
        Some(n) if n > 0 => (n as u64).saturating_mul(multiplier),
        _ => 0,
    }
}
