//! Lenient deserializers for fields the API sends in more than one shape.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Tags {
    Joined(String),
    List(Vec<String>),
}

/// Identifier sent either as a JSON string or a JSON number.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Text(s) => s,
    })
}

/// Aggregate count sent as a number or a numeric string.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => u64::try_from(n).map_err(D::Error::custom),
        Scalar::Float(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
        Scalar::Float(f) => Err(D::Error::custom(format!("invalid count {f}"))),
        Scalar::Text(s) => s.trim().parse().map_err(D::Error::custom),
    }
}

/// Year sent as a number, a numeric string, an empty string or null.
pub(crate) fn optional_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(n)) => i32::try_from(n).map(Some).map_err(D::Error::custom),
        Some(Scalar::Float(f)) if f.fract() == 0.0 => Ok(Some(f as i32)),
        Some(Scalar::Float(f)) => Err(D::Error::custom(format!("invalid year {f}"))),
        Some(Scalar::Text(s)) => parse_year(&s).map_err(D::Error::custom),
    }
}

/// Technology tags sent as `"React, Node"` or `["React", "Node"]`.
pub(crate) fn tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Tags>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Tags::Joined(joined)) => split_tags(&joined),
        Some(Tags::List(list)) => list
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Timestamp sent as RFC 3339 or as a bare `YYYY-MM-DD HH:MM:SS` (UTC).
/// Unparseable values are dropped rather than failing the whole record.
pub(crate) fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    Ok(NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc()))
}

/// Split a comma-separated tag list, dropping blank entries.
pub(crate) fn split_tags(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a year typed as text; blank means "no year".
pub(crate) fn parse_year(text: &str) -> Result<Option<i32>, std::num::ParseIntError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}
