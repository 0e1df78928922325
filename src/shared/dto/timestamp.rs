//! Lenient timestamp parsing for request bodies.
//!
//! RFC 3339 is accepted as is. Values without an offset, as sent by HTML
//! `datetime-local` inputs, are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::Error, Deserialize, Deserializer};

use crate::patch::Patch;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn to_timestamp<E: Error>(raw: String) -> Result<DateTime<Utc>, E> {
    parse_timestamp(&raw).ok_or_else(|| E::custom(format!("invalid timestamp: {raw}")))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    to_timestamp(String::deserialize(deserializer)?)
}

pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(to_timestamp)
        .transpose()
}

pub fn deserialize_patch<'de, D>(deserializer: D) -> Result<Patch<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Patch::<String>::deserialize(deserializer)? {
        Patch::Absent => Patch::Absent,
        Patch::Clear => Patch::Clear,
        Patch::Set(raw) => Patch::Set(to_timestamp(raw)?),
    })
}
