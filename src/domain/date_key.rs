//! Canonical Date Key
//!
//! A calendar date reduced to "YYYY-MM-DD" with no time or timezone component.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date used to key menus
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Strict parse of the canonical form. Anything with a time part is rejected.
    pub fn parse(s: &str) -> Result<Self, ClientError> {
        let trimmed = s.trim();
        // chrono accepts single-digit months and days; the canonical form does not
        if trimmed.len() != 10 {
            return Err(ClientError::validation(format!("malformed date '{}'", s)));
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ClientError::validation(format!("malformed date '{}'", s)))
    }

    /// Lenient parse of a date as sent by the backend.
    ///
    /// Accepts a plain date, an RFC 3339 timestamp (converted to UTC before the
    /// time is dropped) or a naive timestamp.
    pub fn from_wire(s: &str) -> Result<Self, ClientError> {
        let trimmed = s.trim();
        if let Ok(key) = Self::parse(trimmed) {
            return Ok(key);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(ts.with_timezone(&Utc).date_naive()));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Ok(Self(ts.date()));
            }
        }
        Err(ClientError::decode(format!("unrecognized date '{}'", s)))
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The canonical "YYYY-MM-DD" string
    pub fn as_string(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DateKey {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_wire(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        let key = DateKey::parse("2024-06-10").unwrap();
        assert_eq!(key.to_string(), "2024-06-10");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(DateKey::parse("2024-6-10").is_err());
        assert!(DateKey::parse("10/06/2024").is_err());
        assert!(DateKey::parse("2024-02-30").is_err());
        assert!(DateKey::parse("").is_err());
        assert!(DateKey::parse("2024-06-10T00:00:00Z").is_err());
    }

    #[test]
    fn test_from_wire_timestamps() {
        assert_eq!(
            DateKey::from_wire("2024-06-10T00:00:00.000Z").unwrap().to_string(),
            "2024-06-10"
        );
        assert_eq!(
            DateKey::from_wire("2024-06-10T13:45:00").unwrap().to_string(),
            "2024-06-10"
        );
        // Offsets are normalized to UTC before truncation
        assert_eq!(
            DateKey::from_wire("2024-06-10T01:00:00+02:00").unwrap().to_string(),
            "2024-06-09"
        );
    }

    #[test]
    fn test_from_wire_garbage_is_service_error() {
        let err = DateKey::from_wire("tomorrow").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Service);
    }

    #[test]
    fn test_serde_as_string() {
        let key = DateKey::parse("2024-01-07").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-01-07\"");
        let back: DateKey = serde_json::from_str("\"2024-01-07T10:00:00Z\"").unwrap();
        assert_eq!(back, key);
    }
}
