//! Event timestamps
//!
//! `EventTime` is a seconds + nanoseconds pair since the Unix epoch. It is
//! cheap to copy and compares chronologically.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ProtocolError, Result};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Second + nanosecond event timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct EventTime {
    sec: i64,
    nsec: u32,
}

impl EventTime {
    /// Create a timestamp, carrying excess nanoseconds into seconds
    #[inline]
    pub fn new(sec: i64, nsec: u32) -> Self {
        Self {
            sec: sec.saturating_add(i64::from(nsec / NANOS_PER_SEC)),
            nsec: nsec % NANOS_PER_SEC,
        }
    }

    /// Current wall-clock time
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Convert from a chrono timestamp
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::new(dt.timestamp(), dt.timestamp_subsec_nanos())
    }

    /// Convert to a chrono timestamp
    pub fn to_datetime(self) -> Result<DateTime<Utc>> {
        DateTime::from_timestamp(self.sec, self.nsec).ok_or(ProtocolError::out_of_range(self.sec))
    }

    /// Whole seconds since the epoch
    #[inline]
    pub fn sec(&self) -> i64 {
        self.sec
    }

    /// Nanoseconds within the second
    #[inline]
    pub fn nsec(&self) -> u32 {
        self.nsec
    }

    /// Interpret a record field as an event time
    ///
    /// Accepts integer or fractional epoch seconds, numeric strings, and
    /// RFC 3339 strings.
    pub fn parse_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => {
                if let Some(sec) = n.as_i64() {
                    Ok(Self::new(sec, 0))
                } else if let Some(f) = n.as_f64() {
                    Self::from_float(f)
                } else {
                    Err(ProtocolError::invalid_time(n.to_string()))
                }
            }
            Value::String(s) => Self::parse_str(s),
            other => Err(ProtocolError::invalid_time(format!(
                "expected number or string, got {other}"
            ))),
        }
    }

    fn parse_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(sec) = trimmed.parse::<i64>() {
            return Ok(Self::new(sec, 0));
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Self::from_float(f);
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self::from_datetime(dt.with_timezone(&Utc)))
            .map_err(|e| ProtocolError::invalid_time(format!("{s:?}: {e}")))
    }

    fn from_float(f: f64) -> Result<Self> {
        if !f.is_finite() || f < i64::MIN as f64 || f > i64::MAX as f64 {
            return Err(ProtocolError::invalid_time(f.to_string()));
        }
        let sec = f.floor();
        let nsec = ((f - sec) * f64::from(NANOS_PER_SEC)).round() as u32;
        Ok(Self::new(sec as i64, nsec))
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Ok(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Err(_) => write!(f, "{}.{:09}", self.sec, self.nsec),
        }
    }
}
