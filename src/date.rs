//! Date codecs for the two fixed textual formats the booking service uses.
//!
//! Both types render in UTC: a timestamp carrying any other offset is
//! normalized before formatting, so the wire value never encodes a zone.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid {kind} {input:?}: {source}")]
pub struct ParseError {
    kind: &'static str,
    input: String,
    #[source]
    source: chrono::ParseError,
}

/// Calendar date without time of day, `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Takes the UTC calendar day of `timestamp`.
    pub fn from_timestamp<Tz: TimeZone>(timestamp: &chrono::DateTime<Tz>) -> Self {
        Self(timestamp.with_timezone(&Utc).date_naive())
    }

    pub fn today() -> Self {
        Self::from_timestamp(&Utc::now())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Date {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|source| ParseError {
                kind: "date",
                input: s.to_string(),
                source,
            })
    }
}

/// Local date and time with whole-second precision, `YYYY-MM-DDTHH:MM:SS`
/// on the wire. Equality is by instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(chrono::DateTime<Utc>);

impl DateTime {
    pub fn new<Tz: TimeZone>(timestamp: chrono::DateTime<Tz>) -> Self {
        Self(timestamp.with_timezone(&Utc))
    }

    pub fn from_naive_utc(naive: NaiveDateTime) -> Self {
        Self(naive.and_utc())
    }

    pub fn utc(&self) -> chrono::DateTime<Utc> {
        self.0
    }
}

impl<Tz: TimeZone> From<chrono::DateTime<Tz>> for DateTime {
    fn from(value: chrono::DateTime<Tz>) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_TIME_FORMAT))
    }
}

impl FromStr for DateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
            .map(Self::from_naive_utc)
            .map_err(|source| ParseError {
                kind: "date-time",
                input: s.to_string(),
                source,
            })
    }
}

macro_rules! string_codec {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(de::Error::custom)
            }
        }
    };
}

string_codec!(Date);
string_codec!(DateTime);
