//!
//! # Time
//!
//! Wall-clock timestamp as carried in resource status.
//!
use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RFC 3339 timestamp with second precision.
///
/// Sub-second precision is dropped on the wire, so a value read back from
/// the api server may differ from the one that was written. The zero time
/// travels as `null`, as Go clients write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, schemars::JsonSchema)]
pub struct Time(#[schemars(with = "Option<String>")] DateTime<Utc>);

impl Time {
    pub fn new(inner: DateTime<Utc>) -> Self {
        Self(inner)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// `0001-01-01T00:00:00Z`, the value an unset timestamp decodes to
    pub fn zero() -> Self {
        Self(
            Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    pub fn inner(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(inner: DateTime<Utc>) -> Self {
        Self(inner)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_zero() {
            return serializer.serialize_none();
        }
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(Self::zero());
        };
        DateTime::parse_from_rfc3339(&raw)
            .map(|time| Self(time.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    }
}
