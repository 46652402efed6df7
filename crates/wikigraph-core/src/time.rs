//! RFC 3339 timestamps for the JSON wire format.
//!
//! `JsonTime` wraps a date-time together with the UTC offset it was
//! constructed with. Encoding keeps that offset as-is:
//! - a zero offset is written as `Z`
//! - fractional seconds appear only when non-zero
//! - no conversion to UTC happens on the way out
//!
//! Offsets with a seconds part (historical local mean time, for example)
//! have no RFC 3339 form and fail to encode instead of being rounded.
//!
//! Equality and ordering compare instants, so two values that differ only
//! in offset are equal.

use chrono::{DateTime, Datelike, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Years that fit the four-digit `date-fullyear` production of RFC 3339.
const RFC3339_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// A point in time that serializes to RFC 3339 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonTime(DateTime<FixedOffset>);

impl JsonTime {
    /// Wrap a date-time, keeping its offset.
    #[must_use]
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self(instant)
    }

    /// Wrap a UTC date-time. Encodes with a `Z` suffix.
    #[must_use]
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self(instant.fixed_offset())
    }

    /// The current wall clock time in UTC.
    #[must_use]
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// The wrapped date-time, offset included.
    #[must_use]
    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// The UTC offset this timestamp was constructed with.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    /// The same instant expressed in UTC.
    #[must_use]
    pub fn to_utc(self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Encode as RFC 3339 text (without surrounding quotes).
    ///
    /// # Errors
    ///
    /// Returns error if the local year has no four-digit representation, or
    /// if the offset has a seconds part (RFC 3339 offsets stop at minutes).
    pub fn to_rfc3339(self) -> Result<String, TimestampError> {
        let year = self.0.year();
        if !RFC3339_YEARS.contains(&year) {
            return Err(TimestampError::OutOfRange { year });
        }
        let offset_seconds = self.offset().local_minus_utc();
        if offset_seconds % 60 != 0 {
            return Err(TimestampError::SubMinuteOffset { offset_seconds });
        }
        Ok(self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    /// Parse RFC 3339 text (without surrounding quotes).
    ///
    /// # Errors
    ///
    /// Returns error if `text` is not a valid RFC 3339 date-time with offset.
    pub fn parse_rfc3339(text: &str) -> Result<Self, TimestampError> {
        DateTime::parse_from_rfc3339(text)
            .map(Self)
            .map_err(|e| TimestampError::Malformed {
                input: text.to_string(),
                reason: e.to_string(),
            })
    }
}

impl From<DateTime<FixedOffset>> for JsonTime {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self::new(instant)
    }
}

impl From<DateTime<Utc>> for JsonTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::from_utc(instant)
    }
}

/// Same text as [`JsonTime::to_rfc3339`] when that succeeds. Otherwise
/// falls back to chrono's debug rendering, which is not valid RFC 3339.
impl fmt::Display for JsonTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

impl Serialize for JsonTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.to_rfc3339().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for JsonTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_rfc3339(&text).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur with timestamp encoding and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// Input is not an RFC 3339 date-time
    #[error("malformed RFC 3339 timestamp {input:?}: {reason}")]
    Malformed {
        /// The rejected text
        input: String,
        /// Parser diagnostic
        reason: String,
    },
    /// Year cannot be written with four digits
    #[error("year {year} cannot be encoded as RFC 3339")]
    OutOfRange {
        /// The offending year
        year: i32,
    },
    /// Offset has a seconds component RFC 3339 cannot express
    #[error("UTC offset of {offset_seconds}s is not a whole number of minutes")]
    SubMinuteOffset {
        /// Offset east of UTC, in seconds
        offset_seconds: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn utc_encodes_with_z_suffix() {
        let ts = JsonTime::from_utc(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(ts.to_rfc3339().unwrap(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn json_value_is_quoted() {
        let ts = JsonTime::from_utc(Utc.with_ymd_and_hms(2019, 6, 30, 23, 59, 58).unwrap());
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2019-06-30T23:59:58Z\""
        );
    }

    #[test]
    fn offset_is_preserved() {
        let ts = JsonTime::parse_rfc3339("2024-03-05T10:30:00+02:00").unwrap();
        assert_eq!(ts.offset(), FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(ts.to_rfc3339().unwrap(), "2024-03-05T10:30:00+02:00");
    }

    #[test]
    fn same_instant_different_offsets() {
        let plus_two = JsonTime::parse_rfc3339("2024-03-05T10:30:00+02:00").unwrap();
        let utc = JsonTime::parse_rfc3339("2024-03-05T08:30:00Z").unwrap();

        assert_eq!(plus_two, utc);
        assert_ne!(plus_two.to_string(), utc.to_string());

        let decoded: JsonTime =
            serde_json::from_str(&serde_json::to_string(&plus_two).unwrap()).unwrap();
        assert_eq!(decoded.to_utc(), utc.to_utc());
    }

    #[test]
    fn fractional_seconds_survive() {
        let ts = JsonTime::parse_rfc3339("2024-03-05T10:30:00.250Z").unwrap();
        let text = ts.to_rfc3339().unwrap();
        assert_eq!(text, "2024-03-05T10:30:00.250Z");
        assert_eq!(JsonTime::parse_rfc3339(&text).unwrap(), ts);
    }

    #[test]
    fn malformed_text_rejected() {
        let err = JsonTime::parse_rfc3339("yesterday").unwrap_err();
        assert!(matches!(err, TimestampError::Malformed { .. }));

        assert!(serde_json::from_str::<JsonTime>("\"2024-13-01T00:00:00Z\"").is_err());
        assert!(serde_json::from_str::<JsonTime>("\"2024-01-01\"").is_err());
        assert!(serde_json::from_str::<JsonTime>("1704067200").is_err());
    }

    #[test]
    fn five_digit_year_is_an_encode_error() {
        let ts = JsonTime::from_utc(Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            ts.to_rfc3339().unwrap_err(),
            TimestampError::OutOfRange { year: 10_000 }
        );
        assert!(serde_json::to_string(&ts).is_err());
    }

    #[test]
    fn sub_minute_offset_is_an_encode_error() {
        let lmt = FixedOffset::east_opt(19 * 60 + 32).unwrap();
        let ts = JsonTime::new(lmt.with_ymd_and_hms(1930, 1, 1, 0, 0, 0).unwrap());

        assert_eq!(
            ts.to_rfc3339().unwrap_err(),
            TimestampError::SubMinuteOffset {
                offset_seconds: 19 * 60 + 32
            }
        );
        assert!(serde_json::to_string(&ts).is_err());

        // The same instant in UTC encodes without loss
        let utc = JsonTime::from_utc(ts.to_utc());
        let decoded: JsonTime =
            serde_json::from_str(&serde_json::to_string(&utc).unwrap()).unwrap();
        assert_eq!(decoded, ts);
        assert_eq!(decoded.to_rfc3339().unwrap(), "1929-12-31T23:40:28Z");
    }

    #[test]
    fn display_matches_wire_text_when_encodable() {
        let ts = JsonTime::parse_rfc3339("2024-03-05T10:30:00-05:00").unwrap();
        assert_eq!(ts.to_string(), ts.to_rfc3339().unwrap());

        let far = JsonTime::from_utc(Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap());
        assert!(far.to_string().starts_with("+10000-01-01T00:00:00"));

        let lmt = FixedOffset::east_opt(19 * 60 + 32).unwrap();
        let odd = JsonTime::new(lmt.with_ymd_and_hms(1930, 1, 1, 0, 0, 0).unwrap());
        assert!(odd.to_string().ends_with("+00:19:32"));
    }
}
