//! Timestamp handling shared by the entities and the engine.
//!
//! Parsing never fails: anything that cannot be read as a point in time maps
//! to [`EARLIEST`], which keeps filtering and sorting total.

use chrono::{
    DateTime, Duration, Local, NaiveDate, NaiveDateTime, Offset, SecondsFormat, TimeZone, Utc,
};

/// Instant used for timestamps that cannot be parsed
pub const EARLIEST: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// Serde default for missing timestamps
pub fn earliest() -> DateTime<Utc> {
    EARLIEST
}

/// Zone-less layouts, read as wall-clock time in the local zone.
/// `datetime-local` form inputs produce the minute-precision variant.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp, falling back to [`EARLIEST`]
pub fn parse_moment(value: &str) -> DateTime<Utc> {
    try_parse_moment(value).unwrap_or(EARLIEST)
}

/// Parse a timestamp, reading zone-less values in the local time zone
pub fn try_parse_moment(value: &str) -> Option<DateTime<Utc>> {
    try_parse_moment_in(value, &Local)
}

/// Parse a timestamp, reading zone-less values in `tz`
///
/// Accepted forms, in order:
/// - RFC 3339 with an offset (`2025-01-10T09:00:00Z`, `...+02:00`)
/// - naive date and time (`2025-01-10T09:00`, `2025-01-10T09:00:00.5`)
/// - bare date (`2025-01-10`), taken as UTC midnight
pub fn try_parse_moment_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, layout) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a timestamp the way it goes over the wire
pub fn format_moment(moment: &DateTime<Utc>) -> String {
    moment.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Truncate an instant to its calendar day in `tz`.
///
/// Total over every instant: a shift past chrono's range clamps to
/// `NaiveDate::MIN` or `NaiveDate::MAX`, so [`EARLIEST`] stays the earliest day.
pub fn local_day<Tz: TimeZone>(moment: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    let utc = moment.naive_utc();
    let shift = tz.offset_from_utc_datetime(&utc).fix().local_minus_utc();
    match utc.checked_add_signed(Duration::seconds(i64::from(shift))) {
        Some(local) => local.date(),
        None if shift < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

/// Serde adapter for task timestamps.
///
/// Accepts strings in any form [`try_parse_moment`] understands, epoch
/// milliseconds, or `null`; everything unreadable becomes [`EARLIEST`].
pub mod lenient {
    use std::fmt;

    use chrono::{DateTime, Utc};
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::{format_moment, parse_moment, EARLIEST};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_moment(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        deserializer.deserialize_any(MomentVisitor)
    }

    struct MomentVisitor;

    impl<'de> Visitor<'de> for MomentVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a timestamp string or epoch milliseconds")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(parse_moment(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(DateTime::from_timestamp_millis(v).unwrap_or(EARLIEST))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(i64::try_from(v)
                .ok()
                .and_then(DateTime::from_timestamp_millis)
                .unwrap_or(EARLIEST))
        }

        #[allow(clippy::cast_possible_truncation)]
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if v.is_finite() {
                self.visit_i64(v as i64)
            } else {
                Ok(EARLIEST)
            }
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
            Ok(EARLIEST)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(EARLIEST)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(EARLIEST)
        }

        fn visit_some<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Timelike};

    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_moment("2025-01-10T09:30:00+02:00");
        assert_eq!(format_moment(&parsed), "2025-01-10T07:30:00Z");
    }

    #[test]
    fn test_parse_naive_in_zone() {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let parsed = try_parse_moment_in("2025-01-10T09:00", &tz).unwrap();
        assert_eq!(parsed.hour(), 6);

        let with_seconds = try_parse_moment_in("2025-01-10T09:00:15.250", &tz).unwrap();
        assert_eq!(with_seconds.second(), 15);
    }

    #[test]
    fn test_parse_bare_date_is_utc_midnight() {
        let parsed = parse_moment("2025-01-10");
        assert_eq!(format_moment(&parsed), "2025-01-10T00:00:00Z");
    }

    #[test]
    fn test_unparseable_is_earliest() {
        assert_eq!(parse_moment("not a date"), EARLIEST);
        assert_eq!(parse_moment(""), EARLIEST);
        assert!(parse_moment("2025-13-40") < parse_moment("1970-01-01"));
    }

    #[test]
    fn test_local_day_crosses_midnight() {
        let moment = parse_moment("2025-01-10T23:30:00Z");
        let ahead = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            local_day(&moment, &ahead),
            NaiveDate::from_ymd_opt(2025, 1, 11).unwrap()
        );
        assert_eq!(
            local_day(&moment, &Utc),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
    }

    #[test]
    fn test_local_day_at_range_edges() {
        let behind = FixedOffset::west_opt(5 * 3600).unwrap();
        let ahead = FixedOffset::east_opt(5 * 3600).unwrap();

        assert_eq!(local_day(&EARLIEST, &behind), NaiveDate::MIN);
        assert_eq!(local_day(&EARLIEST, &ahead), NaiveDate::MIN);
        assert_eq!(local_day(&EARLIEST, &Utc), NaiveDate::MIN);
        assert_eq!(local_day(&DateTime::<Utc>::MAX_UTC, &ahead), NaiveDate::MAX);
        assert_eq!(local_day(&parse_moment("garbage"), &behind), NaiveDate::MIN);
    }

    #[derive(serde::Deserialize)]
    struct Holder {
        #[serde(with = "lenient")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_lenient_deserialize() {
        let holder: Holder = serde_json::from_str(r#"{"at": "2025-01-10T09:00:00Z"}"#).unwrap();
        assert_eq!(format_moment(&holder.at), "2025-01-10T09:00:00Z");

        let holder: Holder = serde_json::from_str(r#"{"at": 0}"#).unwrap();
        assert_eq!(format_moment(&holder.at), "1970-01-01T00:00:00Z");

        let holder: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert_eq!(holder.at, EARLIEST);

        let holder: Holder = serde_json::from_str(r#"{"at": "garbage"}"#).unwrap();
        assert_eq!(holder.at, EARLIEST);
    }
}
