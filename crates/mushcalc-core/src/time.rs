//! Time system for attempt planning
//!
//! Provides the opaque time types the solver and calendar work with:
//! - `Timestamp` - A point in time, local-time aware, stored as UTC
//! - `MonthKey` - A calendar year-month used to group attempts
//!
//! Nothing outside this module touches the `chrono` API directly.

use crate::error::Error;
use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Utc,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Instants are kept within these years so every one has a local time
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// A point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Local>);

impl Timestamp {
    /// The current moment
    pub fn now() -> Self {
        Self(Local::now())
    }

    /// Create from a local wall-clock time
    ///
    /// Returns None for an invalid date or a time skipped by a DST jump.
    pub fn from_local(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        Local
            .with_ymd_and_hms(year, month, day, hour, min, sec)
            .earliest()
            .and_then(|local| Self::from_utc(local.with_timezone(&Utc)))
    }

    fn from_utc(utc: DateTime<Utc>) -> Option<Self> {
        YEAR_RANGE
            .contains(&utc.year())
            .then(|| Self(utc.with_timezone(&Local)))
    }

    /// Create from whole Unix seconds
    pub fn from_unix(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).and_then(Self::from_utc)
    }

    /// Parse an RFC 3339 string (any offset) into local time
    pub fn parse_rfc3339(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .and_then(|dt| Self::from_utc(dt.with_timezone(&Utc)))
    }

    /// Parse a local wall-clock time such as `2024-01-15 12:00`
    pub fn parse_local(s: &str) -> Option<Self> {
        const FORMATS: [&str; 4] = [
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M",
        ];
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            .and_then(|local| Self::from_utc(local.with_timezone(&Utc)))
    }

    /// Parse RFC 3339 or, failing that, local wall-clock time
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::parse_rfc3339(s).or_else(|| Self::parse_local(s))
    }

    /// Whole Unix seconds
    pub fn unix(&self) -> i64 {
        self.0.timestamp()
    }

    /// Whole seconds from `self` until `end`, truncated toward zero
    ///
    /// Negative when `end` is earlier.
    pub fn secs_until(&self, end: &Timestamp) -> i64 {
        (end.0 - self.0).num_seconds()
    }

    /// Shift by a (possibly fractional, possibly negative) number of seconds
    ///
    /// Precision is one millisecond. Returns None when the offset is not
    /// finite or the result falls outside years 1 to 9999.
    pub fn add_seconds(&self, secs: f64) -> Option<Self> {
        let millis = (secs * 1000.0).round();
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return None;
        }
        let delta = TimeDelta::try_milliseconds(millis as i64)?;
        self.0
            .with_timezone(&Utc)
            .checked_add_signed(delta)
            .and_then(Self::from_utc)
    }

    /// Shift back by a number of seconds
    pub fn sub_seconds(&self, secs: f64) -> Option<Self> {
        self.add_seconds(-secs)
    }

    /// The local calendar day this instant falls on
    pub fn day(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// The local calendar month this instant falls on
    pub fn month(&self) -> MonthKey {
        let day = self.day();
        MonthKey::from_date(day)
    }

    /// Day key in ISO form (`YYYY-MM-DD`)
    pub fn day_key(&self) -> String {
        self.day().format("%Y-%m-%d").to_string()
    }

    /// UTC form used for storage, e.g. `2024-01-01T12:00:00.000Z`
    pub fn to_utc_string(&self) -> String {
        self.0
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Chat timestamp tag (`<t:UNIX:f>`) that chat clients render in the
    /// reader's own time zone
    pub fn chat_tag(&self) -> String {
        format!("<t:{}:f>", self.unix())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_utc_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse_rfc3339(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// Whole seconds between two instants (negative when `end` precedes `start`)
pub fn seconds_between(start: &Timestamp, end: &Timestamp) -> i64 {
    start.secs_until(end)
}

/// Days in a month, None for an invalid month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    MonthKey::new(year, month).map(|key| key.days())
}

/// A calendar month (year, month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key; None unless `month` is 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of days in this month
    pub fn days(&self) -> u32 {
        self.iter_days().count() as u32
    }

    /// A day of this month, None when out of range
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Every day of this month in order
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month;
        self.day(1)
            .into_iter()
            .flat_map(|first| first.iter_days())
            .take_while(move |d| d.month() == month)
    }

    /// Human form, e.g. `January 2024`
    pub fn display_name(&self) -> String {
        match self.day(1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(h: u32, m: u32, s: u32) -> Timestamp {
        Timestamp::from_local(2024, 1, 1, h, m, s).unwrap()
    }

    #[test]
    fn test_secs_until() {
        assert_eq!(ts(12, 0, 0).secs_until(&ts(12, 16, 40)), 1000);
        assert_eq!(ts(12, 0, 0).secs_until(&ts(11, 0, 0)), -3600);
        assert_eq!(seconds_between(&ts(12, 0, 0), &ts(12, 0, 0)), 0);
    }

    #[test]
    fn test_add_seconds_fractional() {
        let start = ts(12, 0, 0);
        let later = start.add_seconds(1.5).unwrap();
        assert_eq!(start.secs_until(&later), 1);
        assert_eq!(later.sub_seconds(1.5), Some(start));
        assert!(start.add_seconds(f64::INFINITY).is_none());
        assert!(start.add_seconds(f64::NAN).is_none());
    }

    #[test]
    fn test_utc_string_round_trip() {
        let t = ts(10, 30, 0);
        let s = t.to_utc_string();
        assert!(s.ends_with('Z'));
        assert_eq!(Timestamp::parse_rfc3339(&s), Some(t));
    }

    #[test]
    fn test_parse_rfc3339_rejects_garbage() {
        assert!(Timestamp::parse_rfc3339("not a date").is_none());
        assert!(Timestamp::parse_rfc3339("").is_none());
    }

    #[test]
    fn test_parse_local_forms() {
        let expected = Timestamp::from_local(2024, 1, 15, 12, 0, 0);
        assert_eq!(Timestamp::parse("2024-01-15 12:00"), expected);
        assert_eq!(Timestamp::parse("2024-01-15T12:00:00"), expected);
        assert_eq!(Timestamp::parse(" 2024-01-15 12:00:00 "), expected);
        assert!(Timestamp::parse("2024-01-15").is_none());
        assert!(Timestamp::parse("2024-02-30 12:00").is_none());
    }

    #[test]
    fn test_unix_round_trip() {
        let t = Timestamp::from_unix(1_704_110_400).unwrap();
        assert_eq!(t.unix(), 1_704_110_400);
    }

    #[test]
    fn test_day_and_month_keys() {
        let t = Timestamp::from_local(2024, 3, 5, 23, 59, 0).unwrap();
        assert_eq!(t.day_key(), "2024-03-05");
        assert_eq!(t.month().to_string(), "2024-03");
    }

    #[test]
    fn test_instants_outside_year_range_rejected() {
        let max_utc = DateTime::<Utc>::MAX_UTC.timestamp();
        assert!(Timestamp::from_unix(max_utc).is_none());
        assert!(Timestamp::from_unix(max_utc - 10).is_none());
        // First second of year 10000
        assert!(Timestamp::from_unix(253_402_300_800).is_none());
        assert!(Timestamp::from_unix(253_402_300_800 - 86_400 * 2).is_some());

        assert!(Timestamp::parse_rfc3339("+10000-01-01T00:00:00+14:00").is_none());
        assert!(Timestamp::from_local(10000, 1, 1, 0, 0, 0).is_none());

        let late = Timestamp::from_local(9999, 12, 30, 0, 0, 0).unwrap();
        assert!(late.add_seconds(86_400.0 * 5.0).is_none());
        assert_eq!(late.month().to_string(), "9999-12");
    }

    #[test]
    fn test_chat_tag() {
        let t = Timestamp::from_unix(1_700_000_000).unwrap();
        assert_eq!(t.chat_tag(), "<t:1700000000:f>");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), Some(31));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 0), None);
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_month_key_parse() {
        let key: MonthKey = "2024-01".parse().unwrap();
        assert_eq!(key, MonthKey::new(2024, 1).unwrap());
        assert_eq!(key.display_name(), "January 2024");
        assert_eq!(key.iter_days().count(), 31);

        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-1".parse::<MonthKey>().is_err());
        assert!("january".parse::<MonthKey>().is_err());
        assert!("".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_key_ordering() {
        let dec = MonthKey::new(2023, 12).unwrap();
        let jan = MonthKey::new(2024, 1).unwrap();
        assert!(dec < jan);
    }
}
