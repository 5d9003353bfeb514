//! Local calendar-date handling.
//!
//! Every date in the engine is a calendar day (`NaiveDate`) in the user's
//! local frame. `yyyy-MM-dd` strings are read from their numeric components and
//! never routed through a UTC instant, so a date never shifts by one day in
//! timezones west of UTC.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Format used for day-map keys and every date crossing the library boundary.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats accepted by the generic fallback for strings carrying a time.
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Anything that can be read as a local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    /// A date string, strict `yyyy-MM-dd` or a generic timestamp.
    Text(&'a str),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// An already-parsed calendar day.
    Date(NaiveDate),
    /// A local wall-clock timestamp.
    DateTime(NaiveDateTime),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl From<i64> for DateInput<'_> {
    fn from(value: i64) -> Self {
        Self::EpochMillis(value)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput<'_> {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.with_timezone(&Local).naive_local())
    }
}

/// Parse a date-like input as a local calendar day.
///
/// Returns `None` where a JS-style host would produce an "Invalid Date".
/// There is no error path; callers skip `None` values.
pub fn parse_local_date<'a>(input: impl Into<DateInput<'a>>) -> Option<NaiveDate> {
    match input.into() {
        DateInput::Text(text) => parse_text(text),
        DateInput::EpochMillis(millis) => Local
            .timestamp_millis_opt(millis)
            .single()
            .map(|dt| dt.date_naive()),
        DateInput::Date(date) => Some(date),
        DateInput::DateTime(dt) => Some(dt.date()),
    }
}

fn parse_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if is_strict_day(text) {
        return from_components(text);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}

fn is_strict_day(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn from_components(text: &str) -> Option<NaiveDate> {
    let year: i32 = text[0..4].parse().ok()?;
    let month: u32 = text[5..7].parse().ok()?;
    let day: u32 = text[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Normalize a stored date field to its calendar day.
///
/// Fields may carry a time component (`2024-01-05T10:00:00Z`). The leading
/// `yyyy-MM-dd` is taken as written; only strings without one go through the
/// generic parser.
pub fn day_key(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    match value.get(0..10) {
        Some(prefix) if is_strict_day(prefix) => from_components(prefix),
        _ => parse_local_date(value),
    }
}

/// Render a day as a `yyyy-MM-dd` key.
pub fn format_day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Today's date on the local wall clock.
///
/// Only composition roots (the CLI) read the clock; the engine takes the
/// as-of date as a parameter.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// `date + days`.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Weekday index with `0 = Sunday ... 6 = Saturday`.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Every day from `start` to `end`, inclusive. Empty when `end < start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// First day of a calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn offset(self, date: NaiveDate) -> i64 {
        let weekday = date.weekday();
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday() as i64,
            WeekStart::Monday => weekday.num_days_from_monday() as i64,
        }
    }
}

/// Visible days of a month view: whole weeks covering the month.
///
/// Returns `None` for an invalid year/month.
pub fn month_view_days(year: i32, month: u32, week_start: WeekStart) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = add_days(next_month, -1);

    let start = add_days(first, -week_start.offset(first));
    let end = add_days(last, 6 - week_start.offset(last));
    Some(days_between(start, end))
}
