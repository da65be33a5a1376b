// ============================================================
// DATE NORMALIZER
// ============================================================
// Calendar dates (D/M/Y or Y-M-D) and spreadsheet serial dates
// to canonical DD/MM/YYYY

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

// Prefix match only: "5/1/2024 10:30" is still a day-first date
static DAY_FIRST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4}").unwrap());

static YEAR_FIRST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}[/-][0-9]{1,2}[/-][0-9]{1,2}$").unwrap());

/// Serial numbers strictly inside this range are read as spreadsheet dates
const SERIAL_LOWER_BOUND: f64 = 40_000.0;
const SERIAL_UPPER_BOUND: f64 = 60_000.0;

/// Serial number of 1970-01-01 (serial epoch is 1899-12-30)
const UNIX_EPOCH_SERIAL: f64 = 25_569.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Parse a token as a date and render it as `DD/MM/YYYY`
pub fn try_parse_date(token: &str) -> Option<String> {
    parse_calendar_token(token)
        .or_else(|| parse_serial_date(token))
        .map(|date| format_date(&date))
}

/// `D/M/Y`, `D-M-Y`, `Y/M/D` or `Y-M-D`. The layout is Y-M-D when the first
/// segment has four digits.
///
/// Day-first tokens may carry a trailing time or note; the year is read from
/// the leading digits of the third segment and the rest is ignored.
/// Year-first tokens must match whole.
pub fn parse_calendar_token(token: &str) -> Option<NaiveDate> {
    if !DAY_FIRST_PATTERN.is_match(token) && !YEAR_FIRST_PATTERN.is_match(token) {
        return None;
    }

    let mut parts = token.split(['/', '-']);
    let (first, second, third) = (parts.next()?, parts.next()?, parts.next()?);

    let (year, month, day) = if first.len() == 4 {
        (first, second, third)
    } else {
        (third, second, first)
    };

    calendar_date(
        leading_digits(day).parse().ok()?,
        leading_digits(month).parse().ok()?,
        leading_digits(year).parse().ok()?,
    )
}

fn leading_digits(segment: &str) -> &str {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    &segment[..end]
}

/// Spreadsheet serial number to a calendar date (UTC)
pub fn parse_serial_date(token: &str) -> Option<NaiveDate> {
    let serial: f64 = token.trim().parse().ok()?;
    if !(serial > SERIAL_LOWER_BOUND && serial < SERIAL_UPPER_BOUND) {
        return None;
    }

    let millis = ((serial - UNIX_EPOCH_SERIAL) * MILLIS_PER_DAY).round() as i64;
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

/// Build a date from its parts. Years below 100 belong to the 1900s.
/// Returns `None` for impossible dates such as 31/04.
pub fn calendar_date(day: u32, month: u32, year: i32) -> Option<NaiveDate> {
    let year = if (0..100).contains(&year) {
        1900 + year
    } else {
        year
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Read back a harmonized date cell: the first `;`-separated value,
/// split on `/` into day, month and year.
pub fn parse_display_date(value: &str) -> Option<NaiveDate> {
    let first = value.split(';').next().unwrap_or_default().trim();
    let parts: Vec<&str> = first.split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    calendar_date(day.parse().ok()?, month.parse().ok()?, year.parse().ok()?)
}

pub fn format_date(date: &NaiveDate) -> String {
    format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
}
