//! Recognition of the date expression that may open a journal line.
//!
//! A line can start with `today`, `yesterday`, a weekday name, or a
//! `YYYY-MM-DD` / `YYYY-MM` / `YYYY` token, optionally followed by an `HH.MM`
//! time of day. Anything else means the line has no date and is entirely
//! content, dated at the reference instant.

use crate::constants::{
    DATE_FORMAT_ISO, DATE_TEMPLATE_DAY, DATE_TEMPLATE_MONTH, DATE_TEMPLATE_YEAR, KEYWORD_TODAY,
    KEYWORD_YESTERDAY, TIME_TEMPLATE,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::fmt;
use tracing::debug;

/// Granularity at which a parsed date is considered accurate.
///
/// Variants are ordered finest to coarsest, so `Resolution::Minute <
/// Resolution::Year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resolution {
    /// A date with an explicit `HH.MM` time.
    Minute,
    /// A calendar day.
    Day,
    /// A calendar month.
    Month,
    /// A calendar year.
    Year,
    /// No date expression was recognised.
    Unresolved,
}

impl Resolution {
    /// Lower-case name used in messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Minute => "minute",
            Resolution::Day => "day",
            Resolution::Month => "month",
            Resolution::Year => "year",
            Resolution::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`parse_date_expression`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    /// The input with the consumed date (and time) tokens removed.
    pub remaining: String,
    /// The resolved instant.
    pub occurred_at: NaiveDateTime,
    /// How precisely `occurred_at` was specified.
    pub resolution: Resolution,
}

/// Resolves the leading date expression of `raw` relative to `now`.
///
/// Never fails: input without a recognised date resolves to `now` with
/// [`Resolution::Unresolved`] and keeps the whole line as remaining text.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use daybook::journal_core::{parse_date_expression, Resolution};
///
/// let now = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(14, 30, 0).unwrap();
///
/// let parsed = parse_date_expression("2023-05-01 09.30 Wrote code.", now);
/// assert_eq!(parsed.resolution, Resolution::Minute);
/// assert_eq!(parsed.occurred_at.to_string(), "2023-05-01 09:30:00");
/// assert_eq!(parsed.remaining, "Wrote code.");
///
/// let parsed = parse_date_expression("Just a thought", now);
/// assert_eq!(parsed.resolution, Resolution::Unresolved);
/// assert_eq!(parsed.occurred_at, now);
/// assert_eq!(parsed.remaining, "Just a thought");
/// ```
pub fn parse_date_expression(raw: &str, now: NaiveDateTime) -> ParsedDate {
    let mut tokens = raw.split_whitespace();

    let resolved = tokens
        .next()
        .and_then(|first| resolve_leading_token(first, now));

    let Some((date, resolution)) = resolved else {
        debug!("No date expression recognised, dating entry now");
        return ParsedDate {
            remaining: raw.to_string(),
            occurred_at: now,
            resolution: Resolution::Unresolved,
        };
    };

    // An `HH.MM` token right after the date pins the minute
    if let Some(time) = tokens.next().and_then(parse_time_of_day) {
        debug!("Date expression resolved at minute resolution");
        return ParsedDate {
            remaining: skip_tokens(raw, 2).to_string(),
            occurred_at: date.date().and_time(time),
            resolution: Resolution::Minute,
        };
    }

    debug!("Date expression resolved at {} resolution", resolution);
    ParsedDate {
        remaining: skip_tokens(raw, 1).to_string(),
        occurred_at: date,
        resolution,
    }
}

/// Parses a plain `YYYY-MM-DD` date, the only form accepted for range bounds.
///
/// ```
/// use daybook::journal_core::parse_plain_date;
///
/// assert!(parse_plain_date("2023-05-01").is_some());
/// assert!(parse_plain_date("2023-5-1").is_none());
/// assert!(parse_plain_date("2023-02-30").is_none());
/// ```
pub fn parse_plain_date(token: &str) -> Option<NaiveDate> {
    if !matches_template(token, DATE_TEMPLATE_DAY) {
        return None;
    }
    NaiveDate::parse_from_str(token, DATE_FORMAT_ISO).ok()
}

fn resolve_leading_token(token: &str, now: NaiveDateTime) -> Option<(NaiveDateTime, Resolution)> {
    let lowered = token.to_lowercase();

    if lowered == KEYWORD_YESTERDAY {
        return Some((now - Duration::days(1), Resolution::Day));
    }
    if lowered == KEYWORD_TODAY {
        return Some((now, Resolution::Day));
    }

    if let Some(date) = parse_calendar_token(token) {
        return Some(date);
    }

    parse_weekday(&lowered).map(|weekday| (most_recent(weekday, now), Resolution::Day))
}

/// Tries the day, month and year templates in that order.
fn parse_calendar_token(token: &str) -> Option<(NaiveDateTime, Resolution)> {
    let (date, resolution) = if let Some(date) = parse_plain_date(token) {
        (date, Resolution::Day)
    } else if matches_template(token, DATE_TEMPLATE_MONTH) {
        let year = token[0..4].parse().ok()?;
        let month = token[5..7].parse().ok()?;
        (NaiveDate::from_ymd_opt(year, month, 1)?, Resolution::Month)
    } else if matches_template(token, DATE_TEMPLATE_YEAR) {
        let year = token.parse().ok()?;
        (NaiveDate::from_ymd_opt(year, 1, 1)?, Resolution::Year)
    } else {
        return None;
    };

    Some((date.and_hms_opt(0, 0, 0)?, resolution))
}

fn parse_weekday(lowered: &str) -> Option<Weekday> {
    match lowered {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// The latest instant at or before `now` falling on `weekday`, keeping the time of day.
fn most_recent(weekday: Weekday, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    let days_back = (today + 7 - target) % 7;
    now - Duration::days(i64::from(days_back))
}

fn parse_time_of_day(token: &str) -> Option<NaiveTime> {
    if !matches_template(token, TIME_TEMPLATE) {
        return None;
    }
    let hour = token[0..2].parse().ok()?;
    let minute = token[3..5].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Checks `token` against a template where `d` stands for an ASCII digit and
/// every other character must match literally.
fn matches_template(token: &str, template: &str) -> bool {
    token.len() == template.len()
        && token.bytes().zip(template.bytes()).all(|(t, p)| match p {
            b'd' => t.is_ascii_digit(),
            literal => t == literal,
        })
}

/// Drops the first `count` whitespace-separated tokens, keeping the spacing of the rest.
fn skip_tokens(raw: &str, count: usize) -> &str {
    let mut rest = raw.trim_start();
    for _ in 0..count {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-15 is a Monday
    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 30, 45)
            .unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_full_date_resolves_to_midnight() {
        let parsed = parse_date_expression("2023-05-01 Wrote code.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Day);
        assert_eq!(parsed.occurred_at, at(2023, 5, 1, 0, 0, 0));
        assert_eq!(parsed.remaining, "Wrote code.");
    }

    #[test]
    fn test_full_date_with_time() {
        let parsed = parse_date_expression("2023-05-01 09.30 Wrote code.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Minute);
        assert_eq!(parsed.occurred_at, at(2023, 5, 1, 9, 30, 0));
        assert_eq!(parsed.remaining, "Wrote code.");
    }

    #[test]
    fn test_year_month() {
        let parsed = parse_date_expression("2023-05 Spring cleaning.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Month);
        assert_eq!(parsed.occurred_at, at(2023, 5, 1, 0, 0, 0));
        assert_eq!(parsed.remaining, "Spring cleaning.");
    }

    #[test]
    fn test_year() {
        let parsed = parse_date_expression("2021 A long year.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Year);
        assert_eq!(parsed.occurred_at, at(2021, 1, 1, 0, 0, 0));
        assert_eq!(parsed.remaining, "A long year.");
    }

    #[test]
    fn test_time_refines_month_resolution() {
        let parsed = parse_date_expression("2023-05 08.15 Standup.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Minute);
        assert_eq!(parsed.occurred_at, at(2023, 5, 1, 8, 15, 0));
        assert_eq!(parsed.remaining, "Standup.");
    }

    #[test]
    fn test_today_and_yesterday() {
        let parsed = parse_date_expression("today Went running.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Day);
        assert_eq!(parsed.occurred_at, fixed_now());
        assert_eq!(parsed.remaining, "Went running.");

        let parsed = parse_date_expression("Yesterday Rested.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Day);
        assert_eq!(parsed.occurred_at, at(2024, 1, 14, 14, 30, 45));
        assert_eq!(parsed.remaining, "Rested.");
    }

    #[test]
    fn test_yesterday_crosses_month_boundary() {
        let now = at(2024, 3, 1, 7, 0, 0);
        let parsed = parse_date_expression("yesterday Leap day.", now);
        assert_eq!(parsed.occurred_at, at(2024, 2, 29, 7, 0, 0));
    }

    #[test]
    fn test_today_with_time() {
        let parsed = parse_date_expression("today 07.05 Early start.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Minute);
        assert_eq!(parsed.occurred_at, at(2024, 1, 15, 7, 5, 0));
    }

    #[test]
    fn test_weekday_walks_backwards() {
        let parsed = parse_date_expression("friday Movie night.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Day);
        assert_eq!(parsed.occurred_at.date(), NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
        assert_eq!(parsed.remaining, "Movie night.");

        let parsed = parse_date_expression("Tuesday Dentist.", fixed_now());
        assert_eq!(parsed.occurred_at.date(), NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
    }

    #[test]
    fn test_weekday_matching_today_is_today() {
        let parsed = parse_date_expression("MONDAY Back to work.", fixed_now());
        assert_eq!(parsed.occurred_at, fixed_now());
    }

    #[test]
    fn test_malformed_time_is_not_consumed() {
        for token in ["25.00", "12.60", "9.30", "09:30", "0930"] {
            let raw = format!("2023-05-01 {} Wrote code.", token);
            let parsed = parse_date_expression(&raw, fixed_now());
            assert_eq!(parsed.resolution, Resolution::Day, "token {}", token);
            assert_eq!(parsed.occurred_at, at(2023, 5, 1, 0, 0, 0));
            assert_eq!(parsed.remaining, format!("{} Wrote code.", token));
        }
    }

    #[test]
    fn test_unrecognised_first_token_keeps_whole_line() {
        let parsed = parse_date_expression("Met Anna for lunch.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Unresolved);
        assert_eq!(parsed.occurred_at, fixed_now());
        assert_eq!(parsed.remaining, "Met Anna for lunch.");
    }

    #[test]
    fn test_time_without_date_is_ignored() {
        let parsed = parse_date_expression("Lunch 12.30 was long.", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Unresolved);
        assert_eq!(parsed.remaining, "Lunch 12.30 was long.");
    }

    #[test]
    fn test_invalid_calendar_values_are_unresolved() {
        for raw in ["2023-02-30 x", "2023-13 x", "2023-5-1 x", "23-05-01 x", "20230501 x"] {
            let parsed = parse_date_expression(raw, fixed_now());
            assert_eq!(parsed.resolution, Resolution::Unresolved, "input {}", raw);
            assert_eq!(parsed.remaining, raw);
        }
    }

    #[test]
    fn test_empty_and_blank_input() {
        let parsed = parse_date_expression("", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Unresolved);
        assert_eq!(parsed.remaining, "");

        let parsed = parse_date_expression("today", fixed_now());
        assert_eq!(parsed.resolution, Resolution::Day);
        assert_eq!(parsed.remaining, "");
    }

    #[test]
    fn test_remaining_preserves_inner_spacing() {
        let parsed = parse_date_expression("  2023-05-01   09.30   Two  spaces. ", fixed_now());
        assert_eq!(parsed.remaining, "Two  spaces. ");
    }

    #[test]
    fn test_resolution_ordering() {
        assert!(Resolution::Minute < Resolution::Day);
        assert!(Resolution::Day < Resolution::Month);
        assert!(Resolution::Month < Resolution::Year);
        assert!(Resolution::Year < Resolution::Unresolved);
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_plain_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert!(parse_plain_date("2023-02-29").is_none());
        assert!(parse_plain_date("today").is_none());
        assert!(parse_plain_date("2023-05").is_none());
    }
}
