//! Calendar comparisons between two instants.
//!
//! Month comparison includes the year: May 2023 and May 2024 are different months.

use super::date_expr::Resolution;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Same calendar day and the same hour and minute.
pub fn same_minute(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    same_day(a, b) && a.hour() == b.hour() && a.minute() == b.minute()
}

/// Same calendar day.
pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Same month of the same year.
pub fn same_month(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Same calendar year.
pub fn same_year(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.year() == b.year()
}

/// `current` lies strictly after `start` and strictly before `end`.
pub fn strictly_between(current: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    current > start && current < end
}

/// Compares two instants at the given resolution.
///
/// Returns `None` for [`Resolution::Unresolved`], which has no granularity to
/// compare at.
///
/// ```
/// use chrono::NaiveDate;
/// use daybook::journal_core::matching::matches_at;
/// use daybook::journal_core::Resolution;
///
/// let a = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let b = NaiveDate::from_ymd_opt(2023, 5, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// assert_eq!(matches_at(a, b, Resolution::Month), Some(true));
/// assert_eq!(matches_at(a, b, Resolution::Day), Some(false));
/// assert_eq!(matches_at(a, b, Resolution::Unresolved), None);
/// ```
pub fn matches_at(a: NaiveDateTime, b: NaiveDateTime, resolution: Resolution) -> Option<bool> {
    match resolution {
        Resolution::Minute => Some(same_minute(a, b)),
        Resolution::Day => Some(same_day(a, b)),
        Resolution::Month => Some(same_month(a, b)),
        Resolution::Year => Some(same_year(a, b)),
        Resolution::Unresolved => None,
    }
}
