use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Parses a `YYYY-MM-DD` date, tolerating trailing time components.
/// Returns `None` instead of failing on malformed input.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let prefix = value.trim().get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// A workday is a Monday-Friday that is not a recognized public holiday.
pub fn is_workday(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(&date)
}

/// Counts workdays in the inclusive `[start, end]` range.
///
/// Returns 0 when either date is unparseable or the range is inverted;
/// never panics, never goes negative.
pub fn count_workdays(start: &str, end: &str, holidays: &HashSet<NaiveDate>) -> u32 {
    let (Some(start), Some(end)) = (parse_iso_date(start), parse_iso_date(end)) else {
        return 0;
    };
    count_workdays_between(start, end, holidays)
}

pub fn count_workdays_between(start: NaiveDate, end: NaiveDate, holidays: &HashSet<NaiveDate>) -> u32 {
    if start > end {
        return 0;
    }
    let mut count = 0;
    let mut cursor = start;
    while cursor <= end {
        if is_workday(cursor, holidays) {
            count += 1;
        }
        let Some(next) = cursor.succ_opt() else {
            break;
        };
        cursor = next;
    }
    count
}

/// Leave-balance preview shown next to the draft form, floored at zero.
pub fn remaining_days(available: i32, workdays: u32) -> i32 {
    (available - workdays as i32).max(0)
}
