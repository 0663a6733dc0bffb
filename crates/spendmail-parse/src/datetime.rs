//! Date and time token extraction.
//!
//! Transaction emails carry local wall-clock timestamps with no zone, split
//! into a date token and a time token that templates combine into one
//! [`NaiveDateTime`]. Two date layouts circulate across the supported
//! senders: numeric `DD/MM/YYYY` and the short `DD Mon YY` form ("17 Nov
//! 25"). The numeric layout is tried first; candidates that do not form a
//! valid calendar date fall through to the next match.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

#[allow(clippy::unwrap_used)]
static DATE_SLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap());

#[allow(clippy::unwrap_used)]
static DATE_MONTH_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+(\d{2,4})\b")
        .unwrap()
});

#[allow(clippy::unwrap_used)]
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})(?::(\d{2}))?\b").unwrap());

/// Resolves a 3-letter English month name to its number.
fn month_number(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

/// Widens a 2-digit year to the 2000s. "25" means 2025, never 1925.
const fn widen_year(year: i32) -> i32 {
    if year < 100 { year + 2000 } else { year }
}

/// Finds the first date token in `text`.
///
/// `DD/MM/YYYY` candidates are scanned before `DD Mon YY` ones; within a
/// layout, the first candidate that is a real calendar date wins.
#[must_use]
pub fn find_date(text: &str) -> Option<NaiveDate> {
    for caps in DATE_SLASH_RE.captures_iter(text) {
        let day = caps[1].parse::<u32>().ok()?;
        let month = caps[2].parse::<u32>().ok()?;
        let year = caps[3].parse::<i32>().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }
    for caps in DATE_MONTH_NAME_RE.captures_iter(text) {
        let day = caps[1].parse::<u32>().ok()?;
        let Some(month) = month_number(&caps[2]) else {
            continue;
        };
        let year = widen_year(caps[3].parse::<i32>().ok()?);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }
    None
}

/// Finds the first time-of-day token (`HH:MM` or `HH:MM:SS`) in `text`.
#[must_use]
pub fn find_time(text: &str) -> Option<NaiveTime> {
    for caps in TIME_RE.captures_iter(text) {
        let hour = caps[1].parse::<u32>().ok()?;
        let minute = caps[2].parse::<u32>().ok()?;
        let second = caps
            .get(3)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        if let Some(time) = NaiveTime::from_hms_opt(hour, minute, second) {
            return Some(time);
        }
    }
    None
}

/// Finds and combines a date token and a time token into one timestamp.
///
/// Both tokens are required; a body carrying only one of them yields `None`.
#[must_use]
pub fn find_datetime(text: &str) -> Option<NaiveDateTime> {
    let date = find_date(text)?;
    let time = find_time(text)?;
    Some(date.and_time(time))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_layout() {
        let date = find_date("Vào lúc: 14:30 08/11/2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 8).unwrap());
    }

    #[test]
    fn test_month_name_layout_widens_two_digit_year() {
        let date = find_date("08 Nov 25").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 8).unwrap());

        let date = find_date("17 Nov 25").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 17).unwrap());
    }

    #[test]
    fn test_month_name_layout_accepts_full_year() {
        let date = find_date("17 Nov 2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 17).unwrap());
    }

    #[test]
    fn test_month_name_is_case_insensitive() {
        let date = find_date("17 NOV 25").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 17).unwrap());
    }

    #[test]
    fn test_slash_layout_wins_when_both_present() {
        let date = find_date("02 Jan 25 ... 08/11/2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 8).unwrap());
    }

    #[test]
    fn test_invalid_calendar_date_falls_through() {
        // 31/02 is not a real date; the month-name token further on is.
        let date = find_date("31/02/2025 then 17 Nov 25").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 17).unwrap());
    }

    #[test]
    fn test_no_date_token() {
        assert_eq!(find_date("no dates here"), None);
        assert_eq!(find_date("32/13/2025"), None);
    }

    #[test]
    fn test_time_token() {
        assert_eq!(
            find_time("Vào lúc: 14:30 08/11/2025"),
            NaiveTime::from_hms_opt(14, 30, 0)
        );
        assert_eq!(
            find_time("at 09:05:42"),
            NaiveTime::from_hms_opt(9, 5, 42)
        );
    }

    #[test]
    fn test_invalid_time_falls_through() {
        assert_eq!(find_time("99:99 then 14:30"), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(find_time("no time"), None);
    }

    #[test]
    fn test_combined_timestamp() {
        let ts = find_datetime("Vào lúc: 14:30 08/11/2025").unwrap();
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2025, 11, 8)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_combined_requires_both_tokens() {
        assert_eq!(find_datetime("08/11/2025 only"), None);
        assert_eq!(find_datetime("14:30 only"), None);
    }
}
