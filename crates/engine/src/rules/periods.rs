//! Calendar math for period-completion bonuses
//!
//! A period is complete when every required working day (Mon-Fri) inside it
//! has a submission. Weeks run Monday to Sunday, months are calendar months,
//! fortnights are fixed 14-day windows counted from an anchor Monday so that
//! every employee shares the same fortnight boundaries.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Monday that all fortnight windows are counted from
pub fn fortnight_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid anchor date")
}

/// Monday and Sunday of the week containing `date`
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    (start, start + Duration::days(6))
}

/// First and last day of the 14-day fortnight window containing `date`
pub fn fortnight_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = (date - fortnight_anchor()).num_days().div_euclid(14);
    let start = fortnight_anchor() + Duration::days(offset * 14);
    (start, start + Duration::days(13))
}

/// First and last day of the calendar month containing `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).expect("day 1 always valid");
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
    .expect("first of month always valid");
    (first, next_month - Duration::days(1))
}

/// Number of required working days (Mon-Fri) in [start, end]
pub fn weekday_count(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut count = 0;
    let mut day = start;
    while day <= end {
        if !is_weekend(day) {
            count += 1;
        }
        day += Duration::days(1);
    }
    count
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_bounds_monday_to_sunday() {
        // 2025-03-05 is a Wednesday
        let (start, end) = week_bounds(date(2025, 3, 5));
        assert_eq!(start, date(2025, 3, 3));
        assert_eq!(end, date(2025, 3, 9));

        // A Monday is its own week start
        let (start, _) = week_bounds(date(2025, 3, 3));
        assert_eq!(start, date(2025, 3, 3));
    }

    #[test]
    fn test_fortnight_bounds_follow_the_anchor() {
        // The anchor fortnight
        let (start, end) = fortnight_bounds(date(2024, 1, 14));
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 1, 14));

        // Day 15 rolls into the next window
        let (start, _) = fortnight_bounds(date(2024, 1, 15));
        assert_eq!(start, date(2024, 1, 15));

        // Dates before the anchor still land in a well-formed window
        let (start, end) = fortnight_bounds(date(2023, 12, 31));
        assert_eq!(start, date(2023, 12, 18));
        assert_eq!(end, date(2023, 12, 31));
    }

    #[test]
    fn test_month_bounds_handle_leap_february_and_december() {
        let (start, end) = month_bounds(date(2024, 2, 10));
        assert_eq!(start, date(2024, 2, 1));
        assert_eq!(end, date(2024, 2, 29));

        let (start, end) = month_bounds(date(2025, 12, 25));
        assert_eq!(start, date(2025, 12, 1));
        assert_eq!(end, date(2025, 12, 31));
    }

    #[test]
    fn test_weekday_count() {
        // One full week has five working days
        assert_eq!(weekday_count(date(2025, 3, 3), date(2025, 3, 9)), 5);
        // February 2024: 21 weekdays
        assert_eq!(weekday_count(date(2024, 2, 1), date(2024, 2, 29)), 21);
        // A weekend-only range has none
        assert_eq!(weekday_count(date(2025, 3, 8), date(2025, 3, 9)), 0);
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date(2025, 3, 8)));
        assert!(is_weekend(date(2025, 3, 9)));
        assert!(!is_weekend(date(2025, 3, 10)));
    }
}
