//! Sales report filter tests
//!
//! The report window maps calendar dates onto half-open timestamp ranges:
//! `startDate` becomes an inclusive lower bound at midnight, `endDate`
//! becomes an exclusive upper bound at midnight of the following day.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

fn day_end_exclusive(date: NaiveDate) -> DateTime<Utc> {
    day_start(date.checked_add_days(Days::new(1)).unwrap())
}

fn in_window(ts: DateTime<Utc>, start: NaiveDate, end: NaiveDate) -> bool {
    day_start(start) <= ts && ts < day_end_exclusive(end)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// startDate=2025-01-10&endDate=2025-01-10 covers the whole day
    #[test]
    fn test_single_day_window_includes_last_second() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

        let last_second = Utc.with_ymd_and_hms(2025, 1, 10, 23, 59, 59).unwrap();
        assert!(in_window(last_second, day, day));

        let midnight = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        assert!(in_window(midnight, day, day));
    }

    /// Midnight of the day after endDate is excluded
    #[test]
    fn test_next_day_midnight_excluded() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let next_midnight = Utc.with_ymd_and_hms(2025, 1, 11, 0, 0, 0).unwrap();

        assert!(!in_window(next_midnight, day, day));
    }

    #[test]
    fn test_before_start_excluded() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let before = Utc.with_ymd_and_hms(2025, 1, 9, 23, 59, 59).unwrap();

        assert!(!in_window(before, day, day));
    }

    #[test]
    fn test_multi_day_window() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();

        let middle = Utc.with_ymd_and_hms(2025, 1, 11, 12, 0, 0).unwrap();
        assert!(in_window(middle, start, end));

        let after = Utc.with_ymd_and_hms(2025, 1, 13, 0, 0, 0).unwrap();
        assert!(!in_window(after, start, end));
    }

    /// Payment method filtering is an exact match; an empty filter value
    /// means "no filter"
    #[test]
    fn test_payment_method_filter_semantics() {
        let matches = |filter: &str, value: Option<&str>| -> bool {
            filter.is_empty() || value == Some(filter)
        };

        assert!(matches("", Some("cash")));
        assert!(matches("", None));
        assert!(matches("cash", Some("cash")));
        assert!(!matches("cash", Some("card")));
        assert!(!matches("cash", None));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (2020i32..=2030, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every second of the end date is inside the window
        #[test]
        fn prop_end_date_fully_included(
            date in date_strategy(),
            hour in 0u32..24,
            minute in 0u32..60,
            second in 0u32..60
        ) {
            let ts = date
                .and_hms_opt(hour, minute, second)
                .unwrap()
                .and_utc();

            prop_assert!(in_window(ts, date, date));
        }

        /// The window bounds form a half-open interval of whole days
        #[test]
        fn prop_window_is_half_open(date in date_strategy()) {
            let start = day_start(date);
            let end = day_end_exclusive(date);

            prop_assert!(in_window(start, date, date));
            prop_assert!(!in_window(end, date, date));
            prop_assert_eq!(end - start, chrono::Duration::days(1));
        }

        /// A window never includes anything before its start day
        #[test]
        fn prop_nothing_before_start(start in date_strategy(), end in date_strategy()) {
            prop_assume!(start <= end);

            let just_before = day_start(start) - chrono::Duration::seconds(1);
            prop_assert!(!in_window(just_before, start, end));
        }
    }
}
