//! Day typing and time-of-day overrides for rate lookups.
//!
//! The effective rate-table key for a slot occurrence is its time category
//! (early morning or late night) when one applies, and its day type
//! (public holiday, Saturday, Sunday, weekday) otherwise. Public holidays
//! override weekday logic via the state-keyed calendar.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::HolidayCalendar;
use crate::models::AuState;

/// Represents the type of day for rate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// A public holiday in the pharmacy's state; overrides the weekday.
    PublicHoliday,
}

impl DayType {
    /// Returns the rate-table key for this day type.
    pub fn key(self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
            DayType::PublicHoliday => "public_holiday",
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Time-of-day override categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeCategory {
    /// The slot starts before 07:00.
    EarlyMorning,
    /// The slot ends after 20:00.
    LateNight,
}

impl TimeCategory {
    /// Returns the rate-table key for this time category.
    pub fn key(self) -> &'static str {
        match self {
            TimeCategory::EarlyMorning => "early_morning",
            TimeCategory::LateNight => "late_night",
        }
    }
}

/// Slots starting before this time are early-morning slots.
pub fn early_morning_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).expect("valid cutoff time")
}

/// Slots ending after this time are late-night slots.
pub fn late_night_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).expect("valid cutoff time")
}

/// Determines the day type for a date in a state.
///
/// A date present in the state's public-holiday calendar is a
/// [`DayType::PublicHoliday`] regardless of its weekday.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use std::collections::HashMap;
/// use locum_engine::calculation::{get_day_type, DayType};
/// use locum_engine::config::HolidayCalendar;
/// use locum_engine::models::AuState;
///
/// let calendar = HolidayCalendar::new(HashMap::new());
/// // 2026-01-17 is a Saturday
/// let date = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(get_day_type(date, AuState::NSW, &calendar), DayType::Saturday);
/// ```
pub fn get_day_type(date: NaiveDate, state: AuState, holidays: &HolidayCalendar) -> DayType {
    if holidays.is_public_holiday(state.key(), date) {
        return DayType::PublicHoliday;
    }

    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// Determines the time-of-day override for a slot window, if any.
///
/// Early morning wins when a window qualifies for both categories.
pub fn get_time_category(start: NaiveTime, end: NaiveTime) -> Option<TimeCategory> {
    if start < early_morning_cutoff() {
        Some(TimeCategory::EarlyMorning)
    } else if end > late_night_cutoff() {
        Some(TimeCategory::LateNight)
    } else {
        None
    }
}

/// Returns the effective rate-table lookup key for an occurrence.
///
/// The time category takes precedence over the day type.
pub fn lookup_key(day_type: DayType, time_category: Option<TimeCategory>) -> &'static str {
    match time_category {
        Some(category) => category.key(),
        None => day_type.key(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn empty_calendar() -> HolidayCalendar {
        HolidayCalendar::new(HashMap::new())
    }

    fn nsw_calendar() -> HolidayCalendar {
        let mut states = HashMap::new();
        states.insert("NSW".to_string(), vec![make_date("2026-01-26")]);
        HolidayCalendar::new(states)
    }

    #[test]
    fn test_monday_is_weekday() {
        // 2026-01-12 is a Monday
        let day = get_day_type(make_date("2026-01-12"), AuState::NSW, &empty_calendar());
        assert_eq!(day, DayType::Weekday);
    }

    #[test]
    fn test_saturday_is_saturday() {
        // 2026-01-17 is a Saturday
        let day = get_day_type(make_date("2026-01-17"), AuState::NSW, &empty_calendar());
        assert_eq!(day, DayType::Saturday);
    }

    #[test]
    fn test_sunday_is_sunday() {
        // 2026-01-18 is a Sunday
        let day = get_day_type(make_date("2026-01-18"), AuState::NSW, &empty_calendar());
        assert_eq!(day, DayType::Sunday);
    }

    #[test]
    fn test_holiday_overrides_weekday() {
        // 2026-01-26 is a Monday and Australia Day
        let day = get_day_type(make_date("2026-01-26"), AuState::NSW, &nsw_calendar());
        assert_eq!(day, DayType::PublicHoliday);
    }

    #[test]
    fn test_holiday_is_state_scoped() {
        let day = get_day_type(make_date("2026-01-26"), AuState::VIC, &nsw_calendar());
        assert_eq!(day, DayType::Weekday);
    }

    #[test]
    fn test_early_morning_start() {
        let category = get_time_category(make_time("06:00"), make_time("14:00"));
        assert_eq!(category, Some(TimeCategory::EarlyMorning));
    }

    #[test]
    fn test_start_exactly_at_cutoff_is_not_early() {
        let category = get_time_category(make_time("07:00"), make_time("15:00"));
        assert_eq!(category, None);
    }

    #[test]
    fn test_late_night_end() {
        let category = get_time_category(make_time("13:00"), make_time("21:00"));
        assert_eq!(category, Some(TimeCategory::LateNight));
    }

    #[test]
    fn test_end_exactly_at_cutoff_is_not_late() {
        let category = get_time_category(make_time("12:00"), make_time("20:00"));
        assert_eq!(category, None);
    }

    #[test]
    fn test_ordinary_window_has_no_category() {
        let category = get_time_category(make_time("09:00"), make_time("17:00"));
        assert_eq!(category, None);
    }

    #[test]
    fn test_early_morning_wins_over_late_night() {
        let category = get_time_category(make_time("06:00"), make_time("22:00"));
        assert_eq!(category, Some(TimeCategory::EarlyMorning));
    }

    #[test]
    fn test_lookup_key_prefers_time_category() {
        assert_eq!(
            lookup_key(DayType::Saturday, Some(TimeCategory::EarlyMorning)),
            "early_morning"
        );
        assert_eq!(lookup_key(DayType::Saturday, None), "saturday");
        assert_eq!(lookup_key(DayType::PublicHoliday, None), "public_holiday");
    }

    #[test]
    fn test_day_type_serialization() {
        assert_eq!(
            serde_json::to_string(&DayType::PublicHoliday).unwrap(),
            "\"public_holiday\""
        );
        let day: DayType = serde_json::from_str("\"saturday\"").unwrap();
        assert_eq!(day, DayType::Saturday);
    }

    #[test]
    fn test_day_type_display() {
        assert_eq!(DayType::Weekday.to_string(), "weekday");
        assert_eq!(DayType::PublicHoliday.to_string(), "public_holiday");
    }
}
