//! Recurrence expansion for shift slots.
//!
//! This module turns a slot definition plus a query window into the ordered
//! list of concrete dates the slot occurs on. Expansion is a pure function:
//! identical inputs always yield identical, order-stable output, and the
//! scan is bounded by the window length.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::ShiftSlot;

/// Returns the weekday index of a date, 0 = Monday through 6 = Sunday.
fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Expands a recurrence definition into concrete dates within a window.
///
/// `anchor` is the first date the slot may occur on; `days` are the flagged
/// weekday indices (0 = Monday); `until` is the last date the recurrence may
/// produce. The result is chronologically ordered and deduplicated, and is
/// empty whenever the window, anchor, and `until` leave no room.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use locum_engine::recurrence::expand;
///
/// let anchor = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(); // Monday
/// let until = NaiveDate::from_ymd_opt(2026, 1, 21).unwrap();
/// let from = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let to = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
///
/// let dates = expand(anchor, &[0, 2], until, from, to);
/// assert_eq!(dates.len(), 4); // Mon 12, Wed 14, Mon 19, Wed 21
/// ```
pub fn expand(
    anchor: NaiveDate,
    days: &[u8],
    until: NaiveDate,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<NaiveDate> {
    debug_assert!(!days.is_empty(), "recurring slots must carry weekdays");

    let start = from.max(anchor);
    let end = to.min(until);
    if start > end {
        return Vec::new();
    }

    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        if days.contains(&weekday_index(current)) {
            dates.push(current);
        }
        match current.checked_add_days(Days::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }

    dates
}

/// Expands a slot into its concrete occurrence dates within `[from, to]`.
///
/// Non-recurring slots expand to at most their own anchor date. Recurring
/// slots expand through [`expand`], intersected with the slot's
/// `recurring_end_date`. The slot is expected to have passed
/// [`ShiftSlot::validate`]; a recurring slot without an end date produces
/// nothing.
pub fn expand_occurrences(slot: &ShiftSlot, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    if from > to {
        return Vec::new();
    }

    if !slot.is_recurring() {
        if slot.date >= from && slot.date <= to {
            return vec![slot.date];
        }
        return Vec::new();
    }

    match slot.recurring_end_date {
        Some(until) => expand(slot.date, &slot.recurring_days, until, from, to),
        None => Vec::new(),
    }
}

/// Returns true if `date` is a concrete occurrence of the slot.
///
/// Used to validate the `slot_date` of interests, rejections, and
/// assignments before any write.
pub fn is_occurrence(slot: &ShiftSlot, date: NaiveDate) -> bool {
    if !slot.is_recurring() {
        return slot.date == date;
    }

    let Some(until) = slot.recurring_end_date else {
        return false;
    };
    date >= slot.date && date <= until && slot.recurring_days.contains(&weekday_index(date))
}
