//! Deterministic rate resolution.
//!
//! Resolves the hourly rate for a slot occurrence from the rate table, the
//! holiday calendar, the worker's employment category, and their
//! classification, and produces the [`RateReason`] snapshotted onto the
//! assignment. Resolution is pure and infallible: a missing table entry
//! yields a zero rate with an explicit "not found" reason rather than an
//! error, so an assignment can always complete.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::RosterConfig;
use crate::models::{
    AuState, ClassificationSource, RateReason, RateSource, RateType, Shift, ShiftRole, ShiftSlot,
    WorkerClassification,
};

use super::day_context::{get_day_type, get_time_category, lookup_key};
use super::employment::EmploymentCategory;

/// The outcome of a rate resolution: the rate and its justification.
#[derive(Debug, Clone, PartialEq)]
pub struct RateResolution {
    /// The resolved hourly rate; zero when the table had no entry.
    pub unit_rate: Decimal,
    /// The structured justification to snapshot onto the assignment.
    pub reason: RateReason,
}

/// Returns true when the shift's rate-type selector bypasses the table.
///
/// A fixed-rate pharmacist shift always uses its fixed rate; a
/// pharmacist-provided shift does so only when a rate is actually present,
/// falling back to the award table otherwise.
fn fixed_rate_override(shift: &Shift) -> Option<Decimal> {
    if shift.role_needed != ShiftRole::Pharmacist {
        return None;
    }
    match shift.rate_type {
        Some(RateType::Fixed) | Some(RateType::PharmacistProvided) => shift.fixed_rate,
        _ => None,
    }
}

/// Resolves the hourly rate for one slot occurrence.
///
/// The resolution is deterministic and reproducible from the same inputs at
/// audit time:
///
/// 1. Day type from the occurrence date and the state's holiday calendar.
/// 2. Time category from the slot window (early morning / late night).
/// 3. Effective lookup key: time category if set, else day type.
/// 4. Table lookup by (role, classification, employment category, key).
/// 5. Casual non-pharmacist assignees receive the shift's positive
///    owner-adjusted bonus on top of the table rate.
///
/// # Example
///
/// A pharmacist shift, award level pharmacist, full-time, ordinary
/// Saturday, 09:00-17:00 resolves through
/// `[pharmacist][pharmacist][full_part_time][saturday]`; a table value of
/// 55.00 locks exactly 55.00 with an award-sourced Saturday reason.
pub fn resolve_rate(
    shift: &Shift,
    slot: &ShiftSlot,
    slot_date: NaiveDate,
    classification: &WorkerClassification,
    employment_category: EmploymentCategory,
    state: AuState,
    config: &RosterConfig,
) -> RateResolution {
    let day_type = get_day_type(slot_date, state, config.holidays());
    let time_category = get_time_category(slot.start_time, slot.end_time);
    let key = lookup_key(day_type, time_category);
    let classification_key = classification.classification_key();

    if let Some(fixed) = fixed_rate_override(shift) {
        return RateResolution {
            unit_rate: fixed,
            reason: RateReason {
                lookup_key: key.to_string(),
                role_key: classification_key.to_string(),
                employment_category,
                source: RateSource::Fixed,
                bonus_applied: false,
            },
        };
    }

    let table_rate = config.rate_table().unit_rate(
        shift.role_needed.key(),
        classification_key,
        employment_category.key(),
        key,
    );

    match table_rate {
        Some(rate) => {
            let bonus = shift
                .owner_adjusted_rate
                .filter(|b| *b > Decimal::ZERO)
                .filter(|_| {
                    shift.role_needed != ShiftRole::Pharmacist
                        && employment_category == EmploymentCategory::Casual
                });

            let (unit_rate, bonus_applied) = match bonus {
                Some(b) => (rate + b, true),
                None => (rate, false),
            };

            RateResolution {
                unit_rate,
                reason: RateReason {
                    lookup_key: key.to_string(),
                    role_key: classification_key.to_string(),
                    employment_category,
                    source: RateSource::Award,
                    bonus_applied,
                },
            }
        }
        None => RateResolution {
            unit_rate: Decimal::ZERO,
            reason: RateReason {
                lookup_key: key.to_string(),
                role_key: classification_key.to_string(),
                employment_category,
                source: RateSource::NotFound,
                bonus_applied: false,
            },
        },
    }
}
