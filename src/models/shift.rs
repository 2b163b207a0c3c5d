//! Shift and slot models.
//!
//! A [`Shift`] is a posting for a role at a pharmacy; it owns one or more
//! [`ShiftSlot`]s, each a single or recurring time window. Validation of the
//! rate-field and recurrence invariants lives here, at the data-model
//! boundary.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::EmploymentType;

/// The role a shift needs filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftRole {
    /// Registered pharmacist.
    Pharmacist,
    /// Intern pharmacist.
    Intern,
    /// Pharmacy student.
    Student,
    /// Pharmacy assistant.
    Assistant,
    /// Dispensary technician.
    Technician,
}

impl ShiftRole {
    /// Returns the rate-table key for this role.
    pub fn key(self) -> &'static str {
        match self {
            ShiftRole::Pharmacist => "pharmacist",
            ShiftRole::Intern => "intern",
            ShiftRole::Student => "student",
            ShiftRole::Assistant => "assistant",
            ShiftRole::Technician => "technician",
        }
    }
}

impl std::fmt::Display for ShiftRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// How the pay rate for a pharmacist shift is determined.
///
/// Only meaningful when the shift's role is pharmacist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    /// The poster sets a fixed hourly rate on the shift.
    Fixed,
    /// The rate resolves through the award table at assignment time.
    Flexible,
    /// The pharmacist names a rate; falls back to the award table when the
    /// shift carries none.
    PharmacistProvided,
}

/// A posting for a role at a pharmacy.
///
/// Mutated only by escalation transitions and reveal-count increments once
/// interests exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The pharmacy this shift is posted at.
    pub pharmacy_id: Uuid,
    /// The user who posted the shift.
    pub posted_by: Uuid,
    /// The role needed.
    pub role_needed: ShiftRole,
    /// The employment basis being offered.
    pub employment_type: EmploymentType,
    /// Workload tags or requirements (e.g. "dispensing", "vaccination").
    #[serde(default)]
    pub workload_tags: Vec<String>,
    /// Rate-type selector; pharmacist shifts only.
    #[serde(default)]
    pub rate_type: Option<RateType>,
    /// Fixed hourly rate; required when `rate_type` is fixed.
    #[serde(default)]
    pub fixed_rate: Option<Decimal>,
    /// Owner-adjusted bonus added on top of the table rate for casual
    /// non-pharmacist assignees.
    #[serde(default)]
    pub owner_adjusted_rate: Option<Decimal>,
    /// Index of the currently selected tier within the computed tier path.
    pub escalation_level: usize,
    /// Restricts every slot of this shift to a single assignee.
    #[serde(default)]
    pub single_user_only: bool,
    /// Maximum number of interests that may be revealed.
    pub reveal_quota: u32,
    /// Number of interests revealed so far.
    pub reveal_count: u32,
    /// When the shift was posted.
    pub created_at: DateTime<Utc>,
}

impl Shift {
    /// Validates the rate-field invariants.
    ///
    /// Rate fields must be empty for non-pharmacist roles, and `fixed_rate`
    /// must be present when `rate_type` is fixed. A negative owner-adjusted
    /// bonus is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShift`] describing the violated field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.role_needed != ShiftRole::Pharmacist
            && (self.rate_type.is_some() || self.fixed_rate.is_some())
        {
            return Err(EngineError::InvalidShift {
                shift_id: self.id,
                message: format!(
                    "rate fields only apply to pharmacist shifts, role is {}",
                    self.role_needed
                ),
            });
        }

        if self.rate_type == Some(RateType::Fixed) && self.fixed_rate.is_none() {
            return Err(EngineError::InvalidShift {
                shift_id: self.id,
                message: "fixed_rate is required when rate_type is fixed".to_string(),
            });
        }

        if let Some(bonus) = self.owner_adjusted_rate {
            if bonus < Decimal::ZERO {
                return Err(EngineError::InvalidShift {
                    shift_id: self.id,
                    message: "owner_adjusted_rate must not be negative".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// One time window owned by exactly one shift.
///
/// Either a single occurrence (just `date`) or a recurring pattern
/// (`recurring_days` + `recurring_end_date`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSlot {
    /// Unique identifier for the slot.
    pub id: Uuid,
    /// The shift this slot belongs to.
    pub shift_id: Uuid,
    /// The anchor date (the only occurrence for non-recurring slots).
    pub date: NaiveDate,
    /// Start of the time window.
    pub start_time: NaiveTime,
    /// End of the time window.
    pub end_time: NaiveTime,
    /// Weekdays the slot recurs on, 0 = Monday through 6 = Sunday.
    #[serde(default)]
    pub recurring_days: Vec<u8>,
    /// Last date the recurrence may produce an occurrence on.
    #[serde(default)]
    pub recurring_end_date: Option<NaiveDate>,
}

impl ShiftSlot {
    /// Returns true if this slot carries a recurrence pattern.
    pub fn is_recurring(&self) -> bool {
        !self.recurring_days.is_empty()
    }

    /// Returns the window duration in hours.
    ///
    /// Used as the quantity on invoice line items.
    ///
    /// # Examples
    ///
    /// ```
    /// use locum_engine::models::ShiftSlot;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let slot = ShiftSlot {
    ///     id: Uuid::new_v4(),
    ///     shift_id: Uuid::new_v4(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
    ///     recurring_days: vec![],
    ///     recurring_end_date: None,
    /// };
    /// assert_eq!(slot.duration_hours(), Decimal::new(85, 1)); // 8.5
    /// ```
    pub fn duration_hours(&self) -> Decimal {
        let minutes = (self.end_time - self.start_time).num_minutes();
        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }

    /// Validates the recurrence invariants.
    ///
    /// Recurring slots require a non-empty weekday set (all in 0..=6) and a
    /// `recurring_end_date` strictly after the anchor date; non-recurring
    /// slots must not carry recurrence fields. The window must have positive
    /// duration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSlot`] describing the violated field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_time <= self.start_time {
            return Err(EngineError::InvalidSlot {
                slot_id: self.id,
                message: "end_time must be after start_time".to_string(),
            });
        }

        match (self.recurring_days.is_empty(), self.recurring_end_date) {
            (false, Some(until)) => {
                if let Some(&day) = self.recurring_days.iter().find(|&&d| d > 6) {
                    return Err(EngineError::InvalidSlot {
                        slot_id: self.id,
                        message: format!("recurring day {day} is out of range 0..=6"),
                    });
                }
                if until <= self.date {
                    return Err(EngineError::InvalidSlot {
                        slot_id: self.id,
                        message: "recurring_end_date must be strictly after the anchor date"
                            .to_string(),
                    });
                }
                Ok(())
            }
            (true, None) => Ok(()),
            (true, Some(_)) => Err(EngineError::InvalidSlot {
                slot_id: self.id,
                message: "recurring_end_date requires a non-empty recurring_days set".to_string(),
            }),
            (false, None) => Err(EngineError::InvalidSlot {
                slot_id: self.id,
                message: "recurring_days requires a recurring_end_date".to_string(),
            }),
        }
    }
}
