//! Assignment rows and the locked rate snapshot.
//!
//! A [`SlotAssignment`] binds exactly one worker to one (slot, slot_date)
//! occurrence and carries the rate locked at assignment time together with
//! its [`RateReason`]. The two are written atomically and only ever replaced
//! together by a re-assignment.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::EmploymentCategory;

/// Where a locked rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Resolved from the award rate table.
    Award,
    /// Taken from the shift's fixed rate.
    Fixed,
    /// The table had no entry for the lookup key; the rate is zero.
    NotFound,
}

impl std::fmt::Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateSource::Award => write!(f, "award"),
            RateSource::Fixed => write!(f, "fixed"),
            RateSource::NotFound => write!(f, "not_found"),
        }
    }
}

/// The structured justification snapshotted next to a locked rate.
///
/// Captured at assignment time so the rate remains reproducible at audit
/// time even after the rate table changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateReason {
    /// The effective day/time key used against the table (e.g. "saturday",
    /// "early_morning").
    pub lookup_key: String,
    /// The classification key within the role (e.g. "pharmacist",
    /// "level_2").
    pub role_key: String,
    /// The employment category dimension used.
    pub employment_category: EmploymentCategory,
    /// Where the rate came from.
    pub source: RateSource,
    /// Whether the owner-adjusted casual bonus was added.
    #[serde(default)]
    pub bonus_applied: bool,
}

/// The binding of one worker to one slot occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAssignment {
    /// Unique identifier for the assignment.
    pub id: Uuid,
    /// The slot being worked.
    pub slot_id: Uuid,
    /// The shift the slot belongs to.
    pub shift_id: Uuid,
    /// The concrete occurrence date.
    pub slot_date: NaiveDate,
    /// The assigned worker.
    pub user_id: Uuid,
    /// The hourly rate locked at assignment time.
    pub unit_rate: Decimal,
    /// Why the rate is what it is.
    pub rate_reason: RateReason,
    /// When the assignment was made.
    pub assigned_at: DateTime<Utc>,
}

/// One invoice line derived from an assignment.
///
/// Quantity is the occurrence duration in hours; the rate is the locked
/// unit rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// The assignment this line bills.
    pub assignment_id: Uuid,
    /// The occurrence date being billed.
    pub slot_date: NaiveDate,
    /// Hours worked (slot duration).
    pub hours: Decimal,
    /// The locked hourly rate.
    pub unit_rate: Decimal,
    /// hours * unit_rate.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_reason() -> RateReason {
        RateReason {
            lookup_key: "saturday".to_string(),
            role_key: "pharmacist".to_string(),
            employment_category: EmploymentCategory::FullPartTime,
            source: RateSource::Award,
            bonus_applied: false,
        }
    }

    #[test]
    fn test_rate_source_serialization() {
        assert_eq!(serde_json::to_string(&RateSource::Award).unwrap(), "\"award\"");
        assert_eq!(
            serde_json::to_string(&RateSource::NotFound).unwrap(),
            "\"not_found\""
        );
    }

    #[test]
    fn test_rate_source_display() {
        assert_eq!(RateSource::Fixed.to_string(), "fixed");
        assert_eq!(RateSource::NotFound.to_string(), "not_found");
    }

    #[test]
    fn test_rate_reason_serialization() {
        let reason = sample_reason();
        let json = serde_json::to_string(&reason).unwrap();
        assert!(json.contains("\"lookup_key\":\"saturday\""));
        assert!(json.contains("\"role_key\":\"pharmacist\""));
        assert!(json.contains("\"employment_category\":\"full_part_time\""));
        assert!(json.contains("\"source\":\"award\""));

        let deserialized: RateReason = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, reason);
    }

    #[test]
    fn test_bonus_applied_defaults_false() {
        let json = r#"{
            "lookup_key": "weekday",
            "role_key": "level_1",
            "employment_category": "casual",
            "source": "award"
        }"#;

        let reason: RateReason = serde_json::from_str(json).unwrap();
        assert!(!reason.bonus_applied);
    }

    #[test]
    fn test_assignment_roundtrip() {
        let assignment = SlotAssignment {
            id: Uuid::new_v4(),
            slot_id: Uuid::new_v4(),
            shift_id: Uuid::new_v4(),
            slot_date: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
            user_id: Uuid::new_v4(),
            unit_rate: dec("55.00"),
            rate_reason: sample_reason(),
            assigned_at: Utc::now(),
        };

        let json = serde_json::to_string(&assignment).unwrap();
        let deserialized: SlotAssignment = serde_json::from_str(&json).unwrap();
        assert_eq!(assignment, deserialized);
    }

    #[test]
    fn test_invoice_line_amount_consistency() {
        let line = InvoiceLine {
            assignment_id: Uuid::new_v4(),
            slot_date: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
            hours: dec("8"),
            unit_rate: dec("55.00"),
            amount: dec("440.00"),
        };
        assert_eq!(line.hours * line.unit_rate, line.amount);
    }
}
