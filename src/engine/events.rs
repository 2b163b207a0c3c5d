//! Domain events emitted by the engine.
//!
//! Reveal, assignment, rejection, and lifecycle operations broadcast an
//! event for an external notification dispatcher to consume. Delivery is
//! best-effort message passing; the engine never depends on a receiver
//! being present.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::escalation::EscalationTier;
use crate::models::LeaveStatus;

/// An event describing a state change in the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DomainEvent {
    /// A shift moved to a different visibility tier.
    ShiftEscalated {
        /// The escalated shift.
        shift_id: Uuid,
        /// The newly selected tier.
        tier: EscalationTier,
    },
    /// A worker expressed interest in a shift.
    InterestExpressed {
        /// The interest row.
        interest_id: Uuid,
        /// The shift of interest.
        shift_id: Uuid,
        /// The interested worker.
        user_id: Uuid,
    },
    /// An interested worker's identity was revealed to the poster.
    InterestRevealed {
        /// The revealed interest.
        interest_id: Uuid,
        /// The shift of interest.
        shift_id: Uuid,
        /// The revealed worker.
        user_id: Uuid,
    },
    /// A worker declined a slot occurrence.
    OccurrenceRejected {
        /// The declined slot.
        slot_id: Uuid,
        /// The declined occurrence date.
        slot_date: NaiveDate,
        /// The declining worker.
        user_id: Uuid,
    },
    /// A worker was assigned to a slot occurrence.
    SlotAssigned {
        /// The new assignment.
        assignment_id: Uuid,
        /// The assigned slot.
        slot_id: Uuid,
        /// The assigned occurrence date.
        slot_date: NaiveDate,
        /// The assigned worker.
        user_id: Uuid,
    },
    /// An occurrence was reassigned to a different worker.
    SlotReassigned {
        /// The replacement assignment.
        assignment_id: Uuid,
        /// The reassigned slot.
        slot_id: Uuid,
        /// The reassigned occurrence date.
        slot_date: NaiveDate,
        /// The worker who previously held the occurrence.
        previous_user_id: Uuid,
        /// The worker now holding the occurrence.
        user_id: Uuid,
    },
    /// A leave request was filed against an assignment.
    LeaveRequested {
        /// The new request.
        request_id: Uuid,
        /// The assignment being excused.
        assignment_id: Uuid,
        /// The requesting worker.
        user_id: Uuid,
    },
    /// A leave request was approved or rejected.
    LeaveResolved {
        /// The resolved request.
        request_id: Uuid,
        /// The resulting status.
        status: LeaveStatus,
    },
    /// A swap request immediately published a replacement shift.
    SwapAutoPublished {
        /// The swap request.
        request_id: Uuid,
        /// The replacement shift.
        shift_id: Uuid,
    },
    /// A swap request is waiting for manual approval.
    SwapPending {
        /// The swap request.
        request_id: Uuid,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_carries_type_tag() {
        let event = DomainEvent::SlotAssigned {
            assignment_id: Uuid::nil(),
            slot_id: Uuid::nil(),
            slot_date: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
            user_id: Uuid::nil(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"slot_assigned\""));
        assert!(json.contains("\"slot_date\":\"2026-01-17\""));
    }

    #[test]
    fn test_escalation_event_names_tier() {
        let event = DomainEvent::ShiftEscalated {
            shift_id: Uuid::nil(),
            tier: EscalationTier::Platform,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"tier\":\"platform\""));
    }
}
