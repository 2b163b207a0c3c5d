//! Error types for the shift allocation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during shift allocation,
//! escalation, and assignment.
//!
//! Rate-table lookup misses are deliberately absent here: they resolve to a
//! zero rate with a structured reason so an assignment never fails because
//! the table has a gap.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the shift allocation engine.
///
/// All fallible operations in the engine return this error type.
///
/// # Example
///
/// ```
/// use locum_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift contained invalid or inconsistent data.
    #[error("Invalid shift {shift_id}: {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: Uuid,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A slot contained invalid or inconsistent data (malformed recurrence).
    #[error("Invalid slot {slot_id}: {message}")]
    InvalidSlot {
        /// The ID of the invalid slot.
        slot_id: Uuid,
        /// A description of what made the slot invalid.
        message: String,
    },

    /// A tier was selected that is not present in the shift's computed path.
    #[error("Tier '{tier}' is not available for shift {shift_id}")]
    TierNotAvailable {
        /// The shift whose path was computed.
        shift_id: Uuid,
        /// The rejected tier name.
        tier: String,
    },

    /// The shift's reveal quota has been exhausted.
    #[error("Reveal quota of {quota} exhausted for shift {shift_id}")]
    RevealQuotaExceeded {
        /// The shift whose quota was exhausted.
        shift_id: Uuid,
        /// The configured quota.
        quota: u32,
    },

    /// An assignment already exists for the slot occurrence.
    #[error("Slot {slot_id} is already assigned for {slot_date}")]
    AssignmentConflict {
        /// The slot that is already taken.
        slot_id: Uuid,
        /// The occurrence date that is already taken.
        slot_date: NaiveDate,
    },

    /// A single-worker shift would end up with two different assignees.
    #[error("Shift {shift_id} is restricted to one worker and is already assigned to {existing_user}")]
    SingleWorkerConflict {
        /// The restricted shift.
        shift_id: Uuid,
        /// The worker already holding a slot of the shift.
        existing_user: Uuid,
    },

    /// A slot was addressed through a shift it does not belong to.
    #[error("Slot {slot_id} does not belong to shift {shift_id}")]
    SlotNotInShift {
        /// The slot that was addressed.
        slot_id: Uuid,
        /// The shift it was addressed through.
        shift_id: Uuid,
    },

    /// The requested date is not an occurrence of the slot.
    #[error("{slot_date} is not an occurrence of slot {slot_id}")]
    NotAnOccurrence {
        /// The slot that was addressed.
        slot_id: Uuid,
        /// The date that does not occur.
        slot_date: NaiveDate,
    },

    /// A lifecycle request was filed by someone other than the assignee.
    #[error("User {user_id} does not hold assignment {assignment_id}")]
    NotAssignee {
        /// The assignment the request was filed against.
        assignment_id: Uuid,
        /// The user who filed the request.
        user_id: Uuid,
    },

    /// A pending leave request already exists for the same assignment,
    /// worker, and leave type.
    #[error("A pending {leave_type} leave request already exists for assignment {assignment_id}")]
    DuplicateLeaveRequest {
        /// The assignment already covered by a pending request.
        assignment_id: Uuid,
        /// The duplicated leave type.
        leave_type: String,
    },

    /// A referenced row does not exist.
    #[error("{kind} {id} not found")]
    RowNotFound {
        /// The kind of row (e.g. "shift", "slot").
        kind: &'static str,
        /// The missing row's ID.
        id: Uuid,
    },
}

impl EngineError {
    /// Shorthand for a missing-row error.
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        EngineError::RowNotFound { kind, id }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
