//! Leave requests and worker swap requests against existing assignments.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of excused absence being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Sick leave.
    Sick,
    /// Annual leave.
    Annual,
    /// Carer's leave.
    Carer,
    /// Unpaid leave.
    Unpaid,
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveType::Sick => write!(f, "sick"),
            LeaveType::Annual => write!(f, "annual"),
            LeaveType::Carer => write!(f, "carer"),
            LeaveType::Unpaid => write!(f, "unpaid"),
        }
    }
}

/// Status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; the occurrence is excused.
    Approved,
    /// Rejected.
    Rejected,
}

/// A request to mark one assigned occurrence as excused.
///
/// Approving or rejecting a leave request changes its own status only; the
/// assignment's locked rate is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The assignment the leave is filed against.
    pub assignment_id: Uuid,
    /// The worker filing the request.
    pub user_id: Uuid,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// Current status.
    pub status: LeaveStatus,
    /// The occurrence date being excused.
    pub slot_date: NaiveDate,
    /// When the request was filed.
    pub created_at: DateTime<Utc>,
}

/// Outcome of a worker's swap/cover request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    /// A replacement shift was published immediately.
    AutoPublished,
    /// Waiting for manual owner/admin approval.
    Pending,
}

/// A worker's request to have one occurrence covered by someone else.
///
/// When the pharmacy has auto-publish enabled this materializes a new
/// shift+slot immediately; otherwise it stays pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerShiftRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The pharmacy the covered occurrence is at.
    pub pharmacy_id: Uuid,
    /// The worker requesting cover.
    pub user_id: Uuid,
    /// The assignment being covered.
    pub assignment_id: Uuid,
    /// The date needing cover.
    pub slot_date: NaiveDate,
    /// Start of the window needing cover.
    pub start_time: NaiveTime,
    /// End of the window needing cover.
    pub end_time: NaiveTime,
    /// Auto-published or pending.
    pub status: SwapStatus,
    /// The replacement shift, present when auto-published.
    #[serde(default)]
    pub published_shift_id: Option<Uuid>,
    /// When the request was made.
    pub created_at: DateTime<Utc>,
}
