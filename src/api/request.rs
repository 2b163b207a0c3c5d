//! Request types for the shift allocation API.
//!
//! This module defines the JSON request structures for the endpoints and
//! their conversions into engine inputs.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{ShiftDraft, SlotDraft};
use crate::escalation::EscalationTier;
use crate::models::{EmploymentType, LeaveType, RateType, ShiftRole};

/// Request body for `POST /shifts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    /// The pharmacy the shift is posted at.
    pub pharmacy_id: Uuid,
    /// The posting user.
    pub posted_by: Uuid,
    /// The role needed.
    pub role_needed: ShiftRole,
    /// The employment basis being offered.
    pub employment_type: EmploymentType,
    /// Workload tags or requirements.
    #[serde(default)]
    pub workload_tags: Vec<String>,
    /// Rate-type selector; pharmacist shifts only.
    #[serde(default)]
    pub rate_type: Option<RateType>,
    /// Fixed hourly rate.
    #[serde(default)]
    pub fixed_rate: Option<Decimal>,
    /// Owner-adjusted casual bonus.
    #[serde(default)]
    pub owner_adjusted_rate: Option<Decimal>,
    /// Restrict every slot to a single assignee.
    #[serde(default)]
    pub single_user_only: bool,
    /// Maximum number of reveals.
    #[serde(default = "default_reveal_quota")]
    pub reveal_quota: u32,
    /// The shift's slots.
    pub slots: Vec<CreateSlotRequest>,
}

fn default_reveal_quota() -> u32 {
    3
}

/// One slot in a `POST /shifts` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    /// The anchor date.
    pub date: NaiveDate,
    /// Start of the time window.
    pub start_time: NaiveTime,
    /// End of the time window.
    pub end_time: NaiveTime,
    /// Weekdays the slot recurs on, 0 = Monday.
    #[serde(default)]
    pub recurring_days: Vec<u8>,
    /// Last date the recurrence may produce.
    #[serde(default)]
    pub recurring_end_date: Option<NaiveDate>,
}

impl From<CreateShiftRequest> for ShiftDraft {
    fn from(req: CreateShiftRequest) -> Self {
        ShiftDraft {
            pharmacy_id: req.pharmacy_id,
            posted_by: req.posted_by,
            role_needed: req.role_needed,
            employment_type: req.employment_type,
            workload_tags: req.workload_tags,
            rate_type: req.rate_type,
            fixed_rate: req.fixed_rate,
            owner_adjusted_rate: req.owner_adjusted_rate,
            single_user_only: req.single_user_only,
            reveal_quota: req.reveal_quota,
            slots: req.slots.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreateSlotRequest> for SlotDraft {
    fn from(req: CreateSlotRequest) -> Self {
        SlotDraft {
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
            recurring_days: req.recurring_days,
            recurring_end_date: req.recurring_end_date,
        }
    }
}

/// Request body for `POST /shifts/{id}/escalate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalateRequest {
    /// The tier to move to.
    pub tier: EscalationTier,
    /// Whether the caller acts as an organization administrator.
    #[serde(default)]
    pub org_admin: bool,
}

/// Request body for `POST /interests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestRequest {
    /// The interested worker.
    pub user_id: Uuid,
    /// The shift of interest.
    pub shift_id: Uuid,
    /// The specific slot, when slot-scoped.
    #[serde(default)]
    pub slot_id: Option<Uuid>,
}

/// Request body for `POST /rejections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    /// The declining worker.
    pub user_id: Uuid,
    /// The declined slot.
    pub slot_id: Uuid,
    /// The declined occurrence date.
    pub slot_date: NaiveDate,
}

/// Request body for `POST /assignments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    /// The slot to assign.
    pub slot_id: Uuid,
    /// The occurrence date to assign.
    pub slot_date: NaiveDate,
    /// The worker to assign.
    pub user_id: Uuid,
    /// Replace an existing assignee, recomputing the rate snapshot.
    #[serde(default)]
    pub reassign: bool,
}

/// Request body for `POST /leave-requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestBody {
    /// The assignment the leave is filed against.
    pub assignment_id: Uuid,
    /// The requesting worker.
    pub user_id: Uuid,
    /// The kind of leave.
    pub leave_type: LeaveType,
}

/// Request body for `POST /leave-requests/{id}/resolve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveLeaveRequest {
    /// Approve (true) or reject (false) the request.
    pub approve: bool,
}

/// Request body for `POST /swap-requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequestBody {
    /// The assignment needing cover.
    pub assignment_id: Uuid,
    /// The requesting worker.
    pub user_id: Uuid,
}

/// Query parameters for `GET /slots/{id}/occurrences`.
#[derive(Debug, Clone, Deserialize)]
pub struct OccurrencesQuery {
    /// Window start (inclusive).
    pub from: NaiveDate,
    /// Window end (inclusive).
    pub to: NaiveDate,
}

/// Query parameters for `GET /slots/{id}/candidates`.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidatesQuery {
    /// The occurrence date being offered.
    pub slot_date: NaiveDate,
}

/// Query parameters carrying the caller's organization-admin flag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PosterQuery {
    /// Whether the caller acts as an organization administrator.
    #[serde(default)]
    pub org_admin: bool,
}
