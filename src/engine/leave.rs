//! Leave requests and swap/cover requests against existing assignments.
//!
//! Both lifecycles mutate assignment-adjacent state only: approving or
//! rejecting a leave request never touches the locked rate, and a swap
//! request either publishes a brand-new shift+slot (when the pharmacy has
//! auto-publish enabled) or waits for manual approval.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    LeaveRequest, LeaveStatus, LeaveType, Shift, ShiftSlot, SwapStatus, WorkerShiftRequest,
};

use super::{DomainEvent, RosterEngine};

impl RosterEngine {
    /// Files a leave request against an assignment.
    ///
    /// Only the assignee may file; a duplicate pending request for the
    /// same (assignment, user, leave type) is rejected.
    pub fn file_leave(
        &self,
        assignment_id: Uuid,
        user_id: Uuid,
        leave_type: LeaveType,
    ) -> EngineResult<LeaveRequest> {
        let assignment = self.store().assignment_by_id(assignment_id)?;
        if assignment.user_id != user_id {
            return Err(EngineError::NotAssignee {
                assignment_id,
                user_id,
            });
        }

        if self
            .store()
            .has_pending_leave(assignment_id, user_id, leave_type)
        {
            return Err(EngineError::DuplicateLeaveRequest {
                assignment_id,
                leave_type: leave_type.to_string(),
            });
        }

        let request = LeaveRequest {
            id: Uuid::new_v4(),
            assignment_id,
            user_id,
            leave_type,
            status: LeaveStatus::Pending,
            slot_date: assignment.slot_date,
            created_at: Utc::now(),
        };
        self.store().insert_leave_request(request.clone());

        self.emit(DomainEvent::LeaveRequested {
            request_id: request.id,
            assignment_id,
            user_id,
        });
        Ok(request)
    }

    /// Approves or rejects a pending leave request.
    ///
    /// Changes the request's own status only; the assignment and its
    /// locked rate are untouched. Resolving an already-resolved request is
    /// a no-op returning the current row.
    pub fn resolve_leave(&self, request_id: Uuid, approve: bool) -> EngineResult<LeaveRequest> {
        let request = self.store().leave_request(request_id)?;
        if request.status != LeaveStatus::Pending {
            return Ok(request);
        }

        let status = if approve {
            LeaveStatus::Approved
        } else {
            LeaveStatus::Rejected
        };
        let updated = self.store().set_leave_status(request_id, status)?;

        self.emit(DomainEvent::LeaveResolved { request_id, status });
        Ok(updated)
    }

    /// Requests cover for one assigned occurrence.
    ///
    /// When the pharmacy auto-publishes swaps, a replacement shift with a
    /// single slot for the covered occurrence is created immediately;
    /// otherwise the request stays pending for manual owner/admin
    /// approval.
    pub fn request_swap(
        &self,
        assignment_id: Uuid,
        user_id: Uuid,
    ) -> EngineResult<WorkerShiftRequest> {
        let assignment = self.store().assignment_by_id(assignment_id)?;
        if assignment.user_id != user_id {
            return Err(EngineError::NotAssignee {
                assignment_id,
                user_id,
            });
        }

        let slot = self.store().slot(assignment.slot_id)?;
        let shift = self.store().shift(assignment.shift_id)?;
        let pharmacy = self.store().pharmacy(shift.pharmacy_id)?;

        let request_id = Uuid::new_v4();
        let (status, published_shift_id) = if pharmacy.auto_publish_swaps {
            let replacement = self.publish_replacement(&shift, &slot, assignment.slot_date);
            (SwapStatus::AutoPublished, Some(replacement))
        } else {
            (SwapStatus::Pending, None)
        };

        let request = WorkerShiftRequest {
            id: request_id,
            pharmacy_id: pharmacy.id,
            user_id,
            assignment_id,
            slot_date: assignment.slot_date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            status,
            published_shift_id,
            created_at: Utc::now(),
        };
        self.store().insert_swap_request(request.clone());

        match status {
            SwapStatus::AutoPublished => self.emit(DomainEvent::SwapAutoPublished {
                request_id,
                shift_id: published_shift_id.expect("auto-published swap has a shift"),
            }),
            SwapStatus::Pending => self.emit(DomainEvent::SwapPending { request_id }),
        }
        Ok(request)
    }

    /// Materializes the replacement shift+slot for an auto-published swap,
    /// cloned from the covered shift but scoped to the one occurrence.
    fn publish_replacement(
        &self,
        original: &Shift,
        slot: &ShiftSlot,
        slot_date: chrono::NaiveDate,
    ) -> Uuid {
        let replacement = Shift {
            id: Uuid::new_v4(),
            pharmacy_id: original.pharmacy_id,
            posted_by: original.posted_by,
            role_needed: original.role_needed,
            employment_type: original.employment_type,
            workload_tags: original.workload_tags.clone(),
            rate_type: original.rate_type,
            fixed_rate: original.fixed_rate,
            owner_adjusted_rate: original.owner_adjusted_rate,
            escalation_level: 0,
            single_user_only: false,
            reveal_quota: original.reveal_quota,
            reveal_count: 0,
            created_at: Utc::now(),
        };
        let replacement_slot = ShiftSlot {
            id: Uuid::new_v4(),
            shift_id: replacement.id,
            date: slot_date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            recurring_days: vec![],
            recurring_end_date: None,
        };

        let shift_id = replacement.id;
        self.store().insert_shift(replacement);
        self.store().insert_slot(replacement_slot);
        shift_id
    }
}
