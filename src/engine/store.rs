//! In-memory relational store backing the engine.
//!
//! Rows live in per-table maps behind their own locks, so independent
//! shifts never contend. The assignments table sits behind a mutex because
//! the check-then-insert sequence for one occurrence must be exclusive;
//! the rejections table likewise, so duplicate declines collapse onto the
//! existing row. Reveal-count increments run under the shift table's write
//! lock as relative increments, never read-then-write of a cached value.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, RwLock};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    LeaveRequest, LeaveStatus, LeaveType, Pharmacy, PharmacyMembership, Shift, ShiftSlot,
    SlotAssignment, SlotInterest, SlotRejection, Worker, WorkerClassification, WorkerShiftRequest,
};

/// Key of one concrete slot occurrence.
pub(crate) type OccurrenceKey = (Uuid, NaiveDate);

/// The engine's row store.
#[derive(Debug, Default)]
pub struct RosterStore {
    pharmacies: RwLock<HashMap<Uuid, Pharmacy>>,
    workers: RwLock<HashMap<Uuid, Worker>>,
    memberships: RwLock<HashMap<(Uuid, Uuid), PharmacyMembership>>,
    classifications: RwLock<HashMap<Uuid, WorkerClassification>>,
    shifts: RwLock<HashMap<Uuid, Shift>>,
    slots: RwLock<HashMap<Uuid, ShiftSlot>>,
    assignments: Mutex<HashMap<OccurrenceKey, SlotAssignment>>,
    interests: RwLock<HashMap<Uuid, SlotInterest>>,
    rejections: Mutex<HashMap<(Uuid, NaiveDate, Uuid), SlotRejection>>,
    leave_requests: RwLock<HashMap<Uuid, LeaveRequest>>,
    swap_requests: RwLock<HashMap<Uuid, WorkerShiftRequest>>,
}

impl RosterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Collaborator context rows
    // -------------------------------------------------------------------------

    /// Inserts or replaces a pharmacy.
    pub fn upsert_pharmacy(&self, pharmacy: Pharmacy) {
        self.pharmacies
            .write()
            .expect("pharmacies lock poisoned")
            .insert(pharmacy.id, pharmacy);
    }

    /// Fetches a pharmacy by ID.
    pub fn pharmacy(&self, id: Uuid) -> EngineResult<Pharmacy> {
        self.pharmacies
            .read()
            .expect("pharmacies lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("pharmacy", id))
    }

    /// Inserts or replaces a worker.
    pub fn upsert_worker(&self, worker: Worker) {
        self.workers
            .write()
            .expect("workers lock poisoned")
            .insert(worker.id, worker);
    }

    /// Fetches a worker by ID.
    pub fn worker(&self, id: Uuid) -> EngineResult<Worker> {
        self.workers
            .read()
            .expect("workers lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("worker", id))
    }

    /// Inserts or replaces a membership.
    pub fn upsert_membership(&self, membership: PharmacyMembership) {
        self.memberships
            .write()
            .expect("memberships lock poisoned")
            .insert(
                (membership.worker_id, membership.pharmacy_id),
                membership,
            );
    }

    /// Fetches the membership of a worker at a pharmacy, if any.
    pub fn membership(&self, worker_id: Uuid, pharmacy_id: Uuid) -> Option<PharmacyMembership> {
        self.memberships
            .read()
            .expect("memberships lock poisoned")
            .get(&(worker_id, pharmacy_id))
            .cloned()
    }

    /// Inserts or replaces a worker's classification profile.
    pub fn upsert_classification(&self, worker_id: Uuid, classification: WorkerClassification) {
        self.classifications
            .write()
            .expect("classifications lock poisoned")
            .insert(worker_id, classification);
    }

    /// Fetches a worker's classification profile, if any.
    pub fn classification(&self, worker_id: Uuid) -> Option<WorkerClassification> {
        self.classifications
            .read()
            .expect("classifications lock poisoned")
            .get(&worker_id)
            .copied()
    }

    // -------------------------------------------------------------------------
    // Shifts and slots
    // -------------------------------------------------------------------------

    /// Inserts a shift.
    pub fn insert_shift(&self, shift: Shift) {
        self.shifts
            .write()
            .expect("shifts lock poisoned")
            .insert(shift.id, shift);
    }

    /// Fetches a shift by ID.
    pub fn shift(&self, id: Uuid) -> EngineResult<Shift> {
        self.shifts
            .read()
            .expect("shifts lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("shift", id))
    }

    /// Runs a mutation against a shift under the table's write lock.
    ///
    /// Escalation-level changes and reveal-count increments go through
    /// here, so concurrent increments cannot lose updates.
    pub fn with_shift_mut<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Shift) -> EngineResult<R>,
    ) -> EngineResult<R> {
        let mut shifts = self.shifts.write().expect("shifts lock poisoned");
        let shift = shifts
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("shift", id))?;
        f(shift)
    }

    /// Inserts a slot.
    pub fn insert_slot(&self, slot: ShiftSlot) {
        self.slots
            .write()
            .expect("slots lock poisoned")
            .insert(slot.id, slot);
    }

    /// Fetches a slot by ID.
    pub fn slot(&self, id: Uuid) -> EngineResult<ShiftSlot> {
        self.slots
            .read()
            .expect("slots lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("slot", id))
    }

    /// Lists the slots of a shift, ordered by anchor date then start time.
    pub fn slots_for_shift(&self, shift_id: Uuid) -> Vec<ShiftSlot> {
        let mut slots: Vec<ShiftSlot> = self
            .slots
            .read()
            .expect("slots lock poisoned")
            .values()
            .filter(|slot| slot.shift_id == shift_id)
            .cloned()
            .collect();
        slots.sort_by_key(|slot| (slot.date, slot.start_time, slot.id));
        slots
    }

    /// Deletes a shift and everything it owns: slots, and their
    /// assignments, interests, and rejections.
    pub fn delete_shift_cascade(&self, shift_id: Uuid) -> EngineResult<()> {
        let removed = self
            .shifts
            .write()
            .expect("shifts lock poisoned")
            .remove(&shift_id);
        if removed.is_none() {
            return Err(EngineError::not_found("shift", shift_id));
        }

        let slot_ids: Vec<Uuid> = {
            let mut slots = self.slots.write().expect("slots lock poisoned");
            let ids: Vec<Uuid> = slots
                .values()
                .filter(|slot| slot.shift_id == shift_id)
                .map(|slot| slot.id)
                .collect();
            for id in &ids {
                slots.remove(id);
            }
            ids
        };

        self.assignments
            .lock()
            .expect("assignments lock poisoned")
            .retain(|(slot_id, _), _| !slot_ids.contains(slot_id));
        self.interests
            .write()
            .expect("interests lock poisoned")
            .retain(|_, interest| interest.shift_id != shift_id);
        self.rejections
            .lock()
            .expect("rejections lock poisoned")
            .retain(|(slot_id, _, _), _| !slot_ids.contains(slot_id));

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Assignments
    // -------------------------------------------------------------------------

    /// Locks the assignments table for an exclusive check-then-insert.
    ///
    /// Rate resolution is pure and runs before taking this lock; only the
    /// existence check, single-worker check, and write happen inside it.
    pub(crate) fn lock_assignments(&self) -> MutexGuard<'_, HashMap<OccurrenceKey, SlotAssignment>> {
        self.assignments.lock().expect("assignments lock poisoned")
    }

    /// Fetches the assignment of one occurrence, if any.
    pub fn assignment(&self, slot_id: Uuid, slot_date: NaiveDate) -> Option<SlotAssignment> {
        self.lock_assignments().get(&(slot_id, slot_date)).cloned()
    }

    /// Fetches an assignment by its row ID.
    pub fn assignment_by_id(&self, id: Uuid) -> EngineResult<SlotAssignment> {
        self.lock_assignments()
            .values()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("assignment", id))
    }

    /// Lists a shift's assignments, ordered by occurrence date.
    pub fn assignments_for_shift(&self, shift_id: Uuid) -> Vec<SlotAssignment> {
        let mut assignments: Vec<SlotAssignment> = self
            .lock_assignments()
            .values()
            .filter(|a| a.shift_id == shift_id)
            .cloned()
            .collect();
        assignments.sort_by_key(|a| (a.slot_date, a.slot_id));
        assignments
    }

    // -------------------------------------------------------------------------
    // Interests and rejections
    // -------------------------------------------------------------------------

    /// Inserts an interest.
    pub fn insert_interest(&self, interest: SlotInterest) {
        self.interests
            .write()
            .expect("interests lock poisoned")
            .insert(interest.id, interest);
    }

    /// Fetches an interest by ID.
    pub fn interest(&self, id: Uuid) -> EngineResult<SlotInterest> {
        self.interests
            .read()
            .expect("interests lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("interest", id))
    }

    /// Finds an existing interest for the same (user, shift, slot) triple.
    pub fn find_interest(
        &self,
        user_id: Uuid,
        shift_id: Uuid,
        slot_id: Option<Uuid>,
    ) -> Option<SlotInterest> {
        self.interests
            .read()
            .expect("interests lock poisoned")
            .values()
            .find(|i| i.user_id == user_id && i.shift_id == shift_id && i.slot_id == slot_id)
            .cloned()
    }

    /// Marks an interest revealed.
    pub fn set_interest_revealed(&self, id: Uuid) -> EngineResult<SlotInterest> {
        let mut interests = self.interests.write().expect("interests lock poisoned");
        let interest = interests
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("interest", id))?;
        interest.revealed = true;
        Ok(interest.clone())
    }

    /// Lists a shift's interests, oldest first.
    pub fn interests_for_shift(&self, shift_id: Uuid) -> Vec<SlotInterest> {
        let mut interests: Vec<SlotInterest> = self
            .interests
            .read()
            .expect("interests lock poisoned")
            .values()
            .filter(|i| i.shift_id == shift_id)
            .cloned()
            .collect();
        interests.sort_by_key(|i| (i.created_at, i.id));
        interests
    }

    /// Inserts a rejection unless the (slot, slot_date, user) tuple already
    /// has one. Returns the stored row and whether it was newly inserted.
    pub fn insert_rejection_if_absent(&self, rejection: SlotRejection) -> (SlotRejection, bool) {
        let mut rejections = self.rejections.lock().expect("rejections lock poisoned");
        let key = (rejection.slot_id, rejection.slot_date, rejection.user_id);
        match rejections.get(&key) {
            Some(existing) => (existing.clone(), false),
            None => {
                rejections.insert(key, rejection.clone());
                (rejection, true)
            }
        }
    }

    /// Returns true if the user has declined the occurrence.
    pub fn has_rejected(&self, slot_id: Uuid, slot_date: NaiveDate, user_id: Uuid) -> bool {
        self.rejections
            .lock()
            .expect("rejections lock poisoned")
            .contains_key(&(slot_id, slot_date, user_id))
    }

    /// Counts rejections for one occurrence.
    pub fn rejection_count(&self, slot_id: Uuid, slot_date: NaiveDate) -> usize {
        self.rejections
            .lock()
            .expect("rejections lock poisoned")
            .keys()
            .filter(|(s, d, _)| *s == slot_id && *d == slot_date)
            .count()
    }

    // -------------------------------------------------------------------------
    // Leave and swap requests
    // -------------------------------------------------------------------------

    /// Inserts a leave request.
    pub fn insert_leave_request(&self, request: LeaveRequest) {
        self.leave_requests
            .write()
            .expect("leave lock poisoned")
            .insert(request.id, request);
    }

    /// Fetches a leave request by ID.
    pub fn leave_request(&self, id: Uuid) -> EngineResult<LeaveRequest> {
        self.leave_requests
            .read()
            .expect("leave lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("leave request", id))
    }

    /// Returns true if a pending request exists for the same assignment,
    /// worker, and leave type.
    pub fn has_pending_leave(
        &self,
        assignment_id: Uuid,
        user_id: Uuid,
        leave_type: LeaveType,
    ) -> bool {
        self.leave_requests
            .read()
            .expect("leave lock poisoned")
            .values()
            .any(|r| {
                r.assignment_id == assignment_id
                    && r.user_id == user_id
                    && r.leave_type == leave_type
                    && r.status == LeaveStatus::Pending
            })
    }

    /// Updates a leave request's status.
    pub fn set_leave_status(&self, id: Uuid, status: LeaveStatus) -> EngineResult<LeaveRequest> {
        let mut requests = self.leave_requests.write().expect("leave lock poisoned");
        let request = requests
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("leave request", id))?;
        request.status = status;
        Ok(request.clone())
    }

    /// Inserts a swap request.
    pub fn insert_swap_request(&self, request: WorkerShiftRequest) {
        self.swap_requests
            .write()
            .expect("swap lock poisoned")
            .insert(request.id, request);
    }

    /// Fetches a swap request by ID.
    pub fn swap_request(&self, id: Uuid) -> EngineResult<WorkerShiftRequest> {
        self.swap_requests
            .read()
            .expect("swap lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("swap request", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuState, EmploymentType, RateReason, RateSource, ShiftRole};
    use crate::calculation::EmploymentCategory;
    use chrono::{NaiveTime, Utc};

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_pharmacy() -> Pharmacy {
        Pharmacy {
            id: Uuid::new_v4(),
            name: "Greenhill Pharmacy".to_string(),
            organization_id: None,
            owner_has_chain: false,
            claimed_by_organization: false,
            state: AuState::NSW,
            timezone: "Australia/Sydney".to_string(),
            default_rate_type: None,
            default_fixed_rate: None,
            auto_publish_swaps: false,
        }
    }

    fn sample_shift(pharmacy_id: Uuid) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            pharmacy_id,
            posted_by: Uuid::new_v4(),
            role_needed: ShiftRole::Assistant,
            employment_type: EmploymentType::Casual,
            workload_tags: vec![],
            rate_type: None,
            fixed_rate: None,
            owner_adjusted_rate: None,
            escalation_level: 0,
            single_user_only: false,
            reveal_quota: 3,
            reveal_count: 0,
            created_at: Utc::now(),
        }
    }

    fn sample_slot(shift_id: Uuid, date: &str) -> ShiftSlot {
        ShiftSlot {
            id: Uuid::new_v4(),
            shift_id,
            date: make_date(date),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            recurring_days: vec![],
            recurring_end_date: None,
        }
    }

    fn sample_assignment(shift_id: Uuid, slot_id: Uuid, date: &str) -> SlotAssignment {
        SlotAssignment {
            id: Uuid::new_v4(),
            slot_id,
            shift_id,
            slot_date: make_date(date),
            user_id: Uuid::new_v4(),
            unit_rate: rust_decimal::Decimal::ZERO,
            rate_reason: RateReason {
                lookup_key: "weekday".to_string(),
                role_key: "level_1".to_string(),
                employment_category: EmploymentCategory::Casual,
                source: RateSource::NotFound,
                bonus_applied: false,
            },
            assigned_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_shift_is_row_not_found() {
        let store = RosterStore::new();
        let result = store.shift(Uuid::new_v4());
        assert!(matches!(
            result,
            Err(EngineError::RowNotFound { kind: "shift", .. })
        ));
    }

    #[test]
    fn test_with_shift_mut_increments_reveal_count() {
        let store = RosterStore::new();
        let pharmacy = sample_pharmacy();
        let shift = sample_shift(pharmacy.id);
        let shift_id = shift.id;
        store.insert_shift(shift);

        for _ in 0..3 {
            store
                .with_shift_mut(shift_id, |s| {
                    s.reveal_count += 1;
                    Ok(())
                })
                .unwrap();
        }

        assert_eq!(store.shift(shift_id).unwrap().reveal_count, 3);
    }

    #[test]
    fn test_slots_for_shift_ordered_by_date() {
        let store = RosterStore::new();
        let shift = sample_shift(Uuid::new_v4());
        let shift_id = shift.id;
        store.insert_shift(shift);
        store.insert_slot(sample_slot(shift_id, "2026-01-20"));
        store.insert_slot(sample_slot(shift_id, "2026-01-15"));
        store.insert_slot(sample_slot(shift_id, "2026-01-17"));

        let dates: Vec<NaiveDate> = store
            .slots_for_shift(shift_id)
            .iter()
            .map(|s| s.date)
            .collect();
        assert_eq!(
            dates,
            vec![
                make_date("2026-01-15"),
                make_date("2026-01-17"),
                make_date("2026-01-20")
            ]
        );
    }

    #[test]
    fn test_rejection_insert_is_idempotent() {
        let store = RosterStore::new();
        let slot_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let rejection = SlotRejection {
            id: Uuid::new_v4(),
            slot_id,
            slot_date: make_date("2026-01-17"),
            user_id,
            created_at: Utc::now(),
        };

        let (first, inserted_first) = store.insert_rejection_if_absent(rejection.clone());
        assert!(inserted_first);

        let mut duplicate = rejection.clone();
        duplicate.id = Uuid::new_v4();
        let (second, inserted_second) = store.insert_rejection_if_absent(duplicate);
        assert!(!inserted_second);
        assert_eq!(first.id, second.id);
        assert_eq!(store.rejection_count(slot_id, make_date("2026-01-17")), 1);
    }

    #[test]
    fn test_delete_shift_cascades() {
        let store = RosterStore::new();
        let shift = sample_shift(Uuid::new_v4());
        let shift_id = shift.id;
        store.insert_shift(shift);

        let slot = sample_slot(shift_id, "2026-01-15");
        let slot_id = slot.id;
        store.insert_slot(slot);

        let assignment = sample_assignment(shift_id, slot_id, "2026-01-15");
        store
            .lock_assignments()
            .insert((slot_id, make_date("2026-01-15")), assignment);

        store.insert_interest(SlotInterest {
            id: Uuid::new_v4(),
            shift_id,
            slot_id: Some(slot_id),
            user_id: Uuid::new_v4(),
            revealed: false,
            created_at: Utc::now(),
        });

        let user_id = Uuid::new_v4();
        store.insert_rejection_if_absent(SlotRejection {
            id: Uuid::new_v4(),
            slot_id,
            slot_date: make_date("2026-01-15"),
            user_id,
            created_at: Utc::now(),
        });

        store.delete_shift_cascade(shift_id).unwrap();

        assert!(store.shift(shift_id).is_err());
        assert!(store.slot(slot_id).is_err());
        assert!(store.assignment(slot_id, make_date("2026-01-15")).is_none());
        assert!(store.interests_for_shift(shift_id).is_empty());
        assert!(!store.has_rejected(slot_id, make_date("2026-01-15"), user_id));
    }

    #[test]
    fn test_membership_lookup_by_pair() {
        let store = RosterStore::new();
        let worker_id = Uuid::new_v4();
        let pharmacy_id = Uuid::new_v4();
        store.upsert_membership(PharmacyMembership {
            worker_id,
            pharmacy_id,
            employment_type: EmploymentType::PartTime,
            active: true,
        });

        assert!(store.membership(worker_id, pharmacy_id).is_some());
        assert!(store.membership(worker_id, Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_pending_leave_detection() {
        let store = RosterStore::new();
        let assignment_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        store.insert_leave_request(LeaveRequest {
            id: Uuid::new_v4(),
            assignment_id,
            user_id,
            leave_type: LeaveType::Sick,
            status: LeaveStatus::Pending,
            slot_date: make_date("2026-01-15"),
            created_at: Utc::now(),
        });

        assert!(store.has_pending_leave(assignment_id, user_id, LeaveType::Sick));
        assert!(!store.has_pending_leave(assignment_id, user_id, LeaveType::Annual));
    }
}
