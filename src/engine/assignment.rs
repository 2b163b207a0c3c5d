//! Assignment and rate locking.
//!
//! Assigning a worker to a slot occurrence resolves the rate (a pure
//! computation, done before any lock) and then performs the exclusive
//! check-then-insert on the assignments table, so two concurrent attempts
//! on the same occurrence cannot both succeed. The rate and its reason are
//! written atomically with the assignment row; neither ever exists without
//! the other.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::calculation::{employment_category_for, resolve_rate};
use crate::error::{EngineError, EngineResult};
use crate::models::{InvoiceLine, SlotAssignment, WorkerClassification};
use crate::recurrence::is_occurrence;

use super::{DomainEvent, RosterEngine};

impl RosterEngine {
    /// Assigns a worker to one slot occurrence, locking the resolved rate.
    ///
    /// Fails with [`EngineError::AssignmentConflict`] when the occurrence
    /// is already taken; the caller must retry against the now-current
    /// state rather than assume success.
    pub fn assign(
        &self,
        slot_id: Uuid,
        slot_date: NaiveDate,
        user_id: Uuid,
    ) -> EngineResult<SlotAssignment> {
        self.assign_inner(slot_id, slot_date, user_id, false)
    }

    /// Replaces the assignee of an occurrence, clearing the prior rate
    /// snapshot and recomputing it for the new worker.
    pub fn reassign(
        &self,
        slot_id: Uuid,
        slot_date: NaiveDate,
        user_id: Uuid,
    ) -> EngineResult<SlotAssignment> {
        self.assign_inner(slot_id, slot_date, user_id, true)
    }

    fn assign_inner(
        &self,
        slot_id: Uuid,
        slot_date: NaiveDate,
        user_id: Uuid,
        reassign: bool,
    ) -> EngineResult<SlotAssignment> {
        let slot = self.store().slot(slot_id)?;
        let shift = self.store().shift(slot.shift_id)?;
        let pharmacy = self.store().pharmacy(shift.pharmacy_id)?;
        self.store().worker(user_id)?;

        if !is_occurrence(&slot, slot_date) {
            return Err(EngineError::NotAnOccurrence { slot_id, slot_date });
        }

        let membership = self.store().membership(user_id, pharmacy.id);
        let employment_category = employment_category_for(membership.as_ref());

        // The classification profile is selected by the shift's role; a
        // worker without a matching profile gets the most junior default.
        let classification = self
            .store()
            .classification(user_id)
            .filter(|c| c.role() == shift.role_needed)
            .unwrap_or_else(|| WorkerClassification::default_for(shift.role_needed));

        // Pure resolution, outside the exclusive section.
        let resolution = resolve_rate(
            &shift,
            &slot,
            slot_date,
            &classification,
            employment_category,
            pharmacy.state,
            self.config().config(),
        );

        let assignment = SlotAssignment {
            id: Uuid::new_v4(),
            slot_id,
            shift_id: shift.id,
            slot_date,
            user_id,
            unit_rate: resolution.unit_rate,
            rate_reason: resolution.reason,
            assigned_at: Utc::now(),
        };

        let previous_user = {
            let mut assignments = self.store().lock_assignments();

            let existing = assignments.get(&(slot_id, slot_date));
            if existing.is_some() && !reassign {
                return Err(EngineError::AssignmentConflict { slot_id, slot_date });
            }
            let previous_user = existing.map(|a| a.user_id);

            if shift.single_user_only {
                let conflicting = assignments.values().find(|a| {
                    a.shift_id == shift.id
                        && (a.slot_id, a.slot_date) != (slot_id, slot_date)
                        && a.user_id != user_id
                });
                if let Some(other) = conflicting {
                    return Err(EngineError::SingleWorkerConflict {
                        shift_id: shift.id,
                        existing_user: other.user_id,
                    });
                }
            }

            assignments.insert((slot_id, slot_date), assignment.clone());
            previous_user
        };

        match previous_user {
            Some(previous_user_id) if previous_user_id != user_id => {
                self.emit(DomainEvent::SlotReassigned {
                    assignment_id: assignment.id,
                    slot_id,
                    slot_date,
                    previous_user_id,
                    user_id,
                });
            }
            _ => {
                self.emit(DomainEvent::SlotAssigned {
                    assignment_id: assignment.id,
                    slot_id,
                    slot_date,
                    user_id,
                });
            }
        }

        Ok(assignment)
    }

    /// Derives invoice lines from a shift's assignments: quantity is the
    /// occurrence duration in hours, the rate is the locked unit rate.
    pub fn invoice_lines_for_shift(&self, shift_id: Uuid) -> EngineResult<Vec<InvoiceLine>> {
        self.store().shift(shift_id)?;

        let mut lines = Vec::new();
        for assignment in self.store().assignments_for_shift(shift_id) {
            let slot = self.store().slot(assignment.slot_id)?;
            let hours = slot.duration_hours();
            lines.push(InvoiceLine {
                assignment_id: assignment.id,
                slot_date: assignment.slot_date,
                hours,
                unit_rate: assignment.unit_rate,
                amount: hours * assignment.unit_rate,
            });
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::EmploymentCategory;
    use crate::config::{
        ClassificationRates, ConfigLoader, HolidayCalendar, RateTable, RosterConfig, TableMetadata,
    };
    use crate::engine::tests::{draft_for, pharmacy_with, sample_worker};
    use crate::models::{
        ClassificationLevel, EmploymentType, PharmacyMembership, RateSource, ShiftRole,
        StaffProfile,
    };
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn context_rates(pairs: &[(&str, &str)]) -> HashMap<String, Decimal> {
        pairs.iter().map(|(k, v)| (k.to_string(), dec(v))).collect()
    }

    fn rate_config() -> ConfigLoader {
        let mut pharmacist_employment = HashMap::new();
        pharmacist_employment.insert(
            "full_part_time".to_string(),
            context_rates(&[("weekday", "52.00"), ("saturday", "55.00")]),
        );
        let mut pharmacist_levels: ClassificationRates = HashMap::new();
        pharmacist_levels.insert("pharmacist".to_string(), pharmacist_employment);

        let mut assistant_employment = HashMap::new();
        assistant_employment.insert(
            "casual".to_string(),
            context_rates(&[("weekday", "27.30"), ("early_morning", "30.00")]),
        );
        let mut assistant_levels: ClassificationRates = HashMap::new();
        assistant_levels.insert("level_2".to_string(), assistant_employment);

        let mut roles = HashMap::new();
        roles.insert("pharmacist".to_string(), pharmacist_levels);
        roles.insert("assistant".to_string(), assistant_levels);

        ConfigLoader::from_config(RosterConfig::new(
            TableMetadata {
                name: "Pharmacy Industry Award".to_string(),
                version: "2026-07-01".to_string(),
            },
            RateTable::new(roles),
            HolidayCalendar::new(HashMap::new()),
        ))
    }

    struct Fixture {
        engine: Arc<RosterEngine>,
        pharmacy_id: Uuid,
        poster_id: Uuid,
        worker_id: Uuid,
    }

    fn fixture() -> Fixture {
        let engine = Arc::new(RosterEngine::new(rate_config()));
        let pharmacy = pharmacy_with(false, false);
        let poster = sample_worker(ShiftRole::Pharmacist);
        let worker = sample_worker(ShiftRole::Pharmacist);

        engine.register_pharmacy(pharmacy.clone());
        engine.register_worker(poster.clone());
        engine.register_worker(worker.clone());
        engine.register_membership(PharmacyMembership {
            worker_id: worker.id,
            pharmacy_id: pharmacy.id,
            employment_type: EmploymentType::FullTime,
            active: true,
        });

        Fixture {
            engine,
            pharmacy_id: pharmacy.id,
            poster_id: poster.id,
            worker_id: worker.id,
        }
    }

    #[test]
    fn test_assign_locks_saturday_award_rate() {
        let f = fixture();
        // 2026-01-17 is a Saturday
        let (_, slots) = f
            .engine
            .create_shift(draft_for(
                f.pharmacy_id,
                f.poster_id,
                ShiftRole::Pharmacist,
                &["2026-01-17"],
            ))
            .unwrap();

        let assignment = f
            .engine
            .assign(slots[0].id, make_date("2026-01-17"), f.worker_id)
            .unwrap();

        assert_eq!(assignment.unit_rate, dec("55.00"));
        assert_eq!(assignment.rate_reason.lookup_key, "saturday");
        assert_eq!(assignment.rate_reason.role_key, "pharmacist");
        assert_eq!(
            assignment.rate_reason.employment_category,
            EmploymentCategory::FullPartTime
        );
        assert_eq!(assignment.rate_reason.source, RateSource::Award);
    }

    #[test]
    fn test_second_assignment_conflicts() {
        let f = fixture();
        let (_, slots) = f
            .engine
            .create_shift(draft_for(
                f.pharmacy_id,
                f.poster_id,
                ShiftRole::Pharmacist,
                &["2026-01-17"],
            ))
            .unwrap();
        let date = make_date("2026-01-17");

        f.engine.assign(slots[0].id, date, f.worker_id).unwrap();

        let other = sample_worker(ShiftRole::Pharmacist);
        f.engine.register_worker(other.clone());
        let result = f.engine.assign(slots[0].id, date, other.id);
        assert!(matches!(result, Err(EngineError::AssignmentConflict { .. })));

        // The winning call's assignment is untouched.
        let stored = f.engine.store().assignment(slots[0].id, date).unwrap();
        assert_eq!(stored.user_id, f.worker_id);
    }

    #[test]
    fn test_concurrent_assignment_exactly_one_wins() {
        let f = fixture();
        let (_, slots) = f
            .engine
            .create_shift(draft_for(
                f.pharmacy_id,
                f.poster_id,
                ShiftRole::Pharmacist,
                &["2026-01-17"],
            ))
            .unwrap();
        let slot_id = slots[0].id;
        let date = make_date("2026-01-17");

        let other = sample_worker(ShiftRole::Pharmacist);
        f.engine.register_worker(other.clone());

        let mut handles = Vec::new();
        for user_id in [f.worker_id, other.id] {
            let engine = Arc::clone(&f.engine);
            handles.push(std::thread::spawn(move || {
                engine.assign(slot_id, date, user_id)
            }));
        }

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
        assert_eq!(winners.len(), 1);

        let losers: Vec<_> = results
            .iter()
            .filter(|r| {
                matches!(r, Err(EngineError::AssignmentConflict { .. }))
            })
            .collect();
        assert_eq!(losers.len(), 1);

        let stored = f.engine.store().assignment(slot_id, date).unwrap();
        let winner = winners[0].as_ref().unwrap();
        assert_eq!(stored.user_id, winner.user_id);
    }

    #[test]
    fn test_reassign_recomputes_snapshot() {
        let f = fixture();
        let (_, slots) = f
            .engine
            .create_shift(draft_for(
                f.pharmacy_id,
                f.poster_id,
                ShiftRole::Pharmacist,
                &["2026-01-17"],
            ))
            .unwrap();
        let date = make_date("2026-01-17");

        let first = f.engine.assign(slots[0].id, date, f.worker_id).unwrap();
        assert_eq!(first.unit_rate, dec("55.00"));

        // The replacement worker has no membership, so resolves casual; the
        // test table has no casual pharmacist entry and the lock falls back
        // to zero with a not-found reason.
        let other = sample_worker(ShiftRole::Pharmacist);
        f.engine.register_worker(other.clone());

        let mut receiver = f.engine.subscribe();
        let second = f.engine.reassign(slots[0].id, date, other.id).unwrap();

        assert_ne!(second.id, first.id);
        assert_eq!(second.unit_rate, Decimal::ZERO);
        assert_eq!(second.rate_reason.source, RateSource::NotFound);

        let event = receiver.try_recv().unwrap();
        assert_eq!(
            event,
            DomainEvent::SlotReassigned {
                assignment_id: second.id,
                slot_id: slots[0].id,
                slot_date: date,
                previous_user_id: f.worker_id,
                user_id: other.id,
            }
        );
    }

    #[test]
    fn test_assign_invalid_occurrence_rejected() {
        let f = fixture();
        let (_, slots) = f
            .engine
            .create_shift(draft_for(
                f.pharmacy_id,
                f.poster_id,
                ShiftRole::Pharmacist,
                &["2026-01-17"],
            ))
            .unwrap();

        let result = f
            .engine
            .assign(slots[0].id, make_date("2026-01-18"), f.worker_id);
        assert!(matches!(result, Err(EngineError::NotAnOccurrence { .. })));
    }

    #[test]
    fn test_single_user_only_rejects_second_assignee() {
        let f = fixture();
        let mut draft = draft_for(
            f.pharmacy_id,
            f.poster_id,
            ShiftRole::Pharmacist,
            &["2026-01-16", "2026-01-17"],
        );
        draft.single_user_only = true;
        let (shift, slots) = f.engine.create_shift(draft).unwrap();

        f.engine
            .assign(slots[0].id, make_date("2026-01-16"), f.worker_id)
            .unwrap();

        let other = sample_worker(ShiftRole::Pharmacist);
        f.engine.register_worker(other.clone());

        let result = f
            .engine
            .assign(slots[1].id, make_date("2026-01-17"), other.id);
        match result {
            Err(EngineError::SingleWorkerConflict {
                shift_id,
                existing_user,
            }) => {
                assert_eq!(shift_id, shift.id);
                assert_eq!(existing_user, f.worker_id);
            }
            other => panic!("Expected SingleWorkerConflict, got {other:?}"),
        }
    }

    #[test]
    fn test_single_user_only_allows_same_assignee() {
        let f = fixture();
        let mut draft = draft_for(
            f.pharmacy_id,
            f.poster_id,
            ShiftRole::Pharmacist,
            &["2026-01-16", "2026-01-17"],
        );
        draft.single_user_only = true;
        let (_, slots) = f.engine.create_shift(draft).unwrap();

        f.engine
            .assign(slots[0].id, make_date("2026-01-16"), f.worker_id)
            .unwrap();
        let second = f
            .engine
            .assign(slots[1].id, make_date("2026-01-17"), f.worker_id);
        assert!(second.is_ok());
    }

    #[test]
    fn test_casual_assistant_gets_owner_bonus() {
        let f = fixture();
        let mut draft = draft_for(
            f.pharmacy_id,
            f.poster_id,
            ShiftRole::Assistant,
            &["2026-01-14"],
        );
        draft.owner_adjusted_rate = Some(dec("5.00"));
        draft.slots[0].start_time = chrono::NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        draft.slots[0].end_time = chrono::NaiveTime::from_hms_opt(14, 0, 0).unwrap();
        let (_, slots) = f.engine.create_shift(draft).unwrap();

        // No membership at the pharmacy: resolves casual.
        let assistant = sample_worker(ShiftRole::Assistant);
        f.engine.register_worker(assistant.clone());
        f.engine.register_classification(
            assistant.id,
            crate::models::WorkerClassification::Assistant(StaffProfile {
                classification_level: Some(ClassificationLevel::Level2),
            }),
        );

        let assignment = f
            .engine
            .assign(slots[0].id, make_date("2026-01-14"), assistant.id)
            .unwrap();

        assert_eq!(assignment.unit_rate, dec("35.00"));
        assert!(assignment.rate_reason.bonus_applied);
        assert_eq!(assignment.rate_reason.lookup_key, "early_morning");
    }

    #[test]
    fn test_invoice_lines_reflect_locked_rates() {
        let f = fixture();
        let (shift, slots) = f
            .engine
            .create_shift(draft_for(
                f.pharmacy_id,
                f.poster_id,
                ShiftRole::Pharmacist,
                &["2026-01-17"],
            ))
            .unwrap();
        let date = make_date("2026-01-17");

        f.engine.assign(slots[0].id, date, f.worker_id).unwrap();

        let lines = f.engine.invoice_lines_for_shift(shift.id).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].hours, dec("8"));
        assert_eq!(lines[0].unit_rate, dec("55.00"));
        assert_eq!(lines[0].amount, dec("440.00"));
    }
}
