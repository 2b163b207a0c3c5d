//! Interest, reveal, and rejection workflow.
//!
//! Workers express interest in a shift (optionally one slot of it); the
//! poster sees identities only as the current visibility tier allows, and
//! may spend reveal quota to unmask platform-tier interests. Explicit
//! declines are recorded so an occurrence is never re-offered to a worker
//! who already turned it down.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::escalation::EscalationTier;
use crate::models::{InterestView, SlotInterest, SlotRejection, WorkerDisplay};
use crate::recurrence::is_occurrence;

use super::{DomainEvent, RosterEngine};

impl RosterEngine {
    /// Records a worker's interest in a shift, optionally scoped to one
    /// slot.
    ///
    /// Repeat expressions for the same (user, shift, slot) triple are
    /// idempotent: the existing row is returned and no event is emitted.
    pub fn express_interest(
        &self,
        user_id: Uuid,
        shift_id: Uuid,
        slot_id: Option<Uuid>,
    ) -> EngineResult<SlotInterest> {
        self.store().worker(user_id)?;
        self.store().shift(shift_id)?;

        if let Some(slot_id) = slot_id {
            let slot = self.store().slot(slot_id)?;
            if slot.shift_id != shift_id {
                return Err(EngineError::SlotNotInShift { slot_id, shift_id });
            }
        }

        if let Some(existing) = self.store().find_interest(user_id, shift_id, slot_id) {
            return Ok(existing);
        }

        let interest = SlotInterest {
            id: Uuid::new_v4(),
            shift_id,
            slot_id,
            user_id,
            revealed: false,
            created_at: Utc::now(),
        };
        self.store().insert_interest(interest.clone());

        self.emit(DomainEvent::InterestExpressed {
            interest_id: interest.id,
            shift_id,
            user_id,
        });
        Ok(interest)
    }

    /// Reveals an interested worker's identity to the poster.
    ///
    /// Consumes one unit of the shift's reveal quota; an exhausted quota is
    /// a reported error, not a silent cap. Revealing an already-revealed
    /// interest is a no-op that consumes nothing.
    pub fn reveal_interest(&self, interest_id: Uuid) -> EngineResult<SlotInterest> {
        let interest = self.store().interest(interest_id)?;
        if interest.revealed {
            return Ok(interest);
        }

        self.store().with_shift_mut(interest.shift_id, |shift| {
            if shift.reveal_count >= shift.reveal_quota {
                return Err(EngineError::RevealQuotaExceeded {
                    shift_id: shift.id,
                    quota: shift.reveal_quota,
                });
            }
            shift.reveal_count += 1;
            Ok(())
        })?;

        let revealed = self.store().set_interest_revealed(interest_id)?;
        self.emit(DomainEvent::InterestRevealed {
            interest_id,
            shift_id: revealed.shift_id,
            user_id: revealed.user_id,
        });
        Ok(revealed)
    }

    /// Records that a worker declined one slot occurrence.
    ///
    /// Duplicate declines for the same (slot, slot_date, user) tuple are
    /// idempotent: the existing row is returned and no event is emitted.
    pub fn reject_occurrence(
        &self,
        user_id: Uuid,
        slot_id: Uuid,
        slot_date: NaiveDate,
    ) -> EngineResult<SlotRejection> {
        self.store().worker(user_id)?;
        let slot = self.store().slot(slot_id)?;
        if !is_occurrence(&slot, slot_date) {
            return Err(EngineError::NotAnOccurrence { slot_id, slot_date });
        }

        let rejection = SlotRejection {
            id: Uuid::new_v4(),
            slot_id,
            slot_date,
            user_id,
            created_at: Utc::now(),
        };
        let (stored, inserted) = self.store().insert_rejection_if_absent(rejection);

        if inserted {
            self.emit(DomainEvent::OccurrenceRejected {
                slot_id,
                slot_date,
                user_id,
            });
        }
        Ok(stored)
    }

    /// Lists a shift's interests as the poster may see them.
    ///
    /// At the platform tier, unrevealed workers appear as anonymized
    /// placeholders; revealed interests, and any narrower tier, show full
    /// identity.
    pub fn interests_for_poster(
        &self,
        shift_id: Uuid,
        org_admin: bool,
    ) -> EngineResult<Vec<InterestView>> {
        let tier = self.current_tier_for(shift_id, org_admin)?;
        let conceal = tier == EscalationTier::Platform;

        let interests = self.store().interests_for_shift(shift_id);
        let mut views = Vec::with_capacity(interests.len());
        for (index, interest) in interests.iter().enumerate() {
            let worker = if conceal && !interest.revealed {
                WorkerDisplay::Anonymous {
                    placeholder: format!("Interested worker {}", index + 1),
                }
            } else {
                let worker = self.store().worker(interest.user_id)?;
                WorkerDisplay::Named {
                    id: worker.id,
                    display_name: worker.display_name,
                    email: worker.email,
                }
            };
            views.push(InterestView {
                interest_id: interest.id,
                slot_id: interest.slot_id,
                revealed: interest.revealed,
                worker,
            });
        }
        Ok(views)
    }

    /// Lists the workers who may be offered one occurrence: everyone
    /// interested in the slot (or the whole shift), minus anyone who has
    /// declined that occurrence, oldest interest first.
    pub fn offer_candidates(&self, slot_id: Uuid, slot_date: NaiveDate) -> EngineResult<Vec<Uuid>> {
        let slot = self.store().slot(slot_id)?;
        if !is_occurrence(&slot, slot_date) {
            return Err(EngineError::NotAnOccurrence { slot_id, slot_date });
        }

        let mut candidates = Vec::new();
        for interest in self.store().interests_for_shift(slot.shift_id) {
            if let Some(scoped) = interest.slot_id {
                if scoped != slot_id {
                    continue;
                }
            }
            if self.store().has_rejected(slot_id, slot_date, interest.user_id) {
                continue;
            }
            if !candidates.contains(&interest.user_id) {
                candidates.push(interest.user_id);
            }
        }
        Ok(candidates)
    }
}
