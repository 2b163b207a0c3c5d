//! The shift allocation engine.
//!
//! [`RosterEngine`] ties the pure kernels (recurrence expansion, tier path
//! computation, rate resolution) to the row store and broadcasts domain
//! events for an external notification dispatcher. Many posters and workers
//! operate concurrently on independent shifts; only the brief
//! check-then-insert on one slot occurrence is exclusive.

mod assignment;
mod events;
mod interest;
mod leave;
mod store;

pub use events::DomainEvent;
pub use store::RosterStore;

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::escalation::{current_tier, select_tier, tier_path, EscalationContext, EscalationTier};
use crate::models::{
    EmploymentType, Pharmacy, PharmacyMembership, RateType, Shift, ShiftRole, ShiftSlot, Worker,
    WorkerClassification,
};
use crate::recurrence::expand_occurrences;

/// Capacity of the domain-event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Input for one slot of a new shift.
#[derive(Debug, Clone)]
pub struct SlotDraft {
    /// The anchor date.
    pub date: NaiveDate,
    /// Start of the time window.
    pub start_time: NaiveTime,
    /// End of the time window.
    pub end_time: NaiveTime,
    /// Weekdays the slot recurs on, 0 = Monday.
    pub recurring_days: Vec<u8>,
    /// Last date the recurrence may produce.
    pub recurring_end_date: Option<NaiveDate>,
}

/// Input for a new shift posting.
#[derive(Debug, Clone)]
pub struct ShiftDraft {
    /// The pharmacy the shift is posted at.
    pub pharmacy_id: Uuid,
    /// The posting user.
    pub posted_by: Uuid,
    /// The role needed.
    pub role_needed: ShiftRole,
    /// The employment basis being offered.
    pub employment_type: EmploymentType,
    /// Workload tags or requirements.
    pub workload_tags: Vec<String>,
    /// Rate-type selector; pharmacist shifts only.
    pub rate_type: Option<RateType>,
    /// Fixed hourly rate.
    pub fixed_rate: Option<Decimal>,
    /// Owner-adjusted casual bonus.
    pub owner_adjusted_rate: Option<Decimal>,
    /// Restrict every slot to a single assignee.
    pub single_user_only: bool,
    /// Maximum number of reveals.
    pub reveal_quota: u32,
    /// The shift's slots.
    pub slots: Vec<SlotDraft>,
}

/// The engine: store, reference configuration, and event channel.
pub struct RosterEngine {
    store: RosterStore,
    config: Arc<ConfigLoader>,
    events: broadcast::Sender<DomainEvent>,
}

impl RosterEngine {
    /// Creates an engine over the given reference configuration.
    pub fn new(config: ConfigLoader) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store: RosterStore::new(),
            config: Arc::new(config),
            events,
        }
    }

    /// Returns the row store.
    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    /// Returns the reference configuration.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Subscribes to domain events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }

    /// Broadcasts an event; delivery is best-effort.
    pub(crate) fn emit(&self, event: DomainEvent) {
        let _ = self.events.send(event);
    }

    // -------------------------------------------------------------------------
    // Collaborator context registration
    // -------------------------------------------------------------------------

    /// Registers a pharmacy supplied by the pharmacy profile collaborator.
    pub fn register_pharmacy(&self, pharmacy: Pharmacy) {
        self.store.upsert_pharmacy(pharmacy);
    }

    /// Registers a worker supplied by the auth layer.
    pub fn register_worker(&self, worker: Worker) {
        self.store.upsert_worker(worker);
    }

    /// Registers a membership supplied by the membership collaborator.
    pub fn register_membership(&self, membership: PharmacyMembership) {
        self.store.upsert_membership(membership);
    }

    /// Registers a worker's classification profile.
    pub fn register_classification(
        &self,
        worker_id: Uuid,
        classification: WorkerClassification,
    ) {
        self.store.upsert_classification(worker_id, classification);
    }

    // -------------------------------------------------------------------------
    // Shift lifecycle
    // -------------------------------------------------------------------------

    /// Creates a shift with its slots, validated against the data-model
    /// invariants. Pharmacist shifts without a rate-type selector inherit
    /// the pharmacy's defaults. The shift starts at the narrowest tier of
    /// its computed path.
    pub fn create_shift(&self, draft: ShiftDraft) -> EngineResult<(Shift, Vec<ShiftSlot>)> {
        let pharmacy = self.store.pharmacy(draft.pharmacy_id)?;
        self.store.worker(draft.posted_by)?;

        let (mut rate_type, mut fixed_rate) = (draft.rate_type, draft.fixed_rate);
        if draft.role_needed == ShiftRole::Pharmacist && rate_type.is_none() {
            rate_type = pharmacy.default_rate_type;
            if fixed_rate.is_none() {
                fixed_rate = pharmacy.default_fixed_rate;
            }
        }

        let shift = Shift {
            id: Uuid::new_v4(),
            pharmacy_id: draft.pharmacy_id,
            posted_by: draft.posted_by,
            role_needed: draft.role_needed,
            employment_type: draft.employment_type,
            workload_tags: draft.workload_tags,
            rate_type,
            fixed_rate,
            owner_adjusted_rate: draft.owner_adjusted_rate,
            escalation_level: 0,
            single_user_only: draft.single_user_only,
            reveal_quota: draft.reveal_quota,
            reveal_count: 0,
            created_at: Utc::now(),
        };
        shift.validate()?;

        let mut slots = Vec::with_capacity(draft.slots.len());
        for slot_draft in draft.slots {
            let slot = ShiftSlot {
                id: Uuid::new_v4(),
                shift_id: shift.id,
                date: slot_draft.date,
                start_time: slot_draft.start_time,
                end_time: slot_draft.end_time,
                recurring_days: slot_draft.recurring_days,
                recurring_end_date: slot_draft.recurring_end_date,
            };
            slot.validate()?;
            slots.push(slot);
        }

        self.store.insert_shift(shift.clone());
        for slot in &slots {
            self.store.insert_slot(slot.clone());
        }

        Ok((shift, slots))
    }

    /// Deletes a shift and everything it owns.
    ///
    /// A shift with recorded interests is never hard-deleted; it is retired
    /// through downstream cleanup instead.
    pub fn delete_shift(&self, shift_id: Uuid) -> EngineResult<()> {
        if !self.store.interests_for_shift(shift_id).is_empty() {
            return Err(EngineError::InvalidShift {
                shift_id,
                message: "shifts with recorded interests cannot be hard-deleted".to_string(),
            });
        }
        self.store.delete_shift_cascade(shift_id)
    }

    /// Expands one slot into its occurrence dates within `[from, to]`.
    pub fn occurrences(
        &self,
        slot_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<NaiveDate>> {
        let slot = self.store.slot(slot_id)?;
        Ok(expand_occurrences(&slot, from, to))
    }

    // -------------------------------------------------------------------------
    // Escalation
    // -------------------------------------------------------------------------

    /// Computes the ordered tier path for a shift's current context.
    ///
    /// The path is recomputed from the pharmacy's current facts every time,
    /// so a chain added or claim made after posting takes effect
    /// immediately.
    pub fn tier_path_for(&self, shift_id: Uuid, org_admin: bool) -> EngineResult<Vec<EscalationTier>> {
        let shift = self.store.shift(shift_id)?;
        let pharmacy = self.store.pharmacy(shift.pharmacy_id)?;
        Ok(tier_path(&EscalationContext::for_pharmacy(
            &pharmacy, org_admin,
        )))
    }

    /// Returns the tier the shift currently sits at.
    ///
    /// A stored level that no longer indexes into the freshly computed path
    /// (the context facts changed under it) is surfaced as
    /// [`EngineError::TierNotAvailable`] rather than silently clamped.
    pub fn current_tier_for(&self, shift_id: Uuid, org_admin: bool) -> EngineResult<EscalationTier> {
        let shift = self.store.shift(shift_id)?;
        let path = self.tier_path_for(shift_id, org_admin)?;
        current_tier(&path, shift.escalation_level).ok_or_else(|| EngineError::TierNotAvailable {
            shift_id,
            tier: format!("level {}", shift.escalation_level),
        })
    }

    /// Moves a shift to the given tier.
    ///
    /// Transitions are explicit: the poster or an external scheduler picks
    /// the target tier; nothing here advances on a timer. Selecting a tier
    /// outside the computed path is rejected before any write;
    /// re-selecting the current tier is a no-op.
    pub fn escalate(
        &self,
        shift_id: Uuid,
        tier: EscalationTier,
        org_admin: bool,
    ) -> EngineResult<Shift> {
        let path = self.tier_path_for(shift_id, org_admin)?;
        let level = select_tier(shift_id, &path, tier)?;

        let (shift, changed) = self.store.with_shift_mut(shift_id, |shift| {
            let changed = shift.escalation_level != level;
            shift.escalation_level = level;
            Ok((shift.clone(), changed))
        })?;

        if changed {
            self.emit(DomainEvent::ShiftEscalated { shift_id, tier });
        }
        Ok(shift)
    }
}
