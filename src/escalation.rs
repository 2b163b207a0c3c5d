//! Escalation tiers and the visibility path computation.
//!
//! A shift's visibility widens through an ordered path of tiers. The path is
//! not stored: it is recomputed on demand from three context facts (is the
//! posting context an organization admin, does the pharmacy's owner have a
//! chain grouping, has the owning profile been claimed by an organization),
//! and the shift stores only the index of its currently selected tier.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::Pharmacy;

/// One stage of a shift's visibility policy, narrowest audience first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationTier {
    /// The pharmacy's own full-time and part-time staff.
    FullPartTime,
    /// The pharmacy's locum and casual pool.
    LocumCasual,
    /// Staff across the owner's chain.
    OwnerChain,
    /// Staff across the claiming organization's chain.
    OrgChain,
    /// Every eligible worker on the platform.
    Platform,
}

impl EscalationTier {
    /// Returns the stable name of the tier.
    pub fn name(self) -> &'static str {
        match self {
            EscalationTier::FullPartTime => "full_part_time",
            EscalationTier::LocumCasual => "locum_casual",
            EscalationTier::OwnerChain => "owner_chain",
            EscalationTier::OrgChain => "org_chain",
            EscalationTier::Platform => "platform",
        }
    }
}

impl std::fmt::Display for EscalationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The context facts the tier path is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationContext {
    /// Whether the posting context is an organization administrator.
    pub org_admin: bool,
    /// Whether the pharmacy's owner has at least one chain grouping.
    pub has_chain: bool,
    /// Whether the owning profile has been claimed by an organization.
    pub claimed: bool,
}

impl EscalationContext {
    /// Derives the context for a pharmacy and posting user.
    pub fn for_pharmacy(pharmacy: &Pharmacy, org_admin: bool) -> Self {
        Self {
            org_admin,
            has_chain: pharmacy.owner_has_chain,
            claimed: pharmacy.claimed_by_organization,
        }
    }
}

/// Computes the ordered tier path for a posting context.
///
/// Organization admins get the full path regardless of chain or claim. A
/// pharmacy with neither a chain nor a claim has no narrower in-house
/// audience, so its shifts start (and end) at platform visibility. Every
/// other context starts with the in-house tiers and always terminates in
/// the platform tier.
///
/// # Examples
///
/// ```
/// use locum_engine::escalation::{tier_path, EscalationContext, EscalationTier};
///
/// let ctx = EscalationContext { org_admin: false, has_chain: false, claimed: false };
/// assert_eq!(tier_path(&ctx), vec![EscalationTier::Platform]);
/// ```
pub fn tier_path(ctx: &EscalationContext) -> Vec<EscalationTier> {
    if ctx.org_admin {
        return vec![
            EscalationTier::FullPartTime,
            EscalationTier::LocumCasual,
            EscalationTier::OwnerChain,
            EscalationTier::OrgChain,
            EscalationTier::Platform,
        ];
    }

    if !ctx.has_chain && !ctx.claimed {
        return vec![EscalationTier::Platform];
    }

    let mut path = vec![EscalationTier::FullPartTime, EscalationTier::LocumCasual];
    if ctx.has_chain {
        path.push(EscalationTier::OwnerChain);
    }
    if ctx.claimed {
        path.push(EscalationTier::OrgChain);
    }
    path.push(EscalationTier::Platform);
    path
}

/// Returns the tier currently selected by a stored level, if the level is
/// still valid for the path.
pub fn current_tier(path: &[EscalationTier], level: usize) -> Option<EscalationTier> {
    path.get(level).copied()
}

/// Validates a tier selection against a computed path.
///
/// Returns the index of the selected tier within the path. Selecting a tier
/// absent from the path is rejected; re-selecting the current tier is a
/// no-op that returns the unchanged index.
pub fn select_tier(
    shift_id: Uuid,
    path: &[EscalationTier],
    tier: EscalationTier,
) -> EngineResult<usize> {
    path.iter()
        .position(|&t| t == tier)
        .ok_or_else(|| EngineError::TierNotAvailable {
            shift_id,
            tier: tier.name().to_string(),
        })
}
