//! Pharmacy context supplied by the pharmacy profile collaborator.
//!
//! The engine reads chain ownership, organization claims, and the operating
//! state from these rows; it never mutates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RateType;

/// Australian state or territory a pharmacy operates in.
///
/// Used as the key into the public-holiday calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuState {
    /// New South Wales.
    NSW,
    /// Victoria.
    VIC,
    /// Queensland.
    QLD,
    /// South Australia.
    SA,
    /// Western Australia.
    WA,
    /// Tasmania.
    TAS,
    /// Australian Capital Territory.
    ACT,
    /// Northern Territory.
    NT,
}

impl AuState {
    /// Returns the holiday-calendar key for this state.
    pub fn key(self) -> &'static str {
        match self {
            AuState::NSW => "NSW",
            AuState::VIC => "VIC",
            AuState::QLD => "QLD",
            AuState::SA => "SA",
            AuState::WA => "WA",
            AuState::TAS => "TAS",
            AuState::ACT => "ACT",
            AuState::NT => "NT",
        }
    }
}

/// A pharmacy location shifts are posted at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pharmacy {
    /// Unique identifier for the pharmacy.
    pub id: Uuid,
    /// Trading name.
    pub name: String,
    /// The organization this pharmacy belongs to, if any.
    pub organization_id: Option<Uuid>,
    /// Whether the owner has at least one chain grouping.
    pub owner_has_chain: bool,
    /// Whether the owning profile has been claimed by an organization.
    pub claimed_by_organization: bool,
    /// The state the pharmacy operates in (drives holiday lookups).
    pub state: AuState,
    /// IANA timezone name (e.g. "Australia/Sydney").
    pub timezone: String,
    /// Default rate type applied to new pharmacist shifts.
    #[serde(default)]
    pub default_rate_type: Option<RateType>,
    /// Default fixed rate applied to new pharmacist shifts.
    #[serde(default)]
    pub default_fixed_rate: Option<Decimal>,
    /// Whether swap requests auto-publish a replacement shift.
    #[serde(default)]
    pub auto_publish_swaps: bool,
}
