//! Interest and rejection rows for the reveal workflow.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A worker's expression of interest in a shift, optionally scoped to one
/// slot.
///
/// Uniqueness is not enforced at this layer; a worker may have expressed
/// interest more than once historically. The workflow treats repeat
/// expressions idempotently at its boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInterest {
    /// Unique identifier for the interest.
    pub id: Uuid,
    /// The shift the worker is interested in.
    pub shift_id: Uuid,
    /// The specific slot, when the interest is slot-scoped.
    #[serde(default)]
    pub slot_id: Option<Uuid>,
    /// The interested worker.
    pub user_id: Uuid,
    /// Whether the worker's identity is visible to the poster.
    pub revealed: bool,
    /// When the interest was expressed.
    pub created_at: DateTime<Utc>,
}

/// How a worker appears in the poster's interest listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum WorkerDisplay {
    /// Full identity, shown for revealed interests and for any tier
    /// narrower than the platform tier.
    Named {
        /// The worker's ID.
        id: Uuid,
        /// The worker's display name.
        display_name: String,
        /// The worker's contact email.
        email: String,
    },
    /// Anonymized placeholder shown at the platform tier before reveal.
    Anonymous {
        /// Placeholder label (e.g. "Interested worker 2").
        placeholder: String,
    },
}

/// One entry in the poster's view of a shift's interests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestView {
    /// The underlying interest.
    pub interest_id: Uuid,
    /// The slot the interest is scoped to, if any.
    pub slot_id: Option<Uuid>,
    /// Whether the interest has been revealed.
    pub revealed: bool,
    /// The worker as the poster may see them.
    pub worker: WorkerDisplay,
}

/// A worker's explicit decline of one slot occurrence.
///
/// Unique per (slot, slot_date, user); prevents the same occurrence being
/// re-offered to a worker who already declined it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRejection {
    /// Unique identifier for the rejection.
    pub id: Uuid,
    /// The declined slot.
    pub slot_id: Uuid,
    /// The declined occurrence date.
    pub slot_date: NaiveDate,
    /// The declining worker.
    pub user_id: Uuid,
    /// When the decline was recorded.
    pub created_at: DateTime<Utc>,
}
