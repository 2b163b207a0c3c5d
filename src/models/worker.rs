//! Worker model and related types.
//!
//! This module defines the [`Worker`] identity row supplied by the auth
//! collaborator, the [`EmploymentType`] enum, and the [`PharmacyMembership`]
//! record supplied by the membership collaborator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ShiftRole;

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment.
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Casual employment (no guaranteed hours).
    Casual,
}

/// A worker eligible to claim shifts.
///
/// Identity, role, and contact details are supplied by the auth layer;
/// the engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier for the worker.
    pub id: Uuid,
    /// Display name shown to posters once an interest is revealed.
    pub display_name: String,
    /// Contact email.
    pub email: String,
    /// The role the worker is registered for.
    pub role: ShiftRole,
}

/// A worker's membership at a pharmacy.
///
/// Memberships carry the employment type used to derive the rate-table
/// employment category at assignment time. A worker with no active
/// membership at a pharmacy is treated as casual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacyMembership {
    /// The worker this membership belongs to.
    pub worker_id: Uuid,
    /// The pharmacy this membership is at.
    pub pharmacy_id: Uuid,
    /// The employment arrangement at this pharmacy.
    pub employment_type: EmploymentType,
    /// Whether the membership is currently active.
    pub active: bool,
}

impl PharmacyMembership {
    /// Returns true if the member is employed full-time or part-time.
    ///
    /// # Examples
    ///
    /// ```
    /// use locum_engine::models::{EmploymentType, PharmacyMembership};
    /// use uuid::Uuid;
    ///
    /// let membership = PharmacyMembership {
    ///     worker_id: Uuid::new_v4(),
    ///     pharmacy_id: Uuid::new_v4(),
    ///     employment_type: EmploymentType::PartTime,
    ///     active: true,
    /// };
    /// assert!(membership.is_permanent());
    /// ```
    pub fn is_permanent(&self) -> bool {
        matches!(
            self.employment_type,
            EmploymentType::FullTime | EmploymentType::PartTime
        )
    }
}
