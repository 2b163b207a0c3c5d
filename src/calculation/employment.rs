//! Employment category mapping for rate lookups.
//!
//! The rate table groups employment into two coarse categories: permanent
//! (full-time or part-time) and casual. A worker with no active membership
//! at the pharmacy falls into the casual category.

use serde::{Deserialize, Serialize};

use crate::models::{EmploymentType, PharmacyMembership};

/// Coarse employment grouping used as a rate-table dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentCategory {
    /// Full-time or part-time employment.
    FullPartTime,
    /// Casual employment, including workers with no active membership.
    Casual,
}

impl EmploymentCategory {
    /// Returns the rate-table key for this category.
    pub fn key(self) -> &'static str {
        match self {
            EmploymentCategory::FullPartTime => "full_part_time",
            EmploymentCategory::Casual => "casual",
        }
    }
}

impl std::fmt::Display for EmploymentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Maps an employment type to its rate-table category.
pub fn employment_category(employment_type: EmploymentType) -> EmploymentCategory {
    match employment_type {
        EmploymentType::FullTime | EmploymentType::PartTime => EmploymentCategory::FullPartTime,
        EmploymentType::Casual => EmploymentCategory::Casual,
    }
}

/// Derives the employment category from a worker's membership, if any.
///
/// Only an active membership counts; a missing or inactive membership
/// resolves to casual.
pub fn employment_category_for(membership: Option<&PharmacyMembership>) -> EmploymentCategory {
    match membership {
        Some(m) if m.active => employment_category(m.employment_type),
        _ => EmploymentCategory::Casual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn membership(employment_type: EmploymentType, active: bool) -> PharmacyMembership {
        PharmacyMembership {
            worker_id: Uuid::new_v4(),
            pharmacy_id: Uuid::new_v4(),
            employment_type,
            active,
        }
    }

    #[test]
    fn test_full_time_maps_to_full_part_time() {
        assert_eq!(
            employment_category(EmploymentType::FullTime),
            EmploymentCategory::FullPartTime
        );
    }

    #[test]
    fn test_part_time_maps_to_full_part_time() {
        assert_eq!(
            employment_category(EmploymentType::PartTime),
            EmploymentCategory::FullPartTime
        );
    }

    #[test]
    fn test_casual_maps_to_casual() {
        assert_eq!(
            employment_category(EmploymentType::Casual),
            EmploymentCategory::Casual
        );
    }

    #[test]
    fn test_active_membership_drives_category() {
        let m = membership(EmploymentType::PartTime, true);
        assert_eq!(
            employment_category_for(Some(&m)),
            EmploymentCategory::FullPartTime
        );
    }

    #[test]
    fn test_inactive_membership_is_casual() {
        let m = membership(EmploymentType::FullTime, false);
        assert_eq!(employment_category_for(Some(&m)), EmploymentCategory::Casual);
    }

    #[test]
    fn test_missing_membership_is_casual() {
        assert_eq!(employment_category_for(None), EmploymentCategory::Casual);
    }

    #[test]
    fn test_category_keys() {
        assert_eq!(EmploymentCategory::FullPartTime.key(), "full_part_time");
        assert_eq!(EmploymentCategory::Casual.key(), "casual");
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentCategory::FullPartTime).unwrap(),
            "\"full_part_time\""
        );
    }
}
