//! Classification profiles and the rate-table key they produce.
//!
//! The source of a worker's classification varies by role: pharmacists carry
//! an award level, interns a half-year marker, students a year, and
//! assistants/technicians a shared level vocabulary. Each profile implements
//! the [`ClassificationSource`] capability so the rate resolver can ask for
//! a table key without probing role-specific fields.

use serde::{Deserialize, Serialize};

use super::ShiftRole;

/// Award level for pharmacists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardLevel {
    /// Base pharmacist level.
    #[default]
    Pharmacist,
    /// Experienced pharmacist.
    ExperiencedPharmacist,
    /// Pharmacist in charge.
    PharmacistInCharge,
    /// Pharmacist manager.
    PharmacistManager,
}

impl AwardLevel {
    /// Returns the rate-table key for this award level.
    pub fn key(self) -> &'static str {
        match self {
            AwardLevel::Pharmacist => "pharmacist",
            AwardLevel::ExperiencedPharmacist => "experienced_pharmacist",
            AwardLevel::PharmacistInCharge => "pharmacist_in_charge",
            AwardLevel::PharmacistManager => "pharmacist_manager",
        }
    }
}

/// Which half of the intern year a pharmacy intern is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternHalf {
    /// First half of the intern year.
    #[default]
    FirstHalf,
    /// Second half of the intern year.
    SecondHalf,
}

impl InternHalf {
    /// Returns the rate-table key for this intern half.
    pub fn key(self) -> &'static str {
        match self {
            InternHalf::FirstHalf => "first_half",
            InternHalf::SecondHalf => "second_half",
        }
    }
}

/// Year of study for pharmacy students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentYear {
    /// First year.
    #[default]
    Year1,
    /// Second year.
    Year2,
    /// Third year.
    Year3,
    /// Fourth year.
    Year4,
}

impl StudentYear {
    /// Returns the rate-table key for this student year.
    pub fn key(self) -> &'static str {
        match self {
            StudentYear::Year1 => "year_1",
            StudentYear::Year2 => "year_2",
            StudentYear::Year3 => "year_3",
            StudentYear::Year4 => "year_4",
        }
    }
}

/// Classification level shared by assistants and technicians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationLevel {
    /// Level 1 (most junior).
    #[default]
    Level1,
    /// Level 2.
    Level2,
    /// Level 3.
    Level3,
    /// Level 4.
    Level4,
}

impl ClassificationLevel {
    /// Returns the rate-table key for this level.
    pub fn key(self) -> &'static str {
        match self {
            ClassificationLevel::Level1 => "level_1",
            ClassificationLevel::Level2 => "level_2",
            ClassificationLevel::Level3 => "level_3",
            ClassificationLevel::Level4 => "level_4",
        }
    }
}

/// Capability to produce a rate-table classification key.
///
/// Implemented by each role-specific profile; the resolver selects the
/// profile by the shift's `role_needed` and never inspects its fields.
pub trait ClassificationSource {
    /// Returns the rate-table classification key for this profile.
    fn classification_key(&self) -> &'static str;
}

/// A pharmacist's classification profile, sourced from onboarding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacistProfile {
    /// Award level; defaults to base pharmacist when unset.
    pub award_level: Option<AwardLevel>,
}

impl ClassificationSource for PharmacistProfile {
    fn classification_key(&self) -> &'static str {
        self.award_level.unwrap_or_default().key()
    }
}

/// An intern's classification profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternProfile {
    /// Which half of the intern year; defaults to the first half when unset.
    pub intern_half: Option<InternHalf>,
}

impl ClassificationSource for InternProfile {
    fn classification_key(&self) -> &'static str {
        self.intern_half.unwrap_or_default().key()
    }
}

/// A student's classification profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Year of study; defaults to first year when unset.
    pub student_year: Option<StudentYear>,
}

impl ClassificationSource for StudentProfile {
    fn classification_key(&self) -> &'static str {
        self.student_year.unwrap_or_default().key()
    }
}

/// An assistant's or technician's classification profile.
///
/// Both roles share the same level vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    /// Classification level; defaults to level 1 when unset.
    pub classification_level: Option<ClassificationLevel>,
}

impl ClassificationSource for StaffProfile {
    fn classification_key(&self) -> &'static str {
        self.classification_level.unwrap_or_default().key()
    }
}

/// A worker's classification, one variant per role.
///
/// # Example
///
/// ```
/// use locum_engine::models::{
///     ClassificationLevel, ClassificationSource, StaffProfile, WorkerClassification,
/// };
///
/// let classification = WorkerClassification::Assistant(StaffProfile {
///     classification_level: Some(ClassificationLevel::Level2),
/// });
/// assert_eq!(classification.classification_key(), "level_2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "role", content = "profile")]
pub enum WorkerClassification {
    /// Pharmacist profile with an award level.
    Pharmacist(PharmacistProfile),
    /// Intern profile with a half-year marker.
    Intern(InternProfile),
    /// Student profile with a year of study.
    Student(StudentProfile),
    /// Assistant profile with a classification level.
    Assistant(StaffProfile),
    /// Technician profile with a classification level.
    Technician(StaffProfile),
}

impl WorkerClassification {
    /// Returns the most junior classification for the given role.
    ///
    /// Used when a worker has no classification profile on record.
    pub fn default_for(role: ShiftRole) -> Self {
        match role {
            ShiftRole::Pharmacist => WorkerClassification::Pharmacist(PharmacistProfile::default()),
            ShiftRole::Intern => WorkerClassification::Intern(InternProfile::default()),
            ShiftRole::Student => WorkerClassification::Student(StudentProfile::default()),
            ShiftRole::Assistant => WorkerClassification::Assistant(StaffProfile::default()),
            ShiftRole::Technician => WorkerClassification::Technician(StaffProfile::default()),
        }
    }

    /// Returns the role this classification belongs to.
    pub fn role(&self) -> ShiftRole {
        match self {
            WorkerClassification::Pharmacist(_) => ShiftRole::Pharmacist,
            WorkerClassification::Intern(_) => ShiftRole::Intern,
            WorkerClassification::Student(_) => ShiftRole::Student,
            WorkerClassification::Assistant(_) => ShiftRole::Assistant,
            WorkerClassification::Technician(_) => ShiftRole::Technician,
        }
    }

    fn source(&self) -> &dyn ClassificationSource {
        match self {
            WorkerClassification::Pharmacist(p) => p,
            WorkerClassification::Intern(p) => p,
            WorkerClassification::Student(p) => p,
            WorkerClassification::Assistant(p) => p,
            WorkerClassification::Technician(p) => p,
        }
    }
}

impl ClassificationSource for WorkerClassification {
    fn classification_key(&self) -> &'static str {
        self.source().classification_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pharmacist_defaults_to_base_level() {
        let profile = PharmacistProfile { award_level: None };
        assert_eq!(profile.classification_key(), "pharmacist");
    }

    #[test]
    fn test_pharmacist_manager_key() {
        let profile = PharmacistProfile {
            award_level: Some(AwardLevel::PharmacistManager),
        };
        assert_eq!(profile.classification_key(), "pharmacist_manager");
    }

    #[test]
    fn test_intern_defaults_to_first_half() {
        let profile = InternProfile { intern_half: None };
        assert_eq!(profile.classification_key(), "first_half");
    }

    #[test]
    fn test_student_defaults_to_year_1() {
        let profile = StudentProfile { student_year: None };
        assert_eq!(profile.classification_key(), "year_1");
    }

    #[test]
    fn test_assistant_and_technician_share_level_vocabulary() {
        let profile = StaffProfile {
            classification_level: Some(ClassificationLevel::Level3),
        };
        let assistant = WorkerClassification::Assistant(profile);
        let technician = WorkerClassification::Technician(profile);
        assert_eq!(assistant.classification_key(), technician.classification_key());
        assert_eq!(assistant.classification_key(), "level_3");
    }

    #[test]
    fn test_default_for_every_role_is_most_junior() {
        assert_eq!(
            WorkerClassification::default_for(ShiftRole::Pharmacist).classification_key(),
            "pharmacist"
        );
        assert_eq!(
            WorkerClassification::default_for(ShiftRole::Intern).classification_key(),
            "first_half"
        );
        assert_eq!(
            WorkerClassification::default_for(ShiftRole::Student).classification_key(),
            "year_1"
        );
        assert_eq!(
            WorkerClassification::default_for(ShiftRole::Assistant).classification_key(),
            "level_1"
        );
        assert_eq!(
            WorkerClassification::default_for(ShiftRole::Technician).classification_key(),
            "level_1"
        );
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [
            ShiftRole::Pharmacist,
            ShiftRole::Intern,
            ShiftRole::Student,
            ShiftRole::Assistant,
            ShiftRole::Technician,
        ] {
            assert_eq!(WorkerClassification::default_for(role).role(), role);
        }
    }

    #[test]
    fn test_classification_serialization() {
        let classification = WorkerClassification::Intern(InternProfile {
            intern_half: Some(InternHalf::SecondHalf),
        });
        let json = serde_json::to_string(&classification).unwrap();
        assert!(json.contains("\"role\":\"intern\""));
        assert!(json.contains("\"intern_half\":\"second_half\""));

        let deserialized: WorkerClassification = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, classification);
    }
}
