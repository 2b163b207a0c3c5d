//! Domain models for the shift allocation engine.
//!
//! Rows owned by this core (shifts, slots, assignments, interests,
//! rejections, leave requests) plus the read-only context rows supplied by
//! collaborators (workers, pharmacies, memberships, classifications).

mod assignment;
mod classification;
mod interest;
mod leave;
mod pharmacy;
mod shift;
mod worker;

pub use assignment::{InvoiceLine, RateReason, RateSource, SlotAssignment};
pub use classification::{
    AwardLevel, ClassificationLevel, ClassificationSource, InternHalf, InternProfile,
    PharmacistProfile, StaffProfile, StudentProfile, StudentYear, WorkerClassification,
};
pub use interest::{InterestView, SlotInterest, SlotRejection, WorkerDisplay};
pub use leave::{LeaveRequest, LeaveStatus, LeaveType, SwapStatus, WorkerShiftRequest};
pub use pharmacy::{AuState, Pharmacy};
pub use shift::{RateType, Shift, ShiftRole, ShiftSlot};
pub use worker::{EmploymentType, PharmacyMembership, Worker};
