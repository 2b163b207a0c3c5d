//! Rate resolution logic for the shift allocation engine.
//!
//! This module contains the pure functions behind rate locking: day typing
//! with public-holiday overrides, early-morning/late-night time categories,
//! employment category mapping, and the deterministic table lookup that
//! produces a rate together with its structured justification.

mod day_context;
mod employment;
mod rate_resolution;

pub use day_context::{
    early_morning_cutoff, get_day_type, get_time_category, late_night_cutoff, lookup_key, DayType,
    TimeCategory,
};
pub use employment::{employment_category, employment_category_for, EmploymentCategory};
pub use rate_resolution::{resolve_rate, RateResolution};
