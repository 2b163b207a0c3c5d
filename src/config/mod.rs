//! Reference configuration: the pay-rate table and public-holiday calendar.
//!
//! Both are read-only lookup structures loaded once at startup from YAML
//! files; nothing in the engine mutates them afterwards.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ClassificationRates, ContextRates, EmploymentRates, HolidayCalendar, HolidaysFile, RateTable,
    RatesFile, RosterConfig, TableMetadata,
};
