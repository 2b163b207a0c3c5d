//! Configuration types for the rate table and holiday calendar.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Both structures are
//! loaded once at startup and treated as immutable reference data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Rates keyed by day type or time category (e.g. "weekday", "saturday",
/// "early_morning").
pub type ContextRates = HashMap<String, Decimal>;

/// Rates for one classification, keyed by employment category.
pub type EmploymentRates = HashMap<String, ContextRates>;

/// Rates for one role, keyed by classification.
pub type ClassificationRates = HashMap<String, EmploymentRates>;

/// Metadata identifying the loaded rate table.
#[derive(Debug, Clone, Deserialize)]
pub struct TableMetadata {
    /// The human-readable name of the rate table.
    pub name: String,
    /// The version or effective date of the table.
    pub version: String,
}

/// The rates configuration file structure (`rates.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct RatesFile {
    /// The human-readable name of the rate table.
    pub name: String,
    /// The version or effective date of the table.
    pub version: String,
    /// Role → classification → employment category → context key → rate.
    pub rates: HashMap<String, ClassificationRates>,
}

/// The holidays configuration file structure (`holidays.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysFile {
    /// State key → public holiday dates.
    pub states: HashMap<String, Vec<NaiveDate>>,
}

/// The multi-dimensional pay-rate table.
///
/// Keyed by (role, classification, employment category, day-or-time
/// context). Lookups never fail hard; a missing key returns `None` and the
/// resolver turns that into a zero rate with a "not found" reason.
#[derive(Debug, Clone)]
pub struct RateTable {
    roles: HashMap<String, ClassificationRates>,
}

impl RateTable {
    /// Creates a rate table from the nested role map.
    pub fn new(roles: HashMap<String, ClassificationRates>) -> Self {
        Self { roles }
    }

    /// Looks up the unit rate for a full key combination.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use locum_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/pharmacy")?;
    /// let rate = loader
    ///     .config()
    ///     .rate_table()
    ///     .unit_rate("pharmacist", "pharmacist", "full_part_time", "saturday");
    /// # Ok::<(), locum_engine::error::EngineError>(())
    /// ```
    pub fn unit_rate(
        &self,
        role_key: &str,
        classification_key: &str,
        employment_key: &str,
        lookup_key: &str,
    ) -> Option<Decimal> {
        self.roles
            .get(role_key)?
            .get(classification_key)?
            .get(employment_key)?
            .get(lookup_key)
            .copied()
    }

    /// Returns true if the table carries any rates for the role.
    pub fn has_role(&self, role_key: &str) -> bool {
        self.roles.contains_key(role_key)
    }
}

/// The state-keyed public-holiday calendar.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    states: HashMap<String, HashSet<NaiveDate>>,
}

impl HolidayCalendar {
    /// Creates a calendar from the per-state date lists.
    pub fn new(states: HashMap<String, Vec<NaiveDate>>) -> Self {
        let states = states
            .into_iter()
            .map(|(state, dates)| (state, dates.into_iter().collect()))
            .collect();
        Self { states }
    }

    /// Returns true if the date is a public holiday in the given state.
    pub fn is_public_holiday(&self, state_key: &str, date: NaiveDate) -> bool {
        self.states
            .get(state_key)
            .is_some_and(|dates| dates.contains(&date))
    }
}

/// The complete reference configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    metadata: TableMetadata,
    rate_table: RateTable,
    holidays: HolidayCalendar,
}

impl RosterConfig {
    /// Creates a RosterConfig from its component parts.
    pub fn new(metadata: TableMetadata, rate_table: RateTable, holidays: HolidayCalendar) -> Self {
        Self {
            metadata,
            rate_table,
            holidays,
        }
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Returns the rate table.
    pub fn rate_table(&self) -> &RateTable {
        &self.rate_table
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }
}
