//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the rate
//! table and public-holiday calendar from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{HolidayCalendar, HolidaysFile, RateTable, RatesFile, RosterConfig, TableMetadata};

/// Loads and provides access to the engine's reference configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/pharmacy/
/// ├── rates.yaml      # role/classification/employment/context-keyed rates
/// └── holidays.yaml   # state-keyed public holiday dates
/// ```
///
/// # Example
///
/// ```no_run
/// use locum_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/pharmacy").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap();
/// if loader.is_public_holiday("NSW", date) {
///     println!("public holiday rates apply");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RosterConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g. "./config/pharmacy")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if any
    /// required file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rates_path = path.join("rates.yaml");
        let rates_file = Self::load_yaml::<RatesFile>(&rates_path)?;

        let holidays_path = path.join("holidays.yaml");
        let holidays_file = Self::load_yaml::<HolidaysFile>(&holidays_path)?;

        let metadata = TableMetadata {
            name: rates_file.name,
            version: rates_file.version,
        };
        let config = RosterConfig::new(
            metadata,
            RateTable::new(rates_file.rates),
            HolidayCalendar::new(holidays_file.states),
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration, used by tests and embedders
    /// that assemble the tables in code.
    pub fn from_config(config: RosterConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Looks up a unit rate by full key combination.
    pub fn unit_rate(
        &self,
        role_key: &str,
        classification_key: &str,
        employment_key: &str,
        lookup_key: &str,
    ) -> Option<Decimal> {
        self.config
            .rate_table()
            .unit_rate(role_key, classification_key, employment_key, lookup_key)
    }

    /// Returns true if the date is a public holiday in the given state.
    pub fn is_public_holiday(&self, state_key: &str, date: NaiveDate) -> bool {
        self.config.holidays().is_public_holiday(state_key, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/pharmacy"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().metadata().name, "Pharmacy Industry Award");
        assert_eq!(loader.config().metadata().version, "2026-07-01");
    }

    #[test]
    fn test_pharmacist_saturday_rate() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rate = loader.unit_rate("pharmacist", "pharmacist", "full_part_time", "saturday");
        assert_eq!(rate, Some(dec("55.00")));
    }

    #[test]
    fn test_assistant_early_morning_casual_rate() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rate = loader.unit_rate("assistant", "level_2", "casual", "early_morning");
        assert_eq!(rate, Some(dec("30.00")));
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(
            loader.unit_rate("pharmacist", "no_such_level", "casual", "weekday"),
            None
        );
    }

    #[test]
    fn test_australia_day_is_holiday_in_nsw() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap();
        assert!(loader.is_public_holiday("NSW", date));
    }

    #[test]
    fn test_ordinary_saturday_is_not_holiday() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
        assert!(!loader.is_public_holiday("NSW", date));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("rates.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
