//! # Store Configuration
//!
//! Where the state document lives and how exported files are named.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GRANEL_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no interior mutability is needed.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use granel_core::DateRange;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the persisted state document (the local-storage analog).
    pub data_path: PathBuf,

    /// Store name used in export file names.
    pub store_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_path: PathBuf::from("granel-pos.json"),
            store_name: "GRANEL".to_string(),
        }
    }
}

impl StoreConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `GRANEL_DATA_PATH`: override the state document path
    /// - `GRANEL_STORE_NAME`: override the export name stem
    pub fn from_env() -> Self {
        let mut config = StoreConfig::default();

        if let Ok(path) = std::env::var("GRANEL_DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }
        if let Ok(name) = std::env::var("GRANEL_STORE_NAME") {
            config.store_name = name;
        }

        config
    }

    /// File name for a full-state backup taken on `date`,
    /// e.g. `BACKUP_GRANEL_2024-03-10.json`.
    pub fn backup_file_name(&self, date: NaiveDate) -> String {
        format!("BACKUP_{}_{}.json", self.store_name, date)
    }

    /// File name for the financial report over `range`,
    /// e.g. `RELATORIO_FINANCEIRO_2024-03-01_2024-03-10.csv`.
    pub fn report_file_name(&self, range: DateRange) -> String {
        format!("RELATORIO_FINANCEIRO_{}_{}.csv", range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_names() {
        let config = StoreConfig::default();
        let day: NaiveDate = "2024-03-10".parse().unwrap();
        assert_eq!(
            config.backup_file_name(day),
            "BACKUP_GRANEL_2024-03-10.json"
        );

        let range = DateRange::new("2024-03-01".parse().unwrap(), day).unwrap();
        assert_eq!(
            config.report_file_name(range),
            "RELATORIO_FINANCEIRO_2024-03-01_2024-03-10.csv"
        );
    }
}
