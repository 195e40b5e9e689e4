//! # Report Configuration
//!
//! Where exports are written and how their cells are localized.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DASHBOARD_EXPORT_DIR=/srv/reports                                  │
//! │     DASHBOARD_CURRENCY_SYMBOL=€                                        │
//! │     DASHBOARD_DATE_FORMAT=%d.%m.%Y                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, or                                                │
//! │     ~/.config/sales-inventory/report.toml (Linux)                      │
//! │     ~/Library/Application Support/com.dashboard.sales-inventory/       │
//! │       report.toml (macOS)                                              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ./reports, "$", %-m/%-d/%Y                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # report.toml
//! [export]
//! output_dir = "./reports"
//! currency_symbol = "$"
//! date_format = "%-m/%-d/%Y"
//! ```

use dashboard_core::export::{is_valid_date_format, ExportOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{ReportError, ReportResult};

pub const ENV_EXPORT_DIR: &str = "DASHBOARD_EXPORT_DIR";
pub const ENV_CURRENCY_SYMBOL: &str = "DASHBOARD_CURRENCY_SYMBOL";
pub const ENV_DATE_FORMAT: &str = "DASHBOARD_DATE_FORMAT";

// =============================================================================
// Export Settings
// =============================================================================

/// The `[export]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory report files are written to. Created on first export.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Prefix for price and amount cells.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// chrono `strftime` pattern for date cells.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_currency_symbol() -> String {
    ExportOptions::default().currency_symbol
}

fn default_date_format() -> String {
    ExportOptions::default().date_format
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            output_dir: default_output_dir(),
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
        }
    }
}

impl ExportSettings {
    /// Formatting options handed to the core exporter.
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            currency_symbol: self.currency_symbol.clone(),
            date_format: self.date_format.clone(),
        }
    }
}

// =============================================================================
// Report Config
// =============================================================================

/// Complete configuration for `dashboard-report`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub export: ExportSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (report.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file at the default location is not.
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        let mut config = Self::default();

        let explicit = config_path.is_some();
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading report config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(ReportError::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load report config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ReportResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ReportError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Report config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReportResult<()> {
        if self.export.output_dir.as_os_str().is_empty() {
            return Err(ReportError::InvalidConfig(
                "export.output_dir must not be empty".into(),
            ));
        }

        if self.export.currency_symbol.is_empty() {
            return Err(ReportError::InvalidConfig(
                "export.currency_symbol must not be empty".into(),
            ));
        }

        if self.export.date_format.is_empty() || !is_valid_date_format(&self.export.date_format) {
            return Err(ReportError::InvalidConfig(format!(
                "export.date_format is not a valid strftime pattern: '{}'",
                self.export.date_format
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_EXPORT_DIR) {
            debug!(dir = %dir, "Overriding export directory from environment");
            self.export.output_dir = PathBuf::from(dir);
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.export.currency_symbol = symbol;
        }

        if let Some(format) = lookup(ENV_DATE_FORMAT) {
            debug!(format = %format, "Overriding date format from environment");
            self.export.date_format = format;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "dashboard", "sales-inventory")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.export.output_dir, PathBuf::from("reports"));
        assert_eq!(config.export.currency_symbol, "$");
        assert_eq!(config.export.date_format, "%-m/%-d/%Y");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ReportConfig::default();
        config.export.currency_symbol = String::new();
        assert!(matches!(config.validate(), Err(ReportError::InvalidConfig(_))));

        let mut config = ReportConfig::default();
        config.export.date_format = "%Q".to_string();
        assert!(matches!(config.validate(), Err(ReportError::InvalidConfig(_))));

        let mut config = ReportConfig::default();
        config.export.output_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ReportConfig = toml::from_str(
            r#"
            [export]
            currency_symbol = "€"
            "#,
        )
        .unwrap();
        assert_eq!(config.export.currency_symbol, "€");
        assert_eq!(config.export.date_format, "%-m/%-d/%Y");

        let empty: ReportConfig = toml::from_str("").unwrap();
        assert_eq!(empty, ReportConfig::default());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_EXPORT_DIR, "/srv/reports"),
            (ENV_DATE_FORMAT, "%d.%m.%Y"),
        ]);
        let mut config = ReportConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.export.output_dir, PathBuf::from("/srv/reports"));
        assert_eq!(config.export.date_format, "%d.%m.%Y");
        assert_eq!(config.export.currency_symbol, "$");
        assert_eq!(config.export.options().date_format, "%d.%m.%Y");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.toml");

        let mut config = ReportConfig::default();
        config.export.currency_symbol = "£".to_string();
        config.save(Some(path.clone())).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[export]"));

        let loaded: ReportConfig = toml::from_str(&text).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReportConfig::load(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ReportError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.toml");
        std::fs::write(&path, "[export\ncurrency_symbol = 1").unwrap();

        let err = ReportConfig::load(Some(path)).unwrap_err();
        assert!(matches!(err, ReportError::ConfigParse(_)));
    }
}
