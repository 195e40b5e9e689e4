//! # Report Errors
//!
//! Everything that can go wrong between "format this view" and "the file is
//! on disk".
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportError                                                            │
//! │  ├── Io               - create dir / write temp file / rename           │
//! │  ├── Export           - dashboard-core could not produce the text       │
//! │  ├── Core             - unknown SKU, bad filter value                   │
//! │  ├── SummaryJson      - printing the summary as JSON failed             │
//! │  ├── ConfigParse      - report.toml is not valid TOML                   │
//! │  ├── ConfigSerialize  - saving report.toml failed                       │
//! │  ├── InvalidConfig    - values that parse but make no sense             │
//! │  └── InvalidArgument  - command-line or filename problems               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use dashboard_core::{CoreError, ExportError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to serialize summary: {0}")]
    SummaryJson(#[from] serde_json::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<ValidationError> for ReportError {
    fn from(err: ValidationError) -> Self {
        ReportError::Core(CoreError::Validation(err))
    }
}

pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_surfaces_message() {
        let err: ReportError = ValidationError::Required {
            field: "sku".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Validation error: sku is required");
    }

    #[test]
    fn test_json_error_is_not_an_export_failure() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ReportError = json_err.into();

        assert!(matches!(err, ReportError::SummaryJson(_)));
        assert!(err.to_string().starts_with("Failed to serialize summary: "));
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: ReportError = CoreError::ItemNotFound("ZZ9".to_string()).into();
        assert_eq!(err.to_string(), "Inventory item not found: ZZ9");
    }
}
