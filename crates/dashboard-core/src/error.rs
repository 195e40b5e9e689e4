//! # Error Types
//!
//! Domain-specific error types for dashboard-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dashboard-core errors (this file)                                     │
//! │  ├── CoreError        - Store lookups, wraps the two below             │
//! │  ├── ValidationError  - A field value fails a rule (form messages)     │
//! │  └── ExportError      - A record cannot be flattened / written as CSV  │
//! │                                                                         │
//! │  dashboard-report errors (separate crate)                              │
//! │  └── ReportError      - Config + file delivery failures                │
//! │                                                                         │
//! │  Flow: ExportError → ReportError → `try_export` → false + error log    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. `ValidationError`'s `Display` IS the user-facing form message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No inventory item carries this SKU.
    ///
    /// ## When This Occurs
    /// - Stock edit for an item removed from the current snapshot
    /// - Typo in a SKU passed from the presentation layer
    #[error("Inventory item not found: {0}")]
    ItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Export formatting error (wraps ExportError).
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `field` carries the rule's label (or the raw key when no label is set),
/// so the rendered message can go straight to the form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be a valid email")]
    InvalidEmail { field: String },

    #[error("{field} must be a valid phone number")]
    InvalidPhone { field: String },

    /// Not a finite number, or outside the configured bounds.
    #[error("{field} must be a valid number{}", bounds_suffix(.min, .max))]
    InvalidNumber {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },

    /// Not a whole number, or outside the configured bounds.
    #[error("{field} must be a valid integer{}", bounds_suffix(.min, .max))]
    InvalidInteger {
        field: String,
        min: Option<i64>,
        max: Option<i64>,
    },

    #[error("{field} must be a valid date")]
    InvalidDate { field: String },

    #[error("{field} must be a valid SKU (3-20 alphanumeric characters)")]
    InvalidSku { field: String },

    #[error("{field} must be a valid price")]
    InvalidPrice { field: String },

    #[error("{field} must be a non-negative integer")]
    InvalidStock { field: String },

    /// Character count outside `[min, max]`; `max: None` reads "unlimited".
    #[error("{field} must be between {min} and {} characters", max_label(.max))]
    LengthOutOfRange {
        field: String,
        min: usize,
        max: Option<usize>,
    },

    /// Invalid format or inconsistent values (e.g., max stock below min stock).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate SKU in a collection).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// The label (or key) the error was raised for.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::InvalidEmail { field }
            | ValidationError::InvalidPhone { field }
            | ValidationError::InvalidNumber { field, .. }
            | ValidationError::InvalidInteger { field, .. }
            | ValidationError::InvalidDate { field }
            | ValidationError::InvalidSku { field }
            | ValidationError::InvalidPrice { field }
            | ValidationError::InvalidStock { field }
            | ValidationError::LengthOutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Duplicate { field, .. } => field,
        }
    }
}

/// Renders " (min: X) (max: Y)" for whichever bounds are set.
fn bounds_suffix<T: std::fmt::Display>(min: &Option<T>, max: &Option<T>) -> String {
    let mut suffix = String::new();
    if let Some(min) = min {
        suffix.push_str(&format!(" (min: {min})"));
    }
    if let Some(max) = max {
        suffix.push_str(&format!(" (max: {max})"));
    }
    suffix
}

fn max_label(max: &Option<usize>) -> String {
    match max {
        Some(max) => max.to_string(),
        None => "unlimited".to_string(),
    }
}

// =============================================================================
// Export Error
// =============================================================================

/// Failures while turning records into delimited text.
///
/// Any of these aborts the whole export: callers never receive partial text.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The record did not serialize to a JSON object.
    #[error("Record {index} is not a flat key-value record")]
    NotARecord { index: usize },

    /// An allow-listed field holds an array or object, which has no cell form.
    #[error("Field '{field}' of record {index} holds a structured value")]
    StructuredValue { index: usize, field: String },

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV buffer: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotFound("XX999".to_string());
        assert_eq!(err.to_string(), "Inventory item not found: XX999");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "First Name".to_string(),
        };
        assert_eq!(err.to_string(), "First Name is required");

        let err = ValidationError::InvalidEmail {
            field: "Email".to_string(),
        };
        assert_eq!(err.to_string(), "Email must be a valid email");

        let err = ValidationError::InvalidSku {
            field: "SKU".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "SKU must be a valid SKU (3-20 alphanumeric characters)"
        );
    }

    #[test]
    fn test_bounds_in_messages() {
        let err = ValidationError::InvalidInteger {
            field: "Age".to_string(),
            min: Some(18),
            max: None,
        };
        assert_eq!(err.to_string(), "Age must be a valid integer (min: 18)");

        let err = ValidationError::InvalidNumber {
            field: "discount".to_string(),
            min: Some(0.0),
            max: Some(0.5),
        };
        assert_eq!(
            err.to_string(),
            "discount must be a valid number (min: 0) (max: 0.5)"
        );

        let err = ValidationError::InvalidNumber {
            field: "discount".to_string(),
            min: None,
            max: None,
        };
        assert_eq!(err.to_string(), "discount must be a valid number");
    }

    #[test]
    fn test_length_message_unlimited() {
        let err = ValidationError::LengthOutOfRange {
            field: "Bio".to_string(),
            min: 10,
            max: None,
        };
        assert_eq!(err.to_string(), "Bio must be between 10 and unlimited characters");

        let err = ValidationError::LengthOutOfRange {
            field: "Position".to_string(),
            min: 0,
            max: Some(100),
        };
        assert_eq!(err.to_string(), "Position must be between 0 and 100 characters");
        assert_eq!(err.field(), "Position");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "sku".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
