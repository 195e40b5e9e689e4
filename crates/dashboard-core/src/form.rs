//! # Form Validator
//!
//! Evaluates a whole form against a rule set and returns one message per
//! failing field, ready to show next to the input.
//!
//! ## Per-Field Evaluation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  value blank? ──yes──► required? ──yes──► "First Name is required"      │
//! │       │                    └──no───► OK (optional and empty)            │
//! │       no                                                                │
//! │       ▼                                                                 │
//! │  FieldKind check ──fail──► "Email must be a valid email"                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  length bounds ──fail──► "Position must be between 0 and 100 characters"│
//! │       │                  (replaces a kind message)                      │
//! │       ▼                                                                 │
//! │  kind message, or OK                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields are independent: the result does not depend on evaluation order.
//! Rules for keys missing from the data see the value as blank.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{
    is_present, is_valid_date, is_valid_email, is_valid_integer, is_valid_length,
    is_valid_number, is_valid_phone, is_valid_price, is_valid_sku, is_valid_stock,
};

// =============================================================================
// Rules
// =============================================================================

/// What a field's value must look like once it is present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text; only presence and length apply.
    #[default]
    Text,
    Email,
    Phone,
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Date,
    Sku,
    Price,
    Stock,
}

impl FieldKind {
    /// Runs the kind's predicate, naming the field `name` on failure.
    fn check(&self, name: &str, value: &str) -> Result<(), ValidationError> {
        let field = name.to_string();
        match *self {
            FieldKind::Text => Ok(()),
            FieldKind::Email if !is_valid_email(value) => {
                Err(ValidationError::InvalidEmail { field })
            }
            FieldKind::Phone if !is_valid_phone(value) => {
                Err(ValidationError::InvalidPhone { field })
            }
            FieldKind::Number { min, max } if !is_valid_number(value, min, max) => {
                Err(ValidationError::InvalidNumber { field, min, max })
            }
            FieldKind::Integer { min, max } if !is_valid_integer(value, min, max) => {
                Err(ValidationError::InvalidInteger { field, min, max })
            }
            FieldKind::Date if !is_valid_date(value) => Err(ValidationError::InvalidDate { field }),
            FieldKind::Sku if !is_valid_sku(value) => Err(ValidationError::InvalidSku { field }),
            FieldKind::Price if !is_valid_price(value) => {
                Err(ValidationError::InvalidPrice { field })
            }
            FieldKind::Stock if !is_valid_stock(value) => {
                Err(ValidationError::InvalidStock { field })
            }
            _ => Ok(()),
        }
    }
}

/// Inclusive character-count bounds; `max: None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LengthBounds {
    pub min: usize,
    pub max: Option<usize>,
}

/// The rule for one form field.
///
/// ## Example
/// ```rust
/// use dashboard_core::form::{FieldKind, FieldRule};
///
/// let rule = FieldRule::new(FieldKind::Email).required().label("Email");
/// assert!(rule.check("email", Some("jane@corp.com")).is_ok());
/// assert_eq!(
///     rule.check("email", Some("jane")).unwrap_err().to_string(),
///     "Email must be a valid email"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub length: Option<LengthBounds>,
}

impl FieldRule {
    pub fn new(kind: FieldKind) -> Self {
        FieldRule {
            kind,
            ..FieldRule::default()
        }
    }

    /// Free text rule.
    pub fn text() -> Self {
        FieldRule::new(FieldKind::Text)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn length(mut self, min: usize, max: Option<usize>) -> Self {
        self.length = Some(LengthBounds { min, max });
        self
    }

    /// Upper bound only, the lower bound stays 0.
    pub fn max_length(self, max: usize) -> Self {
        self.length(0, Some(max))
    }

    /// The name used in messages: the label, or the raw key.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(key)
    }

    /// Evaluates one value.
    ///
    /// A blank value stops at the required check. Otherwise both the kind
    /// and the length bounds are checked, and a length failure is reported
    /// in place of a kind failure.
    pub fn check(&self, key: &str, value: Option<&str>) -> Result<(), ValidationError> {
        let name = self.display_name(key);

        let value = match value {
            Some(v) if is_present(Some(v)) => v,
            _ if self.required => {
                return Err(ValidationError::Required {
                    field: name.to_string(),
                })
            }
            _ => return Ok(()),
        };

        let kind_result = self.kind.check(name, value);

        if let Some(LengthBounds { min, max }) = self.length {
            if !is_valid_length(Some(value), min, max) {
                return Err(ValidationError::LengthOutOfRange {
                    field: name.to_string(),
                    min,
                    max,
                });
            }
        }

        kind_result
    }
}

/// Field key to rule.
pub type RuleSet = BTreeMap<String, FieldRule>;

/// Raw form values as sent by the form layer.
pub type FormData = serde_json::Map<String, Value>;

// =============================================================================
// Form Evaluation
// =============================================================================

/// Outcome of validating a form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FormValidation {
    pub is_valid: bool,
    /// Field key to message, only for failing fields.
    pub errors: BTreeMap<String, String>,
}

impl FormValidation {
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

/// Text form of a submitted value; `null` counts as absent.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Validates every field named in `rules`.
///
/// Keys in `data` without a rule are ignored.
pub fn validate_form(data: &FormData, rules: &RuleSet) -> FormValidation {
    let errors: BTreeMap<String, String> = rules
        .iter()
        .filter_map(|(key, rule)| {
            let text = data.get(key).and_then(value_text);
            rule.check(key, text.as_deref())
                .err()
                .map(|err| (key.clone(), err.to_string()))
        })
        .collect();

    debug!(fields = rules.len(), failed = errors.len(), "Validated form");

    FormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

// =============================================================================
// Presets
// =============================================================================

fn rule_set(rules: Vec<(&str, FieldRule)>) -> RuleSet {
    rules
        .into_iter()
        .map(|(key, rule)| (key.to_string(), rule))
        .collect()
}

/// Rules for the user profile form.
pub fn profile_rules() -> RuleSet {
    rule_set(vec![
        ("firstName", FieldRule::text().required().label("First Name").length(2, Some(50))),
        ("lastName", FieldRule::text().required().label("Last Name").length(2, Some(50))),
        ("email", FieldRule::new(FieldKind::Email).required().label("Email")),
        ("phone", FieldRule::new(FieldKind::Phone).label("Phone")),
        ("position", FieldRule::text().label("Position").max_length(100)),
        ("company", FieldRule::text().label("Company").max_length(100)),
    ])
}

/// Rules for the add / edit inventory item form.
pub fn inventory_rules() -> RuleSet {
    rule_set(vec![
        ("sku", FieldRule::new(FieldKind::Sku).required().label("SKU")),
        ("name", FieldRule::text().required().label("Product Name").length(2, Some(200))),
        ("currentStock", FieldRule::new(FieldKind::Stock).required().label("Current Stock")),
        ("minStock", FieldRule::new(FieldKind::Stock).required().label("Minimum Stock")),
        ("maxStock", FieldRule::new(FieldKind::Stock).required().label("Maximum Stock")),
        ("unitPrice", FieldRule::new(FieldKind::Price).required().label("Unit Price")),
    ])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> FormData {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    #[test]
    fn test_profile_missing_name_and_bad_email() {
        let result = validate_form(&data(json!({"firstName": "", "email": "bad"})), &profile_rules());

        assert!(!result.is_valid);
        assert_eq!(result.error("firstName"), Some("First Name is required"));
        assert_eq!(result.error("email"), Some("Email must be a valid email"));
        assert_eq!(result.error("lastName"), Some("Last Name is required"));
        // optional and absent
        assert_eq!(result.error("phone"), None);
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_valid_profile() {
        let form = data(json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "john.doe@company.com",
            "phone": "+1 (555) 123-4567",
            "position": "Sales Manager",
            "company": "",
        }));
        let result = validate_form(&form, &profile_rules());
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_length_and_type_messages() {
        let form = data(json!({
            "firstName": "J",
            "lastName": "Doe",
            "email": "j@d.io",
            "phone": "12345",
            "position": "x".repeat(101),
        }));
        let result = validate_form(&form, &profile_rules());

        assert_eq!(
            result.error("firstName"),
            Some("First Name must be between 2 and 50 characters")
        );
        assert_eq!(result.error("phone"), Some("Phone must be a valid phone number"));
        assert_eq!(
            result.error("position"),
            Some("Position must be between 0 and 100 characters")
        );
    }

    #[test]
    fn test_length_message_replaces_kind_message() {
        let rule = FieldRule::new(FieldKind::Email).label("Email").max_length(5);

        let err = rule.check("email", Some("not-an-email-long")).unwrap_err();
        assert_eq!(err.to_string(), "Email must be between 0 and 5 characters");

        // within bounds, the kind message stands
        let err = rule.check("email", Some("nope")).unwrap_err();
        assert_eq!(err.to_string(), "Email must be a valid email");

        let rules = rule_set(vec![("email", rule)]);
        let result = validate_form(&data(json!({"email": "not-an-email-long"})), &rules);
        assert_eq!(result.error("email"), Some("Email must be between 0 and 5 characters"));
    }

    #[test]
    fn test_whitespace_is_blank() {
        let rule = FieldRule::text().required();
        let err = rule.check("nickname", Some("   ")).unwrap_err();
        // no label: the raw key is used
        assert_eq!(err.to_string(), "nickname is required");
        assert_eq!(err.field(), "nickname");
    }

    #[test]
    fn test_inventory_form_with_numeric_values() {
        let form = data(json!({
            "sku": "LP 001",
            "name": "Laptop",
            "currentStock": 5,
            "minStock": -1,
            "maxStock": "50",
            "unitPrice": 12.5,
        }));
        let result = validate_form(&form, &inventory_rules());

        assert!(!result.is_valid);
        assert_eq!(
            result.error("sku"),
            Some("SKU must be a valid SKU (3-20 alphanumeric characters)")
        );
        assert_eq!(result.error("minStock"), Some("Minimum Stock must be a non-negative integer"));
        assert_eq!(result.error("currentStock"), None);
        assert_eq!(result.error("unitPrice"), None);

        let bad_price = data(json!({"unitPrice": "10.999"}));
        let result = validate_form(&bad_price, &inventory_rules());
        assert_eq!(result.error("unitPrice"), Some("Unit Price must be a valid price"));
    }

    #[test]
    fn test_bounded_number_rules() {
        let rules = rule_set(vec![
            (
                "age",
                FieldRule::new(FieldKind::Integer { min: Some(18), max: None }).label("Age"),
            ),
            (
                "discount",
                FieldRule::new(FieldKind::Number { min: Some(0.0), max: Some(0.5) }),
            ),
            ("due", FieldRule::new(FieldKind::Date).label("Due Date")),
        ]);
        let form = data(json!({"age": 16, "discount": "0.75", "due": "2024-02-30"}));
        let result = validate_form(&form, &rules);

        assert_eq!(result.error("age"), Some("Age must be a valid integer (min: 18)"));
        assert_eq!(
            result.error("discount"),
            Some("discount must be a valid number (min: 0) (max: 0.5)")
        );
        assert_eq!(result.error("due"), Some("Due Date must be a valid date"));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let form = data(json!({"email": null}));
        let result = validate_form(&form, &profile_rules());
        assert_eq!(result.error("email"), Some("Email is required"));
    }

    #[test]
    fn test_validation_result_wire_format() {
        let result = FormValidation {
            is_valid: false,
            errors: BTreeMap::from([("email".to_string(), "Email is required".to_string())]),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({"isValid": false, "errors": {"email": "Email is required"}}));
    }
}
