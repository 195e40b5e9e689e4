//! # Validation Module
//!
//! Field-level predicates used by the profile and inventory forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE - single-value predicates                        │
//! │  ├── is_valid_email("a@b.co")      → true                              │
//! │  └── is_valid_sku("LP 001")        → false                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: form::validate_form - rule-driven dispatcher                 │
//! │  ├── required / optional-and-empty short circuits                      │
//! │  └── ValidationError → "Email must be a valid email"                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: InventoryItem::new - domain invariants (max >= min)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every predicate is pure and total: malformed input returns `false`,
//! it never panics.
//!
//! ## Usage
//! ```rust
//! use dashboard_core::validation::{is_valid_price, is_valid_sku};
//!
//! assert!(is_valid_sku("LP001"));
//! assert!(!is_valid_sku("AB"));
//! assert!(is_valid_price("1299.99"));
//! assert!(!is_valid_price("10.999"));
//! ```

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::money::Money;
use crate::{MAX_SKU_LEN, MIN_SKU_LEN};

// =============================================================================
// Patterns
// =============================================================================

/// `local@domain.tld`: one `@`, a dot after it, no whitespace anywhere.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// US 10-digit numbers: optional `+1`, optional parentheses around the area
/// code, and space / dot / hyphen separators.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?1?[-.\s]?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})$")
        .expect("phone pattern compiles")
});

static SKU_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("sku pattern compiles"));

// =============================================================================
// Presence & Length
// =============================================================================

/// A value is present when it exists and is not blank after trimming.
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Checks the character count against inclusive bounds.
///
/// An absent or empty value only passes when `min` is 0.
///
/// ## Example
/// ```rust
/// use dashboard_core::validation::is_valid_length;
///
/// assert!(is_valid_length(Some("Jo"), 2, Some(50)));
/// assert!(!is_valid_length(Some("J"), 2, Some(50)));
/// assert!(is_valid_length(None, 0, Some(100)));
/// assert!(!is_valid_length(Some(""), 2, None));
/// ```
pub fn is_valid_length(value: Option<&str>, min: usize, max: Option<usize>) -> bool {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return min == 0,
    };

    let length = value.chars().count();
    if length < min {
        return false;
    }
    max.map_or(true, |max| length <= max)
}

// =============================================================================
// Contact Fields
// =============================================================================

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// ## Example
/// ```rust
/// use dashboard_core::validation::is_valid_phone;
///
/// assert!(is_valid_phone("+1 (555) 123-4567"));
/// assert!(is_valid_phone("555.123.4567"));
/// assert!(!is_valid_phone("123-4567"));
/// ```
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

// =============================================================================
// Numeric Fields
// =============================================================================

/// Parses a finite number (surrounding whitespace ignored).
fn parse_finite(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Finite number within optional inclusive bounds.
pub fn is_valid_number(value: &str, min: Option<f64>, max: Option<f64>) -> bool {
    let Some(num) = parse_finite(value) else {
        return false;
    };
    min.map_or(true, |min| num >= min) && max.map_or(true, |max| num <= max)
}

/// Whole number within optional inclusive bounds.
///
/// ## Example
/// ```rust
/// use dashboard_core::validation::is_valid_integer;
///
/// assert!(is_valid_integer("42", Some(0), None));
/// assert!(!is_valid_integer("4.2", None, None));
/// assert!(!is_valid_integer("-1", Some(0), None));
/// ```
pub fn is_valid_integer(value: &str, min: Option<i64>, max: Option<i64>) -> bool {
    let Some(num) = parse_finite(value) else {
        return false;
    };
    if num.fract() != 0.0 {
        return false;
    }
    min.map_or(true, |min| num >= min as f64) && max.map_or(true, |max| num <= max as f64)
}

/// Non-negative decimal, at most two fractional digits, strictly positive.
pub fn is_valid_price(value: &str) -> bool {
    Money::parse_decimal(value).is_some_and(|price| price.is_positive())
}

/// Non-negative whole number of units.
pub fn is_valid_stock(value: &str) -> bool {
    value.trim().parse::<u64>().is_ok()
}

// =============================================================================
// Identifier & Date Fields
// =============================================================================

/// Letters, digits, hyphens and underscores; 3 to 20 characters.
pub fn is_valid_sku(value: &str) -> bool {
    (MIN_SKU_LEN..=MAX_SKU_LEN).contains(&value.len()) && SKU_RE.is_match(value)
}

/// Parses a calendar date into a `NaiveDate`.
///
/// Accepted shapes: `2024-01-15`, `2024-01-15T10:30:00Z` (RFC 3339) and
/// `1/15/2024`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| NaiveDate::parse_from_str(value, "%m/%d/%Y").ok())
}

pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_present() {
        assert!(is_present(Some("x")));
        assert!(!is_present(Some("   ")));
        assert!(!is_present(Some("")));
        assert!(!is_present(None));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("john.doe@company.com"));
        assert!(is_valid_email("a@b.co"));

        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("john@company"));
        assert!(!is_valid_email("john doe@company.com"));
        assert!(!is_valid_email("john@@company.com"));
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("5551234567"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("+1 555 123 4567"));
        assert!(is_valid_phone("555-123-4567"));

        assert!(!is_valid_phone("555-1234"));
        assert!(!is_valid_phone("phone"));
        assert!(!is_valid_phone("+44 20 7946 0958 12"));
    }

    #[test]
    fn test_is_valid_number_bounds() {
        assert!(is_valid_number("3.5", None, None));
        assert!(is_valid_number("0", Some(0.0), Some(10.0)));
        assert!(is_valid_number("10", Some(0.0), Some(10.0)));

        assert!(!is_valid_number("10.01", None, Some(10.0)));
        assert!(!is_valid_number("-1", Some(0.0), None));
        assert!(!is_valid_number("abc", None, None));
        assert!(!is_valid_number("inf", None, None));
        assert!(!is_valid_number("NaN", None, None));
    }

    #[test]
    fn test_is_valid_integer() {
        assert!(is_valid_integer("7", None, None));
        assert!(is_valid_integer("-7", None, None));
        assert!(is_valid_integer("100", Some(1), Some(100)));

        assert!(!is_valid_integer("7.5", None, None));
        assert!(!is_valid_integer("101", Some(1), Some(100)));
        assert!(!is_valid_integer("", None, None));
    }

    #[test]
    fn test_is_valid_sku() {
        assert!(is_valid_sku("LP001"));
        assert!(is_valid_sku("COKE-330"));
        assert!(is_valid_sku("a_b"));
        assert!(is_valid_sku(&"A".repeat(20)));

        assert!(!is_valid_sku("AB"));
        assert!(!is_valid_sku("LP 001"));
        assert!(!is_valid_sku(&"A".repeat(21)));
        assert!(!is_valid_sku("LP#01"));
    }

    #[test]
    fn test_is_valid_price() {
        assert!(is_valid_price("1299.99"));
        assert!(is_valid_price("5"));
        assert!(is_valid_price("0.5"));

        assert!(!is_valid_price("-5.00"));
        assert!(!is_valid_price("10.999"));
        assert!(!is_valid_price("0"));
        assert!(!is_valid_price("0.00"));
        assert!(!is_valid_price("abc"));
    }

    #[test]
    fn test_is_valid_stock() {
        assert!(is_valid_stock("0"));
        assert!(is_valid_stock("150"));

        assert!(!is_valid_stock("-1"));
        assert!(!is_valid_stock("1.5"));
        assert!(!is_valid_stock("many"));
    }

    #[test]
    fn test_dates() {
        assert!(is_valid_date("2024-01-15"));
        assert!(is_valid_date("2024-01-15T10:30:00Z"));
        assert!(is_valid_date("1/15/2024"));

        assert!(!is_valid_date("2024-02-30"));
        assert!(!is_valid_date("yesterday"));
        assert_eq!(
            parse_date("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }
}
