//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing an inventory valuation in floating point:                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every unit price, order total and stock value is held in cents.     │
//! │    Floats only appear at the JSON boundary, rounded to the cent.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dashboard_core::money::Money;
//!
//! let price = Money::from_cents(129999); // $1299.99
//! let line = price.multiply_quantity(2); // $2599.98
//! assert_eq!(line.to_string(), "$2599.98");
//!
//! // Form input arrives as text
//! assert_eq!(Money::parse_decimal("29.99"), Some(Money::from_cents(2999)));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences between totals may go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Decimal on the wire**: serialized as `1299.99`, matching how the
///   dashboard frontend and CSV exports present prices
///
/// ## Where Money Is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  SalesRecord.unit_price ──┬──► SalesRecord.total_amount ──► SalesSummary│
/// │                           │                                             │
/// │  InventoryItem.unit_price ┴──► stock × price ──► InventorySummary       │
/// │                                                                         │
/// │  Export: "unitPrice" / "totalAmount" columns ──► "$1299.99"             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use dashboard_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a plain decimal string with at most two fractional digits.
    ///
    /// Accepts `"12"`, `"12.5"`, `"12.50"`. Rejects signs, exponents,
    /// grouping separators and a third fractional digit.
    ///
    /// ## Example
    /// ```rust
    /// use dashboard_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("1299.99"), Some(Money::from_cents(129999)));
    /// assert_eq!(Money::parse_decimal("10.5"), Some(Money::from_cents(1050)));
    /// assert_eq!(Money::parse_decimal("10.999"), None);
    /// assert_eq!(Money::parse_decimal("-5.00"), None);
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Money> {
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let minor = match fraction {
            None => 0,
            Some(f) if (1..=2).contains(&f.len()) && f.bytes().all(|b| b.is_ascii_digit()) => {
                let digits: i64 = f.parse().ok()?;
                if f.len() == 1 {
                    digits * 10
                } else {
                    digits
                }
            }
            Some(_) => return None,
        };

        let major: i64 = whole.parse().ok()?;
        major
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor))
            .map(Money)
    }

    /// Converts a floating point amount to cents, rounding half away from zero.
    ///
    /// Only used at the JSON boundary; never do arithmetic in `f64`.
    /// Returns `None` for NaN, infinities and amounts whose cents do not fit
    /// in an `i64`.
    pub fn from_f64_rounded(amount: f64) -> Option<Money> {
        let cents = (amount * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64 {
            Some(Money(cents as i64))
        } else {
            None
        }
    }

    /// Returns the amount in major units as `f64` (display / JSON only).
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use dashboard_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use dashboard_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2999); // $29.99
    /// assert_eq!(unit_price.multiply_quantity(5).cents(), 14995); // $149.95
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Divides evenly across `count` parts, rounding half away from zero.
    ///
    /// Returns zero when `count` is zero instead of dividing by zero.
    pub fn average_over(&self, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        let count = count as i128;
        let total = self.0 as i128;
        let half = count / 2;
        let rounded = if total >= 0 {
            (total + half) / count
        } else {
            (total - half) / count
        };
        Money(rounded as i64)
    }

    /// Formats with an explicit currency symbol, always two fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use dashboard_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(500).format_with_symbol("€"), "€5.00");
    /// assert_eq!(Money::from_cents(-550).format_with_symbol("$"), "-$5.50");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the dollar sign; exports go through `format_with_symbol`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde (decimal on the wire)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

/// Accepted wire shapes: `1299.99` or `"1299.99"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MoneyRepr::deserialize(deserializer)? {
            MoneyRepr::Number(n) => Money::from_f64_rounded(n).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid money amount: {n}"))
            }),
            MoneyRepr::Text(s) => Money::parse_decimal(s.trim()).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid money amount: '{s}'"))
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(129999)), "$1299.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("0"), Some(Money::zero()));
        assert_eq!(Money::parse_decimal("29.9"), Some(Money::from_cents(2990)));
        assert_eq!(Money::parse_decimal("29.99"), Some(Money::from_cents(2999)));

        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal(".99"), None);
        assert_eq!(Money::parse_decimal("1."), None);
        assert_eq!(Money::parse_decimal("1e3"), None);
        assert_eq!(Money::parse_decimal("1,299.99"), None);
        assert_eq!(Money::parse_decimal("+5"), None);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_average_over() {
        assert_eq!(Money::from_cents(1000).average_over(0), Money::zero());
        assert_eq!(Money::from_cents(1000).average_over(3).cents(), 333);
        assert_eq!(Money::from_cents(1001).average_over(2).cents(), 501);
        assert_eq!(Money::from_cents(-1001).average_over(2).cents(), -501);
    }

    /// Float noise at the JSON boundary must not leak into cents.
    #[test]
    fn test_f64_boundary_rounding() {
        assert_eq!(Money::from_f64_rounded(2599.98), Some(Money::from_cents(259998)));
        assert_eq!(Money::from_f64_rounded(0.1 + 0.2), Some(Money::from_cents(30)));
    }

    #[test]
    fn test_f64_out_of_range_is_rejected() {
        assert_eq!(Money::from_f64_rounded(1e300), None);
        assert_eq!(Money::from_f64_rounded(-1e300), None);
        assert_eq!(Money::from_f64_rounded(f64::NAN), None);
        assert_eq!(Money::from_f64_rounded(f64::INFINITY), None);

        assert!(serde_json::from_str::<Money>("1e300").is_err());
    }

    #[test]
    fn test_serde_decimal_wire_format() {
        let json = serde_json::to_string(&Money::from_cents(129999)).unwrap();
        assert_eq!(json, "1299.99");

        let from_number: Money = serde_json::from_str("149.95").unwrap();
        assert_eq!(from_number.cents(), 14995);

        let from_text: Money = serde_json::from_str("\"49.99\"").unwrap();
        assert_eq!(from_text.cents(), 4999);

        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
    }
}
