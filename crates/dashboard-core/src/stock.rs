//! # Stock Status Classifier
//!
//! Derives an inventory item's stock status from its current level and its
//! minimum threshold.
//!
//! ```text
//!   current == 0           → OutOfStock
//!   0 < current <= min     → LowStock
//!   current > min          → InStock
//! ```
//!
//! The maximum threshold plays no part in the classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Stock level bucket of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [
        StockStatus::InStock,
        StockStatus::LowStock,
        StockStatus::OutOfStock,
    ];

    /// Classifies a stock level against its minimum threshold.
    ///
    /// Total over all inputs; `min == 0` means any positive stock is in stock.
    ///
    /// ## Example
    /// ```rust
    /// use dashboard_core::stock::StockStatus;
    ///
    /// assert_eq!(StockStatus::classify(0, 5), StockStatus::OutOfStock);
    /// assert_eq!(StockStatus::classify(5, 5), StockStatus::LowStock);
    /// assert_eq!(StockStatus::classify(6, 5), StockStatus::InStock);
    /// ```
    pub const fn classify(current: u32, min: u32) -> StockStatus {
        if current == 0 {
            StockStatus::OutOfStock
        } else if current <= min {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in-stock" => Ok(StockStatus::InStock),
            "low-stock" => Ok(StockStatus::LowStock),
            "out-of-stock" => Ok(StockStatus::OutOfStock),
            other => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!("unknown stock status '{}'", other),
            }),
        }
    }
}

/// Parses a stock edit from the UI, falling back to zero.
///
/// Malformed, negative or overflowing input never aborts a stock update;
/// it is recorded as 0 units.
///
/// ## Example
/// ```rust
/// use dashboard_core::stock::parse_stock_or_zero;
///
/// assert_eq!(parse_stock_or_zero(" 20 "), 20);
/// assert_eq!(parse_stock_or_zero("abc"), 0);
/// assert_eq!(parse_stock_or_zero("-4"), 0);
/// ```
pub fn parse_stock_or_zero(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(StockStatus::classify(0, 0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(0, 15), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(1, 15), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(15, 15), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(16, 15), StockStatus::InStock);
        assert_eq!(StockStatus::classify(1, 0), StockStatus::InStock);
    }

    #[test]
    fn test_status_strings() {
        for status in StockStatus::ALL {
            assert_eq!(status.as_str().parse::<StockStatus>().unwrap(), status);
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status.as_str())
            );
        }
    }

    #[test]
    fn test_parse_stock_or_zero() {
        assert_eq!(parse_stock_or_zero("8"), 8);
        assert_eq!(parse_stock_or_zero(""), 0);
        assert_eq!(parse_stock_or_zero("12.5"), 0);
        assert_eq!(parse_stock_or_zero("99999999999"), 0);
    }
}
