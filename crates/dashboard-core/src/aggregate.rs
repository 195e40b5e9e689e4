//! # Aggregator
//!
//! Summary cards above the Sales and Inventory tables. Every figure is
//! recomputed from the currently filtered view and never stored.
//!
//! All summaries are single-pass folds; an empty view yields zeros.

use serde::Serialize;
use ts_rs::TS;

use crate::filter::Filterable;
use crate::money::Money;
use crate::stock::StockStatus;
use crate::types::{InventoryItem, SaleStatus, SalesRecord};

/// Counts records whose status equals `status`.
///
/// ## Example
/// ```rust
/// use dashboard_core::aggregate::count_with_status;
/// use dashboard_core::store::seed_inventory;
/// use dashboard_core::stock::StockStatus;
///
/// let items = seed_inventory();
/// assert_eq!(count_with_status(&items, StockStatus::LowStock), 1);
/// ```
pub fn count_with_status<'a, R, I>(records: I, status: R::Status) -> usize
where
    R: Filterable + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(|record| record.status() == status)
        .count()
}

// =============================================================================
// Sales
// =============================================================================

/// Sales page summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_orders: usize,
    /// Sum of recorded `total_amount`s.
    #[ts(as = "f64")]
    pub total_sales: Money,
    /// `total_sales / total_orders`, $0.00 when there are no orders.
    #[ts(as = "f64")]
    pub average_order_value: Money,
    pub completed: usize,
    pub pending: usize,
    pub cancelled: usize,
}

/// Summarizes a (filtered) sales view.
pub fn summarize_sales<'a, I>(records: I) -> SalesSummary
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut summary = records
        .into_iter()
        .fold(SalesSummary::default(), |mut acc, record| {
            acc.total_orders += 1;
            acc.total_sales += record.total_amount;
            match record.status {
                SaleStatus::Completed => acc.completed += 1,
                SaleStatus::Pending => acc.pending += 1,
                SaleStatus::Cancelled => acc.cancelled += 1,
            }
            acc
        });

    summary.average_order_value = summary.total_sales.average_over(summary.total_orders);
    summary
}

// =============================================================================
// Inventory
// =============================================================================

/// Inventory page summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_products: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Sum of `current_stock × unit_price`.
    #[ts(as = "f64")]
    pub total_value: Money,
}

/// Summarizes a (filtered) inventory view.
pub fn summarize_inventory<'a, I>(items: I) -> InventorySummary
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    items
        .into_iter()
        .fold(InventorySummary::default(), |mut acc, item| {
            acc.total_products += 1;
            acc.total_value += item.stock_value();
            match item.status() {
                StockStatus::InStock => acc.in_stock += 1,
                StockStatus::LowStock => acc.low_stock += 1,
                StockStatus::OutOfStock => acc.out_of_stock += 1,
            }
            acc
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
