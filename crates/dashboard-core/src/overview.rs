//! # Overview
//!
//! KPI cards and chart series for the landing page, derived from the record
//! collections instead of being hard-coded.
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ Total Revenue│ Total Orders │Total Products│Low Stock Items│  DashboardStats
//! └──────────────┴──────────────┴──────────────┴──────────────┘
//! ┌─────────────────────────────┐ ┌──────────────┐ ┌──────────────┐
//! │ sales_by_month (line)       │ │sales_by_     │ │inventory_    │
//! │                             │ │category      │ │status_       │
//! │                             │ │(doughnut)    │ │breakdown(bar)│
//! └─────────────────────────────┘ └──────────────┘ └──────────────┘
//! ```

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::aggregate::{summarize_inventory, summarize_sales};
use crate::money::Money;
use crate::stock::StockStatus;
use crate::types::{Category, InventoryItem, SalesRecord};

/// Headline figures for the KPI cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[ts(as = "f64")]
    pub total_revenue: Money,
    pub total_orders: usize,
    pub total_products: usize,
    /// Items at or below their minimum, including those out of stock.
    pub low_stock_items: usize,
    #[ts(as = "f64")]
    pub average_order_value: Money,
}

impl DashboardStats {
    pub fn compute(sales: &[SalesRecord], inventory: &[InventoryItem]) -> Self {
        let sales_summary = summarize_sales(sales);
        let inventory_summary = summarize_inventory(inventory);

        DashboardStats {
            total_revenue: sales_summary.total_sales,
            total_orders: sales_summary.total_orders,
            total_products: inventory_summary.total_products,
            low_stock_items: inventory_summary.low_stock + inventory_summary.out_of_stock,
            average_order_value: sales_summary.average_order_value,
        }
    }
}

/// One doughnut slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: Category,
    #[ts(as = "f64")]
    pub total: Money,
    /// Share of all revenue in basis points (10000 = 100%).
    pub share_bps: u32,
}

/// Revenue per category, in order of first appearance.
///
/// Shares are rounded to the nearest basis point, so they may not sum to
/// exactly 10000.
pub fn sales_by_category(sales: &[SalesRecord]) -> Vec<CategoryShare> {
    let mut buckets: Vec<(Category, Money)> = Vec::new();
    for record in sales {
        match buckets.iter_mut().find(|(c, _)| *c == record.category) {
            Some((_, total)) => *total += record.total_amount,
            None => buckets.push((record.category, record.total_amount)),
        }
    }

    let grand_total: Money = buckets.iter().map(|(_, total)| *total).sum();

    buckets
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            share_bps: share_bps(total, grand_total),
        })
        .collect()
}

fn share_bps(part: Money, whole: Money) -> u32 {
    if !whole.is_positive() || part.is_negative() {
        return 0;
    }
    let part = part.cents() as i128;
    let whole = whole.cents() as i128;
    ((part * 10_000 + whole / 2) / whole) as u32
}

/// One point of the monthly line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    /// `YYYY-MM`
    pub month: String,
    #[ts(as = "f64")]
    pub sales: Money,
    pub orders: usize,
}

/// Revenue and order count per calendar month, oldest first.
pub fn sales_by_month(sales: &[SalesRecord]) -> Vec<MonthlySales> {
    let mut months: BTreeMap<(i32, u32), (Money, usize)> = BTreeMap::new();
    for record in sales {
        let entry = months
            .entry((record.date.year(), record.date.month()))
            .or_insert((Money::zero(), 0));
        entry.0 += record.total_amount;
        entry.1 += 1;
    }

    months
        .into_iter()
        .map(|((year, month), (sales, orders))| MonthlySales {
            month: format!("{year:04}-{month:02}"),
            sales,
            orders,
        })
        .collect()
}

/// One bar of the stock status chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: StockStatus,
    pub count: usize,
}

/// Item counts per stock status, always in-stock, low-stock, out-of-stock.
pub fn inventory_status_breakdown(items: &[InventoryItem]) -> Vec<StatusCount> {
    let summary = summarize_inventory(items);
    vec![
        StatusCount {
            status: StockStatus::InStock,
            count: summary.in_stock,
        },
        StatusCount {
            status: StockStatus::LowStock,
            count: summary.low_stock,
        },
        StatusCount {
            status: StockStatus::OutOfStock,
            count: summary.out_of_stock,
        },
    ]
}
