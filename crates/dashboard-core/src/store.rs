//! # Record Store
//!
//! Seed collections, dropdown lookup lists, and the inventory snapshot
//! holder that backs stock edits.
//!
//! ## Snapshot Swap
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  InventoryStore                                                         │
//! │                                                                         │
//! │   items ──► Arc<Vec<InventoryItem>>  (snapshot v1) ◄── page view A      │
//! │                                                                         │
//! │   update_stock("OC003", "0")                                           │
//! │      1. parse_stock_or_zero("0") = 0                                    │
//! │      2. build a new Vec; the edited item is `with_current_stock(0)`    │
//! │      3. swap: items ──► Arc<Vec<…>> (snapshot v2)                      │
//! │                                                                         │
//! │   View A still sees v1 unchanged. No element is patched in place.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::stock::{parse_stock_or_zero, StockStatus};
use crate::types::{Category, InventoryItem, InventoryItemDraft, SaleStatus, SalesRecord};
use crate::{ALL_CATEGORIES_LABEL, ALL_STATUSES_LABEL};

// =============================================================================
// Lookup Lists
// =============================================================================

/// Category dropdown entries, sentinel first.
pub fn category_options() -> Vec<String> {
    std::iter::once(ALL_CATEGORIES_LABEL.to_string())
        .chain(Category::ALL.iter().map(|c| c.label().to_string()))
        .collect()
}

/// Sales status dropdown entries, sentinel first.
pub fn sales_status_options() -> Vec<String> {
    std::iter::once(ALL_STATUSES_LABEL.to_string())
        .chain(SaleStatus::ALL.iter().map(|s| s.as_str().to_string()))
        .collect()
}

/// Inventory status dropdown entries, sentinel first.
pub fn inventory_status_options() -> Vec<String> {
    std::iter::once(ALL_STATUSES_LABEL.to_string())
        .chain(StockStatus::ALL.iter().map(|s| s.as_str().to_string()))
        .collect()
}

// =============================================================================
// Seed Data
// =============================================================================

/// Builds a date from compile-time constants used by the seed tables.
fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// (id, date, product, category, qty, unit cents, total cents, status, customer, rep)
type SaleRow = (
    u32,
    (i32, u32, u32),
    &'static str,
    Category,
    u32,
    i64,
    i64,
    SaleStatus,
    &'static str,
    &'static str,
);

const SALES: &[SaleRow] = &[
    (1, (2024, 1, 15), "Laptop Pro 15\"", Category::Electronics, 2, 129999, 259998, SaleStatus::Completed, "John Smith", "Alice Johnson"),
    (2, (2024, 1, 16), "Wireless Mouse", Category::Electronics, 5, 2999, 14995, SaleStatus::Completed, "Sarah Wilson", "Bob Davis"),
    (3, (2024, 1, 17), "Office Chair", Category::Furniture, 1, 29999, 29999, SaleStatus::Pending, "Mike Brown", "Carol White"),
    (4, (2024, 1, 18), "Desk Lamp", Category::Furniture, 3, 4999, 14997, SaleStatus::Completed, "Emma Davis", "Alice Johnson"),
    (5, (2024, 1, 19), "Smartphone", Category::Electronics, 1, 79999, 79999, SaleStatus::Cancelled, "David Lee", "Bob Davis"),
];

/// (sku, name, category, current, min, max, unit cents, supplier, restocked)
type ItemRow = (
    &'static str,
    &'static str,
    Category,
    u32,
    u32,
    u32,
    i64,
    &'static str,
    (i32, u32, u32),
);

const INVENTORY: &[ItemRow] = &[
    ("LP001", "Laptop Pro 15\"", Category::Electronics, 25, 10, 100, 129999, "TechCorp", (2024, 1, 10)),
    ("WM002", "Wireless Mouse", Category::Electronics, 150, 50, 300, 2999, "AccessoryPlus", (2024, 1, 12)),
    ("OC003", "Office Chair", Category::Furniture, 8, 15, 50, 29999, "FurnitureCo", (2024, 1, 5)),
    ("DL004", "Desk Lamp", Category::Furniture, 45, 20, 80, 4999, "LightingInc", (2024, 1, 14)),
    ("SP005", "Smartphone", Category::Electronics, 0, 5, 50, 79999, "MobileTech", (2023, 12, 20)),
];

/// The dashboard's sales transactions.
pub fn seed_sales() -> Vec<SalesRecord> {
    SALES
        .iter()
        .map(
            |&(id, (y, m, d), product, category, quantity, unit, total, status, customer, rep)| {
                SalesRecord {
                    id,
                    date: seed_date(y, m, d),
                    product: product.to_string(),
                    category,
                    quantity,
                    unit_price: Money::from_cents(unit),
                    total_amount: Money::from_cents(total),
                    status,
                    customer: customer.to_string(),
                    sales_rep: rep.to_string(),
                }
            },
        )
        .collect()
}

/// The dashboard's inventory drafts, before validation.
pub fn seed_inventory_drafts() -> Vec<InventoryItemDraft> {
    INVENTORY
        .iter()
        .map(
            |&(sku, name, category, current, min, max, unit, supplier, (y, m, d))| {
                InventoryItemDraft {
                    sku: sku.to_string(),
                    name: name.to_string(),
                    category,
                    current_stock: current,
                    min_stock: min,
                    max_stock: max,
                    unit_price: Money::from_cents(unit),
                    supplier: supplier.to_string(),
                    last_restocked: seed_date(y, m, d),
                }
            },
        )
        .collect()
}

/// The dashboard's inventory items with derived statuses.
///
/// Seed rows that fail validation are skipped; the built-in table has none.
pub fn seed_inventory() -> Vec<InventoryItem> {
    seed_inventory_drafts()
        .into_iter()
        .filter_map(|draft| InventoryItem::new(draft).ok())
        .collect()
}

// =============================================================================
// Inventory Store
// =============================================================================

/// Holds the current inventory snapshot and swaps it wholesale on edit.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    items: Arc<Vec<InventoryItem>>,
}

impl InventoryStore {
    /// Creates a store, rejecting duplicate SKUs.
    pub fn new(items: Vec<InventoryItem>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.sku()) {
                return Err(ValidationError::Duplicate {
                    field: "sku".to_string(),
                    value: item.sku().to_string(),
                }
                .into());
            }
        }

        Ok(InventoryStore {
            items: Arc::new(items),
        })
    }

    /// A store over the seed inventory.
    pub fn seeded() -> CoreResult<Self> {
        Self::new(seed_inventory())
    }

    /// The current snapshot. Later edits never change what this returns.
    pub fn snapshot(&self) -> Arc<Vec<InventoryItem>> {
        Arc::clone(&self.items)
    }

    pub fn get(&self, sku: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.sku() == sku)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies a stock edit typed into the UI.
    ///
    /// Malformed input becomes 0 units. The item's status is re-derived and
    /// the whole collection is replaced.
    ///
    /// ## Errors
    /// `CoreError::ItemNotFound` when no item has `sku`; the snapshot is left
    /// as it was.
    pub fn update_stock(&mut self, sku: &str, raw_stock: &str) -> CoreResult<&InventoryItem> {
        let position = self
            .items
            .iter()
            .position(|item| item.sku() == sku)
            .ok_or_else(|| CoreError::ItemNotFound(sku.to_string()))?;

        let new_stock = parse_stock_or_zero(raw_stock);

        let next: Vec<InventoryItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == position {
                    item.with_current_stock(new_stock)
                } else {
                    item.clone()
                }
            })
            .collect();

        debug!(
            sku = %sku,
            raw = %raw_stock,
            stock = new_stock,
            status = %next[position].status(),
            "Replacing inventory snapshot after stock edit"
        );

        self.items = Arc::new(next);
        Ok(&self.items[position])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
