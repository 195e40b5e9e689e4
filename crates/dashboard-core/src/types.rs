//! # Domain Types
//!
//! Record types shown on the Sales and Inventory pages.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  SalesRecord    │   │  InventoryItem  │   │   Category      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  sku (business) │   │  Electronics    │       │
//! │  │  date           │   │  current_stock  │   │  Furniture      │       │
//! │  │  unit_price     │   │  min/max_stock  │   │  Accessories    │       │
//! │  │  total_amount   │   │  status ◄─ derived from (current, min)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   SaleStatus    │   │  StockStatus    │                             │
//! │  │  completed      │   │  in-stock       │                             │
//! │  │  pending        │   │  low-stock      │                             │
//! │  │  cancelled      │   │  out-of-stock   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase (`unitPrice`, `salesRep`,
//! `lastRestocked`) because the export allow-lists and the frontend both
//! address fields by those keys.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::stock::StockStatus;
use crate::validation::is_valid_sku;

// =============================================================================
// Category
// =============================================================================

/// Product category; a fixed enumerated set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Electronics,
    Furniture,
    Accessories,
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
}

impl Category {
    /// Every category, in the order the filter dropdown lists them.
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Furniture,
        Category::Accessories,
        Category::OfficeSupplies,
        Category::HomeAndGarden,
    ];

    /// Display name, identical to the serialized form.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Accessories => "Accessories",
            Category::OfficeSupplies => "Office Supplies",
            Category::HomeAndGarden => "Home & Garden",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{}'", s),
            })
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sales transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Paid and fulfilled.
    Completed,
    /// Awaiting payment or fulfilment.
    Pending,
    /// Cancelled/refunded.
    Cancelled,
}

impl SaleStatus {
    pub const ALL: [SaleStatus; 3] = [
        SaleStatus::Completed,
        SaleStatus::Pending,
        SaleStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Completed => "completed",
            SaleStatus::Pending => "pending",
            SaleStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(SaleStatus::Completed),
            "pending" => Ok(SaleStatus::Pending),
            "cancelled" | "canceled" => Ok(SaleStatus::Cancelled),
            other => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!("unknown sale status '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Sales Record
// =============================================================================

/// One sales transaction. Immutable seed data.
///
/// `total_amount` is stored as recorded, independently of
/// `quantity × unit_price`; see [`SalesRecord::has_consistent_total`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub id: u32,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub product: String,
    pub category: Category,
    pub quantity: u32,
    #[ts(as = "f64")]
    pub unit_price: Money,
    #[ts(as = "f64")]
    pub total_amount: Money,
    pub status: SaleStatus,
    pub customer: String,
    pub sales_rep: String,
}

impl SalesRecord {
    /// `quantity × unit_price`, regardless of what was recorded.
    pub fn computed_total(&self) -> Money {
        self.unit_price.multiply_quantity(i64::from(self.quantity))
    }

    /// Whether the recorded total matches `quantity × unit_price`.
    pub fn has_consistent_total(&self) -> bool {
        self.computed_total() == self.total_amount
    }
}

// =============================================================================
// Inventory Item
// =============================================================================

/// Unvalidated inventory input, e.g. from the add/edit item form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDraft {
    pub sku: String,
    pub name: String,
    pub category: Category,
    pub current_stock: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    #[ts(as = "f64")]
    pub unit_price: Money,
    pub supplier: String,
    #[ts(as = "String")]
    pub last_restocked: NaiveDate,
}

/// A stocked product.
///
/// ## Derived Status
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  InventoryItem::new(draft) ──┐                                          │
/// │                              ├──► StockStatus::classify(current, min)  │
/// │  item.with_current_stock(n) ─┘            │                             │
/// │                                           ▼                             │
/// │                                     item.status                         │
/// │                                                                         │
/// │  There is no other way to set `status`. Fields are private and the     │
/// │  type is not `Deserialize`, so a stale status cannot be loaded either. │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    sku: String,
    name: String,
    category: Category,
    current_stock: u32,
    min_stock: u32,
    max_stock: u32,
    #[ts(as = "f64")]
    unit_price: Money,
    supplier: String,
    #[ts(as = "String")]
    last_restocked: NaiveDate,
    status: StockStatus,
}

impl InventoryItem {
    /// Validates a draft and derives its stock status.
    ///
    /// ## Rules
    /// - SKU: `[A-Za-z0-9_-]`, 3 to 20 characters
    /// - Name: not blank
    /// - `max_stock >= min_stock`
    pub fn new(draft: InventoryItemDraft) -> Result<Self, ValidationError> {
        if !is_valid_sku(&draft.sku) {
            return Err(ValidationError::InvalidSku {
                field: "sku".to_string(),
            });
        }

        if draft.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }

        if draft.max_stock < draft.min_stock {
            return Err(ValidationError::InvalidFormat {
                field: "maxStock".to_string(),
                reason: format!(
                    "maximum {} is below minimum {}",
                    draft.max_stock, draft.min_stock
                ),
            });
        }

        let status = StockStatus::classify(draft.current_stock, draft.min_stock);

        Ok(InventoryItem {
            sku: draft.sku,
            name: draft.name,
            category: draft.category,
            current_stock: draft.current_stock,
            min_stock: draft.min_stock,
            max_stock: draft.max_stock,
            unit_price: draft.unit_price,
            supplier: draft.supplier,
            last_restocked: draft.last_restocked,
            status,
        })
    }

    /// Returns a copy with a new stock level and a freshly derived status.
    pub fn with_current_stock(&self, current_stock: u32) -> Self {
        InventoryItem {
            current_stock,
            status: StockStatus::classify(current_stock, self.min_stock),
            ..self.clone()
        }
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn current_stock(&self) -> u32 {
        self.current_stock
    }

    pub fn min_stock(&self) -> u32 {
        self.min_stock
    }

    pub fn max_stock(&self) -> u32 {
        self.max_stock
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn last_restocked(&self) -> NaiveDate {
        self.last_restocked
    }

    pub fn status(&self) -> StockStatus {
        self.status
    }

    /// Value of the units on hand (`current_stock × unit_price`).
    pub fn stock_value(&self) -> Money {
        self.unit_price
            .multiply_quantity(i64::from(self.current_stock))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn chair_draft() -> InventoryItemDraft {
        InventoryItemDraft {
            sku: "OC003".to_string(),
            name: "Office Chair".to_string(),
            category: Category::Furniture,
            current_stock: 8,
            min_stock: 15,
            max_stock: 50,
            unit_price: Money::from_cents(29999),
            supplier: "FurnitureCo".to_string(),
            last_restocked: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
        assert_eq!(
            serde_json::to_string(&Category::HomeAndGarden).unwrap(),
            "\"Home & Garden\""
        );
        assert!("Toys".parse::<Category>().is_err());
    }

    #[test]
    fn test_sale_status_parse() {
        assert_eq!("completed".parse::<SaleStatus>().unwrap(), SaleStatus::Completed);
        assert_eq!("Pending".parse::<SaleStatus>().unwrap(), SaleStatus::Pending);
        assert!("shipped".parse::<SaleStatus>().is_err());
    }

    #[test]
    fn test_new_item_derives_status() {
        let item = InventoryItem::new(chair_draft()).unwrap();
        assert_eq!(item.status(), StockStatus::LowStock);
        assert_eq!(item.stock_value().cents(), 8 * 29999);
    }

    #[test]
    fn test_with_current_stock_recomputes_status() {
        let item = InventoryItem::new(chair_draft()).unwrap();

        assert_eq!(item.with_current_stock(8).status(), StockStatus::LowStock);
        assert_eq!(item.with_current_stock(0).status(), StockStatus::OutOfStock);
        assert_eq!(item.with_current_stock(20).status(), StockStatus::InStock);

        // The original snapshot is untouched.
        assert_eq!(item.current_stock(), 8);
    }

    #[test]
    fn test_new_item_rejects_bad_input() {
        let mut draft = chair_draft();
        draft.sku = "AB".to_string();
        assert!(matches!(
            InventoryItem::new(draft),
            Err(ValidationError::InvalidSku { .. })
        ));

        let mut draft = chair_draft();
        draft.max_stock = 10;
        assert!(matches!(
            InventoryItem::new(draft),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let mut draft = chair_draft();
        draft.name = "  ".to_string();
        assert!(InventoryItem::new(draft).is_err());
    }

    #[test]
    fn test_item_serializes_status_and_camel_case() {
        let item = InventoryItem::new(chair_draft()).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status"], "low-stock");
        assert_eq!(json["currentStock"], 8);
        assert_eq!(json["lastRestocked"], "2024-01-05");
        assert_eq!(json["unitPrice"], 299.99);
    }

    #[test]
    fn test_sales_total_consistency_is_reported_not_enforced() {
        let record = SalesRecord {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            product: "Laptop Pro 15\"".to_string(),
            category: Category::Electronics,
            quantity: 2,
            unit_price: Money::from_cents(129999),
            total_amount: Money::from_cents(259998),
            status: SaleStatus::Completed,
            customer: "John Smith".to_string(),
            sales_rep: "Alice Johnson".to_string(),
        };
        assert!(record.has_consistent_total());

        let discounted = SalesRecord {
            total_amount: Money::from_cents(250000),
            ..record
        };
        assert!(!discounted.has_consistent_total());
        assert_eq!(discounted.computed_total().cents(), 259998);
    }
}
