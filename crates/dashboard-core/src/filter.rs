//! # Filter Engine
//!
//! Derives the visible subset of a record collection from the search box and
//! the category / status dropdowns.
//!
//! ## How A Query Is Applied
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  records ──► search term?  ──► category?  ──► status?  ──► Vec<&R>     │
//! │              (substring,       (exact,        (exact,                  │
//! │               any of 3         All = skip)    All = skip)              │
//! │               text fields)                                              │
//! │                                                                         │
//! │  Conjunctive, stable (source order kept), never mutates the source.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Searched Fields
//! - Sales: product, customer, sales rep
//! - Inventory: name, SKU, supplier

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::stock::StockStatus;
use crate::types::{Category, InventoryItem, SaleStatus, SalesRecord};
use crate::{ALL_CATEGORIES_LABEL, ALL_STATUSES_LABEL};

// =============================================================================
// Selection
// =============================================================================

/// A categorical filter: either bypassed (`All`) or pinned to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// `All` accepts everything; `Only(v)` accepts exactly `v`.
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }
}

impl<T: FromStr> Selection<T> {
    /// Parses a dropdown value, mapping the "All ..." sentinels to `All`.
    ///
    /// ## Example
    /// ```rust
    /// use dashboard_core::filter::Selection;
    /// use dashboard_core::types::Category;
    ///
    /// let all: Selection<Category> = Selection::parse("All Categories").unwrap();
    /// assert_eq!(all, Selection::All);
    ///
    /// let one: Selection<Category> = Selection::parse("Furniture").unwrap();
    /// assert_eq!(one, Selection::Only(Category::Furniture));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, T::Err> {
        let trimmed = raw.trim();
        let is_sentinel = trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES_LABEL)
            || trimmed.eq_ignore_ascii_case(ALL_STATUSES_LABEL);

        if is_sentinel {
            Ok(Selection::All)
        } else {
            trimmed.parse().map(Selection::Only)
        }
    }
}

// =============================================================================
// Filterable Records
// =============================================================================

/// A record the filter engine can search and bucket.
pub trait Filterable {
    /// The record's status enumeration.
    type Status: Copy + PartialEq;

    /// Text fields matched by the search box.
    fn search_fields(&self) -> [&str; 3];

    fn category(&self) -> Category;

    fn status(&self) -> Self::Status;
}

impl Filterable for SalesRecord {
    type Status = SaleStatus;

    fn search_fields(&self) -> [&str; 3] {
        [&self.product, &self.customer, &self.sales_rep]
    }

    fn category(&self) -> Category {
        self.category
    }

    fn status(&self) -> SaleStatus {
        self.status
    }
}

impl Filterable for InventoryItem {
    type Status = StockStatus;

    fn search_fields(&self) -> [&str; 3] {
        [self.name(), self.sku(), self.supplier()]
    }

    fn category(&self) -> Category {
        InventoryItem::category(self)
    }

    fn status(&self) -> StockStatus {
        InventoryItem::status(self)
    }
}

// =============================================================================
// Query
// =============================================================================

/// Search box plus dropdown state for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuery<S> {
    pub search: String,
    pub category: Selection<Category>,
    pub status: Selection<S>,
}

pub type SalesQuery = RecordQuery<SaleStatus>;
pub type InventoryQuery = RecordQuery<StockStatus>;

impl<S> RecordQuery<S> {
    /// A query that matches everything.
    pub fn all() -> Self {
        RecordQuery {
            search: String::new(),
            category: Selection::All,
            status: Selection::All,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: Selection<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_status(mut self, status: Selection<S>) -> Self {
        self.status = status;
        self
    }
}

impl<S: PartialEq> RecordQuery<S> {
    /// Tests one record against the query.
    ///
    /// `needle` is the already lower-cased search term.
    fn matches<R>(&self, record: &R, needle: &str) -> bool
    where
        R: Filterable<Status = S>,
    {
        let matches_search = needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle));

        matches_search
            && self.category.accepts(&record.category())
            && self.status.accepts(&record.status())
    }
}

/// Returns the records matching `query`, in source order.
///
/// ## Example
/// ```rust
/// use dashboard_core::filter::{filter_records, SalesQuery, Selection};
/// use dashboard_core::store::seed_sales;
/// use dashboard_core::types::SaleStatus;
///
/// let sales = seed_sales();
/// let query = SalesQuery::all()
///     .with_search("alice")
///     .with_status(Selection::Only(SaleStatus::Completed));
///
/// let visible = filter_records(&sales, &query);
/// assert_eq!(visible.len(), 2);
/// ```
pub fn filter_records<'a, R>(records: &'a [R], query: &RecordQuery<R::Status>) -> Vec<&'a R>
where
    R: Filterable,
{
    let needle = query.search.to_lowercase();

    records
        .iter()
        .filter(|record| query.matches(*record, &needle))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
