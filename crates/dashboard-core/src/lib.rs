//! # dashboard-core: Pure Logic for the Sales & Inventory Dashboard
//!
//! This crate holds everything the dashboard derives from its record
//! collections: filtered views, summaries, stock classification, form
//! validation and CSV export text. It performs no file, network or UI I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dashboard Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (pages, tables, charts)               │   │
//! │  │   Overview ──► Sales ──► Inventory ──► Profile                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain values + query structs           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ dashboard-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌────────┐ ┌────────┐  │   │
//! │  │   │  store  │ │ filter  │ │ aggregate │ │ export │ │  form  │  │   │
//! │  │   │  seeds  │ │ search  │ │ summaries │ │  CSV   │ │ rules  │  │   │
//! │  │   │  edits  │ │ buckets │ │  overview │ │  text  │ │ errors │  │   │
//! │  │   └─────────┘ └─────────┘ └───────────┘ └────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILE I/O • NO NETWORK • DETERMINISTIC                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ export text                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          dashboard-report (config, file delivery, CLI)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Sales records, inventory items, categories
//! - [`money`] - Integer-cent money
//! - [`stock`] - Stock status classification
//! - [`store`] - Seed data, lookup lists, inventory snapshot edits
//! - [`filter`] - Search and dropdown filtering
//! - [`aggregate`] - Page summary cards
//! - [`overview`] - Landing page KPIs and chart series
//! - [`export`] - Delimited-text export
//! - [`validation`] - Single-value predicates
//! - [`form`] - Rule-driven form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dashboard_core::aggregate::summarize_inventory;
//! use dashboard_core::filter::{filter_records, InventoryQuery, Selection};
//! use dashboard_core::store::InventoryStore;
//! use dashboard_core::stock::StockStatus;
//!
//! let mut store = InventoryStore::seeded().unwrap();
//! store.update_stock("DL004", "3").unwrap();
//!
//! let items = store.snapshot();
//! let query = InventoryQuery::all().with_status(Selection::Only(StockStatus::LowStock));
//! let low = filter_records(items.as_slice(), &query);
//!
//! assert_eq!(low.len(), 2);
//! assert_eq!(summarize_inventory(low.iter().copied()).low_stock, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod error;
pub mod export;
pub mod filter;
pub mod form;
pub mod money;
pub mod overview;
pub mod stock;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ExportError, ExportResult, ValidationError};
pub use money::Money;
pub use stock::StockStatus;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category dropdown entry meaning "no category filter".
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

/// Status dropdown entry meaning "no status filter".
pub const ALL_STATUSES_LABEL: &str = "All Statuses";

/// Shortest accepted SKU.
pub const MIN_SKU_LEN: usize = 3;

/// Longest accepted SKU.
pub const MAX_SKU_LEN: usize = 20;
