//! # Report Runner
//!
//! Ties the pieces together for one export: filter the page's records,
//! summarize the visible view, format CSV text and hand it to delivery.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportRequest::Sales(query)                                            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  filter_records(sales, query) ──► visible view ──► summarize_sales      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  export::format(view, SALES_EXPORT_FIELDS, sales_headers, options)      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  FileDelivery::deliver("sales-report-YYYY-MM-DD", text)                 │
//! │                                                                         │
//! │  run()     → Ok(path) | Err(ReportError)                                │
//! │  try_run() → true     | false (error logged, nothing written)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use dashboard_core::aggregate::{summarize_inventory, summarize_sales, InventorySummary, SalesSummary};
use dashboard_core::export::{self, report_filename, ExportOptions, ReportKind};
use dashboard_core::filter::{filter_records, InventoryQuery, SalesQuery, Selection};
use dashboard_core::store::{seed_sales, InventoryStore};
use dashboard_core::types::{Category, InventoryItem, SalesRecord};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::config::ReportConfig;
use crate::delivery::FileDelivery;
use crate::error::ReportResult;

// =============================================================================
// Request
// =============================================================================

/// A report kind together with the page's filter state.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRequest {
    Sales(SalesQuery),
    Inventory(InventoryQuery),
}

impl ReportRequest {
    /// Builds a request from raw dropdown and search box values.
    ///
    /// `category` and `status` accept the same text the dropdowns show,
    /// including the "All ..." sentinels.
    pub fn parse(kind: ReportKind, search: &str, category: &str, status: &str) -> ReportResult<Self> {
        let category: Selection<Category> = Selection::parse(category)?;

        Ok(match kind {
            ReportKind::Sales => ReportRequest::Sales(
                SalesQuery::all()
                    .with_search(search)
                    .with_category(category)
                    .with_status(Selection::parse(status)?),
            ),
            ReportKind::Inventory => ReportRequest::Inventory(
                InventoryQuery::all()
                    .with_search(search)
                    .with_category(category)
                    .with_status(Selection::parse(status)?),
            ),
        })
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            ReportRequest::Sales(_) => ReportKind::Sales,
            ReportRequest::Inventory(_) => ReportKind::Inventory,
        }
    }
}

/// Summary card values for the exported view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "summary", rename_all = "snake_case")]
pub enum ReportSummary {
    Sales(SalesSummary),
    Inventory(InventorySummary),
}

// =============================================================================
// Runner
// =============================================================================

pub struct ReportRunner {
    sales: Vec<SalesRecord>,
    inventory: InventoryStore,
    delivery: FileDelivery,
    options: ExportOptions,
}

impl ReportRunner {
    pub fn new(
        sales: Vec<SalesRecord>,
        inventory: InventoryStore,
        delivery: FileDelivery,
        options: ExportOptions,
    ) -> Self {
        ReportRunner {
            sales,
            inventory,
            delivery,
            options,
        }
    }

    /// A runner over the seed collections, configured from `config`.
    pub fn seeded(config: &ReportConfig) -> ReportResult<Self> {
        Ok(Self::new(
            seed_sales(),
            InventoryStore::seeded()?,
            FileDelivery::new(&config.export.output_dir),
            config.export.options(),
        ))
    }

    pub fn delivery(&self) -> &FileDelivery {
        &self.delivery
    }

    /// Applies a stock edit before exporting.
    pub fn update_stock(&mut self, sku: &str, raw_stock: &str) -> ReportResult<&InventoryItem> {
        Ok(self.inventory.update_stock(sku, raw_stock)?)
    }

    /// Summary of the filtered view.
    pub fn summarize(&self, request: &ReportRequest) -> ReportSummary {
        match request {
            ReportRequest::Sales(query) => {
                ReportSummary::Sales(summarize_sales(filter_records(&self.sales, query)))
            }
            ReportRequest::Inventory(query) => {
                let items = self.inventory.snapshot();
                ReportSummary::Inventory(summarize_inventory(filter_records(items.as_slice(), query)))
            }
        }
    }

    /// CSV text of the filtered view.
    pub fn render(&self, request: &ReportRequest) -> ReportResult<String> {
        let kind = request.kind();
        let text = match request {
            ReportRequest::Sales(query) => {
                let view: Vec<&SalesRecord> = filter_records(&self.sales, query);
                debug!(kind = %kind, rows = view.len(), "Rendering report");
                export::format(&view, kind.fields(), &kind.headers(), &self.options)?
            }
            ReportRequest::Inventory(query) => {
                let items = self.inventory.snapshot();
                let view: Vec<&InventoryItem> = filter_records(items.as_slice(), query);
                debug!(kind = %kind, rows = view.len(), "Rendering report");
                export::format(&view, kind.fields(), &kind.headers(), &self.options)?
            }
        };
        Ok(text)
    }

    /// Renders and delivers the report dated `date`.
    ///
    /// Formatting completes before anything touches the disk.
    pub fn run(&self, request: &ReportRequest, date: NaiveDate) -> ReportResult<PathBuf> {
        let text = self.render(request)?;
        let filename = report_filename(request.kind(), date);
        let path = self.delivery.deliver(&filename, &text)?;

        info!(kind = %request.kind(), path = %path.display(), "Report exported");
        Ok(path)
    }

    /// Like `run`, reporting only success. Failures are logged.
    pub fn try_run(&self, request: &ReportRequest, date: NaiveDate) -> bool {
        match self.run(request, date) {
            Ok(_) => true,
            Err(e) => {
                error!(kind = %request.kind(), error = %e, "Error exporting report");
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::stock::StockStatus;
    use dashboard_core::types::SaleStatus;
    use std::fs;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    fn runner(dir: &std::path::Path) -> ReportRunner {
        let mut config = ReportConfig::default();
        config.export.output_dir = dir.to_path_buf();
        ReportRunner::seeded(&config).unwrap()
    }

    #[test]
    fn test_parse_request() {
        let request = ReportRequest::parse(ReportKind::Sales, "bob", "All Categories", "completed").unwrap();
        assert_eq!(
            request,
            ReportRequest::Sales(
                SalesQuery::all()
                    .with_search("bob")
                    .with_status(Selection::Only(SaleStatus::Completed))
            )
        );

        let request = ReportRequest::parse(ReportKind::Inventory, "", "Furniture", "low-stock").unwrap();
        assert_eq!(request.kind(), ReportKind::Inventory);

        assert!(ReportRequest::parse(ReportKind::Sales, "", "Toys", "").is_err());
        assert!(ReportRequest::parse(ReportKind::Inventory, "", "", "completed").is_err());
    }

    #[test]
    fn test_run_writes_filtered_sales() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(dir.path());
        let request = ReportRequest::parse(ReportKind::Sales, "", "Furniture", "").unwrap();

        let path = runner.run(&request, date()).unwrap();
        assert_eq!(path, dir.path().join("sales-report-2024-01-20.csv"));

        let text = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Office Chair"));
        assert!(lines[2].contains("Desk Lamp"));
    }

    #[test]
    fn test_stock_edit_shows_up_in_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = runner(dir.path());
        runner.update_stock("LP001", "4").unwrap();

        let request = ReportRequest::Inventory(
            InventoryQuery::all().with_status(Selection::Only(StockStatus::LowStock)),
        );

        let ReportSummary::Inventory(summary) = runner.summarize(&request) else {
            panic!("expected an inventory summary");
        };
        assert_eq!(summary.low_stock, 2);

        let text = runner.render(&request).unwrap();
        assert!(text.contains("LP001,\"Laptop Pro 15\"\"\""));
    }

    #[test]
    fn test_summary_of_filtered_sales() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(dir.path());
        let request = ReportRequest::parse(ReportKind::Sales, "alice", "", "").unwrap();

        let ReportSummary::Sales(summary) = runner.summarize(&request) else {
            panic!("expected a sales summary");
        };
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_sales.cents(), 259998 + 14997);
    }

    #[test]
    fn test_try_run_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "not a directory").unwrap();

        let runner = runner(&blocker);
        let request = ReportRequest::parse(ReportKind::Inventory, "", "", "").unwrap();

        assert!(!runner.try_run(&request, date()));

        let ok_runner = self::runner(dir.path());
        assert!(ok_runner.try_run(&request, date()));
        assert!(dir.path().join("inventory-report-2024-01-20.csv").exists());
    }

    #[test]
    fn test_unknown_sku_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = runner(dir.path());
        assert!(runner.update_stock("NOPE", "1").is_err());
    }
}
