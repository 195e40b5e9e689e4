//! # dashboard-report: Report Delivery for the Dashboard
//!
//! Everything between a filtered page view and a CSV file on disk that is
//! not pure formatting.
//!
//! ## Modules
//!
//! - [`config`] - `report.toml`, environment overrides, validation
//! - [`delivery`] - Atomic file writes under a report filename
//! - [`runner`] - Filter, summarize, format and deliver one report
//! - [`error`] - Report error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use dashboard_core::export::ReportKind;
//! use dashboard_report::config::ReportConfig;
//! use dashboard_report::runner::{ReportRequest, ReportRunner};
//!
//! let config = ReportConfig::load_or_default(None);
//! let runner = ReportRunner::seeded(&config).unwrap();
//! let request = ReportRequest::parse(ReportKind::Sales, "", "Electronics", "completed").unwrap();
//!
//! if !runner.try_run(&request, Local::now().date_naive()) {
//!     eprintln!("export failed");
//! }
//! ```

pub mod config;
pub mod delivery;
pub mod error;
pub mod runner;

pub use config::ReportConfig;
pub use delivery::FileDelivery;
pub use error::{ReportError, ReportResult};
pub use runner::{ReportRequest, ReportRunner, ReportSummary};
