//! # Export Formatter
//!
//! Turns a record collection into CSV text for download. The core only
//! produces text; writing it somewhere is the caller's job.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  &[T: Serialize]                                                        │
//! │        │ select_fields(records, ["id", "date", "unitPrice", ...])       │
//! │        ▼                                                                │
//! │  Vec<FlatRecord>      [("date", "2024-01-15"), ("unitPrice", 1299.99)]  │
//! │        │ format_for_export(rows, fields, headers, options)              │
//! │        ▼                                                                │
//! │  Vec<FormattedRow>    [("Date", "1/15/2024"), ("Unit Price", "$1299.99")]│
//! │        │ to_csv(columns, rows)                                          │
//! │        ▼                                                                │
//! │  "Date,Unit Price\r\n1/15/2024,$1299.99\r\n"                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any failure aborts the whole export. Callers never get partial text.
//!
//! ## Value Formatting
//! Decided on the original field key, case-insensitively:
//! - contains `date`: rendered with `ExportOptions::date_format`
//! - contains `price` or `amount`, and numeric: currency with two decimals
//! - anything else: plain text, `null` becomes an empty cell

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::str::FromStr;
use tracing::debug;
use ts_rs::TS;

use crate::error::{ExportError, ExportResult, ValidationError};
use crate::money::Money;
use crate::validation::parse_date;

// =============================================================================
// Row Types
// =============================================================================

/// One record reduced to allow-listed `(field, value)` pairs, in allow-list
/// order.
pub type FlatRecord = Vec<(String, Value)>;

/// One record after renaming and formatting: a `(label, cell text)` pair
/// per allow-listed field, in allow-list order.
pub type FormattedRow = Vec<(String, String)>;

/// Field key to display label. Fields without an entry keep their key.
pub type HeaderMap = BTreeMap<String, String>;

/// Locale settings applied while formatting cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub currency_symbol: String,
    /// chrono `strftime` pattern for date columns.
    pub date_format: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            currency_symbol: "$".to_string(),
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

// =============================================================================
// Stage 1: Field Selection
// =============================================================================

/// Keeps only the allow-listed fields of each record.
///
/// Fields the record does not have are skipped, not filled. Row order is
/// preserved.
///
/// ## Errors
/// - `ExportError::NotARecord` if a record does not serialize to an object
/// - `ExportError::StructuredValue` if a kept field holds an array or object
pub fn select_fields<T: Serialize>(records: &[T], fields: &[&str]) -> ExportResult<Vec<FlatRecord>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let Value::Object(mut map) = serde_json::to_value(record)? else {
                return Err(ExportError::NotARecord { index });
            };

            let mut flat = FlatRecord::with_capacity(fields.len());
            for field in fields {
                let Some(value) = map.remove(*field) else {
                    continue;
                };
                if value.is_array() || value.is_object() {
                    return Err(ExportError::StructuredValue {
                        index,
                        field: field.to_string(),
                    });
                }
                flat.push((field.to_string(), value));
            }
            Ok(flat)
        })
        .collect()
}

// =============================================================================
// Stage 2: Renaming & Formatting
// =============================================================================

/// The label a field is exported under.
pub fn display_label(field: &str, headers: &HeaderMap) -> String {
    headers
        .get(field)
        .cloned()
        .unwrap_or_else(|| field.to_string())
}

/// Header row for an allow-list.
pub fn column_labels(fields: &[&str], headers: &HeaderMap) -> Vec<String> {
    fields.iter().map(|f| display_label(f, headers)).collect()
}

/// Renames keys and formats values for display.
///
/// Each row gets exactly one cell per entry in `fields`, so two fields
/// sharing a label stay separate columns. A field the row lacks gets an
/// empty cell.
pub fn format_for_export(
    rows: &[FlatRecord],
    fields: &[&str],
    headers: &HeaderMap,
    options: &ExportOptions,
) -> Vec<FormattedRow> {
    rows.iter()
        .map(|row| {
            fields
                .iter()
                .map(|field| {
                    let text = row
                        .iter()
                        .find(|(key, _)| key == field)
                        .map(|(key, value)| format_value(key, value, options))
                        .unwrap_or_default();
                    (display_label(field, headers), text)
                })
                .collect()
        })
        .collect()
}

/// Formats one cell according to its field key.
pub fn format_value(key: &str, value: &Value, options: &ExportOptions) -> String {
    let lowered = key.to_lowercase();

    if lowered.contains("date") {
        return format_date_cell(value, &options.date_format);
    }

    if lowered.contains("price") || lowered.contains("amount") {
        if let Some(money) = value.as_f64().and_then(Money::from_f64_rounded) {
            return money.format_with_symbol(&options.currency_symbol);
        }
    }

    plain_text(value)
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reformats a date cell; text that is not a date is kept as-is.
fn format_date_cell(value: &Value, date_format: &str) -> String {
    let raw = plain_text(value);
    match parse_date(&raw) {
        Some(date) => render_date(date, date_format).unwrap_or(raw),
        None => raw,
    }
}

/// Renders with a `strftime` pattern, `None` if the pattern is invalid.
fn render_date(date: NaiveDate, date_format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(date_format)).ok()?;
    Some(out)
}

/// Whether chrono can render dates with this pattern.
pub fn is_valid_date_format(date_format: &str) -> bool {
    render_date(NaiveDate::default(), date_format).is_some()
}

// =============================================================================
// Stage 3: Delimited Text
// =============================================================================

/// Writes the header row and one line per row.
///
/// Cells are written by position: a short row is padded with empty cells
/// and cells past the last column are dropped. Quoting follows RFC 4180
/// and lines end in CRLF.
pub fn to_csv(columns: &[String], rows: &[FormattedRow]) -> ExportResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(columns)?;

    for row in rows {
        let cells = (0..columns.len())
            .map(|position| row.get(position).map_or("", |(_, text)| text.as_str()));
        writer.write_record(cells)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Selects, formats and serializes in one call.
///
/// ## Example
/// ```rust
/// use dashboard_core::export::{format, sales_headers, ExportOptions, SALES_EXPORT_FIELDS};
/// use dashboard_core::store::seed_sales;
///
/// let text = format(&seed_sales(), SALES_EXPORT_FIELDS, &sales_headers(), &ExportOptions::default()).unwrap();
/// let mut lines = text.lines();
/// assert!(lines.next().unwrap().starts_with("Order ID,Date,Product"));
/// assert!(lines.next().unwrap().starts_with("1,1/15/2024,\"Laptop Pro 15\"\"\""));
/// ```
pub fn format<T: Serialize>(
    records: &[T],
    fields: &[&str],
    headers: &HeaderMap,
    options: &ExportOptions,
) -> ExportResult<String> {
    let flat = select_fields(records, fields)?;
    let rows = format_for_export(&flat, fields, headers, options);
    let text = to_csv(&column_labels(fields, headers), &rows)?;

    debug!(rows = rows.len(), columns = fields.len(), bytes = text.len(), "Formatted export");
    Ok(text)
}

// =============================================================================
// Presets
// =============================================================================

pub const SALES_EXPORT_FIELDS: &[&str] = &[
    "id",
    "date",
    "product",
    "category",
    "customer",
    "quantity",
    "unitPrice",
    "totalAmount",
    "status",
    "salesRep",
];

pub const INVENTORY_EXPORT_FIELDS: &[&str] = &[
    "sku",
    "name",
    "category",
    "currentStock",
    "minStock",
    "maxStock",
    "unitPrice",
    "supplier",
    "lastRestocked",
    "status",
];

fn header_map(pairs: &[(&str, &str)]) -> HeaderMap {
    pairs
        .iter()
        .map(|(field, label)| (field.to_string(), label.to_string()))
        .collect()
}

pub fn sales_headers() -> HeaderMap {
    header_map(&[
        ("id", "Order ID"),
        ("date", "Date"),
        ("product", "Product"),
        ("category", "Category"),
        ("customer", "Customer"),
        ("quantity", "Quantity"),
        ("unitPrice", "Unit Price"),
        ("totalAmount", "Total Amount"),
        ("status", "Status"),
        ("salesRep", "Sales Rep"),
    ])
}

pub fn inventory_headers() -> HeaderMap {
    header_map(&[
        ("sku", "SKU"),
        ("name", "Product Name"),
        ("category", "Category"),
        ("currentStock", "Current Stock"),
        ("minStock", "Min Stock"),
        ("maxStock", "Max Stock"),
        ("unitPrice", "Unit Price"),
        ("supplier", "Supplier"),
        ("lastRestocked", "Last Restocked"),
        ("status", "Status"),
    ])
}

// =============================================================================
// Report Kind
// =============================================================================

/// Which page a report is exported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Sales,
    Inventory,
}

impl ReportKind {
    pub const fn slug(&self) -> &'static str {
        match self {
            ReportKind::Sales => "sales",
            ReportKind::Inventory => "inventory",
        }
    }

    pub const fn fields(&self) -> &'static [&'static str] {
        match self {
            ReportKind::Sales => SALES_EXPORT_FIELDS,
            ReportKind::Inventory => INVENTORY_EXPORT_FIELDS,
        }
    }

    pub fn headers(&self) -> HeaderMap {
        match self {
            ReportKind::Sales => sales_headers(),
            ReportKind::Inventory => inventory_headers(),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ReportKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(ReportKind::Sales),
            "inventory" => Ok(ReportKind::Inventory),
            other => Err(ValidationError::InvalidFormat {
                field: "report".to_string(),
                reason: format!("unknown report kind '{other}'"),
            }),
        }
    }
}

/// `sales-report-2024-01-15`; the extension is added by file delivery.
pub fn report_filename(kind: ReportKind, date: NaiveDate) -> String {
    format!("{}-report-{}", kind.slug(), date.format("%Y-%m-%d"))
}

// =============================================================================
// Unit Tests
// =============================================================================
