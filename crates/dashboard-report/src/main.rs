//! # Report Exporter
//!
//! Exports the Sales or Inventory view to a CSV file, the same way the
//! dashboard's export button does.
//!
//! ## Usage
//! ```bash
//! # All sales, file lands in ./reports (or export.output_dir)
//! cargo run -p dashboard-report -- sales
//!
//! # Filtered inventory after a stock edit
//! cargo run -p dashboard-report -- inventory --status low-stock --set-stock OC003=4
//!
//! # Custom config and output directory, summary as JSON
//! cargo run -p dashboard-report -- sales --config ./report.toml --out /tmp --json
//! ```

use chrono::Local;
use dashboard_core::export::{report_filename, ReportKind};
use dashboard_report::{ReportConfig, ReportError, ReportRequest, ReportRunner, ReportSummary};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: dashboard-report <sales|inventory> [OPTIONS]

Options:
  -s, --search <TEXT>        Search box text
  -c, --category <NAME>      Category filter (default: All Categories)
      --status <STATUS>      Status filter (default: All Statuses)
      --set-stock <SKU=N>    Apply a stock edit first (repeatable)
      --config <PATH>        Config file (default: platform config dir)
  -o, --out <DIR>            Output directory (overrides config)
      --json                 Print the summary as JSON
      --save-config          Write the effective config and exit
  -h, --help                 Show this help message";

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    kind: Option<ReportKind>,
    search: String,
    category: String,
    status: String,
    stock_edits: Vec<(String, String)>,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    json: bool,
    save_config: bool,
    help: bool,
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool, ReportError> {
    let args = parse_args(env::args().skip(1).collect())?;

    if args.help {
        println!("{USAGE}");
        return Ok(true);
    }

    let mut config = ReportConfig::load(args.config.clone())?;
    if let Some(out) = args.out {
        config.export.output_dir = out;
    }

    if args.save_config {
        let path = config.save(args.config)?;
        println!("Config written to {}", path.display());
        return Ok(true);
    }

    let kind = args
        .kind
        .ok_or_else(|| ReportError::InvalidArgument(format!("missing report kind\n\n{USAGE}")))?;

    let mut runner = ReportRunner::seeded(&config)?;
    for (sku, stock) in &args.stock_edits {
        let item = runner.update_stock(sku, stock)?;
        println!("Stock {}: {} ({})", item.sku(), item.current_stock(), item.status());
    }

    let request = ReportRequest::parse(kind, &args.search, &args.category, &args.status)?;
    let summary = runner.summarize(&request);

    if args.json {
        let json = serde_json::to_string_pretty(&summary)?;
        println!("{json}");
    } else {
        print_summary(&summary);
    }

    let date = Local::now().date_naive();
    if !runner.try_run(&request, date) {
        eprintln!("Export failed, no file was written.");
        return Ok(false);
    }

    let filename = report_filename(kind, date);
    println!("Report: {}", runner.delivery().target_path(&filename).display());
    Ok(true)
}

fn parse_args(args: Vec<String>) -> Result<Args, ReportError> {
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| ReportError::InvalidArgument(format!("{flag} needs a value")))
        };

        match flag {
            "--search" | "-s" => parsed.search = value()?,
            "--category" | "-c" => parsed.category = value()?,
            "--status" => parsed.status = value()?,
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--out" | "-o" => parsed.out = Some(PathBuf::from(value()?)),
            "--set-stock" => {
                let edit = value()?;
                let (sku, stock) = edit.split_once('=').ok_or_else(|| {
                    ReportError::InvalidArgument(format!("expected SKU=N, got '{edit}'"))
                })?;
                parsed.stock_edits.push((sku.to_string(), stock.to_string()));
            }
            "--json" => parsed.json = true,
            "--save-config" => parsed.save_config = true,
            "--help" | "-h" => parsed.help = true,
            other if other.starts_with('-') => {
                return Err(ReportError::InvalidArgument(format!("unknown option '{other}'")));
            }
            other => parsed.kind = Some(other.parse()?),
        }
        i += 1;
    }

    Ok(parsed)
}

fn print_summary(summary: &ReportSummary) {
    match summary {
        ReportSummary::Sales(s) => {
            println!("Total Orders:        {}", s.total_orders);
            println!("Total Sales:         {}", s.total_sales);
            println!("Average Order Value: {}", s.average_order_value);
            println!(
                "Completed / Pending / Cancelled: {} / {} / {}",
                s.completed, s.pending, s.cancelled
            );
        }
        ReportSummary::Inventory(s) => {
            println!("Total Products: {}", s.total_products);
            println!("In Stock:       {}", s.in_stock);
            println!("Low Stock:      {}", s.low_stock);
            println!("Out of Stock:   {}", s.out_of_stock);
            println!("Total Value:    {}", s.total_value);
        }
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=dashboard_core=trace` - Show trace for the core crate only
/// - Default: INFO, DEBUG for the dashboard crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dashboard_core=debug,dashboard_report=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
