//! CSV discovery, loading and cleaning for the sales dashboard.
//!
//! Reads raw sales exports, validates the column layout, coerces field
//! types, reconciles the derived revenue column and produces the
//! immutable [`SalesDataset`] every aggregate is computed from.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use csv::StringRecord;
use dashboard_core::calculations::round2;
use dashboard_core::data_processors::{DateParser, NumericParser};
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{month_key, SaleRecord, SalesDataset};
use tracing::{debug, warn};

/// Columns a sales export must carry. Ingestion fails fast when any are
/// absent.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Date",
    "Product",
    "Category",
    "UnitPrice",
    "Quantity",
    "Region",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// The cleaned dataset together with row-level accounting.
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub dataset: SalesDataset,
    /// Data rows read across all files (header rows excluded).
    pub rows_read: usize,
    /// Rows discarded because their date field failed to parse.
    pub rows_dropped: usize,
}

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load and clean sales data from a CSV file, or from every CSV file
/// under a directory (concatenated in sorted path order).
///
/// Rows whose date field cannot be parsed are dropped and counted; all
/// other coercion failures degrade to missing values on the record.
pub fn load_sales_data(path: &Path) -> Result<LoadResult> {
    if !path.exists() {
        return Err(DashboardError::DataPathNotFound(path.to_path_buf()));
    }

    let files = if path.is_dir() {
        let files = find_csv_files(path);
        if files.is_empty() {
            return Err(DashboardError::NoDataFiles(path.to_path_buf()));
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut records: Vec<SaleRecord> = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_dropped = 0usize;

    for file_path in &files {
        let (file_records, read, dropped) = process_single_file(file_path)?;
        records.extend(file_records);
        rows_read += read;
        rows_dropped += dropped;
    }

    if rows_dropped > 0 {
        warn!(
            "Dropped {} of {} rows with unparseable dates",
            rows_dropped, rows_read
        );
    }
    debug!(
        "Loaded {} records from {} file(s)",
        records.len(),
        files.len()
    );

    Ok(LoadResult {
        dataset: SalesDataset::new(records),
        rows_read,
        rows_dropped,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the known columns within one file's header row.
struct ColumnIndex {
    date: usize,
    product: usize,
    category: usize,
    unit_price: usize,
    quantity: usize,
    region: usize,
    revenue: Option<usize>,
    order_id: Option<usize>,
    salesperson: Option<usize>,
    customer_id: Option<usize>,
}

impl ColumnIndex {
    /// Resolve column positions from a (whitespace-trimmed) header row.
    ///
    /// Fails with [`DashboardError::MissingColumns`] naming every absent
    /// required column.
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(name).is_none())
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DashboardError::MissingColumns(missing));
        }

        // Every required column was just verified present.
        Ok(Self {
            date: position("Date").unwrap_or(0),
            product: position("Product").unwrap_or(0),
            category: position("Category").unwrap_or(0),
            unit_price: position("UnitPrice").unwrap_or(0),
            quantity: position("Quantity").unwrap_or(0),
            region: position("Region").unwrap_or(0),
            revenue: position("Revenue"),
            order_id: position("OrderID"),
            salesperson: position("Salesperson"),
            customer_id: position("CustomerID"),
        })
    }
}

/// Read one CSV file into records, returning `(records, rows_read,
/// rows_dropped)`.
fn process_single_file(file_path: &Path) -> Result<(Vec<SaleRecord>, usize, usize)> {
    let file = File::open(file_path).map_err(|e| DashboardError::FileRead {
        path: file_path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records: Vec<SaleRecord> = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_dropped = 0usize;

    for row in reader.records() {
        let row = match row {
            Ok(r) => r,
            Err(e) => {
                debug!("Skipping malformed row in {}: {}", file_path.display(), e);
                rows_read += 1;
                rows_dropped += 1;
                continue;
            }
        };
        rows_read += 1;

        match parse_row(&row, &columns) {
            Some(record) => records.push(record),
            None => rows_dropped += 1,
        }
    }

    debug!(
        "File {}: {} read, {} dropped",
        file_path.display(),
        rows_read,
        rows_dropped,
    );

    Ok((records, rows_read, rows_dropped))
}

/// Build a [`SaleRecord`] from one data row, or `None` when the date is
/// unparseable (the row is dropped, not repaired).
fn parse_row(row: &StringRecord, columns: &ColumnIndex) -> Option<SaleRecord> {
    let date = DateParser::parse(row.get(columns.date).unwrap_or(""))?;

    let unit_price = NumericParser::parse(row.get(columns.unit_price).unwrap_or(""));
    let quantity = NumericParser::parse(row.get(columns.quantity).unwrap_or(""));
    let stated_revenue = columns
        .revenue
        .and_then(|i| row.get(i))
        .and_then(NumericParser::parse);

    let text = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(|s| s.to_string());

    Some(SaleRecord {
        order_id: text(columns.order_id),
        date,
        product: row.get(columns.product).unwrap_or("").to_string(),
        category: row.get(columns.category).unwrap_or("").to_string(),
        unit_price,
        quantity,
        revenue: reconcile_revenue(unit_price, quantity, stated_revenue),
        region: row.get(columns.region).unwrap_or("").to_string(),
        salesperson: text(columns.salesperson),
        customer_id: text(columns.customer_id),
        year: date.year(),
        month: month_key(date),
    })
}

/// Revenue reconciliation, applied once per row after coercion.
///
/// When unit price and quantity are both present, the stated revenue is
/// retained only if it is within 0.01 of `price * quantity`; otherwise
/// `round(price * quantity, 2)` replaces it. When either input is
/// missing, revenue is missing: a wrong number is never fabricated.
fn reconcile_revenue(
    unit_price: Option<f64>,
    quantity: Option<f64>,
    stated: Option<f64>,
) -> Option<f64> {
    match (unit_price, quantity) {
        (Some(price), Some(qty)) => match stated {
            Some(revenue) if (revenue - price * qty).abs() <= 0.01 => Some(revenue),
            _ => Some(round2(price * qty)),
        },
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
