use std::fs::File;
use std::path::Path;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::SalesDataset;

/// Column order of the re-exported CSV, matching the canonical input
/// layout.
const EXPORT_HEADER: [&str; 10] = [
    "OrderID",
    "Date",
    "Product",
    "Category",
    "UnitPrice",
    "Quantity",
    "Revenue",
    "Region",
    "Salesperson",
    "CustomerID",
];

/// Write the (filtered) dataset back to CSV at `path`.
///
/// A pass-through serialization of the cleaned records: reconciled
/// revenue values are written, missing optionals become empty cells.
pub fn export_csv(path: &Path, dataset: &SalesDataset) -> Result<()> {
    let file = File::create(path).map_err(|e| DashboardError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(EXPORT_HEADER)?;

    for record in &dataset.records {
        let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record(&[
            record.order_id.clone().unwrap_or_default(),
            record.date.format("%Y-%m-%d").to_string(),
            record.product.clone(),
            record.category.clone(),
            number(record.unit_price),
            number(record.quantity),
            number(record.revenue),
            record.region.clone(),
            record.salesperson.clone().unwrap_or_default(),
            record.customer_id.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use dashboard_core::models::{month_key, SaleRecord};
    use tempfile::TempDir;

    fn make_record(d: NaiveDate, product: &str, region: &str, revenue: Option<f64>) -> SaleRecord {
        SaleRecord {
            order_id: Some("O1".to_string()),
            date: d,
            product: product.to_string(),
            category: "Apparel".to_string(),
            unit_price: Some(50.0),
            quantity: Some(2.0),
            revenue,
            region: region.to_string(),
            salesperson: None,
            customer_id: Some("C1001".to_string()),
            year: d.year(),
            month: month_key(d),
        }
    }

    #[test]
    fn test_export_round_trips_through_reader() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.csv");
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let dataset = SalesDataset::new(vec![make_record(date, "Alpha Hoodie", "North", Some(100.0))]);

        export_csv(&path, &dataset).unwrap();

        let reloaded = dashboard_data::reader::load_sales_data(&path).unwrap();
        assert_eq!(reloaded.dataset.len(), 1);
        let record = &reloaded.dataset.records[0];
        assert_eq!(record.product, "Alpha Hoodie");
        assert_eq!(record.revenue, Some(100.0));
        assert_eq!(record.date, date);
        assert!(record.salesperson.as_deref() == Some("") || record.salesperson.is_none());
    }

    #[test]
    fn test_export_empty_dataset_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        export_csv(&path, &SalesDataset::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("OrderID,Date,Product"));
    }

    #[test]
    fn test_export_missing_values_become_empty_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut record = make_record(date, "Alpha Hoodie", "North", None);
        record.unit_price = None;
        record.quantity = None;
        export_csv(&path, &SalesDataset::new(vec![record])).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let data_line = content.lines().nth(1).unwrap();
        assert!(data_line.contains(",,,"), "expected empty numeric cells: {data_line}");
    }
}
