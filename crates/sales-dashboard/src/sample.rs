//! Built-in sample dataset generator for demos and smoke tests.

use std::fs::File;
use std::path::Path;

use chrono::{Duration, Utc};
use dashboard_core::calculations::round2;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::month_key;
use rand::Rng;

const PRODUCTS: [(&str, &str); 10] = [
    ("Alpha Hoodie", "Apparel"),
    ("Beta T-shirt", "Apparel"),
    ("Gamma Sneakers", "Footwear"),
    ("Delta Cap", "Accessories"),
    ("Epsilon Jacket", "Apparel"),
    ("Zeta Socks", "Accessories"),
    ("Eta Laptop Sleeve", "Accessories"),
    ("Theta Watch", "Electronics"),
    ("Iota Charger", "Electronics"),
    ("Kappa Backpack", "Accessories"),
];

const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];

const SALESPEOPLE: [&str; 6] = ["Ayesha", "Bilal", "Carlos", "Dina", "Ehsan", "Fatima"];

/// Quantity pool; repeats weight the draw towards small orders.
const QUANTITIES: [u32; 10] = [1, 1, 1, 1, 2, 2, 3, 4, 5, 10];

/// Write `rows` randomized order lines covering the year up to today.
pub fn write_sample_csv(path: &Path, rows: usize) -> Result<()> {
    let file = File::create(path).map_err(|e| DashboardError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
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
    ])?;

    let mut rng = rand::rng();
    let start = month_key(Utc::now().date_naive()) - Duration::days(365);

    for i in 0..rows {
        let date = start + Duration::days(rng.random_range(0..365));
        let (product, category) = PRODUCTS[rng.random_range(0..PRODUCTS.len())];
        let unit_price = round2(rng.random_range(8.0..250.0));
        let quantity = QUANTITIES[rng.random_range(0..QUANTITIES.len())];
        let revenue = round2(unit_price * f64::from(quantity));

        writer.write_record(&[
            format!("O{}", 100_000 + i),
            date.format("%Y-%m-%d").to_string(),
            product.to_string(),
            category.to_string(),
            format!("{unit_price:.2}"),
            quantity.to_string(),
            format!("{revenue:.2}"),
            REGIONS[rng.random_range(0..REGIONS.len())].to_string(),
            SALESPEOPLE[rng.random_range(0..SALESPEOPLE.len())].to_string(),
            format!("C{}", rng.random_range(1000..10_000)),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
