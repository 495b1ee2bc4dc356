mod bootstrap;
mod cache;
mod export;
mod render;
mod sample;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dashboard_core::calculations::moving_average;
use dashboard_core::settings::Settings;
use dashboard_data::aggregator::SalesAggregator;
use dashboard_data::analysis::build_report;

fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("sales-dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    // Sample generation needs no existing dataset.
    if settings.view == "gen-data" {
        let out = settings
            .data
            .clone()
            .unwrap_or_else(|| PathBuf::from("sales_data.csv"));
        sample::write_sample_csv(&out, settings.rows as usize)?;
        println!("Wrote {} sample rows to {}", settings.rows, out.display());
        return Ok(());
    }

    let data_path = bootstrap::resolve_data_path(settings.data.as_deref()).ok_or_else(|| {
        anyhow::anyhow!(
            "no sales data found; pass --data <path> or place sales_data.csv in the working directory"
        )
    })?;

    let mut cache = cache::DatasetCache::new();
    let loaded = cache.load(&data_path)?;
    tracing::info!(
        "Loaded {} rows from {} ({} dropped)",
        loaded.rows_read,
        data_path.display(),
        loaded.rows_dropped
    );

    // Row-restricted view every aggregate below is computed from.
    let mut dataset = loaded.dataset;
    if let Some(year) = settings.year {
        dataset = dataset.filter_by_year(year);
    }
    if let Some(region) = settings.region.as_deref() {
        dataset = dataset.filter_by_region(region);
    }

    if let Some(export_path) = &settings.export {
        export::export_csv(export_path, &dataset)?;
        tracing::info!(
            "Exported {} rows to {}",
            dataset.len(),
            export_path.display()
        );
    }

    let top = settings.top as usize;
    let window = settings.window as usize;

    match settings.view.as_str() {
        "summary" => {
            let report = build_report(&dataset, window);
            if settings.json_output() {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::summary_view(&report));
            }
        }

        "monthly" => {
            let monthly = SalesAggregator::monthly_revenue(&dataset);
            let series: Vec<f64> = monthly.iter().map(|p| p.revenue).collect();
            let smoothed = moving_average(&series, window);
            if settings.json_output() {
                let payload = serde_json::json!({
                    "monthly": monthly,
                    "moving_average": smoothed,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", render::monthly_table(&monthly, &smoothed, window));
            }
        }

        "products" | "regions" | "categories" | "salespeople" => {
            let (title, ranking) = match settings.view.as_str() {
                "products" => (
                    "Top products by revenue",
                    SalesAggregator::top_products(&dataset, top),
                ),
                "regions" => (
                    "Revenue by region",
                    SalesAggregator::revenue_by_region(&dataset),
                ),
                "categories" => (
                    "Revenue by category",
                    SalesAggregator::category_share(&dataset),
                ),
                _ => (
                    "Top salespeople by revenue",
                    SalesAggregator::revenue_by_salesperson(&dataset, top),
                ),
            };
            if settings.json_output() {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            } else {
                print!("{}", render::ranking_table(title, &ranking));
            }
        }

        "pivot" => {
            let pivot = SalesAggregator::monthly_pivot(&dataset);
            if settings.json_output() {
                println!("{}", serde_json::to_string_pretty(&pivot)?);
            } else {
                print!("{}", render::pivot_table(&pivot));
            }
        }

        unknown => {
            // Unreachable through clap's value parser; kept as a guard.
            eprintln!("Unknown view: {}", unknown);
        }
    }

    Ok(())
}
