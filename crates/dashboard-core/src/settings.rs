use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sales analytics over a CSV dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dashboard",
    about = "Sales analytics over a CSV dataset",
    version
)]
pub struct Settings {
    /// Path to the sales CSV file, or a directory of CSV files
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// View to render
    #[arg(long, default_value = "summary", value_parser = [
        "summary", "monthly", "products", "regions", "categories",
        "salespeople", "pivot", "gen-data",
    ])]
    pub view: String,

    /// Restrict to one calendar year before aggregating
    #[arg(long)]
    pub year: Option<i32>,

    /// Restrict to one region before aggregating
    #[arg(long)]
    pub region: Option<String>,

    /// Number of entries shown in ranking views
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub top: u32,

    /// Moving-average window for the monthly series
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..=24))]
    pub window: u32,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Write the filtered dataset to this CSV path
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Number of rows written by the gen-data view
    #[arg(long, default_value = "1200", value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
    pub rows: u32,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

impl Settings {
    /// Whether the selected output format is JSON.
    pub fn json_output(&self) -> bool {
        self.format == "json"
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
