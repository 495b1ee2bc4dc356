//! Top-level analysis pipeline.
//!
//! Orchestrates loading, cleaning, aggregation and insight generation,
//! returning a result ready for the presentation layer.

use std::path::Path;

use chrono::Utc;
use dashboard_core::calculations::moving_average;
use dashboard_core::error::Result;
use dashboard_core::models::{Insight, Kpis, MonthPoint, SalesDataset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregator::SalesAggregator;
use crate::insights::InsightGenerator;
use crate::reader::load_sales_data;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Data rows read across all input files.
    pub rows_read: usize,
    /// Rows discarded because their date failed to parse.
    pub rows_dropped: usize,
    /// Wall-clock seconds spent loading and cleaning the CSV input.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent aggregating and deriving insights.
    pub aggregate_time_seconds: f64,
}

/// The aggregates and insights derived from one dataset snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    /// Headline figures.
    pub kpis: Kpis,
    /// Monthly revenue series, chronological.
    pub monthly: Vec<MonthPoint>,
    /// Trailing moving average over `monthly`, same length.
    pub smoothed: Vec<f64>,
    /// Best-effort observations, fixed order, possibly empty.
    pub insights: Vec<Insight>,
}

/// The complete output of [`analyze_sales`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// The cleaned dataset the report was computed from.
    pub dataset: SalesDataset,
    /// Aggregates and insights.
    pub report: SalesReport,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Derive the full report from an already-cleaned dataset.
///
/// Pure; safe to call repeatedly on filtered views.
pub fn build_report(dataset: &SalesDataset, ma_window: usize) -> SalesReport {
    let kpis = SalesAggregator::kpis(dataset);
    let monthly = SalesAggregator::monthly_revenue(dataset);
    let series: Vec<f64> = monthly.iter().map(|p| p.revenue).collect();
    let smoothed = moving_average(&series, ma_window);
    let insights = InsightGenerator::generate(dataset);

    SalesReport {
        kpis,
        monthly,
        smoothed,
        insights,
    }
}

/// Run the full analysis pipeline.
///
/// 1. Load and clean the CSV input at `path`.
/// 2. Aggregate and derive insights via [`build_report`].
/// 3. Return an [`AnalysisResult`] with run metadata.
pub fn analyze_sales(path: &Path, ma_window: usize) -> Result<AnalysisResult> {
    let load_start = std::time::Instant::now();
    let loaded = load_sales_data(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let aggregate_start = std::time::Instant::now();
    let report = build_report(&loaded.dataset, ma_window);
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    debug!(
        "Analyzed {} records in {:.3}s",
        loaded.dataset.len(),
        load_time + aggregate_time
    );

    Ok(AnalysisResult {
        dataset: loaded.dataset,
        report,
        metadata: AnalysisMetadata {
            generated_at: Utc::now().to_rfc3339(),
            rows_read: loaded.rows_read,
            rows_dropped: loaded.rows_dropped,
            load_time_seconds: load_time,
            aggregate_time_seconds: aggregate_time,
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
