//! Plain-text rendering of core outputs.
//!
//! The core hands over structured facts; every display string, including
//! the insight sentences, is produced here.

use dashboard_core::formatting::{format_currency, format_percent};
use dashboard_core::models::{Insight, Kpis, MonthPoint, RankedRevenue, RevenuePivot};
use dashboard_data::analysis::SalesReport;

/// Shown in place of a table when the (possibly filtered) dataset has no
/// rows.
pub const NO_DATA: &str = "(no data for the current selection)";

// ── KPIs and summary ──────────────────────────────────────────────────────────

/// Multi-line headline block.
pub fn kpi_summary(kpis: &Kpis) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Total revenue:   {}\n",
        format_currency(kpis.total_revenue)
    ));
    out.push_str(&format!("Orders:          {}\n", kpis.total_orders));
    out.push_str(&format!(
        "Avg order value: {}\n",
        format_currency(kpis.avg_order_value)
    ));
    out.push_str(&format!(
        "Top product:     {}\n",
        kpis.top_product.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!(
        "Top region:      {}\n",
        kpis.top_region.as_deref().unwrap_or("-")
    ));
    out
}

/// The summary view: KPI block plus one sentence per insight.
pub fn summary_view(report: &SalesReport) -> String {
    let mut out = kpi_summary(&report.kpis);
    if !report.insights.is_empty() {
        out.push('\n');
        for insight in &report.insights {
            out.push_str(&format!("  * {}\n", insight_sentence(insight)));
        }
    }
    out
}

// ── Insight sentences ─────────────────────────────────────────────────────────

/// Render one structured insight as a sentence.
///
/// An undefined percent change drops the parenthetical figure rather
/// than inventing one.
pub fn insight_sentence(insight: &Insight) -> String {
    match insight {
        Insight::TopProductShift {
            month,
            product,
            revenue,
            change_pct,
        } => {
            let when = month.format("%b %Y");
            let amount = format_currency(*revenue);
            match change_pct {
                Some(change) => format!(
                    "Top product in {when} was {product} with revenue {amount} ({} vs previous month).",
                    format_percent(*change)
                ),
                None => format!("Top product in {when} was {product} with revenue {amount}."),
            }
        }
        Insight::DominantRegion {
            region, share_pct, ..
        } => format!(
            "Top region: {region} contributing {share_pct:.1}% of total revenue."
        ),
        Insight::FastestGrowingProduct {
            product,
            growth_pct,
        } => format!(
            "Fastest growing product (last 3 months vs previous 3 months): {product} ({}).",
            format_percent(*growth_pct)
        ),
        Insight::YearOverYear {
            year,
            previous_year,
            change_pct,
        } => format!(
            "Revenue in {year} changed {} versus {previous_year}.",
            format_percent(*change_pct)
        ),
    }
}

// ── Tables ────────────────────────────────────────────────────────────────────

/// Descending ranking as an aligned two-column table.
pub fn ranking_table(title: &str, entries: &[RankedRevenue]) -> String {
    if entries.is_empty() {
        return format!("{title}\n  {NO_DATA}\n");
    }
    let mut out = format!("{title}\n");
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<28} {:>14}\n",
            i + 1,
            entry.label,
            format_currency(entry.revenue)
        ));
    }
    out
}

/// Monthly revenue next to its moving average.
pub fn monthly_table(monthly: &[MonthPoint], smoothed: &[f64], window: usize) -> String {
    if monthly.is_empty() {
        return format!("Monthly revenue\n  {NO_DATA}\n");
    }
    let mut out = format!(
        "Monthly revenue\n  {:<10} {:>14} {:>14}\n",
        "Month",
        "Revenue",
        format!("{window}-mo avg")
    );
    for (point, avg) in monthly.iter().zip(smoothed) {
        out.push_str(&format!(
            "  {:<10} {:>14} {:>14}\n",
            point.month.format("%b %Y").to_string(),
            format_currency(point.revenue),
            format_currency(*avg)
        ));
    }
    out
}

/// Product × month revenue matrix.
pub fn pivot_table(pivot: &RevenuePivot) -> String {
    if pivot.is_empty() {
        return format!("Revenue by product and month\n  {NO_DATA}\n");
    }
    let mut out = String::from("Revenue by product and month\n");
    out.push_str(&format!("  {:<28}", "Product"));
    for month in &pivot.months {
        out.push_str(&format!(" {:>12}", month.format("%Y-%m").to_string()));
    }
    out.push('\n');
    for (product, row) in pivot.products.iter().zip(&pivot.cells) {
        out.push_str(&format!("  {product:<28}"));
        for value in row {
            out.push_str(&format!(" {:>12}", format_currency(*value)));
        }
        out.push('\n');
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── insight_sentence ──────────────────────────────────────────────────

    #[test]
    fn test_top_product_sentence_with_change() {
        let sentence = insight_sentence(&Insight::TopProductShift {
            month: date(2024, 2, 1),
            product: "Alpha Hoodie".to_string(),
            revenue: 1500.0,
            change_pct: Some(12.34),
        });
        assert_eq!(
            sentence,
            "Top product in Feb 2024 was Alpha Hoodie with revenue $1,500.00 (+12.3% vs previous month)."
        );
    }

    #[test]
    fn test_top_product_sentence_omits_undefined_change() {
        let sentence = insight_sentence(&Insight::TopProductShift {
            month: date(2024, 2, 1),
            product: "Alpha Hoodie".to_string(),
            revenue: 1500.0,
            change_pct: None,
        });
        assert_eq!(
            sentence,
            "Top product in Feb 2024 was Alpha Hoodie with revenue $1,500.00."
        );
        assert!(!sentence.contains('%'));
    }

    #[test]
    fn test_dominant_region_sentence() {
        let sentence = insight_sentence(&Insight::DominantRegion {
            region: "North".to_string(),
            revenue: 900.0,
            share_pct: 41.26,
        });
        assert_eq!(
            sentence,
            "Top region: North contributing 41.3% of total revenue."
        );
    }

    #[test]
    fn test_year_over_year_sentence() {
        let sentence = insight_sentence(&Insight::YearOverYear {
            year: 2024,
            previous_year: 2023,
            change_pct: -5.0,
        });
        assert_eq!(sentence, "Revenue in 2024 changed -5.0% versus 2023.");
    }

    // ── kpi_summary ───────────────────────────────────────────────────────

    #[test]
    fn test_kpi_summary_with_missing_leaders() {
        let out = kpi_summary(&Kpis::default());
        assert!(out.contains("Total revenue:   $0.00"));
        assert!(out.contains("Top product:     -"));
        assert!(out.contains("Top region:      -"));
    }

    // ── tables ────────────────────────────────────────────────────────────

    #[test]
    fn test_ranking_table_rows() {
        let out = ranking_table(
            "Top products by revenue",
            &[
                RankedRevenue {
                    label: "C".to_string(),
                    revenue: 500.0,
                },
                RankedRevenue {
                    label: "A".to_string(),
                    revenue: 300.0,
                },
            ],
        );
        assert!(out.starts_with("Top products by revenue\n"));
        assert!(out.contains("1. C"));
        assert!(out.contains("$500.00"));
        assert!(out.contains("2. A"));
    }

    #[test]
    fn test_ranking_table_empty_shows_no_data() {
        let out = ranking_table("Top products by revenue", &[]);
        assert!(out.contains(NO_DATA));
    }

    #[test]
    fn test_monthly_table_pairs_series() {
        let monthly = vec![
            MonthPoint {
                month: date(2024, 1, 1),
                revenue: 100.0,
            },
            MonthPoint {
                month: date(2024, 2, 1),
                revenue: 200.0,
            },
        ];
        let out = monthly_table(&monthly, &[100.0, 150.0], 3);
        assert!(out.contains("Jan 2024"));
        assert!(out.contains("$150.00"));
        assert!(out.contains("3-mo avg"));
    }

    #[test]
    fn test_pivot_table_layout() {
        let pivot = RevenuePivot {
            products: vec!["A".to_string()],
            months: vec![date(2024, 1, 1)],
            cells: vec![vec![42.0]],
        };
        let out = pivot_table(&pivot);
        assert!(out.contains("2024-01"));
        assert!(out.contains("$42.00"));
    }
}
