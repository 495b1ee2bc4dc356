//! Best-effort observations derived from the aggregates.
//!
//! Each insight is computed independently and omitted when its
//! preconditions are not met; nothing here returns an error or panics,
//! so a partial insight list is always safe to render.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use dashboard_core::calculations::percent_change;
use dashboard_core::models::{Insight, SalesDataset};

use crate::aggregator::SalesAggregator;

/// Months summed on each side of the growth comparison.
const GROWTH_WINDOW_MONTHS: usize = 3;

// ── InsightGenerator ──────────────────────────────────────────────────────────

/// Stateless generator of the ordered insight sequence.
pub struct InsightGenerator;

impl InsightGenerator {
    /// Produce every insight whose preconditions hold, in a fixed order.
    pub fn generate(dataset: &SalesDataset) -> Vec<Insight> {
        [
            Self::top_product_shift(dataset),
            Self::dominant_region(dataset),
            Self::fastest_growing_product(dataset),
            Self::year_over_year(dataset),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Top product of the most recent month and its change versus the
    /// prior month.
    ///
    /// Needs at least two distinct months. A prior-month revenue of
    /// exactly zero leaves `change_pct` undefined rather than infinite.
    pub fn top_product_shift(dataset: &SalesDataset) -> Option<Insight> {
        let months = dataset.distinct_months();
        if months.len() < 2 {
            return None;
        }
        let (last, prev) = (months[months.len() - 1], months[months.len() - 2]);

        let last_month = dataset.filtered(|r| r.month == last);
        let top = SalesAggregator::top_products(&last_month, 1).into_iter().next()?;

        // The same product's revenue in the prior month; 0 when absent.
        let prev_revenue: f64 = dataset
            .records
            .iter()
            .filter(|r| r.month == prev && r.product == top.label)
            .filter_map(|r| r.revenue)
            .sum();

        Some(Insight::TopProductShift {
            month: last,
            product: top.label,
            revenue: top.revenue,
            change_pct: percent_change(top.revenue, prev_revenue),
        })
    }

    /// Region with the largest revenue total and its share of the
    /// overall total. Omitted when no region has any revenue.
    pub fn dominant_region(dataset: &SalesDataset) -> Option<Insight> {
        let ranking = SalesAggregator::revenue_by_region(dataset);
        let top = ranking.first()?;
        let total: f64 = ranking.iter().map(|e| e.revenue).sum();
        if total <= 0.0 {
            return None;
        }
        Some(Insight::DominantRegion {
            region: top.label.clone(),
            revenue: top.revenue,
            share_pct: top.revenue / total * 100.0,
        })
    }

    /// Product with the highest revenue growth between the two most
    /// recent 3-month windows.
    ///
    /// Needs at least six distinct months. Products with zero revenue in
    /// the prior window are excluded from the comparison rather than
    /// treated as infinite growth.
    pub fn fastest_growing_product(dataset: &SalesDataset) -> Option<Insight> {
        let months = dataset.distinct_months();
        if months.len() < 2 * GROWTH_WINDOW_MONTHS {
            return None;
        }
        let recent = &months[months.len() - GROWTH_WINDOW_MONTHS..];
        let prior = &months[months.len() - 2 * GROWTH_WINDOW_MONTHS..months.len() - GROWTH_WINDOW_MONTHS];

        let recent_sums = Self::product_window_sums(dataset, recent);
        let prior_sums = Self::product_window_sums(dataset, prior);

        let mut best: Option<(String, f64)> = None;
        for (product, prior_revenue) in prior_sums {
            if prior_revenue <= 0.0 {
                continue;
            }
            let recent_revenue = recent_sums.get(product).copied().unwrap_or(0.0);
            let growth = (recent_revenue - prior_revenue) / prior_revenue;
            if best.as_ref().map_or(true, |(_, current)| growth > *current) {
                best = Some((product.to_string(), growth));
            }
        }

        best.map(|(product, growth)| Insight::FastestGrowingProduct {
            product,
            growth_pct: growth * 100.0,
        })
    }

    /// Total revenue change between the most recent year and the year
    /// immediately before it. Omitted for non-adjacent years or an
    /// undefined change.
    pub fn year_over_year(dataset: &SalesDataset) -> Option<Insight> {
        let years = dataset.distinct_years();
        let last = *years.last()?;
        if !years.contains(&(last - 1)) {
            return None;
        }

        let current = dataset.filter_by_year(last).total_revenue();
        let previous = dataset.filter_by_year(last - 1).total_revenue();
        let change_pct = percent_change(current, previous)?;

        Some(Insight::YearOverYear {
            year: last,
            previous_year: last - 1,
            change_pct,
        })
    }

    // ── Private ───────────────────────────────────────────────────────────

    /// Per-product revenue summed over the given month keys.
    fn product_window_sums<'a>(
        dataset: &'a SalesDataset,
        window: &[NaiveDate],
    ) -> BTreeMap<&'a str, f64> {
        let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
        for record in &dataset.records {
            if window.contains(&record.month) {
                *sums.entry(record.product.as_str()).or_insert(0.0) +=
                    record.revenue.unwrap_or(0.0);
            }
        }
        sums
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
