//! Grouped revenue summaries over a cleaned dataset.
//!
//! Every function here is a deterministic, side-effect-free read over a
//! [`SalesDataset`] (or a filtered copy) and returns empty output for
//! empty input, so filtered-to-empty views never error.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use dashboard_core::models::{Kpis, MonthPoint, RankedRevenue, RevenuePivot, SaleRecord, SalesDataset};

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless collection of grouping and ranking aggregates.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Revenue summed by month key, in chronological order.
    pub fn monthly_revenue(dataset: &SalesDataset) -> Vec<MonthPoint> {
        let mut by_month: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in &dataset.records {
            *by_month.entry(record.month).or_insert(0.0) += record.revenue.unwrap_or(0.0);
        }
        by_month
            .into_iter()
            .map(|(month, revenue)| MonthPoint { month, revenue })
            .collect()
    }

    /// The `n` largest products by summed revenue, descending. Ties keep
    /// the grouping's alphabetical order.
    pub fn top_products(dataset: &SalesDataset, n: usize) -> Vec<RankedRevenue> {
        let mut ranking = Self::revenue_by(dataset, |r| Some(r.product.as_str()));
        ranking.truncate(n);
        ranking
    }

    /// Revenue summed by region, descending.
    pub fn revenue_by_region(dataset: &SalesDataset) -> Vec<RankedRevenue> {
        Self::revenue_by(dataset, |r| Some(r.region.as_str()))
    }

    /// Revenue summed by category, descending.
    pub fn category_share(dataset: &SalesDataset) -> Vec<RankedRevenue> {
        Self::revenue_by(dataset, |r| Some(r.category.as_str()))
    }

    /// The `n` largest salespeople by summed revenue, descending. Empty
    /// when the dataset carries no salesperson column.
    pub fn revenue_by_salesperson(dataset: &SalesDataset, n: usize) -> Vec<RankedRevenue> {
        let mut ranking = Self::revenue_by(dataset, |r| r.salesperson.as_deref());
        ranking.truncate(n);
        ranking
    }

    /// Top products within one region.
    pub fn top_products_by_region(
        dataset: &SalesDataset,
        region: &str,
        n: usize,
    ) -> Vec<RankedRevenue> {
        Self::top_products(&dataset.filter_by_region(region), n)
    }

    /// Product × month revenue matrix, zero-filled for combinations with
    /// no sales. Products alphabetical, months chronological.
    pub fn monthly_pivot(dataset: &SalesDataset) -> RevenuePivot {
        let mut products: BTreeSet<&str> = BTreeSet::new();
        let mut months: BTreeSet<NaiveDate> = BTreeSet::new();
        let mut sums: BTreeMap<(&str, NaiveDate), f64> = BTreeMap::new();

        for record in &dataset.records {
            products.insert(record.product.as_str());
            months.insert(record.month);
            *sums.entry((record.product.as_str(), record.month)).or_insert(0.0) +=
                record.revenue.unwrap_or(0.0);
        }

        let months: Vec<NaiveDate> = months.into_iter().collect();
        let cells: Vec<Vec<f64>> = products
            .iter()
            .map(|product| {
                months
                    .iter()
                    .map(|month| sums.get(&(*product, *month)).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();

        RevenuePivot {
            products: products.into_iter().map(|p| p.to_string()).collect(),
            months,
            cells,
        }
    }

    /// Headline figures: total revenue, distinct order count (row count
    /// when no order identifiers exist), average order value, top product
    /// and top region. All zeros / `None` on an empty dataset.
    pub fn kpis(dataset: &SalesDataset) -> Kpis {
        let total_revenue = dataset.total_revenue();

        let total_orders = if dataset.has_order_ids() {
            let distinct: HashSet<&str> = dataset
                .records
                .iter()
                .filter_map(|r| r.order_id.as_deref())
                .collect();
            distinct.len()
        } else {
            dataset.len()
        };

        let avg_order_value = total_revenue / total_orders.max(1) as f64;

        let top_product = Self::top_products(dataset, 1).into_iter().next().map(|e| e.label);
        let top_region = Self::revenue_by_region(dataset)
            .into_iter()
            .next()
            .map(|e| e.label);

        Kpis {
            total_revenue,
            total_orders,
            avg_order_value,
            top_product,
            top_region,
        }
    }

    // ── Private ───────────────────────────────────────────────────────────

    /// Generic ranking driver: sum revenue per key, descending by value.
    ///
    /// Grouping through a `BTreeMap` gives ties a stable alphabetical
    /// order under the stable sort.
    fn revenue_by(
        dataset: &SalesDataset,
        key_fn: impl Fn(&SaleRecord) -> Option<&str>,
    ) -> Vec<RankedRevenue> {
        let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
        for record in &dataset.records {
            if let Some(key) = key_fn(record) {
                *sums.entry(key).or_insert(0.0) += record.revenue.unwrap_or(0.0);
            }
        }

        let mut ranking: Vec<RankedRevenue> = sums
            .into_iter()
            .map(|(label, revenue)| RankedRevenue {
                label: label.to_string(),
                revenue,
            })
            .collect();
        ranking.sort_by(|a, b| b.revenue.partial_cmp(&a.revenue).unwrap_or(Ordering::Equal));
        ranking
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
