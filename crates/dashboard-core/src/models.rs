use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Return the first calendar day of `date`'s month.
///
/// This is the canonical month key used by every time-grouped aggregate.
pub fn month_key(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// One cleaned sales transaction line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Order identifier; may repeat across line items of one order.
    /// `None` when the source data has no order column.
    #[serde(default)]
    pub order_id: Option<String>,
    /// Transaction date. Always valid: rows with unparseable dates never
    /// become records.
    pub date: NaiveDate,
    /// Product name as stated in the source.
    pub product: String,
    /// Product category as stated in the source.
    pub category: String,
    /// Unit price; `None` when the source value was not numeric.
    #[serde(default)]
    pub unit_price: Option<f64>,
    /// Quantity; `None` when the source value was not numeric.
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Line revenue after reconciliation. `None` when unit price or
    /// quantity is missing, never a fabricated number.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Sales region as stated in the source.
    pub region: String,
    /// Salesperson name, when the column exists.
    #[serde(default)]
    pub salesperson: Option<String>,
    /// Customer identifier, when the column exists.
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Calendar year derived from `date`.
    pub year: i32,
    /// First day of `date`'s month, the time-series grouping key.
    pub month: NaiveDate,
}

/// The cleaned, validated dataset. Immutable after ingestion; every
/// aggregate is a pure read over it or over a filtered copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesDataset {
    /// Records in source order (files concatenated in sorted path order).
    pub records: Vec<SaleRecord>,
}

impl SalesDataset {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all present line revenues.
    pub fn total_revenue(&self) -> f64 {
        self.records.iter().filter_map(|r| r.revenue).sum()
    }

    /// Whether any record carries an order identifier.
    pub fn has_order_ids(&self) -> bool {
        self.records.iter().any(|r| r.order_id.is_some())
    }

    /// Distinct month keys present in the dataset, ascending.
    pub fn distinct_months(&self) -> Vec<NaiveDate> {
        let mut months: Vec<NaiveDate> = self.records.iter().map(|r| r.month).collect();
        months.sort();
        months.dedup();
        months
    }

    /// Distinct calendar years present in the dataset, ascending.
    pub fn distinct_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// New dataset containing only records matching `keep`.
    pub fn filtered(&self, keep: impl Fn(&SaleRecord) -> bool) -> SalesDataset {
        SalesDataset {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// New dataset restricted to one calendar year.
    pub fn filter_by_year(&self, year: i32) -> SalesDataset {
        self.filtered(|r| r.year == year)
    }

    /// New dataset restricted to one region (exact match).
    pub fn filter_by_region(&self, region: &str) -> SalesDataset {
        self.filtered(|r| r.region == region)
    }
}

/// One point of the chronological monthly revenue series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    /// First day of the month.
    pub month: NaiveDate,
    /// Revenue summed over the month.
    pub revenue: f64,
}

/// One entry of a descending revenue ranking (product, region, category
/// or salesperson).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRevenue {
    pub label: String,
    pub revenue: f64,
}

/// Product × month revenue matrix, zero-filled for combinations with no
/// sales. Products are alphabetical, months chronological.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenuePivot {
    pub products: Vec<String>,
    pub months: Vec<NaiveDate>,
    /// `cells[p][m]` is the revenue of `products[p]` in `months[m]`.
    pub cells: Vec<Vec<f64>>,
}

impl RevenuePivot {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Headline aggregate figures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kpis {
    pub total_revenue: f64,
    /// Distinct order count, or the row count when no order identifiers
    /// exist.
    pub total_orders: usize,
    /// `total_revenue / max(total_orders, 1)`.
    pub avg_order_value: f64,
    pub top_product: Option<String>,
    pub top_region: Option<String>,
}

/// A structured, best-effort observation derived from the aggregates.
///
/// Carries facts only; sentence formatting belongs to the presentation
/// layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// The top product of the most recent month and its revenue change
    /// versus the prior month. `change_pct` is `None` when the prior-month
    /// revenue was exactly zero, in which case the percent figure is
    /// omitted from the rendered sentence.
    TopProductShift {
        month: NaiveDate,
        product: String,
        revenue: f64,
        change_pct: Option<f64>,
    },
    /// The region with the largest revenue total and its share of the
    /// overall total.
    DominantRegion {
        region: String,
        revenue: f64,
        share_pct: f64,
    },
    /// The product with the highest growth between the two most recent
    /// 3-month windows.
    FastestGrowingProduct { product: String, growth_pct: f64 },
    /// Total revenue change between the most recent year and the year
    /// immediately before it.
    YearOverYear {
        year: i32,
        previous_year: i32,
        change_pct: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_record(d: NaiveDate, product: &str, region: &str, revenue: Option<f64>) -> SaleRecord {
        SaleRecord {
            order_id: Some(format!("O-{product}-{d}")),
            date: d,
            product: product.to_string(),
            category: "Apparel".to_string(),
            unit_price: Some(10.0),
            quantity: Some(1.0),
            revenue,
            region: region.to_string(),
            salesperson: None,
            customer_id: None,
            year: d.year(),
            month: month_key(d),
        }
    }

    // ── month_key ─────────────────────────────────────────────────────────

    #[test]
    fn test_month_key_first_of_month() {
        assert_eq!(month_key(date(2024, 3, 17)), date(2024, 3, 1));
        assert_eq!(month_key(date(2024, 3, 1)), date(2024, 3, 1));
    }

    // ── SalesDataset ──────────────────────────────────────────────────────

    #[test]
    fn test_total_revenue_skips_missing() {
        let ds = SalesDataset::new(vec![
            make_record(date(2024, 1, 5), "A", "North", Some(100.0)),
            make_record(date(2024, 1, 6), "B", "North", None),
            make_record(date(2024, 2, 1), "A", "South", Some(50.5)),
        ]);
        assert!((ds.total_revenue() - 150.5).abs() < 1e-9);
    }

    #[test]
    fn test_distinct_months_sorted_and_deduped() {
        let ds = SalesDataset::new(vec![
            make_record(date(2024, 3, 5), "A", "North", Some(1.0)),
            make_record(date(2024, 1, 6), "B", "North", Some(1.0)),
            make_record(date(2024, 3, 20), "A", "South", Some(1.0)),
        ]);
        assert_eq!(ds.distinct_months(), vec![date(2024, 1, 1), date(2024, 3, 1)]);
    }

    #[test]
    fn test_distinct_years() {
        let ds = SalesDataset::new(vec![
            make_record(date(2024, 3, 5), "A", "North", Some(1.0)),
            make_record(date(2023, 1, 6), "B", "North", Some(1.0)),
        ]);
        assert_eq!(ds.distinct_years(), vec![2023, 2024]);
    }

    #[test]
    fn test_filter_by_year_and_region() {
        let ds = SalesDataset::new(vec![
            make_record(date(2024, 1, 5), "A", "North", Some(100.0)),
            make_record(date(2024, 1, 6), "B", "South", Some(20.0)),
            make_record(date(2023, 6, 1), "A", "North", Some(7.0)),
        ]);

        let by_year = ds.filter_by_year(2024);
        assert_eq!(by_year.len(), 2);

        let by_region = ds.filter_by_region("North");
        assert_eq!(by_region.len(), 2);
        assert!((by_region.total_revenue() - 107.0).abs() < 1e-9);
    }

    #[test]
    fn test_filter_on_empty_dataset() {
        let ds = SalesDataset::default();
        assert!(ds.filter_by_year(2024).is_empty());
        assert!(ds.filter_by_region("North").is_empty());
    }

    #[test]
    fn test_has_order_ids() {
        let mut ds = SalesDataset::new(vec![make_record(date(2024, 1, 5), "A", "North", None)]);
        assert!(ds.has_order_ids());
        ds.records[0].order_id = None;
        assert!(!ds.has_order_ids());
    }

    // ── Insight serde ─────────────────────────────────────────────────────

    #[test]
    fn test_insight_serializes_with_kind_tag() {
        let insight = Insight::DominantRegion {
            region: "North".to_string(),
            revenue: 1234.5,
            share_pct: 41.2,
        };
        let json = serde_json::to_string(&insight).unwrap();
        assert!(json.contains(r#""kind":"dominant_region""#));
        let back: Insight = serde_json::from_str(&json).unwrap();
        assert_eq!(back, insight);
    }

    #[test]
    fn test_kpis_roundtrip() {
        let kpis = Kpis {
            total_revenue: 99.5,
            total_orders: 3,
            avg_order_value: 33.17,
            top_product: Some("Alpha Hoodie".to_string()),
            top_region: None,
        };
        let json = serde_json::to_string(&kpis).unwrap();
        let back: Kpis = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_orders, 3);
        assert_eq!(back.top_product.as_deref(), Some("Alpha Hoodie"));
        assert!(back.top_region.is_none());
    }
}
