//! Low-stock and low-sales alert detection

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Ingredient, Product, SalesRecord};
use crate::types::Unit;

/// An active ingredient at or below its configured minimum stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LowStockAlert {
    pub ingredient_id: String,
    pub name: String,
    pub unit: Unit,
    pub stock_qty: Decimal,
    pub min_stock_qty: Decimal,
}

impl LowStockAlert {
    /// Negative or zero; the further below the threshold, the more severe
    pub fn deficit(&self) -> Decimal {
        self.stock_qty - self.min_stock_qty
    }
}

/// An active product selling below its expected weekly quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LowSalesAlert {
    pub product_id: String,
    pub name: String,
    pub sold_last_7_days: Decimal,
    pub expected_weekly: Decimal,
}

impl LowSalesAlert {
    pub fn shortfall(&self) -> Decimal {
        self.expected_weekly - self.sold_last_7_days
    }
}

/// Alert snapshot for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertReport {
    /// The most recent sales date, or today when no sales exist
    pub reference_date: NaiveDate,
    /// Most severe shortage first
    pub low_stock: Vec<LowStockAlert>,
    /// Worst shortfall first
    pub low_selling: Vec<LowSalesAlert>,
}

/// Most recent date present in the sales records, else `today`
pub fn reference_date(sales: &[SalesRecord], today: NaiveDate) -> NaiveDate {
    sales.iter().map(|s| s.date).max().unwrap_or(today)
}

/// Compute the alert report over immutable snapshots.
///
/// Low stock: active, minStockQty > 0 and stockQty <= minStockQty (threshold
/// inclusive), ascending by stockQty - minStockQty. Low selling: active,
/// expected weekly > 0 and units sold in the trailing 7 days (inclusive of
/// the reference date) below it, descending by shortfall.
pub fn compute_alerts(
    products: &[Product],
    ingredients: &[Ingredient],
    sales: &[SalesRecord],
    today: NaiveDate,
) -> AlertReport {
    let ref_date = reference_date(sales, today);
    let window_start = ref_date
        .checked_sub_days(Days::new(6))
        .unwrap_or(NaiveDate::MIN);

    let mut sold_7: HashMap<&str, Decimal> = HashMap::new();
    for record in sales {
        if record.date < window_start || record.date > ref_date {
            continue;
        }
        for line in &record.lines {
            *sold_7.entry(line.product_id.as_str()).or_default() += line.qty;
        }
    }

    let mut low_selling: Vec<LowSalesAlert> = products
        .iter()
        .filter(|p| p.active)
        .filter_map(|p| {
            let expected_weekly = p.expected_weekly_qty();
            if expected_weekly <= Decimal::ZERO {
                return None;
            }
            let sold = sold_7.get(p.id.as_str()).copied().unwrap_or_default();
            (sold < expected_weekly).then(|| LowSalesAlert {
                product_id: p.id.clone(),
                name: p.name.clone(),
                sold_last_7_days: sold,
                expected_weekly,
            })
        })
        .collect();
    low_selling.sort_by(|a, b| b.shortfall().cmp(&a.shortfall()));

    let mut low_stock: Vec<LowStockAlert> = ingredients
        .iter()
        .filter(|i| i.active)
        .filter_map(|i| {
            let min = i.min_stock();
            (min > Decimal::ZERO && i.stock_qty <= min).then(|| LowStockAlert {
                ingredient_id: i.id.clone(),
                name: i.name.clone(),
                unit: i.unit,
                stock_qty: i.stock_qty,
                min_stock_qty: min,
            })
        })
        .collect();
    low_stock.sort_by(|a, b| a.deficit().cmp(&b.deficit()));

    AlertReport {
        reference_date: ref_date,
        low_stock,
        low_selling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SaleLine;
    use crate::types::{CostingMethod, PaidBy, ProductCategory};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn product(id: &str, daily_target: i64) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {}", id),
            category: ProductCategory::Coffee,
            price: Decimal::from(6),
            active: true,
            image_url: None,
            target_daily_avg_qty: Some(Decimal::from(daily_target)),
            target_monthly_qty: None,
        }
    }

    fn ingredient(id: &str, stock: i64, min: i64) -> Ingredient {
        Ingredient {
            id: id.into(),
            name: format!("Ingredient {}", id),
            unit: Unit::Kg,
            stock_qty: Decimal::from(stock),
            cost_per_unit: Decimal::from(5),
            active: true,
            min_stock_qty: Some(Decimal::from(min)),
            costing_method: CostingMethod::Avg,
        }
    }

    fn sale(d: &str, product_id: &str, qty: i64) -> SalesRecord {
        SalesRecord {
            id: format!("sale-{}-{}", d, product_id),
            date: date(d),
            paid_by: PaidBy::Cash,
            lines: vec![SaleLine {
                product_id: product_id.into(),
                name: "x".into(),
                qty: Decimal::from(qty),
                unit_price: Decimal::from(6),
            }],
            revenue: Decimal::from(qty * 6),
            cogs: Decimal::ZERO,
            profit: Decimal::from(qty * 6),
        }
    }

    #[test]
    fn reference_date_is_latest_sale_or_today() {
        let today = date("2026-01-15");
        assert_eq!(reference_date(&[], today), today);
        let sales = vec![sale("2025-12-28", "p1", 1), sale("2025-12-29", "p1", 1)];
        assert_eq!(reference_date(&sales, today), date("2025-12-29"));
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let at_min = ingredient("i1", 2, 2);
        let above_min = ingredient("i2", 3, 2);
        let report = compute_alerts(&[], &[at_min, above_min], &[], date("2026-01-01"));

        assert_eq!(report.low_stock.len(), 1);
        assert_eq!(report.low_stock[0].ingredient_id, "i1");
    }

    #[test]
    fn disabled_or_inactive_ingredients_never_alert() {
        let mut disabled = ingredient("i1", 0, 0);
        disabled.min_stock_qty = None;
        let mut zero_min = ingredient("i2", 0, 0);
        zero_min.min_stock_qty = Some(Decimal::ZERO);
        let mut inactive = ingredient("i3", 0, 5);
        inactive.active = false;

        let report = compute_alerts(&[], &[disabled, zero_min, inactive], &[], date("2026-01-01"));
        assert!(report.low_stock.is_empty());
    }

    #[test]
    fn low_stock_sorted_most_severe_first() {
        let a = ingredient("a", 1, 8); // deficit -7
        let b = ingredient("b", 2, 3); // deficit -1
        let report = compute_alerts(&[], &[b, a], &[], date("2026-01-01"));

        let ids: Vec<_> = report.low_stock.iter().map(|x| x.ingredient_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn product_without_targets_is_never_flagged() {
        let mut p = product("p1", 0);
        p.target_daily_avg_qty = Some(Decimal::ZERO);
        p.target_monthly_qty = Some(Decimal::ZERO);
        let report = compute_alerts(&[p], &[], &[], date("2026-01-01"));
        assert!(report.low_selling.is_empty());
    }

    #[test]
    fn trailing_window_is_seven_days_inclusive() {
        // target 1/day => expected 7/week; 7 units sold exactly at the edges
        let p = product("p1", 1);
        let sales = vec![
            sale("2025-12-29", "p1", 4), // reference date
            sale("2025-12-23", "p1", 3), // oldest day still inside
            sale("2025-12-22", "p1", 50), // outside, ignored
        ];
        let report = compute_alerts(&[p], &[], &sales, date("2026-01-15"));

        assert_eq!(report.reference_date, date("2025-12-29"));
        // 4 + 3 = 7 which is not below expected 7
        assert!(report.low_selling.is_empty());
    }

    #[test]
    fn low_selling_sorted_by_worst_shortfall() {
        let p1 = product("p1", 2); // expected 14, sold 0 => shortfall 14
        let p2 = product("p2", 1); // expected 7, sold 5 => shortfall 2
        let sales = vec![sale("2025-12-29", "p2", 5)];
        let report = compute_alerts(&[p2, p1], &[], &sales, date("2026-01-15"));

        let ids: Vec<_> = report.low_selling.iter().map(|x| x.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        assert_eq!(report.low_selling[0].shortfall(), Decimal::from(14));
    }

    #[test]
    fn inactive_products_are_skipped() {
        let mut p = product("p1", 5);
        p.active = false;
        let report = compute_alerts(&[p], &[], &[], date("2026-01-01"));
        assert!(report.low_selling.is_empty());
    }
}
