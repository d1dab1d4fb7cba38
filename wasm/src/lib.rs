//! WebAssembly module for the Cafe Ledger dashboard
//!
//! Provides client-side computation for:
//! - FIFO lot consumption previews
//! - Low-stock and low-sales alerts
//! - Daily ledger totals, daily profit and month lists
//! - Target-based expected weekly quantities
//!
//! All functions take and return JSON strings so the browser side stays a
//! plain `JSON.parse`/`JSON.stringify` boundary. Errors are built as plain
//! strings and only converted to `JsValue` in the exported wrappers, which
//! keeps every computation (including the error paths) testable on the
//! native target.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::metrics;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn bad_input(context: &str, err: impl std::fmt::Display) -> String {
    format!("Invalid {}: {}", context, err)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| bad_input("result", e))
}

/// Preview a FIFO draw against a lot queue (oldest first).
///
/// `lots_json` is an array of ingredient lots; returns the consumption
/// result: remaining lots, total cost and any shortage.
#[wasm_bindgen]
pub fn fifo_consume(lots_json: &str, qty_needed: &str) -> Result<String, JsValue> {
    try_fifo_consume(lots_json, qty_needed).map_err(|e| JsValue::from_str(&e))
}

fn try_fifo_consume(lots_json: &str, qty_needed: &str) -> Result<String, String> {
    let lots: Vec<IngredientLot> =
        serde_json::from_str(lots_json).map_err(|e| bad_input("lots JSON", e))?;
    let qty: Decimal = qty_needed.parse().map_err(|e| bad_input("quantity", e))?;

    to_json(&metrics::consume_lots_fifo(&lots, qty))
}

/// Compute low-stock and low-sales alerts.
///
/// Takes JSON arrays of products, ingredients and sales records plus
/// today's date (`YYYY-MM-DD`); returns the alert report.
#[wasm_bindgen]
pub fn compute_alerts(
    products_json: &str,
    ingredients_json: &str,
    sales_json: &str,
    today: &str,
) -> Result<String, JsValue> {
    try_compute_alerts(products_json, ingredients_json, sales_json, today)
        .map_err(|e| JsValue::from_str(&e))
}

fn try_compute_alerts(
    products_json: &str,
    ingredients_json: &str,
    sales_json: &str,
    today: &str,
) -> Result<String, String> {
    let products: Vec<Product> =
        serde_json::from_str(products_json).map_err(|e| bad_input("products JSON", e))?;
    let ingredients: Vec<Ingredient> =
        serde_json::from_str(ingredients_json).map_err(|e| bad_input("ingredients JSON", e))?;
    let sales: Vec<SalesRecord> =
        serde_json::from_str(sales_json).map_err(|e| bad_input("sales JSON", e))?;
    let today: NaiveDate = today.parse().map_err(|e| bad_input("date", e))?;

    to_json(&metrics::compute_alerts(&products, &ingredients, &sales, today))
}

/// Group ledger entries into per-day in/out/net totals, newest first
#[wasm_bindgen]
pub fn daily_totals(entries_json: &str) -> Result<String, JsValue> {
    try_daily_totals(entries_json).map_err(|e| JsValue::from_str(&e))
}

fn try_daily_totals(entries_json: &str) -> Result<String, String> {
    let entries: Vec<MoneyEntry> =
        serde_json::from_str(entries_json).map_err(|e| bad_input("entries JSON", e))?;

    to_json(&metrics::daily_totals(&entries))
}

/// Group sales records into a per-day revenue/COGS/profit report with
/// grand totals, newest first
#[wasm_bindgen]
pub fn profit_report(sales_json: &str) -> Result<String, JsValue> {
    try_profit_report(sales_json).map_err(|e| JsValue::from_str(&e))
}

fn try_profit_report(sales_json: &str) -> Result<String, String> {
    let sales: Vec<SalesRecord> =
        serde_json::from_str(sales_json).map_err(|e| bad_input("sales JSON", e))?;

    to_json(&metrics::profit_report(&sales))
}

/// Distinct `YYYY-MM` month keys of the given dates, newest first
#[wasm_bindgen]
pub fn unique_months(dates_json: &str) -> Result<String, JsValue> {
    try_unique_months(dates_json).map_err(|e| JsValue::from_str(&e))
}

fn try_unique_months(dates_json: &str) -> Result<String, String> {
    let dates: Vec<NaiveDate> =
        serde_json::from_str(dates_json).map_err(|e| bad_input("dates JSON", e))?;

    to_json(&metrics::unique_months(dates))
}

/// Expected weekly sales quantity for a product, derived from its targets
#[wasm_bindgen]
pub fn expected_weekly_qty(product_json: &str) -> Result<String, JsValue> {
    try_expected_weekly_qty(product_json).map_err(|e| JsValue::from_str(&e))
}

fn try_expected_weekly_qty(product_json: &str) -> Result<String, String> {
    let product: Product =
        serde_json::from_str(product_json).map_err(|e| bad_input("product JSON", e))?;

    Ok(product.expected_weekly_qty().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_consume() {
        let lots = r#"[
            {"id":"l1","ingredientId":"i7","date":"2025-12-20","qty":"5","unitCost":"2"},
            {"id":"l2","ingredientId":"i7","date":"2025-12-22","qty":"3","unitCost":"3"}
        ]"#;
        let result = try_fifo_consume(lots, "7").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["cost"], "16");
        assert_eq!(parsed["shortage"], "0");
        assert_eq!(parsed["lots"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_fifo_consume_rejects_bad_json() {
        let err = try_fifo_consume("not json", "1").unwrap_err();
        assert!(err.starts_with("Invalid lots JSON"));
        let err = try_fifo_consume("[]", "one").unwrap_err();
        assert!(err.starts_with("Invalid quantity"));
    }

    #[test]
    fn test_daily_totals() {
        let entries = r#"[
            {"id":"m1","date":"2025-12-29","type":"in","category":"Sales","amount":"520","paidBy":"cash"},
            {"id":"m2","date":"2025-12-29","type":"out","category":"Supplies","amount":"117","paidBy":"cash"}
        ]"#;
        let result = try_daily_totals(entries).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed[0]["net"], "403");
    }

    #[test]
    fn test_profit_report() {
        let sales = r#"[
            {"id":"s1","date":"2025-12-29","paidBy":"cash","lines":[],"revenue":"52","cogs":"12","profit":"40"},
            {"id":"s2","date":"2025-12-28","paidBy":"cash","lines":[],"revenue":"460","cogs":"180","profit":"280"}
        ]"#;
        let result = try_profit_report(sales).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["days"][0]["date"], "2025-12-29");
        assert_eq!(parsed["totalRevenue"], "512");
        assert_eq!(parsed["totalProfit"], "320");
    }

    #[test]
    fn test_unique_months() {
        let result = try_unique_months(r#"["2025-12-29","2026-01-03","2025-12-01"]"#).unwrap();
        assert_eq!(result, r#"["2026-01","2025-12"]"#);
    }

    #[test]
    fn test_expected_weekly_qty() {
        let product = r#"{"id":"p1","name":"Latte","category":"Coffee","price":"6","active":true,"targetDailyAvgQty":"4"}"#;
        assert_eq!(try_expected_weekly_qty(product).unwrap(), "28");
    }
}
