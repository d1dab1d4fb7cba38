//! Ingredient and inventory models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CostingMethod, StockDirection, Unit};

/// A raw material tracked in inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub unit: Unit,
    pub stock_qty: Decimal,
    /// Cost per unit; the running average for avg costing, a hint for FIFO
    pub cost_per_unit: Decimal,
    pub active: bool,
    /// Alert when stock drops to this level or below (0/absent disables)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock_qty: Option<Decimal>,
    #[serde(default)]
    pub costing_method: CostingMethod,
}

impl Ingredient {
    /// Low-stock threshold, zero when alerting is disabled
    pub fn min_stock(&self) -> Decimal {
        self.min_stock_qty.unwrap_or_default()
    }
}

/// One FIFO purchase batch for an ingredient.
///
/// Lots are ordered oldest-first and consumed front-to-back. A lot is
/// immutable once created except for the quantity decrement on consumption;
/// a fully depleted lot leaves the queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLot {
    pub id: String,
    pub ingredient_id: String,
    pub date: NaiveDate,
    pub qty: Decimal,
    pub unit_cost: Decimal,
}

/// A recorded inventory movement (receiving, adjustment, spoilage)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: String,
    pub date: NaiveDate,
    pub ingredient_id: String,
    pub direction: StockDirection,
    pub qty: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
