//! Recipe (bill-of-materials) models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ingredient requirement of a product's recipe, in the ingredient's unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeLine {
    pub id: String,
    pub product_id: String,
    pub ingredient_id: String,
    pub qty_per_unit: Decimal,
}
