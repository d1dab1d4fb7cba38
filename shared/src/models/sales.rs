//! Sales recording models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::PaidBy;

/// One line of a recorded sale, priced at time of sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    pub name: String,
    pub qty: Decimal,
    pub unit_price: Decimal,
}

/// A completed sale. Revenue, COGS and profit are computed by the backend
/// from the recipe and ingredient costs; the client only aggregates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub id: String,
    pub date: NaiveDate,
    pub paid_by: PaidBy,
    pub lines: Vec<SaleLine>,
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub profit: Decimal,
}

impl SalesRecord {
    /// Total units across all lines
    pub fn total_qty(&self) -> Decimal {
        self.lines.iter().map(|l| l.qty).sum()
    }
}
