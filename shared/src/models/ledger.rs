//! Money ledger models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{EntryType, PaidBy};

/// One entry in the money ledger (cash in / cash out)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    pub amount: Decimal,
    pub paid_by: PaidBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MoneyEntry {
    /// Signed amount: inflow positive, outflow negative
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::In => self.amount,
            EntryType::Out => -self.amount,
        }
    }
}
