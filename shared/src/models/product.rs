//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductCategory;

/// A sellable menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: ProductCategory,
    pub price: Decimal,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Expected average quantity sold per day (0/absent disables the alert)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_daily_avg_qty: Option<Decimal>,
    /// Expected total quantity sold per month (0/absent disables the alert)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_monthly_qty: Option<Decimal>,
}

impl Product {
    /// Expected weekly quantity derived from the configured targets.
    ///
    /// The daily target wins when both are set; the monthly target is scaled
    /// by 7/30. Zero means alerting is disabled for this product.
    pub fn expected_weekly_qty(&self) -> Decimal {
        let daily = self.target_daily_avg_qty.unwrap_or_default();
        if daily > Decimal::ZERO {
            return daily * Decimal::from(7);
        }
        let monthly = self.target_monthly_qty.unwrap_or_default();
        if monthly > Decimal::ZERO {
            return monthly / Decimal::from(30) * Decimal::from(7);
        }
        Decimal::ZERO
    }
}
