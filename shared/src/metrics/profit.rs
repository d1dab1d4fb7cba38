//! Daily profit aggregation of sales records

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::SalesRecord;

/// Revenue, COGS and profit for a single calendar date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitByDay {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub profit: Decimal,
}

/// Daily profit rows plus grand totals over the whole input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitReport {
    pub days: Vec<ProfitByDay>,
    pub total_revenue: Decimal,
    pub total_cogs: Decimal,
    pub total_profit: Decimal,
}

/// Group sales records into per-day revenue/COGS/profit rows, newest first.
/// Records on the same date are merged; the totals cover every input row.
pub fn profit_report(records: &[SalesRecord]) -> ProfitReport {
    let mut by_date: BTreeMap<NaiveDate, (Decimal, Decimal, Decimal)> = BTreeMap::new();
    for record in records {
        let slot = by_date.entry(record.date).or_default();
        slot.0 += record.revenue;
        slot.1 += record.cogs;
        slot.2 += record.profit;
    }

    let days: Vec<ProfitByDay> = by_date
        .into_iter()
        .rev()
        .map(|(date, (revenue, cogs, profit))| ProfitByDay {
            date,
            revenue,
            cogs,
            profit,
        })
        .collect();

    ProfitReport {
        total_revenue: days.iter().map(|d| d.revenue).sum(),
        total_cogs: days.iter().map(|d| d.cogs).sum(),
        total_profit: days.iter().map(|d| d.profit).sum(),
        days,
    }
}
