//! Calendar aggregation of date-stamped records

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::MoneyEntry;
use crate::types::EntryType;

/// `YYYY-MM` grouping key for a date
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Distinct month keys across all given dates, newest first
pub fn unique_months<I>(dates: I) -> Vec<String>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let set: BTreeSet<String> = dates.into_iter().map(month_key).collect();
    set.into_iter().rev().collect()
}

/// Month scope for dashboard views
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(String),
}

impl MonthFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(key) => month_key(date) == *key,
        }
    }
}

/// In/out/net totals for a single calendar date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub date: NaiveDate,
    #[serde(rename = "in")]
    pub inflow: Decimal,
    #[serde(rename = "out")]
    pub outflow: Decimal,
    pub net: Decimal,
}

/// Group money entries by exact date into in/out/net totals, newest first.
/// Entries on the same date are merged, never duplicated.
pub fn daily_totals(entries: &[MoneyEntry]) -> Vec<DailyTotal> {
    let mut by_date: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for e in entries {
        let slot = by_date.entry(e.date).or_default();
        match e.entry_type {
            EntryType::In => slot.0 += e.amount,
            EntryType::Out => slot.1 += e.amount,
        }
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, (inflow, outflow))| DailyTotal {
            date,
            inflow,
            outflow,
            net: inflow - outflow,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaidBy;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn entry(d: &str, entry_type: EntryType, amount: i64) -> MoneyEntry {
        MoneyEntry {
            id: format!("m-{}-{}", d, amount),
            date: date(d),
            entry_type,
            category: "Sales".into(),
            amount: Decimal::from(amount),
            paid_by: PaidBy::Cash,
            note: None,
        }
    }

    #[test]
    fn month_key_is_year_dash_month() {
        assert_eq!(month_key(date("2025-12-29")), "2025-12");
        assert_eq!(month_key(date("2026-01-05")), "2026-01");
    }

    #[test]
    fn unique_months_are_deduplicated_and_newest_first() {
        let months = unique_months(vec![
            date("2025-12-29"),
            date("2025-12-28"),
            date("2026-01-05"),
            date("2025-11-02"),
        ]);
        assert_eq!(months, vec!["2026-01", "2025-12", "2025-11"]);
    }

    #[test]
    fn month_filter_scopes_by_key() {
        let f = MonthFilter::Month("2025-12".into());
        assert!(f.matches(date("2025-12-01")));
        assert!(!f.matches(date("2026-01-01")));
        assert!(MonthFilter::All.matches(date("1999-07-04")));
    }

    #[test]
    fn daily_totals_merge_same_date_and_sort_newest_first() {
        let entries = vec![
            entry("2025-12-29", EntryType::Out, 45),
            entry("2025-12-29", EntryType::In, 520),
            entry("2025-12-28", EntryType::In, 460),
            entry("2025-12-29", EntryType::Out, 72),
        ];
        let totals = daily_totals(&entries);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].date, date("2025-12-29"));
        assert_eq!(totals[0].inflow, Decimal::from(520));
        assert_eq!(totals[0].outflow, Decimal::from(117));
        assert_eq!(totals[0].net, Decimal::from(403));
        assert_eq!(totals[1].date, date("2025-12-28"));
        assert_eq!(totals[1].net, Decimal::from(460));
    }

    #[test]
    fn daily_totals_of_empty_ledger_is_empty() {
        assert!(daily_totals(&[]).is_empty());
    }
}
