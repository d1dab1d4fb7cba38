//! Supplier invoice models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::InvoiceStatus;

/// An invoice received from a supplier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInvoice {
    pub id: String,
    pub supplier: String,
    pub invoice_no: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    /// Amount settled so far, set when status is partial/paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SupplierInvoice {
    /// Unsettled remainder, never negative
    pub fn outstanding(&self) -> Decimal {
        let paid = self.paid_amount.unwrap_or_default();
        if paid >= self.amount {
            Decimal::ZERO
        } else {
            self.amount - paid
        }
    }

    /// Whether the invoice is past due and not fully settled
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => self.status != InvoiceStatus::Paid && due < today,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(amount: i64, paid: Option<i64>, status: InvoiceStatus) -> SupplierInvoice {
        SupplierInvoice {
            id: "s1".into(),
            supplier: "Tripoli Dairy Co.".into(),
            invoice_no: "SUP-TRD-8891".into(),
            date: NaiveDate::from_ymd_opt(2025, 12, 29).unwrap(),
            due_date: Some(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()),
            amount: Decimal::from(amount),
            status,
            paid_amount: paid.map(Decimal::from),
            note: None,
        }
    }

    #[test]
    fn outstanding_subtracts_paid_amount() {
        assert_eq!(
            invoice(410, Some(200), InvoiceStatus::Partial).outstanding(),
            Decimal::from(210)
        );
        assert_eq!(invoice(320, None, InvoiceStatus::Unpaid).outstanding(), Decimal::from(320));
        assert_eq!(invoice(980, Some(980), InvoiceStatus::Paid).outstanding(), Decimal::ZERO);
    }

    #[test]
    fn overdue_only_when_unsettled_and_past_due() {
        let inv = invoice(320, None, InvoiceStatus::Unpaid);
        assert!(inv.is_overdue(NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()));
        assert!(!inv.is_overdue(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()));
        let paid = invoice(980, Some(980), InvoiceStatus::Paid);
        assert!(!paid.is_overdue(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    }
}
