//! Validation helpers for dashboard inputs
//!
//! Plain checks shared by the sync client and the WASM bindings. Errors are
//! static strings; the caller wraps them into its own error type.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::SupplierInvoice;
use crate::types::InvoiceStatus;

/// Validate a monetary amount (zero allowed, negatives rejected)
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Validate a quantity that must be strictly positive
pub fn validate_positive_qty(qty: Decimal) -> Result<(), &'static str> {
    if qty <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate recipe line quantities (each must be strictly positive)
pub fn validate_recipe_lines(quantities: &[Decimal]) -> Result<(), &'static str> {
    if quantities.is_empty() {
        return Err("Recipe must have at least one line");
    }
    for q in quantities {
        if *q <= Decimal::ZERO {
            return Err("Recipe line quantity must be greater than zero");
        }
    }
    Ok(())
}

/// Validate supplier invoice amount consistency
pub fn validate_invoice(invoice: &SupplierInvoice) -> Result<(), &'static str> {
    validate_amount(invoice.amount)?;
    let paid = invoice.paid_amount.unwrap_or_default();
    if paid < Decimal::ZERO {
        return Err("Paid amount cannot be negative");
    }
    if paid > invoice.amount {
        return Err("Paid amount cannot exceed the invoice amount");
    }
    if invoice.status == InvoiceStatus::Paid && paid < invoice.amount {
        return Err("A paid invoice must be fully covered");
    }
    Ok(())
}

/// Parse an ISO `YYYY-MM-DD` date string
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| "Invalid date, expected YYYY-MM-DD")
}
