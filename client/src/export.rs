//! CSV export of dashboard collections
//!
//! Each exporter flattens a collection into serializable rows and writes
//! them through a `csv::Writer`. The header row is written explicitly so an
//! empty collection still exports a well-formed file. Exports read the
//! snapshot only; nothing here talks to the API.

use rust_decimal::Decimal;
use serde::Serialize;

use shared::metrics::{DailyTotal, ProfitReport};
use shared::models::{Ingredient, MoneyEntry, Product, SalesRecord, SupplierInvoice};

use crate::error::{ClientError, ClientResult};

const ENTRY_HEADERS: &[&str] = &["date", "type", "category", "amount", "paidBy", "note"];
const DAILY_TOTAL_HEADERS: &[&str] = &["date", "in", "out", "net"];
const INVOICE_HEADERS: &[&str] = &[
    "date",
    "supplierName",
    "invoiceNumber",
    "totalAmount",
    "status",
    "outstanding",
    "note",
];
const PRODUCT_HEADERS: &[&str] = &[
    "name",
    "category",
    "price",
    "active",
    "targetDailyAvgQty",
    "targetMonthlyQty",
];
const INGREDIENT_HEADERS: &[&str] = &[
    "name",
    "unit",
    "stockQty",
    "costPerUnit",
    "active",
    "minStockQty",
];
const SALE_HEADERS: &[&str] = &["date", "paidBy", "items", "qty", "revenue", "cogs", "profit"];
const PROFIT_HEADERS: &[&str] = &["date", "revenue", "cogs", "profit"];

#[derive(Serialize)]
struct EntryRow<'a> {
    date: String,
    entry_type: &'static str,
    category: &'a str,
    amount: Decimal,
    paid_by: &'static str,
    note: &'a str,
}

#[derive(Serialize)]
struct DailyTotalRow {
    date: String,
    inflow: Decimal,
    outflow: Decimal,
    net: Decimal,
}

#[derive(Serialize)]
struct InvoiceRow<'a> {
    date: String,
    supplier: &'a str,
    invoice_no: &'a str,
    amount: Decimal,
    status: String,
    outstanding: Decimal,
    note: &'a str,
}

#[derive(Serialize)]
struct ProductRow<'a> {
    name: &'a str,
    category: String,
    price: Decimal,
    active: bool,
    target_daily_avg_qty: Option<Decimal>,
    target_monthly_qty: Option<Decimal>,
}

#[derive(Serialize)]
struct IngredientRow<'a> {
    name: &'a str,
    unit: String,
    stock_qty: Decimal,
    cost_per_unit: Decimal,
    active: bool,
    min_stock_qty: Option<Decimal>,
}

#[derive(Serialize)]
struct SaleRow {
    date: String,
    paid_by: &'static str,
    items: String,
    qty: Decimal,
    revenue: Decimal,
    cogs: Decimal,
    profit: Decimal,
}

#[derive(Serialize)]
struct ProfitRow {
    date: String,
    revenue: Decimal,
    cogs: Decimal,
    profit: Decimal,
}

pub fn entries_csv(entries: &[MoneyEntry]) -> ClientResult<String> {
    let rows = entries.iter().map(|e| EntryRow {
        date: e.date.to_string(),
        entry_type: match e.entry_type {
            shared::types::EntryType::In => "in",
            shared::types::EntryType::Out => "out",
        },
        category: &e.category,
        amount: e.amount,
        paid_by: e.paid_by.as_str(),
        note: e.note.as_deref().unwrap_or(""),
    });
    write_csv(ENTRY_HEADERS, rows)
}

pub fn daily_totals_csv(totals: &[DailyTotal]) -> ClientResult<String> {
    let rows = totals.iter().map(|t| DailyTotalRow {
        date: t.date.to_string(),
        inflow: t.inflow,
        outflow: t.outflow,
        net: t.net,
    });
    write_csv(DAILY_TOTAL_HEADERS, rows)
}

pub fn supplier_invoices_csv(invoices: &[SupplierInvoice]) -> ClientResult<String> {
    let rows = invoices.iter().map(|s| InvoiceRow {
        date: s.date.to_string(),
        supplier: &s.supplier,
        invoice_no: &s.invoice_no,
        amount: s.amount,
        status: s.status.to_string(),
        outstanding: s.outstanding(),
        note: s.note.as_deref().unwrap_or(""),
    });
    write_csv(INVOICE_HEADERS, rows)
}

pub fn products_csv(products: &[Product]) -> ClientResult<String> {
    let rows = products.iter().map(|p| ProductRow {
        name: &p.name,
        category: p.category.to_string(),
        price: p.price,
        active: p.active,
        target_daily_avg_qty: p.target_daily_avg_qty,
        target_monthly_qty: p.target_monthly_qty,
    });
    write_csv(PRODUCT_HEADERS, rows)
}

pub fn ingredients_csv(ingredients: &[Ingredient]) -> ClientResult<String> {
    let rows = ingredients.iter().map(|i| IngredientRow {
        name: &i.name,
        unit: i.unit.to_string(),
        stock_qty: i.stock_qty,
        cost_per_unit: i.cost_per_unit,
        active: i.active,
        min_stock_qty: i.min_stock_qty,
    });
    write_csv(INGREDIENT_HEADERS, rows)
}

pub fn sales_csv(records: &[SalesRecord]) -> ClientResult<String> {
    let rows = records.iter().map(|s| SaleRow {
        date: s.date.to_string(),
        paid_by: s.paid_by.as_str(),
        items: s
            .lines
            .iter()
            .map(|l| format!("{} x{}", l.name, l.qty))
            .collect::<Vec<_>>()
            .join("; "),
        qty: s.total_qty(),
        revenue: s.revenue,
        cogs: s.cogs,
        profit: s.profit,
    });
    write_csv(SALE_HEADERS, rows)
}

/// Daily profit rows followed by a grand-total row
pub fn profit_csv(report: &ProfitReport) -> ClientResult<String> {
    let rows = report
        .days
        .iter()
        .map(|d| ProfitRow {
            date: d.date.to_string(),
            revenue: d.revenue,
            cogs: d.cogs,
            profit: d.profit,
        })
        .chain(std::iter::once(ProfitRow {
            date: "total".to_string(),
            revenue: report.total_revenue,
            cogs: report.total_cogs,
            profit: report.total_profit,
        }));
    write_csv(PROFIT_HEADERS, rows)
}

fn write_csv<R, I>(headers: &[&str], rows: I) -> ClientResult<String>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);
    writer
        .write_record(headers)
        .map_err(|e| ClientError::Export(e.to_string()))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ClientError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ClientError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ClientError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::metrics::profit_report;
    use shared::types::{EntryType, InvoiceStatus, PaidBy};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn entries_export_uses_wire_headers() {
        let entries = vec![MoneyEntry {
            id: "m1".into(),
            date: date("2025-12-29"),
            entry_type: EntryType::Out,
            category: "Rent".into(),
            amount: Decimal::from(750),
            paid_by: PaidBy::Bank,
            note: Some("December".into()),
        }];
        let csv = entries_csv(&entries).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "date,type,category,amount,paidBy,note");
        assert_eq!(lines.next().unwrap(), "2025-12-29,out,Rent,750,bank,December");
    }

    #[test]
    fn invoice_export_includes_outstanding() {
        let invoices = vec![SupplierInvoice {
            id: "s1".into(),
            supplier: "Tripoli Dairy Co.".into(),
            invoice_no: "SUP-TRD-8891".into(),
            date: date("2025-12-29"),
            due_date: None,
            amount: Decimal::from(410),
            status: InvoiceStatus::Partial,
            paid_amount: Some(Decimal::from(200)),
            note: None,
        }];
        let csv = supplier_invoices_csv(&invoices).unwrap();
        assert!(csv.contains("supplierName,invoiceNumber,totalAmount"));
        assert!(csv.contains(",210,"));
    }

    #[test]
    fn empty_collection_still_exports_the_header_row() {
        assert_eq!(entries_csv(&[]).unwrap(), "date,type,category,amount,paidBy,note\n");
        assert_eq!(products_csv(&[]).unwrap().lines().count(), 1);
    }

    #[test]
    fn profit_export_ends_with_the_total_row() {
        let records = vec![
            SalesRecord {
                id: "s1".into(),
                date: date("2025-12-29"),
                paid_by: PaidBy::Cash,
                lines: vec![],
                revenue: Decimal::from(52),
                cogs: Decimal::from(12),
                profit: Decimal::from(40),
            },
            SalesRecord {
                id: "s2".into(),
                date: date("2025-12-28"),
                paid_by: PaidBy::Cash,
                lines: vec![],
                revenue: Decimal::from(460),
                cogs: Decimal::from(180),
                profit: Decimal::from(280),
            },
        ];
        let csv = profit_csv(&profit_report(&records)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,revenue,cogs,profit");
        assert_eq!(lines[1], "2025-12-29,52,12,40");
        assert_eq!(lines[3], "total,512,192,320");
    }
}
