//! Wire documents and request payloads for the business API
//!
//! The backend stores documents MongoDB-style: ids may arrive as `_id`,
//! legacy field spellings coexist with current ones and numeric fields may
//! be absent. The `Raw*` documents accept all of that and normalize into the
//! strict `shared` models; list elements are decoded one by one, and a
//! document that fails to decode or is missing its identity or date is
//! dropped (with a warning) rather than fabricated.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use shared::models::{
    Ingredient, IngredientLot, MoneyEntry, Product, RecipeLine, SaleLine, SalesRecord,
    StockMovement, SupplierInvoice,
};
use shared::types::{
    CostingMethod, EntryType, InvoiceStatus, PaidBy, ProductCategory, StockDirection, Unit,
};

/// Normalize a raw document list, dropping documents that fail to decode or
/// normalize. Each document is decoded on its own so one bad document (an
/// out-of-vocabulary enum value, a wrong field type) never takes the rest of
/// the collection down with it.
pub fn normalize_list<R, M>(raw: Vec<serde_json::Value>) -> Vec<M>
where
    R: DeserializeOwned + Normalize<Target = M>,
{
    let total = raw.len();
    let normalized: Vec<M> = raw
        .into_iter()
        .filter_map(|doc| match serde_json::from_value::<R>(doc) {
            Ok(document) => document.normalize(),
            Err(err) => {
                tracing::warn!(error = %err, "skipping undecodable document");
                None
            }
        })
        .collect();
    if normalized.len() < total {
        tracing::warn!(
            dropped = total - normalized.len(),
            "dropped malformed documents from API response"
        );
    }
    normalized
}

/// Conversion from a tolerant wire document into a strict model
pub trait Normalize {
    type Target;

    fn normalize(self) -> Option<Self::Target>;
}

/// Lenient payment-method parsing: the backend historically stored
/// `transfer` for bank payments, and unknown values default to cash
pub fn normalize_paid_by(value: Option<&str>) -> PaidBy {
    match value.map(|s| s.to_ascii_lowercase()).as_deref() {
        Some("bank") | Some("transfer") => PaidBy::Bank,
        Some("card") => PaidBy::Card,
        _ => PaidBy::Cash,
    }
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

// ============================================================================
// Raw documents (deserialization)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: ProductCategory,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub target_daily_avg_qty: Option<Decimal>,
    #[serde(default)]
    pub target_monthly_qty: Option<Decimal>,
}

impl Normalize for RawProduct {
    type Target = Product;

    fn normalize(self) -> Option<Product> {
        Some(Product {
            id: self.id.filter(|s| !s.is_empty())?,
            name: self.name,
            category: self.category,
            price: self.price,
            active: self.active,
            image_url: self.image_url,
            target_daily_avg_qty: self.target_daily_avg_qty,
            target_monthly_qty: self.target_monthly_qty,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIngredient {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_unit")]
    pub unit: Unit,
    #[serde(default)]
    pub stock_qty: Decimal,
    #[serde(default)]
    pub cost_per_unit: Decimal,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub min_stock_qty: Option<Decimal>,
    #[serde(default)]
    pub costing_method: CostingMethod,
}

impl Normalize for RawIngredient {
    type Target = Ingredient;

    fn normalize(self) -> Option<Ingredient> {
        Some(Ingredient {
            id: self.id.filter(|s| !s.is_empty())?,
            name: self.name,
            unit: self.unit,
            stock_qty: self.stock_qty,
            cost_per_unit: self.cost_per_unit,
            active: self.active,
            min_stock_qty: self.min_stock_qty,
            costing_method: self.costing_method,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIngredientLot {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub ingredient_id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub qty: Decimal,
    #[serde(default)]
    pub unit_cost: Decimal,
}

impl Normalize for RawIngredientLot {
    type Target = IngredientLot;

    fn normalize(self) -> Option<IngredientLot> {
        Some(IngredientLot {
            id: self.id.filter(|s| !s.is_empty())?,
            ingredient_id: self.ingredient_id,
            date: parse_date(self.date.as_deref())?,
            qty: self.qty,
            unit_cost: self.unit_cost,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipeLine {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub ingredient_id: String,
    #[serde(default)]
    pub qty_per_unit: Decimal,
}

impl Normalize for RawRecipeLine {
    type Target = RecipeLine;

    fn normalize(self) -> Option<RecipeLine> {
        Some(RecipeLine {
            id: self.id.filter(|s| !s.is_empty())?,
            product_id: self.product_id,
            ingredient_id: self.ingredient_id,
            qty_per_unit: self.qty_per_unit,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoneyEntry {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub paid_by: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Normalize for RawMoneyEntry {
    type Target = MoneyEntry;

    fn normalize(self) -> Option<MoneyEntry> {
        Some(MoneyEntry {
            id: self.id.filter(|s| !s.is_empty())?,
            date: parse_date(self.date.as_deref())?,
            entry_type: self.entry_type,
            category: self.category,
            amount: self.amount,
            paid_by: normalize_paid_by(self.paid_by.as_deref()),
            note: self.note.filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSupplierInvoice {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "supplierName")]
    pub supplier: String,
    #[serde(default, alias = "invoiceNumber")]
    pub invoice_no: String,
    #[serde(default, alias = "totalAmount")]
    pub amount: Decimal,
    #[serde(default)]
    pub paid_amount: Option<Decimal>,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Normalize for RawSupplierInvoice {
    type Target = SupplierInvoice;

    fn normalize(self) -> Option<SupplierInvoice> {
        Some(SupplierInvoice {
            id: self.id.filter(|s| !s.is_empty())?,
            supplier: self.supplier,
            invoice_no: self.invoice_no,
            date: parse_date(self.date.as_deref())?,
            due_date: parse_date(self.due_date.as_deref()),
            amount: self.amount,
            status: self.status,
            paid_amount: self.paid_amount,
            note: self.note.filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStockMovement {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub ingredient_id: String,
    pub direction: StockDirection,
    #[serde(default)]
    pub qty: Decimal,
    #[serde(default)]
    pub cost_total: Option<Decimal>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Normalize for RawStockMovement {
    type Target = StockMovement;

    fn normalize(self) -> Option<StockMovement> {
        Some(StockMovement {
            id: self.id.filter(|s| !s.is_empty())?,
            date: parse_date(self.date.as_deref())?,
            ingredient_id: self.ingredient_id,
            direction: self.direction,
            qty: self.qty,
            cost_total: self.cost_total,
            note: self.note.filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSaleLine {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub qty: Decimal,
    #[serde(default)]
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSalesRecord {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub paid_by: Option<String>,
    #[serde(default)]
    pub lines: Vec<RawSaleLine>,
    #[serde(default)]
    pub revenue: Decimal,
    #[serde(default)]
    pub cogs: Decimal,
    #[serde(default)]
    pub profit: Decimal,
}

impl Normalize for RawSalesRecord {
    type Target = SalesRecord;

    fn normalize(self) -> Option<SalesRecord> {
        Some(SalesRecord {
            id: self.id.filter(|s| !s.is_empty())?,
            date: parse_date(self.date.as_deref())?,
            paid_by: normalize_paid_by(self.paid_by.as_deref()),
            lines: self
                .lines
                .into_iter()
                .map(|l| SaleLine {
                    product_id: l.product_id,
                    name: l.name,
                    qty: l.qty,
                    unit_price: l.unit_price,
                })
                .collect(),
            revenue: self.revenue,
            cogs: self.cogs,
            profit: self.profit,
        })
    }
}

fn default_true() -> bool {
    true
}

fn default_unit() -> Unit {
    Unit::Pcs
}

// ============================================================================
// Request payloads (serialization)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: ProductCategory,
    pub price: Decimal,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_daily_avg_qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_monthly_qty: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_daily_avg_qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_monthly_qty: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRows<T: Serialize> {
    pub rows: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMoneyEntry {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    pub amount: Decimal,
    pub paid_by: PaidBy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyEntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_by: Option<PaidBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Create payload using the backend's field spellings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplierInvoice {
    pub date: NaiveDate,
    pub supplier_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub status: InvoiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInvoicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredient {
    pub name: String,
    pub unit: Unit,
    pub stock_qty: Decimal,
    pub cost_per_unit: Decimal,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock_qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costing_method: Option<CostingMethod>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_unit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock_qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costing_method: Option<CostingMethod>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeLineInput {
    pub ingredient_id: String,
    pub qty_per_unit: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecipeRequest {
    pub lines: Vec<RecipeLineInput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveStockRequest {
    pub date: NaiveDate,
    pub ingredient_id: String,
    pub qty: Decimal,
    pub cost_total: Decimal,
    pub paid_by: PaidBy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_expense_entry: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_cost_average: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockOutRequest {
    pub date: NaiveDate,
    pub ingredient_id: String,
    pub qty: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickSaleLine {
    pub product_id: String,
    pub qty: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickSaleRequest {
    pub date: NaiveDate,
    pub paid_by: PaidBy,
    pub lines: Vec<QuickSaleLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mongo_style_ids_are_accepted() {
        let raw: RawProduct = serde_json::from_str(
            r#"{"_id":"65f0c0ffee","name":"Espresso","category":"Coffee","price":6,"active":true}"#,
        )
        .unwrap();
        let product = raw.normalize().unwrap();
        assert_eq!(product.id, "65f0c0ffee");
        assert_eq!(product.price, Decimal::from(6));
    }

    #[test]
    fn documents_without_id_are_dropped() {
        let raw: Vec<serde_json::Value> = serde_json::from_str(
            r#"[{"name":"Orphan","category":"Other","price":1,"active":true},
                {"id":"p1","name":"Kept","category":"Drink","price":3,"active":true}]"#,
        )
        .unwrap();
        let products: Vec<Product> = normalize_list::<RawProduct, _>(raw);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "p1");
    }

    #[test]
    fn undecodable_document_does_not_take_down_the_collection() {
        // "income" is not a ledger entry type; only that document is lost
        let raw: Vec<serde_json::Value> = serde_json::from_str(
            r#"[{"id":"m1","date":"2025-12-29","type":"income","category":"Sales","amount":520},
                {"id":"m2","date":"2025-12-29","type":"out","category":"Milk","amount":45},
                {"id":"m3","date":"2025-12-30","type":"in","category":"Sales","amount":300}]"#,
        )
        .unwrap();
        let entries: Vec<MoneyEntry> = normalize_list::<RawMoneyEntry, _>(raw);
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m3"]);
    }

    #[test]
    fn legacy_transfer_payments_normalize_to_bank() {
        assert_eq!(normalize_paid_by(Some("transfer")), PaidBy::Bank);
        assert_eq!(normalize_paid_by(Some("BANK")), PaidBy::Bank);
        assert_eq!(normalize_paid_by(Some("card")), PaidBy::Card);
        assert_eq!(normalize_paid_by(Some("wire")), PaidBy::Cash);
        assert_eq!(normalize_paid_by(None), PaidBy::Cash);
    }

    #[test]
    fn invoice_accepts_legacy_field_spellings() {
        let raw: RawSupplierInvoice = serde_json::from_str(
            r#"{"_id":"s9","date":"2025-12-28","supplierName":"Bakery Al Noor",
                "invoiceNumber":"SUP-BAN-2304","totalAmount":410,"paidAmount":200,
                "status":"partial"}"#,
        )
        .unwrap();
        let invoice = raw.normalize().unwrap();
        assert_eq!(invoice.supplier, "Bakery Al Noor");
        assert_eq!(invoice.invoice_no, "SUP-BAN-2304");
        assert_eq!(invoice.amount, Decimal::from(410));
        assert_eq!(invoice.paid_amount, Some(Decimal::from(200)));
        assert_eq!(invoice.due_date, None);
        assert_eq!(invoice.status, InvoiceStatus::Partial);
    }

    #[test]
    fn entry_with_invalid_date_is_dropped() {
        let raw: Vec<serde_json::Value> = serde_json::from_str(
            r#"[{"id":"m1","date":"not-a-date","type":"in","category":"Sales","amount":10},
                {"id":"m2","date":"2025-12-29","type":"out","category":"Milk","amount":45,"paidBy":"transfer"}]"#,
        )
        .unwrap();
        let entries: Vec<MoneyEntry> = normalize_list::<RawMoneyEntry, _>(raw);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "m2");
        assert_eq!(entries[0].paid_by, PaidBy::Bank);
    }

    #[test]
    fn sale_lines_default_when_absent() {
        let raw: RawSalesRecord = serde_json::from_str(
            r#"{"id":"sale1","date":"2025-12-29","paidBy":"cash","revenue":52,"cogs":12,"profit":40}"#,
        )
        .unwrap();
        let sale = raw.normalize().unwrap();
        assert!(sale.lines.is_empty());
        assert_eq!(sale.profit, Decimal::from(40));
    }

    #[test]
    fn patch_serialization_skips_unset_fields() {
        let patch = ProductPatch {
            price: Some(Decimal::from(7)),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"price":"7"}"#);
    }
}
