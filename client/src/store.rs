//! Dashboard state container
//!
//! `Store` holds an in-memory snapshot of every collection the dashboard
//! shows and proxies all mutations to the business API. Updates are
//! unidirectional: an action validates its input, issues exactly one HTTP
//! request, and only merges the response (or re-fetches the affected
//! collections) after the request succeeded. A failed request leaves the
//! snapshot untouched.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use shared::metrics::{
    compute_alerts, consume_lots_fifo, daily_totals, unique_months, AlertReport, DailyTotal,
    FifoConsumption, MonthFilter, ProfitReport,
};
use shared::models::{
    Ingredient, IngredientLot, MoneyEntry, Product, RecipeLine, SalesRecord, StockMovement,
    SupplierInvoice,
};
use shared::types::InvoiceStatus;
use shared::validation;

use crate::api::dto::{
    self, AdjustStockOutRequest, ImportRows, IngredientPatch, MoneyEntryPatch, NewIngredient,
    NewMoneyEntry, NewProduct, NewSupplierInvoice, Normalize, ProductPatch, QuickSaleRequest,
    RawIngredient, RawMoneyEntry, RawProduct, RawRecipeLine, RawSalesRecord, RawStockMovement,
    RawSupplierInvoice, ReceiveStockRequest, RecipeLineInput, SetRecipeRequest,
    SupplierInvoicePatch,
};
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};

/// Immutable snapshot of the dashboard data
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub entries: Vec<MoneyEntry>,
    pub supplier_invoices: Vec<SupplierInvoice>,
    pub products: Vec<Product>,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<RecipeLine>,
    pub sales_records: Vec<SalesRecord>,
    pub stock_movements: Vec<StockMovement>,
    /// FIFO lots per ingredient id, oldest first
    pub ingredient_lots: HashMap<String, Vec<IngredientLot>>,
    pub month: MonthFilter,
}

impl AppState {
    /// Distinct months across all dated collections, newest first
    pub fn months(&self) -> Vec<String> {
        let dates = self
            .entries
            .iter()
            .map(|e| e.date)
            .chain(self.supplier_invoices.iter().map(|s| s.date))
            .chain(self.sales_records.iter().map(|s| s.date))
            .chain(self.stock_movements.iter().map(|m| m.date));
        unique_months(dates)
    }

    /// Ledger entries within the selected month
    pub fn visible_entries(&self) -> Vec<&MoneyEntry> {
        self.entries
            .iter()
            .filter(|e| self.month.matches(e.date))
            .collect()
    }

    /// Daily in/out/net totals for the selected month, newest first
    pub fn daily_totals(&self) -> Vec<DailyTotal> {
        let visible: Vec<MoneyEntry> = self
            .entries
            .iter()
            .filter(|e| self.month.matches(e.date))
            .cloned()
            .collect();
        daily_totals(&visible)
    }

    /// Daily revenue/COGS/profit with grand totals for the selected month,
    /// newest first
    pub fn profit_report(&self) -> ProfitReport {
        let visible: Vec<SalesRecord> = self
            .sales_records
            .iter()
            .filter(|s| self.month.matches(s.date))
            .cloned()
            .collect();
        shared::metrics::profit_report(&visible)
    }

    /// Low-stock and low-sales alerts over the full snapshot
    pub fn alerts(&self, today: NaiveDate) -> AlertReport {
        compute_alerts(
            &self.products,
            &self.ingredients,
            &self.sales_records,
            today,
        )
    }

    /// Read-only FIFO consumption preview against the cached lots.
    ///
    /// Stock mutations are performed by the backend; this never changes the
    /// snapshot, it only shows what a FIFO draw of `qty` would cost and
    /// whether the cached lots cover it. `None` when no lots are cached for
    /// the ingredient.
    pub fn fifo_preview(&self, ingredient_id: &str, qty: Decimal) -> Option<FifoConsumption> {
        self.ingredient_lots
            .get(ingredient_id)
            .map(|lots| consume_lots_fifo(lots, qty))
    }
}

/// State container proxying all mutations to the business API
#[derive(Debug)]
pub struct Store {
    api: ApiClient,
    state: AppState,
}

impl Store {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    // --- Session ---

    /// Authenticate against the API; the snapshot stays empty until
    /// `load_all` is called
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<String> {
        let response = self.api.login(email, password).await?;
        let who = response
            .user
            .and_then(|u| u.email)
            .unwrap_or_else(|| email.to_string());
        tracing::info!(email = %who, "logged in");
        Ok(who)
    }

    /// Drop the token and clear the snapshot
    pub fn logout(&mut self) {
        self.api.clear_token();
        self.state = AppState::default();
    }

    /// Fetch every collection. A failing collection degrades to empty so a
    /// partially available backend still yields a usable dashboard.
    pub async fn load_all(&mut self) -> ClientResult<()> {
        if !self.api.has_token() {
            return Err(ClientError::NotAuthenticated);
        }

        self.state.products = self.fetch_list::<RawProduct, _>("/products").await;
        self.state.ingredients = self.fetch_list::<RawIngredient, _>("/ingredients").await;
        self.state.recipes = self.fetch_list::<RawRecipeLine, _>("/recipes").await;
        self.state.entries = self.fetch_list::<RawMoneyEntry, _>("/entries").await;
        self.state.supplier_invoices = self
            .fetch_list::<RawSupplierInvoice, _>("/supplier-invoices")
            .await;
        self.state.stock_movements = self
            .fetch_list::<RawStockMovement, _>("/inventory/movements")
            .await;
        self.state.sales_records = self.fetch_list::<RawSalesRecord, _>("/sales").await;
        Ok(())
    }

    pub fn set_month(&mut self, month: MonthFilter) {
        self.state.month = month;
    }

    // --- Products ---

    pub async fn add_product(&mut self, product: NewProduct) -> ClientResult<Product> {
        validation::validate_amount(product.price)?;
        let raw: RawProduct = self.api.post("/products", &product).await?;
        let created = normalize_one(raw)?;
        self.state.products.insert(0, created.clone());
        Ok(created)
    }

    pub async fn update_product(&mut self, id: &str, patch: ProductPatch) -> ClientResult<Product> {
        let raw: RawProduct = self.api.patch(&format!("/products/{}", id), &patch).await?;
        let updated = normalize_one(raw)?;
        replace_by_id(&mut self.state.products, id, updated.clone(), |p| &p.id);
        Ok(updated)
    }

    /// Delete a product and prune its recipe lines from the snapshot
    pub async fn delete_product(&mut self, id: &str) -> ClientResult<()> {
        self.api.delete(&format!("/products/{}", id)).await?;
        self.state.products.retain(|p| p.id != id);
        self.state.recipes.retain(|r| r.product_id != id);
        Ok(())
    }

    pub async fn upload_product_image(
        &mut self,
        id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<Product> {
        let raw: RawProduct = self
            .api
            .upload(&format!("/products/{}/image", id), filename, bytes)
            .await?;
        let updated = normalize_one(raw)?;
        replace_by_id(&mut self.state.products, id, updated.clone(), |p| &p.id);
        Ok(updated)
    }

    pub async fn import_products(&mut self, rows: Vec<NewProduct>) -> ClientResult<usize> {
        let count = rows.len();
        let _: serde_json::Value = self
            .api
            .post("/products/import", &ImportRows { rows })
            .await?;
        self.state.products = self.fetch_list::<RawProduct, _>("/products").await;
        Ok(count)
    }

    // --- Recipes ---

    /// Replace the full recipe of one product
    pub async fn set_recipe_for_product(
        &mut self,
        product_id: &str,
        lines: Vec<RecipeLineInput>,
    ) -> ClientResult<usize> {
        let quantities: Vec<Decimal> = lines.iter().map(|l| l.qty_per_unit).collect();
        validation::validate_recipe_lines(&quantities)?;

        let raw: Vec<serde_json::Value> = self
            .api
            .put(&format!("/recipes/{}", product_id), &SetRecipeRequest { lines })
            .await?;
        let mapped = dto::normalize_list::<RawRecipeLine, _>(raw);
        let count = mapped.len();

        self.state.recipes.retain(|r| r.product_id != product_id);
        self.state.recipes.splice(0..0, mapped);
        Ok(count)
    }

    pub async fn import_recipes_file(&mut self, filename: &str, bytes: Vec<u8>) -> ClientResult<()> {
        let _: serde_json::Value = self.api.upload("/recipes/import", filename, bytes).await?;
        self.state.recipes = self.fetch_list::<RawRecipeLine, _>("/recipes").await;
        Ok(())
    }

    // --- Money ledger ---

    pub async fn add_entry(&mut self, entry: NewMoneyEntry) -> ClientResult<MoneyEntry> {
        validation::validate_amount(entry.amount)?;
        let raw: RawMoneyEntry = self.api.post("/entries", &entry).await?;
        let created = normalize_one(raw)?;
        self.state.entries.insert(0, created.clone());
        Ok(created)
    }

    pub async fn update_entry(
        &mut self,
        id: &str,
        patch: MoneyEntryPatch,
    ) -> ClientResult<MoneyEntry> {
        if let Some(amount) = patch.amount {
            validation::validate_amount(amount)?;
        }
        let raw: RawMoneyEntry = self.api.patch(&format!("/entries/{}", id), &patch).await?;
        let updated = normalize_one(raw)?;
        replace_by_id(&mut self.state.entries, id, updated.clone(), |e| &e.id);
        Ok(updated)
    }

    pub async fn delete_entry(&mut self, id: &str) -> ClientResult<()> {
        self.api.delete(&format!("/entries/{}", id)).await?;
        self.state.entries.retain(|e| e.id != id);
        Ok(())
    }

    pub async fn import_entries_file(&mut self, filename: &str, bytes: Vec<u8>) -> ClientResult<()> {
        let _: serde_json::Value = self.api.upload("/entries/import", filename, bytes).await?;
        self.state.entries = self.fetch_list::<RawMoneyEntry, _>("/entries").await;
        Ok(())
    }

    // --- Supplier invoices ---

    pub async fn add_supplier_invoice(
        &mut self,
        invoice: NewSupplierInvoice,
    ) -> ClientResult<SupplierInvoice> {
        validation::validate_amount(invoice.total_amount)?;
        validation::validate_amount(invoice.paid_amount)?;
        if invoice.paid_amount > invoice.total_amount {
            return Err("Paid amount cannot exceed the invoice amount".into());
        }
        let raw: RawSupplierInvoice = self.api.post("/supplier-invoices", &invoice).await?;
        let created = normalize_one(raw)?;
        self.state.supplier_invoices.insert(0, created.clone());
        Ok(created)
    }

    pub async fn update_supplier_invoice(
        &mut self,
        id: &str,
        patch: SupplierInvoicePatch,
    ) -> ClientResult<SupplierInvoice> {
        let raw: RawSupplierInvoice = self
            .api
            .patch(&format!("/supplier-invoices/{}", id), &patch)
            .await?;
        let updated = normalize_one(raw)?;
        replace_by_id(&mut self.state.supplier_invoices, id, updated.clone(), |s| &s.id);
        Ok(updated)
    }

    pub async fn delete_supplier_invoice(&mut self, id: &str) -> ClientResult<()> {
        self.api.delete(&format!("/supplier-invoices/{}", id)).await?;
        self.state.supplier_invoices.retain(|s| s.id != id);
        Ok(())
    }

    /// Status-only shortcut over the PATCH endpoint
    pub async fn set_supplier_status(
        &mut self,
        id: &str,
        status: InvoiceStatus,
    ) -> ClientResult<SupplierInvoice> {
        self.update_supplier_invoice(
            id,
            SupplierInvoicePatch {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn import_supplier_invoices_file(
        &mut self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<()> {
        let _: serde_json::Value = self
            .api
            .upload("/supplier-invoices/import", filename, bytes)
            .await?;
        self.state.supplier_invoices = self
            .fetch_list::<RawSupplierInvoice, _>("/supplier-invoices")
            .await;
        Ok(())
    }

    // --- Ingredients ---

    pub async fn add_ingredient(&mut self, ingredient: NewIngredient) -> ClientResult<Ingredient> {
        validation::validate_amount(ingredient.stock_qty)?;
        validation::validate_amount(ingredient.cost_per_unit)?;
        let raw: RawIngredient = self.api.post("/ingredients", &ingredient).await?;
        let created = normalize_one(raw)?;
        self.state.ingredients.insert(0, created.clone());
        Ok(created)
    }

    pub async fn update_ingredient(
        &mut self,
        id: &str,
        patch: IngredientPatch,
    ) -> ClientResult<Ingredient> {
        let raw: RawIngredient = self.api.patch(&format!("/ingredients/{}", id), &patch).await?;
        let updated = normalize_one(raw)?;
        replace_by_id(&mut self.state.ingredients, id, updated.clone(), |i| &i.id);
        Ok(updated)
    }

    /// Delete an ingredient; prunes its recipe lines and cached lots
    pub async fn delete_ingredient(&mut self, id: &str) -> ClientResult<()> {
        self.api.delete(&format!("/ingredients/{}", id)).await?;
        self.state.ingredients.retain(|i| i.id != id);
        self.state.recipes.retain(|r| r.ingredient_id != id);
        self.state.ingredient_lots.remove(id);
        Ok(())
    }

    pub async fn import_ingredients_file(
        &mut self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<()> {
        let _: serde_json::Value = self
            .api
            .upload("/ingredients/import", filename, bytes)
            .await?;
        self.state.ingredients = self.fetch_list::<RawIngredient, _>("/ingredients").await;
        Ok(())
    }

    // --- Inventory ---

    /// Record a stock receipt. Costing (FIFO lot creation, average update)
    /// and the optional expense entry happen server-side; afterwards the
    /// affected collections are re-fetched sequentially.
    pub async fn receive_stock(&mut self, request: ReceiveStockRequest) -> ClientResult<()> {
        validation::validate_positive_qty(request.qty)?;
        validation::validate_amount(request.cost_total)?;

        let _: serde_json::Value = self.api.post("/inventory/receive", &request).await?;

        self.state.ingredients = self.fetch_list::<RawIngredient, _>("/ingredients").await;
        self.state.entries = self.fetch_list::<RawMoneyEntry, _>("/entries").await;
        self.state.stock_movements = self
            .fetch_list::<RawStockMovement, _>("/inventory/movements")
            .await;
        self.state.sales_records = self.fetch_list::<RawSalesRecord, _>("/sales").await;
        Ok(())
    }

    /// Record an outward adjustment (spoilage, correction)
    pub async fn adjust_stock_out(&mut self, request: AdjustStockOutRequest) -> ClientResult<()> {
        validation::validate_positive_qty(request.qty)?;

        let _: serde_json::Value = self.api.post("/inventory/adjust-out", &request).await?;

        self.state.ingredients = self.fetch_list::<RawIngredient, _>("/ingredients").await;
        self.state.stock_movements = self
            .fetch_list::<RawStockMovement, _>("/inventory/movements")
            .await;
        self.state.sales_records = self.fetch_list::<RawSalesRecord, _>("/sales").await;
        Ok(())
    }

    /// Seed the FIFO lot cache for an ingredient (oldest first)
    pub fn record_ingredient_lots(&mut self, ingredient_id: &str, lots: Vec<IngredientLot>) {
        self.state
            .ingredient_lots
            .insert(ingredient_id.to_string(), lots);
    }

    // --- Sales ---

    /// Record a quick sale; revenue/COGS/profit come back from the backend
    pub async fn create_quick_sale(&mut self, request: QuickSaleRequest) -> ClientResult<Decimal> {
        if request.lines.is_empty() {
            return Err("Sale must have at least one line".into());
        }
        for line in &request.lines {
            validation::validate_positive_qty(line.qty)?;
        }
        let total_qty: Decimal = request.lines.iter().map(|l| l.qty).sum();

        let _: serde_json::Value = self.api.post("/sales", &request).await?;

        self.state.sales_records = self.fetch_list::<RawSalesRecord, _>("/sales").await;
        self.state.entries = self.fetch_list::<RawMoneyEntry, _>("/entries").await;
        self.state.ingredients = self.fetch_list::<RawIngredient, _>("/ingredients").await;
        self.state.stock_movements = self
            .fetch_list::<RawStockMovement, _>("/inventory/movements")
            .await;
        Ok(total_qty)
    }

    pub async fn import_sales_file(&mut self, filename: &str, bytes: Vec<u8>) -> ClientResult<()> {
        let _: serde_json::Value = self.api.upload("/sales/import", filename, bytes).await?;

        self.state.sales_records = self.fetch_list::<RawSalesRecord, _>("/sales").await;
        self.state.entries = self.fetch_list::<RawMoneyEntry, _>("/entries").await;
        self.state.ingredients = self.fetch_list::<RawIngredient, _>("/ingredients").await;
        self.state.stock_movements = self
            .fetch_list::<RawStockMovement, _>("/inventory/movements")
            .await;
        Ok(())
    }

    /// Fetch and normalize one collection, degrading to empty on failure
    async fn fetch_list<R, M>(&self, path: &str) -> Vec<M>
    where
        R: DeserializeOwned + Normalize<Target = M>,
    {
        match self.api.get::<Vec<serde_json::Value>>(path).await {
            Ok(raw) => dto::normalize_list::<R, M>(raw),
            Err(err) => {
                tracing::warn!(path, error = %err, "collection fetch failed");
                Vec::new()
            }
        }
    }
}

fn normalize_one<R: Normalize>(raw: R) -> ClientResult<R::Target> {
    raw.normalize()
        .ok_or_else(|| ClientError::Decode(serde::de::Error::custom("document missing id or date")))
}

fn replace_by_id<T, F>(items: &mut [T], id: &str, replacement: T, id_of: F)
where
    F: Fn(&T) -> &str,
{
    if let Some(slot) = items.iter_mut().find(|item| id_of(item) == id) {
        *slot = replacement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::types::{CostingMethod, EntryType, PaidBy, Unit};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn entry(id: &str, d: &str, entry_type: EntryType, amount: i64) -> MoneyEntry {
        MoneyEntry {
            id: id.into(),
            date: date(d),
            entry_type,
            category: "Sales".into(),
            amount: Decimal::from(amount),
            paid_by: PaidBy::Cash,
            note: None,
        }
    }

    fn lot(id: &str, qty: i64, unit_cost: i64) -> IngredientLot {
        IngredientLot {
            id: id.into(),
            ingredient_id: "i7".into(),
            date: date("2025-12-20"),
            qty: Decimal::from(qty),
            unit_cost: Decimal::from(unit_cost),
        }
    }

    #[test]
    fn months_span_all_collections() {
        let state = AppState {
            entries: vec![entry("m1", "2025-12-29", EntryType::In, 520)],
            sales_records: vec![SalesRecord {
                id: "s1".into(),
                date: date("2026-01-03"),
                paid_by: PaidBy::Cash,
                lines: vec![],
                revenue: Decimal::ZERO,
                cogs: Decimal::ZERO,
                profit: Decimal::ZERO,
            }],
            ..Default::default()
        };
        assert_eq!(state.months(), vec!["2026-01", "2025-12"]);
    }

    #[test]
    fn month_filter_scopes_entries_and_totals() {
        let state = AppState {
            entries: vec![
                entry("m1", "2025-12-29", EntryType::In, 520),
                entry("m2", "2025-12-29", EntryType::Out, 117),
                entry("m3", "2026-01-02", EntryType::In, 300),
            ],
            month: MonthFilter::Month("2025-12".into()),
            ..Default::default()
        };

        assert_eq!(state.visible_entries().len(), 2);
        let totals = state.daily_totals();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].net, Decimal::from(403));
    }

    #[test]
    fn profit_report_is_scoped_to_the_selected_month() {
        let sale = |id: &str, d: &str, revenue: i64, cogs: i64| SalesRecord {
            id: id.into(),
            date: date(d),
            paid_by: PaidBy::Cash,
            lines: vec![],
            revenue: Decimal::from(revenue),
            cogs: Decimal::from(cogs),
            profit: Decimal::from(revenue - cogs),
        };
        let state = AppState {
            sales_records: vec![
                sale("s1", "2025-12-29", 52, 12),
                sale("s2", "2025-12-28", 460, 180),
                sale("s3", "2026-01-02", 999, 500),
            ],
            month: MonthFilter::Month("2025-12".into()),
            ..Default::default()
        };

        let report = state.profit_report();
        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].date, date("2025-12-29"));
        assert_eq!(report.total_revenue, Decimal::from(512));
        assert_eq!(report.total_profit, Decimal::from(320));
    }

    #[test]
    fn fifo_preview_reads_cached_lots_without_mutating() {
        let mut lots_map = HashMap::new();
        lots_map.insert("i7".to_string(), vec![lot("l1", 5, 2), lot("l2", 3, 3)]);
        let state = AppState {
            ingredient_lots: lots_map,
            ..Default::default()
        };

        let preview = state.fifo_preview("i7", Decimal::from(7)).unwrap();
        assert_eq!(preview.cost, Decimal::from(16));
        assert_eq!(preview.shortage, Decimal::ZERO);
        // cache unchanged
        assert_eq!(state.ingredient_lots["i7"].len(), 2);
        assert!(state.fifo_preview("unknown", Decimal::ONE).is_none());
    }

    #[test]
    fn alerts_delegate_to_metrics() {
        let state = AppState {
            ingredients: vec![Ingredient {
                id: "i1".into(),
                name: "Milk".into(),
                unit: Unit::L,
                stock_qty: Decimal::from(5),
                cost_per_unit: Decimal::new(22, 1),
                active: true,
                min_stock_qty: Some(Decimal::from(8)),
                costing_method: CostingMethod::Avg,
            }],
            ..Default::default()
        };
        let report = state.alerts(date("2026-01-01"));
        assert_eq!(report.low_stock.len(), 1);
        assert_eq!(report.low_stock[0].name, "Milk");
    }
}
