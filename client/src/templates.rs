//! Import templates and header mapping
//!
//! Each importable collection has a declared template: its column headers,
//! accepted legacy aliases and which columns are required. Incoming
//! spreadsheet headers are matched against the declaration after
//! normalization (trim, lowercase, drop spaces and underscores), so
//! `Stock Qty`, `stock_qty` and `stockQty` all land on the same column.
//! Unknown columns are ignored; missing required columns fail the whole
//! file up front, before anything is uploaded.

use std::collections::HashMap;

use crate::error::{ClientError, ClientResult};

/// One declared template column
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    /// Legacy header spellings still accepted on import
    pub aliases: &'static [&'static str],
    pub required: bool,
    /// Sample value for the downloadable template's example row
    pub example: &'static str,
}

const fn required(header: &'static str, example: &'static str) -> Column {
    Column { header, aliases: &[], required: true, example }
}

const fn optional(header: &'static str, example: &'static str) -> Column {
    Column { header, aliases: &[], required: false, example }
}

const fn aliased(
    header: &'static str,
    aliases: &'static [&'static str],
    example: &'static str,
) -> Column {
    Column { header, aliases, required: true, example }
}

/// Declared import template for one collection
#[derive(Debug, Clone, Copy)]
pub struct ImportTemplate {
    pub name: &'static str,
    pub columns: &'static [Column],
}

pub const INGREDIENTS: ImportTemplate = ImportTemplate {
    name: "ingredients",
    columns: &[
        required("name", "Milk"),
        required("unit", "l"),
        required("stockQty", "12"),
        required("costPerUnit", "2.2"),
        optional("active", "true"),
    ],
};

pub const ENTRIES: ImportTemplate = ImportTemplate {
    name: "entries",
    columns: &[
        required("date", "2025-12-29"),
        required("type", "out"),
        required("category", "Supplies"),
        required("amount", "117"),
        optional("paidBy", "cash"),
        optional("note", ""),
    ],
};

pub const SUPPLIER_INVOICES: ImportTemplate = ImportTemplate {
    name: "supplier-invoices",
    columns: &[
        required("date", "2025-12-29"),
        aliased("supplierName", &["supplier"], "Tripoli Dairy Co."),
        aliased("invoiceNumber", &["invoiceNo"], "SUP-TRD-8891"),
        aliased("totalAmount", &["amount"], "410"),
        optional("paidBy", "bank"),
        optional("note", ""),
    ],
};

pub const PRODUCTS: ImportTemplate = ImportTemplate {
    name: "products",
    columns: &[
        required("name", "Latte"),
        required("category", "Coffee"),
        required("price", "6"),
        optional("active", "true"),
        optional("targetDailyAvgQty", "4"),
        optional("targetMonthlyQty", ""),
    ],
};

pub const SALES: ImportTemplate = ImportTemplate {
    name: "sales",
    columns: &[
        required("date", "2025-12-29"),
        optional("paidBy", "cash"),
        required("product", "Latte"),
        required("qty", "2"),
    ],
};

pub const RECIPES: ImportTemplate = ImportTemplate {
    name: "recipes",
    columns: &[
        required("product", "Latte"),
        required("ingredient", "Milk"),
        required("qtyPerUnit", "0.2"),
    ],
};

pub const ALL: [ImportTemplate; 6] = [
    INGREDIENTS,
    ENTRIES,
    SUPPLIER_INVOICES,
    PRODUCTS,
    SALES,
    RECIPES,
];

/// Canonical form used for header matching
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '_')
        .collect::<String>()
        .to_lowercase()
}

impl Column {
    fn accepts(&self, normalized: &str) -> bool {
        if normalize_header(self.header) == normalized {
            return true;
        }
        self.aliases
            .iter()
            .any(|alias| normalize_header(alias) == normalized)
    }
}

/// Declared header resolved to a column index in the incoming file
pub type ColumnMap = HashMap<&'static str, usize>;

impl ImportTemplate {
    /// Downloadable blank template: header row plus one example row
    pub fn template_csv(&self) -> String {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        let examples: Vec<&str> = self.columns.iter().map(|c| c.example).collect();
        format!("{}\n{}\n", headers.join(","), examples.join(","))
    }

    /// Match incoming headers against the declaration.
    ///
    /// Returns the position of each recognized declared column (canonical
    /// header or a legacy alias). Fails when a required column is absent,
    /// naming every missing one.
    pub fn resolve_columns(&self, headers: &[String]) -> ClientResult<ColumnMap> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let mut map = ColumnMap::new();
        let mut missing = Vec::new();
        for column in self.columns {
            match normalized.iter().position(|h| column.accepts(h)) {
                Some(index) => {
                    map.insert(column.header, index);
                }
                None if column.required => missing.push(column.header),
                None => {}
            }
        }

        if missing.is_empty() {
            Ok(map)
        } else {
            Err(ClientError::Import(format!(
                "{} import is missing required columns: {}",
                self.name,
                missing.join(", ")
            )))
        }
    }

    /// Check a CSV file's header row before it is uploaded
    pub fn check_csv(&self, bytes: &[u8]) -> ClientResult<ColumnMap> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);
        let headers = reader
            .headers()
            .map_err(|e| ClientError::Import(e.to_string()))?;
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        self.resolve_columns(&headers)
    }
}
