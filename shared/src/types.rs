//! Common types used across the dashboard

use serde::{Deserialize, Serialize};

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Parse a locale code, falling back to the default locale
    pub fn from_code(code: &str) -> Self {
        match code {
            "ar" => Language::Arabic,
            _ => Language::English,
        }
    }
}

/// Measurement unit for ingredient stock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    G,
    L,
    Ml,
    Pcs,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::L => "l",
            Unit::Ml => "ml",
            Unit::Pcs => "pcs",
        };
        write!(f, "{}", s)
    }
}

/// Payment method for ledger entries, invoices and sales
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaidBy {
    #[default]
    Cash,
    Card,
    Bank,
}

impl PaidBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaidBy::Cash => "cash",
            PaidBy::Card => "card",
            PaidBy::Bank => "bank",
        }
    }
}

/// Direction of a money ledger entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    In,
    Out,
}

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    In,
    Out,
}

/// Inventory costing method for an ingredient
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CostingMethod {
    #[default]
    Avg,
    Fifo,
}

/// Settlement state of a supplier invoice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    #[default]
    Unpaid,
    Partial,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Partial => "partial",
        };
        write!(f, "{}", s)
    }
}

/// Product menu category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProductCategory {
    Coffee,
    Pizza,
    Croissant,
    Sandwich,
    Drink,
    Dessert,
    #[default]
    Other,
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProductCategory::Coffee => "Coffee",
            ProductCategory::Pizza => "Pizza",
            ProductCategory::Croissant => "Croissant",
            ProductCategory::Sandwich => "Sandwich",
            ProductCategory::Drink => "Drink",
            ProductCategory::Dessert => "Dessert",
            ProductCategory::Other => "Other",
        };
        write!(f, "{}", s)
    }
}
