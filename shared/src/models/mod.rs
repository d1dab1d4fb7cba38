//! Domain models for the Cafe Ledger dashboard

pub mod ingredient;
pub mod invoice;
pub mod ledger;
pub mod product;
pub mod recipe;
pub mod sales;

pub use ingredient::*;
pub use invoice::*;
pub use ledger::*;
pub use product::*;
pub use recipe::*;
pub use sales::*;
