//! Cafe Ledger client
//!
//! Thin client over the cafe business API: a typed HTTP layer, an
//! in-memory state container with explicit actions, CSV export, import
//! templates and English/Arabic strings. All costing and bookkeeping
//! happens server-side; derived views (months, daily totals, alerts)
//! are computed locally from the snapshot via the `shared` crate.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod i18n;
pub mod store;
pub mod templates;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use store::{AppState, Store};
