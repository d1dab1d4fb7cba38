//! Shared types and computations for the Cafe Ledger dashboard
//!
//! This crate contains the domain models, derived-metric computations and
//! validation helpers shared between the sync client, the WASM bindings and
//! other components of the system. Everything here is pure: no I/O, no
//! clocks, no global state.

pub mod metrics;
pub mod models;
pub mod types;
pub mod validation;

pub use metrics::*;
pub use models::*;
pub use types::*;
pub use validation::*;
