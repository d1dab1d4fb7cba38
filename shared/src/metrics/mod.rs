//! Derived-metric computations over immutable snapshots
//!
//! Pure functions only: FIFO lot consumption, low-stock / low-sales alert
//! detection, calendar aggregation and daily profit reporting. None of
//! these touch I/O or fail;
//! boundary conditions are reported through the returned values.

pub mod aggregate;
pub mod alerts;
pub mod fifo;
pub mod profit;

pub use aggregate::*;
pub use alerts::*;
pub use fifo::*;
pub use profit::*;
