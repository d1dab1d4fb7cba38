//! FIFO lot consumption

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::IngredientLot;

/// Outcome of consuming a quantity from a FIFO lot queue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FifoConsumption {
    /// Remaining lots after consumption, oldest first; depleted lots removed
    pub lots: Vec<IngredientLot>,
    /// Total cost of the consumed quantity
    pub cost: Decimal,
    /// Requested quantity not covered by the available lots, >= 0
    pub shortage: Decimal,
}

/// Consume `qty_needed` from `lots` oldest-first.
///
/// Each lot contributes `min(lot.qty, remaining)` at its own unit cost. A lot
/// with leftover quantity is kept with the reduced quantity; a fully consumed
/// lot is dropped; once the request is satisfied the later lots pass through
/// unchanged. Any unmet remainder is returned as `shortage` and never
/// silently fabricated. The caller decides whether a nonzero shortage blocks
/// the operation.
pub fn consume_lots_fifo(lots: &[IngredientLot], qty_needed: Decimal) -> FifoConsumption {
    let mut remaining = qty_needed;
    let mut cost = Decimal::ZERO;
    let mut next = Vec::with_capacity(lots.len());

    for lot in lots {
        if remaining <= Decimal::ZERO {
            next.push(lot.clone());
            continue;
        }
        let take = lot.qty.min(remaining);
        cost += take * lot.unit_cost;
        remaining -= take;

        let left = lot.qty - take;
        if left > Decimal::ZERO {
            next.push(IngredientLot {
                qty: left,
                ..lot.clone()
            });
        }
    }

    FifoConsumption {
        lots: next,
        cost,
        shortage: remaining.max(Decimal::ZERO),
    }
}
