use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::values::{Isin, Quantity, ShareholderId};

/// Shareholder position ledger
///
/// Positions are checked at order entry but only mutated by executions;
/// sell orders do not reserve shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shareholder {
    id: ShareholderId,
    positions: HashMap<Isin, Quantity>,
}

impl Shareholder {
    pub fn new(id: ShareholderId) -> Self {
        Self {
            id,
            positions: HashMap::new(),
        }
    }

    pub fn id(&self) -> ShareholderId {
        self.id
    }

    pub fn position_in(&self, isin: &str) -> Quantity {
        self.positions.get(isin).copied().unwrap_or(0)
    }

    pub fn has_enough_position(&self, isin: &str, quantity: Quantity) -> bool {
        self.position_in(isin) >= quantity
    }

    pub fn inc_position(&mut self, isin: impl Into<Isin>, quantity: Quantity) {
        *self.positions.entry(isin.into()).or_insert(0) += quantity;
    }

    /// Reduce the position; returns false and leaves it untouched if the
    /// holding is insufficient
    pub fn dec_position(&mut self, isin: &str, quantity: Quantity) -> bool {
        match self.positions.get_mut(isin) {
            Some(held) if *held >= quantity => {
                *held -= quantity;
                true
            }
            _ => false,
        }
    }
}
