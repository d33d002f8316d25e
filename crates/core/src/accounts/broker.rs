use serde::{Deserialize, Serialize};

use crate::values::BrokerId;

/// Broker credit ledger
///
/// Credit is debited when a buy order is accepted or trades, and refunded
/// when a buy order is canceled or replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broker {
    id: BrokerId,
    credit: u64,
}

impl Broker {
    pub fn new(id: BrokerId, credit: u64) -> Self {
        Self { id, credit }
    }

    pub fn id(&self) -> BrokerId {
        self.id
    }

    pub fn credit(&self) -> u64 {
        self.credit
    }

    pub fn has_enough_credit(&self, amount: u64) -> bool {
        self.credit >= amount
    }

    /// Debit `amount` from the balance; returns false and leaves the balance
    /// untouched if it would go negative
    pub fn decrease_credit(&mut self, amount: u64) -> bool {
        if self.credit >= amount {
            self.credit -= amount;
            true
        } else {
            false
        }
    }

    pub fn increase_credit(&mut self, amount: u64) {
        self.credit += amount;
    }
}
