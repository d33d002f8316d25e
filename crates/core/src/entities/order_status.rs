use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order has been created but not yet placed in a book
    New,
    /// Order rests in the active order book
    Queued,
    /// Stop-limit order parked in the inactive book, awaiting its trigger
    Inactive,
    /// Order has been completely filled
    Filled,
    /// Order has been canceled by the submitter
    Canceled,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Canceled)
    }

    /// Returns true if the order may still trade
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            OrderStatus::New | OrderStatus::Queued | OrderStatus::Inactive
        )
    }
}
