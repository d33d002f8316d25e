use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::values::{Isin, OrderId, Price, Quantity, Timestamp};

/// Unique identifier for a trade
pub type TradeId = Uuid;

/// Trade resulting from matching two orders
///
/// Immutable once created; only the matcher produces trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub isin: Isin,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    pub time: Timestamp,
}

impl Trade {
    /// Create a new trade with explicit timestamp
    pub fn new_with_time(
        isin: impl Into<Isin>,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        time: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            isin: isin.into(),
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            time,
        }
    }

    /// Create a new trade using current system time
    pub fn new(
        isin: impl Into<Isin>,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self::new_with_time(isin, buy_order_id, sell_order_id, price, quantity, Utc::now())
    }

    /// Returns the notional value of the trade (price * quantity)
    pub fn notional(&self) -> u64 {
        self.price * self.quantity
    }
}
