use serde::{Deserialize, Serialize};

use super::{OrderStatus, Side};
use crate::values::{BrokerId, Isin, OrderId, Price, Quantity, ShareholderId, Timestamp};

/// Full order details
///
/// Plain limit, iceberg and stop-limit orders are all represented by this one
/// entity; `peak_size`, `minimum_execution_quantity` and `stop_price` are
/// mutually constrained optional fields where zero means "unset".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The security being traded
    pub isin: Isin,
    pub side: Side,
    /// Remaining quantity
    pub quantity: Quantity,
    /// Limit price
    pub price: Price,
    pub broker_id: BrokerId,
    pub shareholder_id: ShareholderId,
    /// Tie-break key for same-price and same-trigger ordering
    pub entry_time: Timestamp,
    /// Iceberg peak; zero means the full quantity is displayed
    pub peak_size: Quantity,
    /// Currently displayed slice; tracks `quantity` for non-iceberg orders
    pub displayed_quantity: Quantity,
    /// Quantity that must be fillable at entry; zero means no constraint
    pub minimum_execution_quantity: Quantity,
    /// Stop trigger; zero means a plain limit order
    pub stop_price: Price,
    pub status: OrderStatus,
}

impl Order {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OrderId,
        isin: impl Into<Isin>,
        side: Side,
        quantity: Quantity,
        price: Price,
        broker_id: BrokerId,
        shareholder_id: ShareholderId,
        entry_time: Timestamp,
        peak_size: Quantity,
        minimum_execution_quantity: Quantity,
        stop_price: Price,
    ) -> Self {
        let displayed_quantity = if peak_size > 0 {
            peak_size.min(quantity)
        } else {
            quantity
        };
        Self {
            id,
            isin: isin.into(),
            side,
            quantity,
            price,
            broker_id,
            shareholder_id,
            entry_time,
            peak_size,
            displayed_quantity,
            minimum_execution_quantity,
            stop_price,
            status: OrderStatus::New,
        }
    }

    /// Create a plain limit order
    #[allow(clippy::too_many_arguments)]
    pub fn limit(
        id: OrderId,
        isin: impl Into<Isin>,
        side: Side,
        quantity: Quantity,
        price: Price,
        broker_id: BrokerId,
        shareholder_id: ShareholderId,
        entry_time: Timestamp,
    ) -> Self {
        Self::new(
            id,
            isin,
            side,
            quantity,
            price,
            broker_id,
            shareholder_id,
            entry_time,
            0,
            0,
            0,
        )
    }

    /// Create an iceberg order exposing `peak_size` shares at a time
    #[allow(clippy::too_many_arguments)]
    pub fn iceberg(
        id: OrderId,
        isin: impl Into<Isin>,
        side: Side,
        quantity: Quantity,
        price: Price,
        broker_id: BrokerId,
        shareholder_id: ShareholderId,
        entry_time: Timestamp,
        peak_size: Quantity,
    ) -> Self {
        Self::new(
            id,
            isin,
            side,
            quantity,
            price,
            broker_id,
            shareholder_id,
            entry_time,
            peak_size,
            0,
            0,
        )
    }

    /// Create a stop-limit order triggering at `stop_price`
    #[allow(clippy::too_many_arguments)]
    pub fn stop_limit(
        id: OrderId,
        isin: impl Into<Isin>,
        side: Side,
        quantity: Quantity,
        price: Price,
        broker_id: BrokerId,
        shareholder_id: ShareholderId,
        entry_time: Timestamp,
        stop_price: Price,
    ) -> Self {
        Self::new(
            id,
            isin,
            side,
            quantity,
            price,
            broker_id,
            shareholder_id,
            entry_time,
            0,
            0,
            stop_price,
        )
    }

    pub fn is_iceberg(&self) -> bool {
        self.peak_size > 0
    }

    pub fn is_stop(&self) -> bool {
        self.stop_price > 0
    }

    /// Quantity visible to the matcher: the displayed slice for iceberg
    /// orders, the full remainder otherwise
    pub fn visible_quantity(&self) -> Quantity {
        if self.is_iceberg() {
            self.displayed_quantity
        } else {
            self.quantity
        }
    }

    /// Notional value of the remaining quantity at the limit price
    pub fn value(&self) -> u64 {
        self.price * self.quantity
    }

    /// Returns true if this order's limit price crosses a resting price on
    /// the opposite side
    pub fn crosses(&self, resting_price: Price) -> bool {
        match self.side {
            Side::Buy => self.price >= resting_price,
            Side::Sell => self.price <= resting_price,
        }
    }

    /// Returns true if this order takes price priority over `other` in the
    /// active book (strict; equal prices queue FIFO behind)
    pub fn queues_before(&self, other: &Order) -> bool {
        match self.side {
            Side::Buy => self.price > other.price,
            Side::Sell => self.price < other.price,
        }
    }

    /// Returns true if this stop order activates before `other` (strict;
    /// equal triggers activate in arrival order)
    pub fn activates_before(&self, other: &Order) -> bool {
        match self.side {
            Side::Buy => self.stop_price < other.stop_price,
            Side::Sell => self.stop_price > other.stop_price,
        }
    }

    /// Returns true if the stop trigger is satisfied at `market_price`
    pub fn triggered(&self, market_price: Price) -> bool {
        match self.side {
            Side::Buy => market_price >= self.stop_price,
            Side::Sell => market_price <= self.stop_price,
        }
    }

    /// Reduce the remaining quantity by a traded amount
    pub fn fill(&mut self, traded: Quantity) {
        self.quantity = self.quantity.saturating_sub(traded);
        if self.is_iceberg() {
            self.displayed_quantity = self.displayed_quantity.saturating_sub(traded);
        } else {
            self.displayed_quantity = self.quantity;
        }
        if self.quantity == 0 {
            self.status = OrderStatus::Filled;
        }
    }

    /// Refresh the displayed slice from the hidden remainder
    pub fn replenish(&mut self) {
        self.displayed_quantity = self.peak_size.min(self.quantity);
    }

    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }
}
