use std::collections::VecDeque;

use hermes_core::{Order, OrderId, OrderStatus, Price, Side};

/// Storage for stop-limit orders that have not yet triggered
///
/// Queues are ordered by trigger proximity: buy-side stops by stop price
/// ascending (a lower trigger fires first as the market rises), sell-side
/// stops descending, with arrival order breaking ties. The front of each
/// queue is therefore always the next order to activate.
#[derive(Debug, Clone, Default)]
pub struct InactiveOrderBook {
    buy_queue: VecDeque<Order>,
    sell_queue: VecDeque<Order>,
}

impl InactiveOrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue_mut(&mut self, side: Side) -> &mut VecDeque<Order> {
        match side {
            Side::Buy => &mut self.buy_queue,
            Side::Sell => &mut self.sell_queue,
        }
    }

    /// Insert a stop order at its activation position
    pub fn enqueue(&mut self, mut order: Order) {
        debug_assert!(order.is_stop());
        order.status = OrderStatus::Inactive;
        let queue = self.queue_mut(order.side);
        let position = queue
            .iter()
            .position(|resting| order.activates_before(resting))
            .unwrap_or(queue.len());
        queue.insert(position, order);
    }

    pub fn find_by_order_id(&self, order_id: OrderId) -> Option<&Order> {
        self.buy_queue
            .iter()
            .chain(self.sell_queue.iter())
            .find(|order| order.id == order_id)
    }

    pub fn remove_by_order_id(&mut self, order_id: OrderId) -> Option<Order> {
        for side in [Side::Buy, Side::Sell] {
            let queue = self.queue_mut(side);
            if let Some(position) = queue.iter().position(|order| order.id == order_id) {
                return queue.remove(position);
            }
        }
        None
    }

    /// Remove and return, in activation order, every order on `side` whose
    /// trigger is satisfied at `market_price`; the rest are untouched
    pub fn extract_activatable(&mut self, side: Side, market_price: Price) -> Vec<Order> {
        let queue = self.queue_mut(side);
        let mut activated = Vec::new();
        while let Some(front) = queue.front() {
            if !front.triggered(market_price) {
                break;
            }
            if let Some(order) = queue.pop_front() {
                activated.push(order);
            }
        }
        activated
    }

    pub fn buy_queue(&self) -> &VecDeque<Order> {
        &self.buy_queue
    }

    pub fn sell_queue(&self) -> &VecDeque<Order> {
        &self.sell_queue
    }

    pub fn is_empty(&self) -> bool {
        self.buy_queue.is_empty() && self.sell_queue.is_empty()
    }
}
