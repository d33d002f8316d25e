use std::collections::VecDeque;

use hermes_core::{Order, OrderId, Side};

/// Active order storage for one security, one queue per side
///
/// Queues are kept in price priority (highest bid first, lowest ask first).
/// Insertion places an order behind everything at its price level, which
/// yields FIFO time priority and puts replenished icebergs at the back of
/// their level. The book has no validation or ledger awareness.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    buy_queue: VecDeque<Order>,
    sell_queue: VecDeque<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self, side: Side) -> &VecDeque<Order> {
        match side {
            Side::Buy => &self.buy_queue,
            Side::Sell => &self.sell_queue,
        }
    }

    fn queue_mut(&mut self, side: Side) -> &mut VecDeque<Order> {
        match side {
            Side::Buy => &mut self.buy_queue,
            Side::Sell => &mut self.sell_queue,
        }
    }

    /// Insert an order at its price/time position
    pub fn enqueue(&mut self, order: Order) {
        let queue = self.queue_mut(order.side);
        let position = queue
            .iter()
            .position(|resting| order.queues_before(resting))
            .unwrap_or(queue.len());
        queue.insert(position, order);
    }

    pub fn find_by_order_id(&self, order_id: OrderId) -> Option<&Order> {
        self.buy_queue
            .iter()
            .chain(self.sell_queue.iter())
            .find(|order| order.id == order_id)
    }

    /// Remove and return the order with this id, if present on either side
    pub fn remove_by_order_id(&mut self, order_id: OrderId) -> Option<Order> {
        for side in [Side::Buy, Side::Sell] {
            let queue = self.queue_mut(side);
            if let Some(position) = queue.iter().position(|order| order.id == order_id) {
                return queue.remove(position);
            }
        }
        None
    }

    /// The next order eligible to trade on this side
    pub fn peek_best(&self, side: Side) -> Option<&Order> {
        self.queue(side).front()
    }

    pub fn best_mut(&mut self, side: Side) -> Option<&mut Order> {
        self.queue_mut(side).front_mut()
    }

    pub fn pop_best(&mut self, side: Side) -> Option<Order> {
        self.queue_mut(side).pop_front()
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
