use hermes_core::{BrokerId, Order, OrderStatus, Price, Quantity, ShareholderId, Side, Trade};

use crate::book::OrderBook;
use crate::error::MatchError;

/// One execution: the trade plus both counterparties, so the caller can
/// apply ledger effects without re-reading the book
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub trade: Trade,
    pub buy_broker: BrokerId,
    pub buy_shareholder: ShareholderId,
    pub sell_broker: BrokerId,
    pub sell_shareholder: ShareholderId,
}

/// Result of running one order through the matcher
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    pub fills: Vec<Fill>,
    /// Quantity left resting in the book, zero if fully filled or none rested
    pub rested_quantity: Quantity,
    /// Notional of the rested remainder at its limit price
    pub rested_value: u64,
}

impl MatchOutcome {
    pub fn trades(&self) -> Vec<Trade> {
        self.fills.iter().map(|fill| fill.trade.clone()).collect()
    }

    pub fn last_trade_price(&self) -> Option<Price> {
        self.fills.last().map(|fill| fill.trade.price)
    }

    pub fn executed_quantity(&self) -> Quantity {
        self.fills.iter().map(|fill| fill.trade.quantity).sum()
    }

    pub fn has_trades(&self) -> bool {
        !self.fills.is_empty()
    }
}

/// Price-time priority matcher (FIFO)
///
/// Consumes an incoming order against the opposite side of the book while
/// prices cross. The resting order's price is authoritative, so the
/// aggressor gets any price improvement. Iceberg resting orders replenish
/// their displayed slice and requeue at the back of their price level.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Total opposite-side quantity this order could execute against
    ///
    /// Hidden iceberg remainder counts: it replenishes within a single
    /// match loop.
    pub fn matchable_quantity(&self, order: &Order, book: &OrderBook) -> Quantity {
        let opposite = match order.side {
            Side::Buy => book.sell_queue(),
            Side::Sell => book.buy_queue(),
        };
        opposite
            .iter()
            .take_while(|resting| order.crosses(resting.price))
            .map(|resting| resting.quantity)
            .sum()
    }

    /// Match `order` against the book, mutating the book and returning the
    /// fills plus the rested remainder, if any
    ///
    /// If the order carries a minimum execution quantity that the book
    /// cannot satisfy, the whole operation fails before any mutation.
    pub fn execute(&self, mut order: Order, book: &mut OrderBook) -> Result<MatchOutcome, MatchError> {
        if order.minimum_execution_quantity > 0 {
            let available = self.matchable_quantity(&order, book);
            if available < order.minimum_execution_quantity {
                return Err(MatchError::InsufficientExecution {
                    required: order.minimum_execution_quantity,
                    available,
                });
            }
        }

        let opposite = order.side.opposite();
        let mut fills = Vec::new();

        while order.quantity > 0 {
            let Some(best) = book.best_mut(opposite) else {
                break;
            };
            if !order.crosses(best.price) {
                break;
            }

            let traded = order.quantity.min(best.visible_quantity());
            let trade = match order.side {
                Side::Buy => Trade::new(order.isin.clone(), order.id, best.id, best.price, traded),
                Side::Sell => Trade::new(order.isin.clone(), best.id, order.id, best.price, traded),
            };
            let (buyer, seller) = match order.side {
                Side::Buy => (&order, &*best),
                Side::Sell => (&*best, &order),
            };
            fills.push(Fill {
                trade,
                buy_broker: buyer.broker_id,
                buy_shareholder: buyer.shareholder_id,
                sell_broker: seller.broker_id,
                sell_shareholder: seller.shareholder_id,
            });

            best.fill(traded);
            let resting_filled = best.is_filled();
            let slice_exhausted = best.is_iceberg() && best.displayed_quantity == 0;
            order.fill(traded);

            if resting_filled {
                book.pop_best(opposite);
            } else if slice_exhausted {
                if let Some(mut iceberg) = book.pop_best(opposite) {
                    iceberg.replenish();
                    book.enqueue(iceberg);
                }
            }
        }

        let mut outcome = MatchOutcome {
            fills,
            ..MatchOutcome::default()
        };
        if order.quantity > 0 {
            outcome.rested_quantity = order.quantity;
            outcome.rested_value = order.value();
            if order.is_iceberg() {
                order.replenish();
            }
            order.status = OrderStatus::Queued;
            book.enqueue(order);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hermes_core::OrderId;

    const BROKER_A: BrokerId = 1;
    const BROKER_B: BrokerId = 2;

    fn order(id: OrderId, side: Side, quantity: Quantity, price: Price) -> Order {
        Order::limit(id, "ABC", side, quantity, price, BROKER_A, 1, Utc::now())
    }

    fn seeded_book() -> OrderBook {
        let mut book = OrderBook::new();
        book.enqueue(order(1, Side::Buy, 304, 15700));
        book.enqueue(order(2, Side::Buy, 43, 15500));
        book.enqueue(order(6, Side::Sell, 350, 15800));
        book.enqueue(order(7, Side::Sell, 285, 15810));
        book
    }

    #[test]
    fn non_crossing_order_rests() {
        let mut book = seeded_book();
        let outcome = Matcher::new()
            .execute(order(11, Side::Buy, 10, 15750), &mut book)
            .expect("no MEQ");
        assert!(!outcome.has_trades());
        assert_eq!(outcome.rested_quantity, 10);
        assert_eq!(outcome.rested_value, 157_500);
        assert_eq!(book.peek_best(Side::Buy).map(|o| o.id), Some(11));
    }

    #[test]
    fn crossing_order_trades_at_resting_price() {
        let mut book = seeded_book();
        let outcome = Matcher::new()
            .execute(order(11, Side::Buy, 10, 15805), &mut book)
            .expect("no MEQ");
        assert_eq!(outcome.fills.len(), 1);
        let trade = &outcome.fills[0].trade;
        // price improvement for the aggressor: resting price wins
        assert_eq!(trade.price, 15800);
        assert_eq!(trade.quantity, 10);
        assert_eq!(trade.buy_order_id, 11);
        assert_eq!(trade.sell_order_id, 6);
        assert_eq!(outcome.rested_quantity, 0);
        assert_eq!(book.peek_best(Side::Sell).map(|o| o.quantity), Some(340));
    }

    #[test]
    fn sweeps_levels_and_rests_the_remainder() {
        let mut book = seeded_book();
        let outcome = Matcher::new()
            .execute(order(11, Side::Buy, 700, 15810), &mut book)
            .expect("no MEQ");
        assert_eq!(outcome.executed_quantity(), 635);
        assert_eq!(outcome.fills[0].trade.price, 15800);
        assert_eq!(outcome.fills[1].trade.price, 15810);
        assert_eq!(outcome.last_trade_price(), Some(15810));
        assert_eq!(outcome.rested_quantity, 65);
        assert!(book.sell_queue().is_empty());
        assert_eq!(book.peek_best(Side::Buy).map(|o| o.id), Some(11));
    }

    #[test]
    fn price_time_priority_among_equal_prices() {
        let mut book = OrderBook::new();
        book.enqueue(order(1, Side::Sell, 100, 15800));
        book.enqueue(order(2, Side::Sell, 100, 15800));
        let outcome = Matcher::new()
            .execute(order(11, Side::Buy, 100, 15800), &mut book)
            .expect("no MEQ");
        assert_eq!(outcome.fills[0].trade.sell_order_id, 1);
        assert_eq!(book.peek_best(Side::Sell).map(|o| o.id), Some(2));
    }

    #[test]
    fn resting_iceberg_replenishes_behind_its_level() {
        let mut book = OrderBook::new();
        let mut iceberg =
            Order::iceberg(1, "ABC", Side::Sell, 450, 15800, BROKER_B, 2, Utc::now(), 100);
        iceberg.status = OrderStatus::Queued;
        book.enqueue(iceberg);
        book.enqueue(order(2, Side::Sell, 50, 15800));

        let outcome = Matcher::new()
            .execute(order(11, Side::Buy, 180, 15800), &mut book)
            .expect("no MEQ");

        // 100 from the iceberg peak, 50 from order 2, then 30 from the
        // replenished slice
        let quantities: Vec<Quantity> =
            outcome.fills.iter().map(|f| f.trade.quantity).collect();
        assert_eq!(quantities, vec![100, 50, 30]);

        let remaining = book.find_by_order_id(1).expect("still resting");
        assert_eq!(remaining.quantity, 320);
        assert_eq!(remaining.displayed_quantity, 70);
        // visible + hidden equals original minus traded
        assert_eq!(remaining.quantity, 450 - 130);
    }

    #[test]
    fn incoming_iceberg_rests_with_a_fresh_slice() {
        let mut book = OrderBook::new();
        book.enqueue(order(1, Side::Sell, 30, 15800));
        let incoming =
            Order::iceberg(11, "ABC", Side::Buy, 250, 15800, BROKER_A, 1, Utc::now(), 100);
        let outcome = Matcher::new().execute(incoming, &mut book).expect("no MEQ");
        assert_eq!(outcome.executed_quantity(), 30);
        let rested = book.find_by_order_id(11).expect("rested");
        assert_eq!(rested.quantity, 220);
        assert_eq!(rested.displayed_quantity, 100);
    }

    #[test]
    fn meq_shortfall_rejects_without_mutation() {
        let mut book = seeded_book();
        let before: Vec<OrderId> = book.sell_queue().iter().map(|o| o.id).collect();
        let mut incoming = order(11, Side::Buy, 1000, 15800);
        incoming.minimum_execution_quantity = 500;

        let err = Matcher::new().execute(incoming, &mut book).unwrap_err();
        assert_eq!(
            err,
            MatchError::InsufficientExecution {
                required: 500,
                available: 350,
            }
        );
        let after: Vec<OrderId> = book.sell_queue().iter().map(|o| o.id).collect();
        assert_eq!(before, after);
        assert!(book.find_by_order_id(11).is_none());
    }

    #[test]
    fn meq_satisfied_executes_normally() {
        let mut book = seeded_book();
        let mut incoming = order(11, Side::Buy, 400, 15800);
        incoming.minimum_execution_quantity = 300;
        let outcome = Matcher::new().execute(incoming, &mut book).expect("met");
        assert_eq!(outcome.executed_quantity(), 350);
        assert_eq!(outcome.rested_quantity, 50);
    }
}
