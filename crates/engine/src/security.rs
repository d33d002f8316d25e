//! Per-instrument orchestration
//!
//! A `Security` owns one active book and one inactive book and drives the
//! full lifecycle of a request against them: ledger admission, stop-order
//! parking or immediate activation, matching, settlement, market-price
//! updates and the activation cascade.

use log::{debug, error, info};

use hermes_core::{
    BrokerId, Isin, Order, OrderId, OrderStatus, Price, Side, Trade,
};
use hermes_matching::{InactiveOrderBook, MatchError, MatchOutcome, Matcher, OrderBook};
use hermes_ports::RejectionReason;

use crate::repository::{BrokerRepository, ShareholderRepository};

/// Everything a request did to this security
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    /// Trades of the submitted order itself
    pub trades: Vec<Trade>,
    /// Trades produced by stop orders activated in the cascade
    pub activation_trades: Vec<Trade>,
    /// Stop orders moved to the active book by this request
    pub activated_orders: Vec<OrderId>,
}

impl ExecutionReport {
    pub fn all_trades(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter().chain(self.activation_trades.iter())
    }
}

/// One tradeable instrument: its identity, market price and both books
#[derive(Debug, Default)]
pub struct Security {
    isin: Isin,
    /// Price of the most recent trade; None until the first trade
    market_price: Option<Price>,
    order_book: OrderBook,
    inactive_order_book: InactiveOrderBook,
}

impl Security {
    pub fn new(isin: impl Into<Isin>) -> Self {
        Self {
            isin: isin.into(),
            market_price: None,
            order_book: OrderBook::new(),
            inactive_order_book: InactiveOrderBook::new(),
        }
    }

    pub fn isin(&self) -> &str {
        &self.isin
    }

    pub fn market_price(&self) -> Option<Price> {
        self.market_price
    }

    /// Seed the market price directly (test harnesses)
    pub fn set_market_price(&mut self, price: Price) {
        self.market_price = Some(price);
    }

    pub fn order_book(&self) -> &OrderBook {
        &self.order_book
    }

    /// Direct book access for seeding fixtures; bypasses admission
    pub fn order_book_mut(&mut self) -> &mut OrderBook {
        &mut self.order_book
    }

    pub fn inactive_order_book(&self) -> &InactiveOrderBook {
        &self.inactive_order_book
    }

    pub fn inactive_order_book_mut(&mut self) -> &mut InactiveOrderBook {
        &mut self.inactive_order_book
    }

    /// Submit a new order: admission, parking or matching, settlement and
    /// the activation cascade
    ///
    /// Fails with zero mutation; success reports every trade produced.
    pub fn submit_order(
        &mut self,
        mut order: Order,
        matcher: &Matcher,
        brokers: &BrokerRepository,
        shareholders: &ShareholderRepository,
    ) -> Result<ExecutionReport, RejectionReason> {
        if self.order_book.find_by_order_id(order.id).is_some()
            || self.inactive_order_book.find_by_order_id(order.id).is_some()
        {
            return Err(RejectionReason::DuplicateOrderId);
        }
        self.check_admission(&order, brokers, shareholders)?;

        if order.is_stop() && !self.stop_triggered(&order) {
            // Reserve the buyer's notional while the order is parked
            if order.side == Side::Buy {
                debit_broker(brokers, order.broker_id, order.value());
            }
            debug!(
                "order {} parked inactive on {} (stop {})",
                order.id, self.isin, order.stop_price
            );
            self.inactive_order_book.enqueue(order);
            return Ok(ExecutionReport::default());
        }

        if order.is_stop() {
            info!(
                "stop order {} on {} triggered on entry (market {:?})",
                order.id, self.isin, self.market_price
            );
            order.status = OrderStatus::New;
        }

        let trades = self.match_and_settle(order, matcher, brokers, shareholders)?;
        let mut report = ExecutionReport {
            trades,
            ..ExecutionReport::default()
        };
        self.run_activation(&mut report, matcher, brokers, shareholders);
        Ok(report)
    }

    /// Replace an existing order with new parameters, atomically
    ///
    /// Validation runs against the state with the old order's reservation
    /// refunded; any failure leaves the original order exactly where it was.
    pub fn update_order(
        &mut self,
        order: Order,
        matcher: &Matcher,
        brokers: &BrokerRepository,
        shareholders: &ShareholderRepository,
    ) -> Result<ExecutionReport, RejectionReason> {
        let (old_side, old_value, old_broker) = {
            let existing = self
                .order_book
                .find_by_order_id(order.id)
                .or_else(|| self.inactive_order_book.find_by_order_id(order.id))
                .ok_or(RejectionReason::OrderNotFound)?;
            if existing.side != order.side {
                return Err(RejectionReason::OrderNotFound);
            }
            (existing.side, existing.value(), existing.broker_id)
        };

        // Admission against the new parameters, with the old reservation
        // treated as already refunded
        match order.side {
            Side::Buy => {
                let broker = brokers
                    .find_by_id(order.broker_id)
                    .ok_or(RejectionReason::BrokerNotFound)?;
                let refund = if old_side == Side::Buy && old_broker == order.broker_id {
                    old_value
                } else {
                    0
                };
                if broker.credit() + refund < order.value() {
                    return Err(RejectionReason::InsufficientCredit);
                }
            }
            Side::Sell => {
                let shareholder = shareholders
                    .find_by_id(order.shareholder_id)
                    .ok_or(RejectionReason::ShareholderNotFound)?;
                if !shareholder.has_enough_position(&self.isin, order.quantity) {
                    return Err(RejectionReason::InsufficientPosition);
                }
            }
        }

        // The old order sits on the same side, so the opposite-side
        // liquidity the MEQ check sees is unaffected by its removal
        if order.minimum_execution_quantity > 0
            && matcher.matchable_quantity(&order, &self.order_book)
                < order.minimum_execution_quantity
        {
            return Err(RejectionReason::InsufficientExecutionQuantity);
        }

        // Nothing can fail past this point; commit
        let removed = self
            .order_book
            .remove_by_order_id(order.id)
            .or_else(|| self.inactive_order_book.remove_by_order_id(order.id));
        if let Some(old) = removed {
            if old.side == Side::Buy {
                credit_broker(brokers, old.broker_id, old.value());
            }
        }
        self.submit_order(order, matcher, brokers, shareholders)
    }

    /// Remove an order from whichever book holds it and refund any buyer
    /// reservation
    pub fn delete_order(
        &mut self,
        order_id: OrderId,
        side: Side,
        brokers: &BrokerRepository,
    ) -> Result<(), RejectionReason> {
        let held_side = self
            .order_book
            .find_by_order_id(order_id)
            .or_else(|| self.inactive_order_book.find_by_order_id(order_id))
            .map(|order| order.side)
            .ok_or(RejectionReason::OrderNotFound)?;
        if held_side != side {
            return Err(RejectionReason::OrderNotFound);
        }

        let removed = self
            .order_book
            .remove_by_order_id(order_id)
            .or_else(|| self.inactive_order_book.remove_by_order_id(order_id));
        if let Some(mut order) = removed {
            if order.side == Side::Buy {
                credit_broker(brokers, order.broker_id, order.value());
            }
            order.status = OrderStatus::Canceled;
            info!("order {} canceled on {}", order.id, self.isin);
        }
        Ok(())
    }

    fn stop_triggered(&self, order: &Order) -> bool {
        self.market_price
            .is_some_and(|market| order.triggered(market))
    }

    fn check_admission(
        &self,
        order: &Order,
        brokers: &BrokerRepository,
        shareholders: &ShareholderRepository,
    ) -> Result<(), RejectionReason> {
        match order.side {
            Side::Buy => {
                let broker = brokers
                    .find_by_id(order.broker_id)
                    .ok_or(RejectionReason::BrokerNotFound)?;
                if !broker.has_enough_credit(order.value()) {
                    return Err(RejectionReason::InsufficientCredit);
                }
            }
            Side::Sell => {
                let shareholder = shareholders
                    .find_by_id(order.shareholder_id)
                    .ok_or(RejectionReason::ShareholderNotFound)?;
                if !shareholder.has_enough_position(&self.isin, order.quantity) {
                    return Err(RejectionReason::InsufficientPosition);
                }
            }
        }
        Ok(())
    }

    /// Run one order through the matcher, apply ledger effects and update
    /// the market price
    fn match_and_settle(
        &mut self,
        order: Order,
        matcher: &Matcher,
        brokers: &BrokerRepository,
        shareholders: &ShareholderRepository,
    ) -> Result<Vec<Trade>, RejectionReason> {
        let aggressor_side = order.side;
        let aggressor_broker = order.broker_id;
        let outcome = matcher
            .execute(order, &mut self.order_book)
            .map_err(|err| match err {
                MatchError::InsufficientExecution { .. } => {
                    RejectionReason::InsufficientExecutionQuantity
                }
            })?;

        self.settle(&outcome, aggressor_side, aggressor_broker, brokers, shareholders);
        if let Some(price) = outcome.last_trade_price() {
            self.market_price = Some(price);
        }
        Ok(outcome.trades())
    }

    /// Apply per-trade ledger effects and the buyer's resting reservation
    ///
    /// Only an aggressing buyer is debited per trade; a resting buyer was
    /// already debited at exactly the trade price when it entered the book.
    fn settle(
        &self,
        outcome: &MatchOutcome,
        aggressor_side: Side,
        aggressor_broker: BrokerId,
        brokers: &BrokerRepository,
        shareholders: &ShareholderRepository,
    ) {
        for fill in &outcome.fills {
            let notional = fill.trade.notional();
            if aggressor_side == Side::Buy {
                debit_broker(brokers, fill.buy_broker, notional);
            }
            credit_broker(brokers, fill.sell_broker, notional);

            match shareholders.find_by_id_mut(fill.buy_shareholder) {
                Some(mut buyer) => buyer.inc_position(self.isin.clone(), fill.trade.quantity),
                None => error!("unknown shareholder {} in settlement", fill.buy_shareholder),
            }
            match shareholders.find_by_id_mut(fill.sell_shareholder) {
                Some(mut seller) => {
                    if !seller.dec_position(&self.isin, fill.trade.quantity) {
                        error!(
                            "shareholder {} position underflow on {}",
                            fill.sell_shareholder, self.isin
                        );
                    }
                }
                None => error!("unknown shareholder {} in settlement", fill.sell_shareholder),
            }
        }

        if aggressor_side == Side::Buy && outcome.rested_quantity > 0 {
            debit_broker(brokers, aggressor_broker, outcome.rested_value);
        }
    }

    /// Drain newly eligible stop orders until a pass activates nothing
    ///
    /// Buy-side extractions drain before sell-side within each pass; every
    /// activated order runs through the normal match path, which may move
    /// the market price and make the next pass activate more.
    fn run_activation(
        &mut self,
        report: &mut ExecutionReport,
        matcher: &Matcher,
        brokers: &BrokerRepository,
        shareholders: &ShareholderRepository,
    ) {
        loop {
            let Some(market) = self.market_price else {
                return;
            };
            let mut batch = self.inactive_order_book.extract_activatable(Side::Buy, market);
            batch.extend(self.inactive_order_book.extract_activatable(Side::Sell, market));
            if batch.is_empty() {
                return;
            }

            for mut stop in batch {
                info!(
                    "stop order {} activated on {} at market {}",
                    stop.id, self.isin, market
                );
                report.activated_orders.push(stop.id);
                // Release the parked reservation; the match path re-debits
                if stop.side == Side::Buy {
                    credit_broker(brokers, stop.broker_id, stop.value());
                }
                stop.status = OrderStatus::New;
                match self.match_and_settle(stop, matcher, brokers, shareholders) {
                    Ok(trades) => report.activation_trades.extend(trades),
                    // Stop orders carry no MEQ, so matching cannot fail
                    Err(reason) => error!("activation failed unexpectedly: {reason}"),
                }
            }
        }
    }
}

fn debit_broker(brokers: &BrokerRepository, id: BrokerId, amount: u64) {
    match brokers.find_by_id_mut(id) {
        Some(mut broker) => {
            if !broker.decrease_credit(amount) {
                error!("broker {id} credit underflow on debit of {amount}");
            }
        }
        None => error!("unknown broker {id} in settlement"),
    }
}

fn credit_broker(brokers: &BrokerRepository, id: BrokerId, amount: u64) {
    match brokers.find_by_id_mut(id) {
        Some(mut broker) => broker.increase_credit(amount),
        None => error!("unknown broker {id} in settlement"),
    }
}
