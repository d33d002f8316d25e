//! Request entry point
//!
//! `OrderHandler` validates inbound requests, converts them to domain
//! orders, routes them to the owning security and publishes the resulting
//! events. Validation collects every problem with a request rather than
//! stopping at the first, so a rejection names all of them at once.

use std::sync::Arc;

use log::{debug, warn};

use hermes_core::Order;
use hermes_matching::Matcher;
use hermes_ports::{
    DeleteOrderRequest, EnterOrderRequest, EntryKind, Event, EventPublisher, OrderRequest,
    RejectionReason,
};

use crate::repository::{BrokerRepository, SecurityRepository, ShareholderRepository};
use crate::security::ExecutionReport;

pub struct OrderHandler {
    securities: SecurityRepository,
    brokers: BrokerRepository,
    shareholders: ShareholderRepository,
    matcher: Matcher,
    publisher: Arc<dyn EventPublisher>,
}

impl OrderHandler {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            securities: SecurityRepository::new(),
            brokers: BrokerRepository::new(),
            shareholders: ShareholderRepository::new(),
            matcher: Matcher::new(),
            publisher,
        }
    }

    pub fn securities(&self) -> &SecurityRepository {
        &self.securities
    }

    pub fn brokers(&self) -> &BrokerRepository {
        &self.brokers
    }

    pub fn shareholders(&self) -> &ShareholderRepository {
        &self.shareholders
    }

    pub fn handle(&self, request: OrderRequest) {
        match request {
            OrderRequest::Enter(rq) => self.handle_enter_order(rq),
            OrderRequest::Delete(rq) => self.handle_delete_order(rq),
        }
    }

    pub fn handle_enter_order(&self, rq: EnterOrderRequest) {
        let errors = self.validate_enter_order(&rq);
        if !errors.is_empty() {
            warn!(
                "request {} for order {} rejected: {:?}",
                rq.request_id, rq.order_id, errors
            );
            self.publisher.publish(Event::OrderRejected {
                request_id: rq.request_id,
                order_id: rq.order_id,
                errors,
            });
            return;
        }

        let order = order_from_request(&rq);
        // Exclusive guard on the security serializes all activity on this
        // instrument for the duration of the request
        let Some(mut security) = self.securities.find_by_isin_mut(&rq.security_isin) else {
            self.publisher.publish(Event::OrderRejected {
                request_id: rq.request_id,
                order_id: rq.order_id,
                errors: vec![RejectionReason::SecurityNotFound],
            });
            return;
        };
        let result = match rq.kind {
            EntryKind::New => {
                security.submit_order(order, &self.matcher, &self.brokers, &self.shareholders)
            }
            EntryKind::Update => {
                security.update_order(order, &self.matcher, &self.brokers, &self.shareholders)
            }
        };
        drop(security);

        match result {
            Ok(report) => {
                debug!(
                    "request {} accepted: {} own trades, {} activation trades",
                    rq.request_id,
                    report.trades.len(),
                    report.activation_trades.len()
                );
                self.publish_accepted(&rq, &report);
            }
            Err(reason) => {
                warn!(
                    "request {} for order {} rejected: {}",
                    rq.request_id, rq.order_id, reason
                );
                self.publisher.publish(Event::OrderRejected {
                    request_id: rq.request_id,
                    order_id: rq.order_id,
                    errors: vec![reason],
                });
            }
        }
    }

    pub fn handle_delete_order(&self, rq: DeleteOrderRequest) {
        let result = match self.securities.find_by_isin_mut(&rq.security_isin) {
            Some(mut security) => security.delete_order(rq.order_id, rq.side, &self.brokers),
            None => Err(RejectionReason::SecurityNotFound),
        };
        match result {
            Ok(()) => self.publisher.publish(Event::OrderDeleted {
                request_id: rq.request_id,
                order_id: rq.order_id,
            }),
            Err(reason) => {
                warn!(
                    "delete request {} for order {} rejected: {}",
                    rq.request_id, rq.order_id, reason
                );
                self.publisher.publish(Event::OrderRejected {
                    request_id: rq.request_id,
                    order_id: rq.order_id,
                    errors: vec![reason],
                });
            }
        }
    }

    fn publish_accepted(&self, rq: &EnterOrderRequest, report: &ExecutionReport) {
        let acknowledgement = match rq.kind {
            EntryKind::New => Event::OrderAccepted {
                request_id: rq.request_id,
                order_id: rq.order_id,
            },
            EntryKind::Update => Event::OrderUpdated {
                request_id: rq.request_id,
                order_id: rq.order_id,
            },
        };
        self.publisher.publish(acknowledgement);

        if !report.trades.is_empty() {
            self.publisher.publish(Event::OrderExecuted {
                request_id: rq.request_id,
                order_id: rq.order_id,
                trades: report.trades.clone(),
            });
        }
        for trade in report.all_trades() {
            self.publisher.publish(Event::Trade(trade.clone()));
        }
    }

    /// Collect every validation failure in a fixed order
    fn validate_enter_order(&self, rq: &EnterOrderRequest) -> Vec<RejectionReason> {
        let mut errors = Vec::new();
        if rq.quantity <= 0 {
            errors.push(RejectionReason::QuantityNotPositive);
        }
        if rq.price <= 0 {
            errors.push(RejectionReason::PriceNotPositive);
        }
        if rq.stop_price < 0 {
            errors.push(RejectionReason::StopPriceNotPositive);
        }
        if rq.peak_size < 0 || (rq.peak_size > 0 && rq.peak_size >= rq.quantity) {
            errors.push(RejectionReason::InvalidPeakSize);
        }
        if rq.minimum_execution_quantity < 0
            || rq.minimum_execution_quantity > rq.quantity.max(0)
        {
            errors.push(RejectionReason::InvalidMinimumExecutionQuantity);
        }
        if rq.is_stop_order() {
            if rq.peak_size > 0 {
                errors.push(RejectionReason::StopOrderPeakSizeNotZero);
            }
            if rq.minimum_execution_quantity > 0 {
                errors.push(RejectionReason::StopOrderMeqNotZero);
            }
        }
        if !self.securities.contains(&rq.security_isin) {
            errors.push(RejectionReason::SecurityNotFound);
        }
        if !self.brokers.contains(rq.broker_id) {
            errors.push(RejectionReason::BrokerNotFound);
        }
        if !self.shareholders.contains(rq.shareholder_id) {
            errors.push(RejectionReason::ShareholderNotFound);
        }
        errors
    }
}

/// Convert a validated request into a domain order
///
/// Callers must have validated the request first; the casts here assume
/// every numeric field is non-negative.
fn order_from_request(rq: &EnterOrderRequest) -> Order {
    Order::new(
        rq.order_id,
        rq.security_isin.clone(),
        rq.side,
        rq.quantity as u64,
        rq.price as u64,
        rq.broker_id,
        rq.shareholder_id,
        rq.entry_time,
        rq.peak_size as u64,
        rq.minimum_execution_quantity as u64,
        rq.stop_price as u64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::{Broker, Shareholder, Side};
    use hermes_ports::RecordingPublisher;

    use crate::security::Security;

    const ISIN: &str = "ABC";

    fn handler() -> (OrderHandler, Arc<RecordingPublisher>) {
        let publisher = Arc::new(RecordingPublisher::new());
        let handler = OrderHandler::new(publisher.clone());
        handler.securities().add(Security::new(ISIN));
        handler.brokers().add(Broker::new(0, 10_000_000));
        let mut shareholder = Shareholder::new(1);
        shareholder.inc_position(ISIN, 100_000);
        handler.shareholders().add(shareholder);
        (handler, publisher)
    }

    #[test]
    fn invalid_fields_are_all_reported_together() {
        let (handler, publisher) = handler();
        let rq = EnterOrderRequest::new_order(1, ISIN, 11, Side::Buy, -1, 0, 0, 1);
        handler.handle_enter_order(rq);
        match publisher.last() {
            Some(Event::OrderRejected { errors, .. }) => {
                assert!(errors.contains(&RejectionReason::QuantityNotPositive));
                assert!(errors.contains(&RejectionReason::PriceNotPositive));
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn unknown_references_are_reported() {
        let (handler, publisher) = handler();
        let rq = EnterOrderRequest::new_order(1, "XYZ", 11, Side::Buy, 10, 100, 9, 9);
        handler.handle_enter_order(rq);
        match publisher.last() {
            Some(Event::OrderRejected { errors, .. }) => {
                assert_eq!(
                    errors,
                    vec![
                        RejectionReason::SecurityNotFound,
                        RejectionReason::BrokerNotFound,
                        RejectionReason::ShareholderNotFound,
                    ]
                );
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn stop_orders_cannot_carry_peak_or_minimum_execution() {
        let (handler, publisher) = handler();
        let rq = EnterOrderRequest::new_order(1, ISIN, 11, Side::Buy, 100, 100, 0, 1)
            .with_stop_price(120)
            .with_peak_size(10)
            .with_minimum_execution(10);
        handler.handle_enter_order(rq);
        match publisher.last() {
            Some(Event::OrderRejected { errors, .. }) => {
                assert!(errors.contains(&RejectionReason::StopOrderPeakSizeNotZero));
                assert!(errors.contains(&RejectionReason::StopOrderMeqNotZero));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn accepted_order_publishes_acknowledgement_only_when_nothing_trades() {
        let (handler, publisher) = handler();
        let rq = EnterOrderRequest::new_order(1, ISIN, 11, Side::Buy, 10, 100, 0, 1);
        handler.handle_enter_order(rq);
        let events = publisher.take();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::OrderAccepted { request_id: 1, order_id: 11 }));
    }

    #[test]
    fn execution_publishes_accepted_then_executed_then_trades() {
        let (handler, publisher) = handler();
        handler.handle_enter_order(EnterOrderRequest::new_order(
            1,
            ISIN,
            11,
            Side::Sell,
            100,
            100,
            0,
            1,
        ));
        publisher.take();

        handler.handle_enter_order(EnterOrderRequest::new_order(
            2,
            ISIN,
            12,
            Side::Buy,
            40,
            100,
            0,
            1,
        ));
        let events = publisher.take();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::OrderAccepted { request_id: 2, .. }));
        match &events[1] {
            Event::OrderExecuted { trades, .. } => {
                assert_eq!(trades.len(), 1);
                assert_eq!(trades[0].quantity, 40);
                assert_eq!(trades[0].price, 100);
            }
            other => panic!("expected execution, got {other:?}"),
        }
        assert!(matches!(events[2], Event::Trade(_)));
    }

    #[test]
    fn delete_of_missing_order_is_rejected() {
        let (handler, publisher) = handler();
        handler.handle_delete_order(DeleteOrderRequest::new(1, ISIN, 99, Side::Buy));
        match publisher.last() {
            Some(Event::OrderRejected { errors, .. }) => {
                assert_eq!(errors, vec![RejectionReason::OrderNotFound]);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
