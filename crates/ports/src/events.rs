use serde::{Deserialize, Serialize};

use hermes_core::{OrderId, RequestId, Trade};

use crate::error::RejectionReason;

/// Outbound events, one per terminal outcome of a request, plus one
/// `Trade` per match produced anywhere in an activation cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    OrderAccepted {
        request_id: RequestId,
        order_id: OrderId,
    },
    OrderRejected {
        request_id: RequestId,
        order_id: OrderId,
        errors: Vec<RejectionReason>,
    },
    OrderExecuted {
        request_id: RequestId,
        order_id: OrderId,
        trades: Vec<Trade>,
    },
    OrderUpdated {
        request_id: RequestId,
        order_id: OrderId,
    },
    OrderDeleted {
        request_id: RequestId,
        order_id: OrderId,
    },
    Trade(Trade),
}

impl Event {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Event::OrderAccepted { .. } => "OrderAccepted",
            Event::OrderRejected { .. } => "OrderRejected",
            Event::OrderExecuted { .. } => "OrderExecuted",
            Event::OrderUpdated { .. } => "OrderUpdated",
            Event::OrderDeleted { .. } => "OrderDeleted",
            Event::Trade(_) => "Trade",
        }
    }
}
