use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every rule a request can violate
///
/// A rejection event carries the complete set of violated rules, not just
/// the first one found.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    #[error("order quantity is not positive")]
    QuantityNotPositive,

    #[error("order price is not positive")]
    PriceNotPositive,

    #[error("stop price is not positive")]
    StopPriceNotPositive,

    #[error("stop limit order cannot have a peak size")]
    StopOrderPeakSizeNotZero,

    #[error("stop limit order cannot have a minimum execution quantity")]
    StopOrderMeqNotZero,

    #[error("peak size must be smaller than the total quantity")]
    InvalidPeakSize,

    #[error("minimum execution quantity cannot exceed the order quantity")]
    InvalidMinimumExecutionQuantity,

    #[error("order id is already in use")]
    DuplicateOrderId,

    #[error("buyer does not have enough credit")]
    InsufficientCredit,

    #[error("seller does not have enough positions")]
    InsufficientPosition,

    #[error("minimum execution quantity cannot be met")]
    InsufficientExecutionQuantity,

    #[error("order not found")]
    OrderNotFound,

    #[error("security not found")]
    SecurityNotFound,

    #[error("broker not found")]
    BrokerNotFound,

    #[error("shareholder not found")]
    ShareholderNotFound,
}
