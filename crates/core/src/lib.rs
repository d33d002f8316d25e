//! Hermes Core Domain
//!
//! Pure domain types for the Hermes matching engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod accounts;
pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use accounts::{Broker, Shareholder};
pub use entities::{Order, OrderStatus, Side, Trade, TradeId};
pub use values::{
    BrokerId, Isin, OrderId, Price, Quantity, RequestId, ShareholderId, Timestamp,
};
