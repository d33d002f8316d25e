//! Hermes Engine
//!
//! Ties the domain together: repositories for securities, brokers and
//! shareholders, per-security orchestration (admission, matching,
//! settlement, stop-order activation) and the async order entry service
//! that feeds requests in and publishes events out.

pub mod error;
pub mod handler;
pub mod repository;
pub mod security;
pub mod service;

pub use error::{EngineError, Result};
pub use handler::OrderHandler;
pub use repository::{BrokerRepository, SecurityRepository, ShareholderRepository};
pub use security::{ExecutionReport, Security};
pub use service::{ChannelPublisher, EngineHandle, OrderEntryService};
