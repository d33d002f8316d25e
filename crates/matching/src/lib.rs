//! Hermes Matching
//!
//! Price/time-priority order books and the matching algorithm. This crate
//! only transforms book state and reports fills; ledger effects are applied
//! by the caller.

mod book;
mod error;
mod inactive;
mod matcher;

pub use book::OrderBook;
pub use error::MatchError;
pub use inactive::InactiveOrderBook;
pub use matcher::{Fill, MatchOutcome, Matcher};
