//! Hermes Ports
//!
//! Boundary definitions for the Hermes matching engine: inbound request
//! types, outbound events, the publisher capability and the rejection
//! vocabulary. The engine core never knows about transport, serialization
//! or queue durability — those live behind these types.

mod error;
mod events;
mod publisher;
mod requests;

pub use error::RejectionReason;
pub use events::Event;
pub use publisher::{EventPublisher, RecordingPublisher};
pub use requests::{DeleteOrderRequest, EnterOrderRequest, EntryKind, OrderRequest};
