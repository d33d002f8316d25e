use chrono::{DateTime, Utc};

/// Price in integer ticks
/// Future: could become a newtype with validation (tick size)
pub type Price = u64;

/// Quantity in whole shares
pub type Quantity = u64;

/// Order identifier, assigned by the submitter, unique per security
pub type OrderId = u64;

/// Request correlation identifier
pub type RequestId = u64;

/// Broker identifier
pub type BrokerId = u64;

/// Shareholder identifier
pub type ShareholderId = u64;

/// Security identifier (ISIN)
pub type Isin = String;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;
