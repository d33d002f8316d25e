//! Inbound request types
//!
//! Numeric fields are signed on the wire so that non-positive values can be
//! carried in and rejected; the engine converts to unsigned domain values
//! only after validation.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use hermes_core::{BrokerId, Isin, OrderId, RequestId, ShareholderId, Side, Timestamp};

/// Whether an enter-order request creates a new order or replaces an
/// existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    New,
    Update,
}

/// Order entry request (create or update)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnterOrderRequest {
    pub request_id: RequestId,
    pub security_isin: Isin,
    pub order_id: OrderId,
    pub entry_time: Timestamp,
    pub side: Side,
    pub quantity: i64,
    pub price: i64,
    pub broker_id: BrokerId,
    pub shareholder_id: ShareholderId,
    /// Iceberg peak; zero or absent for a fully displayed order
    #[serde(default)]
    pub peak_size: i64,
    /// Minimum execution quantity; zero or absent for no constraint
    #[serde(default)]
    pub minimum_execution_quantity: i64,
    /// Stop trigger; a positive value marks a stop-limit order
    #[serde(default)]
    pub stop_price: i64,
    pub kind: EntryKind,
}

impl EnterOrderRequest {
    #[allow(clippy::too_many_arguments)]
    fn request(
        kind: EntryKind,
        request_id: RequestId,
        security_isin: impl Into<Isin>,
        order_id: OrderId,
        side: Side,
        quantity: i64,
        price: i64,
        broker_id: BrokerId,
        shareholder_id: ShareholderId,
    ) -> Self {
        Self {
            request_id,
            security_isin: security_isin.into(),
            order_id,
            entry_time: Utc::now(),
            side,
            quantity,
            price,
            broker_id,
            shareholder_id,
            peak_size: 0,
            minimum_execution_quantity: 0,
            stop_price: 0,
            kind,
        }
    }

    /// Create a new-order request with no optional fields set
    #[allow(clippy::too_many_arguments)]
    pub fn new_order(
        request_id: RequestId,
        security_isin: impl Into<Isin>,
        order_id: OrderId,
        side: Side,
        quantity: i64,
        price: i64,
        broker_id: BrokerId,
        shareholder_id: ShareholderId,
    ) -> Self {
        Self::request(
            EntryKind::New,
            request_id,
            security_isin,
            order_id,
            side,
            quantity,
            price,
            broker_id,
            shareholder_id,
        )
    }

    /// Create an update request replacing the order with this `order_id`
    #[allow(clippy::too_many_arguments)]
    pub fn update_order(
        request_id: RequestId,
        security_isin: impl Into<Isin>,
        order_id: OrderId,
        side: Side,
        quantity: i64,
        price: i64,
        broker_id: BrokerId,
        shareholder_id: ShareholderId,
    ) -> Self {
        Self::request(
            EntryKind::Update,
            request_id,
            security_isin,
            order_id,
            side,
            quantity,
            price,
            broker_id,
            shareholder_id,
        )
    }

    pub fn with_peak_size(mut self, peak_size: i64) -> Self {
        self.peak_size = peak_size;
        self
    }

    pub fn with_minimum_execution(mut self, minimum_execution_quantity: i64) -> Self {
        self.minimum_execution_quantity = minimum_execution_quantity;
        self
    }

    pub fn with_stop_price(mut self, stop_price: i64) -> Self {
        self.stop_price = stop_price;
        self
    }

    pub fn with_entry_time(mut self, entry_time: Timestamp) -> Self {
        self.entry_time = entry_time;
        self
    }

    /// A request with a positive stop price is a stop-limit order
    pub fn is_stop_order(&self) -> bool {
        self.stop_price > 0
    }
}

/// Order deletion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteOrderRequest {
    pub request_id: RequestId,
    pub security_isin: Isin,
    pub order_id: OrderId,
    pub side: Side,
}

impl DeleteOrderRequest {
    pub fn new(
        request_id: RequestId,
        security_isin: impl Into<Isin>,
        order_id: OrderId,
        side: Side,
    ) -> Self {
        Self {
            request_id,
            security_isin: security_isin.into(),
            order_id,
            side,
        }
    }
}

/// Any inbound request, as carried on the request channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderRequest {
    Enter(EnterOrderRequest),
    Delete(DeleteOrderRequest),
}
