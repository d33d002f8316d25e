//! Async order entry service
//!
//! Requests arrive on an unbounded mpsc channel and are processed one at a
//! time by a spawned loop owning the handler; events leave through a
//! channel-backed publisher. Processing inside the loop is synchronous, so
//! requests are applied in arrival order.

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use hermes_ports::{
    DeleteOrderRequest, EnterOrderRequest, Event, EventPublisher, OrderRequest,
};

use crate::error::{EngineError, Result};
use crate::handler::OrderHandler;

/// Publishes events onto an mpsc channel for an out-of-process consumer
pub struct ChannelPublisher {
    sender: UnboundedSender<Event>,
}

impl ChannelPublisher {
    pub fn new() -> (Arc<Self>, UnboundedReceiver<Event>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { sender }), receiver)
    }
}

impl EventPublisher for ChannelPublisher {
    fn publish(&self, event: Event) {
        debug!("publishing {}", event.kind());
        if self.sender.send(event).is_err() {
            debug!("event receiver dropped, event discarded");
        }
    }
}

/// Sender side of a running order entry loop
pub struct EngineHandle {
    sender: UnboundedSender<OrderRequest>,
    join: JoinHandle<()>,
}

impl EngineHandle {
    pub fn submit(&self, request: OrderRequest) -> Result<()> {
        self.sender
            .send(request)
            .map_err(|_| EngineError::ChannelClosed)
    }

    pub fn enter_order(&self, request: EnterOrderRequest) -> Result<()> {
        self.submit(OrderRequest::Enter(request))
    }

    pub fn delete_order(&self, request: DeleteOrderRequest) -> Result<()> {
        self.submit(OrderRequest::Delete(request))
    }

    /// Close the request channel and wait for in-flight requests to drain
    pub async fn shutdown(self) {
        drop(self.sender);
        let _ = self.join.await;
    }
}

/// Spawns the order entry loop
pub struct OrderEntryService;

impl OrderEntryService {
    /// Start processing requests against an already-configured handler
    pub fn start(handler: OrderHandler) -> EngineHandle {
        let (sender, mut receiver) = mpsc::unbounded_channel::<OrderRequest>();
        let join = tokio::spawn(async move {
            info!("order entry loop started");
            while let Some(request) = receiver.recv().await {
                handler.handle(request);
            }
            info!("request channel closed, order entry loop stopping");
        });
        EngineHandle { sender, join }
    }
}
