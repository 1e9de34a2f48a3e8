//! Fire-and-forget order notifications.
//!
//! Placement and lifecycle code never waits on delivery: a full or closed
//! channel is logged and the event dropped.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use crate::domain::OrderStatus;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrderEvent {
    OrderCreated { order_id: String, user_id: String },
    /// Negative for reservations, positive for restocks.
    StockAdjusted { product_id: String, delta: i64 },
    StatusChanged {
        order_id: String,
        user_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },
}

#[derive(Clone)]
pub struct NotificationClient {
    sender: mpsc::Sender<OrderEvent>,
}

impl NotificationClient {
    pub fn new(sender: mpsc::Sender<OrderEvent>) -> Self {
        Self { sender }
    }

    pub fn notify(&self, event: OrderEvent) {
        if let Err(e) = self.sender.try_send(event) {
            warn!(error = %e, "Dropping notification");
        }
    }
}

/// Sink for order events. Delivery to customers is out of scope, so each
/// event is recorded in the log.
pub struct NotificationService {
    receiver: mpsc::Receiver<OrderEvent>,
}

impl NotificationService {
    pub fn new(buffer_size: usize) -> (Self, NotificationClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver }, NotificationClient::new(sender))
    }

    #[instrument(name = "notification_service", skip(self))]
    pub async fn run(mut self) {
        info!("Notification service starting");
        while let Some(event) = self.receiver.recv().await {
            match &event {
                OrderEvent::OrderCreated { order_id, user_id } => {
                    info!(%order_id, %user_id, "Order created")
                }
                OrderEvent::StockAdjusted { product_id, delta } => {
                    info!(%product_id, delta, "Stock adjusted")
                }
                OrderEvent::StatusChanged { order_id, from, to, .. } => {
                    info!(%order_id, %from, %to, "Order status changed")
                }
            }
        }
        info!("Notification service stopped");
    }
}
