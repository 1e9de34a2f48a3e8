use chrono::{DateTime, Utc};

use crate::domain::{LifecycleEvent, Order, OrderLine, OrderStatus, PaymentMethod, ReturnReason, StockLine};

/// Lifecycle actions. Each one is a single state-machine step; timestamps
/// are supplied by the caller.
#[derive(Debug, Clone)]
pub enum OrderAction {
    MarkPaid { method: PaymentMethod, at: DateTime<Utc> },
    MarkShipped { tracking_number: Option<String>, at: DateTime<Utc> },
    MarkDelivered { at: DateTime<Utc> },
    Cancel { at: DateTime<Utc> },
    RequestReturn {
        items: Vec<OrderLine>,
        reason: ReturnReason,
        description: Option<String>,
        at: DateTime<Utc>,
    },
    ApproveReturn { at: DateTime<Utc> },
    RejectReturn { at: DateTime<Utc> },
    CompleteRefund { at: DateTime<Utc> },
}

impl OrderAction {
    pub fn event(&self) -> LifecycleEvent {
        match self {
            OrderAction::MarkPaid { .. } => LifecycleEvent::Pay,
            OrderAction::MarkShipped { .. } => LifecycleEvent::Ship,
            OrderAction::MarkDelivered { .. } => LifecycleEvent::Deliver,
            OrderAction::Cancel { .. } => LifecycleEvent::Cancel,
            OrderAction::RequestReturn { .. } => LifecycleEvent::RequestReturn,
            OrderAction::ApproveReturn { .. } => LifecycleEvent::ApproveReturn,
            OrderAction::RejectReturn { .. } => LifecycleEvent::RejectReturn,
            OrderAction::CompleteRefund { .. } => LifecycleEvent::CompleteRefund,
        }
    }

    /// Customers may pay for, cancel and return their own orders; the
    /// fulfilment and refund steps belong to staff.
    pub fn allowed_for_customer(&self) -> bool {
        matches!(
            self,
            OrderAction::MarkPaid { .. } | OrderAction::Cancel { .. } | OrderAction::RequestReturn { .. }
        )
    }
}

/// Result of every lifecycle action: the updated order plus the stock the
/// caller must put back into the catalog.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub previous: OrderStatus,
    pub order: Order,
    pub restock: Vec<StockLine>,
}
