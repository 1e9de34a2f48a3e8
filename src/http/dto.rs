//! Request bodies for the order endpoints. Responses serialize the order
//! aggregate directly.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{OrderLine, PaymentMethod, ReturnReason, ShippingInfo};
use crate::order_actor::OrderAction;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Staff may place orders on behalf of a customer; customers leave it out.
    pub user_id: Option<String>,
    pub items: Vec<OrderLine>,
    pub voucher_code: Option<String>,
    pub shipping: ShippingInfo,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub user_id: Option<String>,
}

/// Body of `PUT /orders/{id}/status`.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StatusUpdate {
    MarkPaid {
        method: PaymentMethod,
    },
    MarkShipped {
        #[serde(default)]
        tracking_number: Option<String>,
    },
    MarkDelivered,
    Cancel,
    RequestReturn {
        items: Vec<OrderLine>,
        reason: ReturnReason,
        #[serde(default)]
        description: Option<String>,
    },
    ApproveReturn,
    RejectReturn,
    CompleteRefund,
}

impl StatusUpdate {
    pub fn into_action(self, at: DateTime<Utc>) -> OrderAction {
        match self {
            StatusUpdate::MarkPaid { method } => OrderAction::MarkPaid { method, at },
            StatusUpdate::MarkShipped { tracking_number } => OrderAction::MarkShipped { tracking_number, at },
            StatusUpdate::MarkDelivered => OrderAction::MarkDelivered { at },
            StatusUpdate::Cancel => OrderAction::Cancel { at },
            StatusUpdate::RequestReturn { items, reason, description } => OrderAction::RequestReturn {
                items,
                reason,
                description,
                at,
            },
            StatusUpdate::ApproveReturn => OrderAction::ApproveReturn { at },
            StatusUpdate::RejectReturn => OrderAction::RejectReturn { at },
            StatusUpdate::CompleteRefund => OrderAction::CompleteRefund { at },
        }
    }
}
