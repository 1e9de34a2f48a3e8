use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{OrderItem, ShippingInfo};

/// Fully priced order, ready to be persisted in one step.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub discount: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub voucher_code: Option<String>,
    pub shipping: ShippingInfo,
    pub placed_at: DateTime<Utc>,
}
