use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::DiscountType;

#[derive(Debug, Clone)]
pub struct VoucherCreate {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub min_purchase: Decimal,
    pub max_discount: Option<Decimal>,
    pub usage_limit: Option<u32>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub active: bool,
    pub single_use_per_user: bool,
}

#[derive(Debug, Clone, Default)]
pub struct VoucherPatch {
    pub active: Option<bool>,
    pub ends_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<Option<u32>>,
}
