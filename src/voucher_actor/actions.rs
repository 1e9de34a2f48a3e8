use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub enum VoucherAction {
    /// Re-checks eligibility and bumps `usage_count` by one in the same step.
    /// Single-use vouchers also record `user_id` as a redeemer.
    Redeem { user_id: String, subtotal: Decimal, now: DateTime<Utc> },
    /// Gives back the redemption `user_id` took after its order failed.
    Release { user_id: String },
}

/// Results from VoucherActions - variants match 1:1 with VoucherAction
#[derive(Debug, Clone, PartialEq)]
pub enum VoucherActionResult {
    /// Discount granted by this redemption
    Redeem(Decimal),
    /// Usage count after the release
    Release(u32),
}
