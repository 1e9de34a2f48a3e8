use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::round_money;
use crate::voucher_actor::VoucherError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    FixedAmount,
}

/// A promotional code redeemable against an order subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub min_purchase: Decimal,
    pub max_discount: Option<Decimal>,
    pub usage_limit: Option<u32>,
    pub usage_count: u32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub active: bool,
    /// Each user may redeem the voucher at most once.
    pub single_use_per_user: bool,
    /// Users holding a redemption; only tracked for single-use vouchers.
    #[serde(default)]
    pub redeemed_by: BTreeSet<String>,
}

impl Voucher {
    /// Checks eligibility of this voucher for `subtotal` at `now` and returns
    /// the discount it grants. Pure: never touches `usage_count`.
    pub fn evaluate(&self, subtotal: Decimal, now: DateTime<Utc>) -> Result<Decimal, VoucherError> {
        if !self.is_live(now) {
            return Err(VoucherError::Inactive(self.code.clone()));
        }
        if subtotal < self.min_purchase {
            return Err(VoucherError::MinimumPurchaseNotMet {
                code: self.code.clone(),
                minimum: self.min_purchase,
                subtotal,
            });
        }
        if self.is_exhausted() {
            return Err(VoucherError::UsageLimitExceeded(self.code.clone()));
        }
        Ok(self.discount_for(subtotal))
    }

    /// `evaluate` plus the per-user rule for single-use vouchers.
    pub fn evaluate_for(&self, user_id: &str, subtotal: Decimal, now: DateTime<Utc>) -> Result<Decimal, VoucherError> {
        let discount = self.evaluate(subtotal, now)?;
        if self.single_use_per_user && self.redeemed_by.contains(user_id) {
            return Err(VoucherError::AlreadyRedeemed {
                code: self.code.clone(),
                user_id: user_id.to_string(),
            });
        }
        Ok(discount)
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.active && self.starts_at <= now && now <= self.ends_at
    }

    pub fn is_exhausted(&self) -> bool {
        self.usage_limit.is_some_and(|limit| self.usage_count >= limit)
    }

    /// Discount amount before eligibility checks, never above `subtotal`.
    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        let raw = match self.discount_type {
            DiscountType::Percentage => {
                let discount = subtotal * self.value / Decimal::ONE_HUNDRED;
                match self.max_discount {
                    Some(cap) => discount.min(cap),
                    None => discount,
                }
            }
            DiscountType::FixedAmount => self.value.min(subtotal),
        };
        round_money(raw.min(subtotal).max(Decimal::ZERO))
    }
}
