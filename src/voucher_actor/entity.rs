use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::{DiscountType, Voucher};
use super::actions::{VoucherAction, VoucherActionResult};
use super::dtos::{VoucherCreate, VoucherPatch};
use super::error::VoucherError;

impl Entity for Voucher {
    type Id = String;
    type CreateParams = VoucherCreate;
    type Patch = VoucherPatch;
    type Action = VoucherAction;
    type ActionResult = VoucherActionResult;
    type Error = VoucherError;

    /// Creates a voucher keyed by its code.
    ///
    /// # Errors
    /// Rejects blank codes, non-positive values, percentages above 100,
    /// negative minimums or caps, and windows that end before they start.
    fn from_create_params(code: String, params: VoucherCreate) -> Result<Self, VoucherError> {
        let invalid = |msg: &str| Err(VoucherError::ValidationError(format!("{}: {}", code, msg)));

        if code.trim().is_empty() {
            return Err(VoucherError::ValidationError("Voucher code required".to_string()));
        }
        if params.value <= Decimal::ZERO {
            return invalid("value must be positive");
        }
        if params.discount_type == DiscountType::Percentage && params.value > Decimal::ONE_HUNDRED {
            return invalid("percentage above 100");
        }
        if params.min_purchase.is_sign_negative() || params.max_discount.is_some_and(|cap| cap.is_sign_negative()) {
            return invalid("amounts must not be negative");
        }
        if params.ends_at < params.starts_at {
            return invalid("validity window ends before it starts");
        }

        Ok(Self {
            code,
            discount_type: params.discount_type,
            value: params.value,
            min_purchase: params.min_purchase,
            max_discount: params.max_discount,
            usage_limit: params.usage_limit,
            usage_count: 0,
            starts_at: params.starts_at,
            ends_at: params.ends_at,
            active: params.active,
            single_use_per_user: params.single_use_per_user,
            redeemed_by: BTreeSet::new(),
        })
    }

    fn on_update(&mut self, patch: VoucherPatch) -> Result<(), VoucherError> {
        if let Some(active) = patch.active {
            self.active = active;
        }
        if let Some(ends_at) = patch.ends_at {
            if ends_at < self.starts_at {
                return Err(VoucherError::ValidationError(format!(
                    "{}: validity window ends before it starts",
                    self.code
                )));
            }
            self.ends_at = ends_at;
        }
        if let Some(usage_limit) = patch.usage_limit {
            if let Some(limit) = usage_limit.filter(|limit| *limit < self.usage_count) {
                return Err(VoucherError::ValidationError(format!(
                    "{}: usage limit {} is below current usage {}",
                    self.code, limit, self.usage_count
                )));
            }
            self.usage_limit = usage_limit;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: VoucherAction) -> Result<VoucherActionResult, VoucherError> {
        match action {
            VoucherAction::Redeem { user_id, subtotal, now } => {
                let discount = self.evaluate_for(&user_id, subtotal, now)?;
                self.usage_count += 1;
                if self.single_use_per_user {
                    self.redeemed_by.insert(user_id);
                }
                Ok(VoucherActionResult::Redeem(discount))
            }
            VoucherAction::Release { user_id } => {
                self.usage_count = self.usage_count.saturating_sub(1);
                self.redeemed_by.remove(&user_id);
                Ok(VoucherActionResult::Release(self.usage_count))
            }
        }
    }
}
