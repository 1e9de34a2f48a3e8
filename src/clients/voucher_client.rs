use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::Voucher;
use crate::voucher_actor::{VoucherAction, VoucherActionResult, VoucherCreate, VoucherError, VoucherPatch};

/// Voucher codes are matched case-insensitively and stored upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Client for interacting with the Voucher actor.
#[derive(Clone)]
pub struct VoucherClient {
    inner: ResourceClient<Voucher>,
}

impl_basic_client!(VoucherClient, Voucher, VoucherError, voucher);

impl VoucherClient {
    #[instrument(skip(self))]
    pub async fn create_voucher(&self, params: VoucherCreate) -> Result<String, VoucherError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_voucher(&self, code: &str, patch: VoucherPatch) -> Result<Voucher, VoucherError> {
        debug!("Sending request");
        Ok(self.inner.update(normalize_code(code), patch).await?)
    }

    /// Discount `code` would grant on `subtotal` at `now`. Reads only.
    #[instrument(skip(self))]
    pub async fn evaluate(&self, code: &str, subtotal: Decimal, now: DateTime<Utc>) -> Result<Decimal, VoucherError> {
        let code = normalize_code(code);
        match self.get_voucher(code.clone()).await? {
            Some(voucher) => voucher.evaluate(subtotal, now),
            None => Err(VoucherError::NotFound(code)),
        }
    }

    /// Re-checks eligibility for `user_id` and counts one use in a single actor step.
    #[instrument(skip(self))]
    pub async fn redeem(
        &self,
        code: &str,
        user_id: &str,
        subtotal: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Decimal, VoucherError> {
        debug!("Sending request");
        let action = VoucherAction::Redeem { user_id: user_id.to_string(), subtotal, now };
        match self.inner.perform_action(normalize_code(code), action).await?
        {
            VoucherActionResult::Redeem(discount) => Ok(discount),
            other => Err(VoucherError::ActorCommunicationError(format!("Unexpected result {:?}", other))),
        }
    }

    /// Gives back a use `user_id` took with `redeem`.
    #[instrument(skip(self))]
    pub async fn release(&self, code: &str, user_id: &str) -> Result<(), VoucherError> {
        debug!("Sending request");
        self.inner
            .perform_action(normalize_code(code), VoucherAction::Release { user_id: user_id.to_string() })
            .await
            .map(|_| ())
            .map_err(|e| {
                warn!(error = %e, "Voucher release failed");
                VoucherError::from(e)
            })
    }
}
