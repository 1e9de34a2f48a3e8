use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum VoucherError {
    #[error("Voucher not found: {0}")]
    NotFound(String),
    #[error("Voucher already exists: {0}")]
    AlreadyExists(String),
    #[error("Voucher is not active: {0}")]
    Inactive(String),
    #[error("Voucher {code} requires a minimum purchase of {minimum}, subtotal is {subtotal}")]
    MinimumPurchaseNotMet {
        code: String,
        minimum: Decimal,
        subtotal: Decimal,
    },
    #[error("Voucher usage limit exceeded: {0}")]
    UsageLimitExceeded(String),
    #[error("Voucher {code} was already redeemed by {user_id}")]
    AlreadyRedeemed { code: String, user_id: String },
    #[error("Voucher validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(VoucherError);
