use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::OrderStatus;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use crate::voucher_actor::VoucherError;

/// Coarse classification surfaced to callers and mapped to HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Persistence,
    Unauthorized,
}

/// Errors that can occur during order placement and lifecycle operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order must contain at least one item")]
    EmptyOrder,
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Invalid return request: {0}")]
    InvalidReturn(String),
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Voucher not found: {0}")]
    VoucherNotFound(String),
    #[error("Product is not active: {0}")]
    ProductInactive(String),
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: u32,
        available: u32,
    },
    #[error("Voucher is not active: {0}")]
    VoucherInactive(String),
    #[error("Voucher {code} requires a minimum purchase of {minimum}, subtotal is {subtotal}")]
    MinimumPurchaseNotMet {
        code: String,
        minimum: Decimal,
        subtotal: Decimal,
    },
    #[error("Voucher usage limit exceeded: {0}")]
    UsageLimitExceeded(String),
    #[error("Voucher {code} was already redeemed by {user_id}")]
    VoucherAlreadyRedeemed { code: String, user_id: String },
    #[error("Cannot {action} order in status {from}")]
    InvalidTransition { from: OrderStatus, action: &'static str },
    #[error("Order placement cancelled")]
    Cancelled,
    #[error("Not allowed to access order: {0}")]
    Unauthorized(String),
    #[error("Order already exists: {0}")]
    AlreadyExists(String),
    #[error("Order persistence failed: {0}")]
    PersistenceFailure(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::EmptyOrder | OrderError::ValidationError(_) | OrderError::InvalidReturn(_) => {
                ErrorKind::Validation
            }
            OrderError::NotFound(_)
            | OrderError::UserNotFound(_)
            | OrderError::ProductNotFound(_)
            | OrderError::VoucherNotFound(_) => ErrorKind::NotFound,
            OrderError::ProductInactive(_)
            | OrderError::InsufficientStock { .. }
            | OrderError::VoucherInactive(_)
            | OrderError::MinimumPurchaseNotMet { .. }
            | OrderError::UsageLimitExceeded(_)
            | OrderError::VoucherAlreadyRedeemed { .. }
            | OrderError::InvalidTransition { .. }
            | OrderError::Cancelled => ErrorKind::Conflict,
            OrderError::Unauthorized(_) => ErrorKind::Unauthorized,
            OrderError::AlreadyExists(_)
            | OrderError::PersistenceFailure(_)
            | OrderError::ActorCommunicationError(_) => ErrorKind::Persistence,
        }
    }
}

crate::impl_from_framework_error!(OrderError);

impl From<ProductError> for OrderError {
    fn from(error: ProductError) -> Self {
        match error {
            ProductError::NotFound(id) => OrderError::ProductNotFound(id),
            ProductError::Inactive(id) => OrderError::ProductInactive(id),
            ProductError::InsufficientStock { product_id, requested, available } => {
                OrderError::InsufficientStock { product_id, requested, available }
            }
            ProductError::InvalidQuantity(quantity) => {
                OrderError::ValidationError(format!("Invalid quantity: {}", quantity))
            }
            ProductError::ValidationError(msg) => OrderError::ValidationError(msg),
            ProductError::AlreadyExists(id) => OrderError::PersistenceFailure(format!("Duplicate product {}", id)),
            ProductError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
        }
    }
}

impl From<VoucherError> for OrderError {
    fn from(error: VoucherError) -> Self {
        match error {
            VoucherError::NotFound(code) => OrderError::VoucherNotFound(code),
            VoucherError::Inactive(code) => OrderError::VoucherInactive(code),
            VoucherError::MinimumPurchaseNotMet { code, minimum, subtotal } => {
                OrderError::MinimumPurchaseNotMet { code, minimum, subtotal }
            }
            VoucherError::UsageLimitExceeded(code) => OrderError::UsageLimitExceeded(code),
            VoucherError::AlreadyRedeemed { code, user_id } => OrderError::VoucherAlreadyRedeemed { code, user_id },
            VoucherError::ValidationError(msg) => OrderError::ValidationError(msg),
            VoucherError::AlreadyExists(code) => OrderError::PersistenceFailure(format!("Duplicate voucher {}", code)),
            VoucherError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
        }
    }
}

impl From<UserError> for OrderError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::NotFound(id) => OrderError::UserNotFound(id),
            UserError::ValidationError(msg) => OrderError::ValidationError(msg),
            UserError::AlreadyExists(id) => OrderError::PersistenceFailure(format!("Duplicate user {}", id)),
            UserError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
        }
    }
}
