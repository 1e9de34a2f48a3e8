//! Typed front doors to the actors. The order client also owns the
//! placement workflow and the lifecycle operations.

#[macro_use]
mod macros;
mod order_client;
mod product_client;
mod user_client;
mod voucher_client;

pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
pub use voucher_client::*;
