//! Order placement service built on one single-writer actor per resource.
//!
//! Stock reservation, voucher redemption and order persistence each run
//! inside their own actor, so every read-check-write on a product, voucher
//! or order is serialized without locks.

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod http;
pub mod notifications;
pub mod order_actor;
pub mod pricing;
pub mod product_actor;
pub mod user_actor;
pub mod voucher_actor;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;
