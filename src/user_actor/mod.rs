//! User lookups backing the identity checks of order placement.

pub mod entity;
pub mod error;

pub use error::*;
