//! Runtime configuration from `ORDERS_*` environment variables.

use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::pricing::{FlatRatePricing, PricingPolicy, ZeroPricing};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key}: {message} (got '{value}')")]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
    #[error("{key} must be positive")]
    NotPositive { key: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub mailbox_size: usize,
    pub notification_buffer: usize,
    pub log_filter: String,
    pub tax_rate: Decimal,
    pub shipping_cost: Decimal,
    pub free_shipping_threshold: Option<Decimal>,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            mailbox_size: 32,
            notification_buffer: 256,
            log_filter: "info".to_string(),
            tax_rate: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            free_shipping_threshold: None,
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Unset variables keep their defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` for values that do not parse or are out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            bind_addr: parse_or(&lookup, "ORDERS_BIND_ADDR", defaults.bind_addr)?,
            mailbox_size: parse_or(&lookup, "ORDERS_MAILBOX_SIZE", defaults.mailbox_size)?,
            notification_buffer: parse_or(&lookup, "ORDERS_NOTIFICATION_BUFFER", defaults.notification_buffer)?,
            log_filter: lookup("ORDERS_LOG").unwrap_or(defaults.log_filter),
            tax_rate: parse_or(&lookup, "ORDERS_TAX_RATE", defaults.tax_rate)?,
            shipping_cost: parse_or(&lookup, "ORDERS_SHIPPING_COST", defaults.shipping_cost)?,
            free_shipping_threshold: match lookup("ORDERS_FREE_SHIPPING_THRESHOLD") {
                Some(raw) => Some(parse("ORDERS_FREE_SHIPPING_THRESHOLD", raw)?),
                None => None,
            },
            seed_demo_data: parse_or(&lookup, "ORDERS_SEED_DEMO", defaults.seed_demo_data)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mailbox_size == 0 {
            return Err(ConfigError::NotPositive { key: "ORDERS_MAILBOX_SIZE" });
        }
        if self.notification_buffer == 0 {
            return Err(ConfigError::NotPositive { key: "ORDERS_NOTIFICATION_BUFFER" });
        }
        for (key, amount) in [("ORDERS_TAX_RATE", self.tax_rate), ("ORDERS_SHIPPING_COST", self.shipping_cost)] {
            if amount.is_sign_negative() {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: amount.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Flat-rate pricing when any tax or shipping is configured, else none.
    pub fn pricing(&self) -> Arc<dyn PricingPolicy> {
        if self.tax_rate.is_zero() && self.shipping_cost.is_zero() {
            Arc::new(ZeroPricing)
        } else {
            Arc::new(FlatRatePricing {
                tax_rate: self.tax_rate,
                shipping_cost: self.shipping_cost,
                free_shipping_threshold: self.free_shipping_threshold,
            })
        }
    }
}

fn parse<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        message: e.to_string(),
        value: raw.clone(),
    })
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => parse(key, raw),
        None => Ok(default),
    }
}
