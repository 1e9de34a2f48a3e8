use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument};

use super::OrderSystem;
use crate::domain::{DiscountType, UserCreate};
use crate::product_actor::{ProductCreate, ProductError};
use crate::user_actor::UserError;
use crate::voucher_actor::{VoucherCreate, VoucherError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Voucher(#[from] VoucherError),
}

/// Ids created by [`seed_demo_data`].
#[derive(Debug, Clone)]
pub struct DemoData {
    pub user_id: String,
    pub product_ids: Vec<String>,
    pub voucher_code: String,
}

/// One customer, a few products and the `SAVE10` voucher, for local runs.
#[instrument(skip(system))]
pub async fn seed_demo_data(system: &OrderSystem) -> Result<DemoData, SeedError> {
    let user_id = system
        .user_client
        .create_user(UserCreate::new("Alice", "alice@example.com"))
        .await?;

    let mut product_ids = Vec::new();
    for (name, price, stock) in [
        ("Espresso beans 1kg", Decimal::new(2450, 2), 40),
        ("Ceramic mug", Decimal::new(999, 2), 10),
        ("Pour-over kettle", Decimal::new(5900, 2), 5),
    ] {
        product_ids.push(system.product_client.create_product(ProductCreate::new(name, price, stock)).await?);
    }

    let now = Utc::now();
    let voucher_code = system
        .voucher_client
        .create_voucher(VoucherCreate {
            code: "SAVE10".to_string(),
            discount_type: DiscountType::Percentage,
            value: Decimal::new(10, 0),
            min_purchase: Decimal::ZERO,
            max_discount: Some(Decimal::new(500, 2)),
            usage_limit: Some(100),
            starts_at: now,
            ends_at: now + Duration::days(30),
            active: true,
            single_use_per_user: false,
        })
        .await?;

    info!(%user_id, products = product_ids.len(), %voucher_code, "Demo data seeded");
    Ok(DemoData { user_id, product_ids, voucher_code })
}
