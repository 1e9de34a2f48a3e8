use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::Product;
use super::actions::{ProductAction, ProductActionResult};
use super::dtos::{ProductCreate, ProductPatch};
use super::error::ProductError;

fn validate_price(price: Decimal) -> Result<Decimal, ProductError> {
    if price.is_sign_negative() {
        return Err(ProductError::ValidationError(format!("Price must not be negative: {}", price)));
    }
    Ok(price)
}

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Unique identifier for the product
    /// * `params` - Name, price, initial stock and active flag
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        Ok(Self {
            id,
            name: params.name,
            price: validate_price(params.price)?,
            stock: params.stock,
            active: params.active,
        })
    }

    /// Catalog maintenance. Orders already placed keep their price snapshot.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = validate_price(price)?;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Actions
    /// - `Reserve(amount)`: Decrements stock by the specified amount
    /// - `Release(amount)`: Increments stock by the specified amount
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::Reserve(amount) => {
                if !self.active {
                    return Err(ProductError::Inactive(self.id.clone()));
                }
                if amount == 0 {
                    return Err(ProductError::InvalidQuantity(amount));
                }
                if amount > self.stock {
                    return Err(ProductError::InsufficientStock {
                        product_id: self.id.clone(),
                        requested: amount,
                        available: self.stock,
                    });
                }
                self.stock -= amount;
                Ok(ProductActionResult::Reserve {
                    unit_price: self.price,
                    remaining: self.stock,
                })
            }
            ProductAction::Release(amount) => {
                self.stock = self.stock.checked_add(amount).ok_or_else(|| {
                    ProductError::ValidationError(format!("Stock overflow releasing {} units", amount))
                })?;
                Ok(ProductActionResult::Release(self.stock))
            }
        }
    }
}
