use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub active: bool,
}

/// Read-only view returned by catalog lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub price: Decimal,
    pub stock: u32,
    pub active: bool,
}

impl From<&Product> for CatalogEntry {
    fn from(product: &Product) -> Self {
        Self {
            price: product.price,
            stock: product.stock,
            active: product.active,
        }
    }
}

/// A quantity of one product, as reserved or released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    pub product_id: String,
    pub quantity: u32,
}

impl StockLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Outcome of reserving one line: the unit price observed at the moment the
/// stock was taken, which becomes the order item's price snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservedLine {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}
