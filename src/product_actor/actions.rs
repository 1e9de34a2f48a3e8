use rust_decimal::Decimal;

/// Custom actions for Product entities.
///
/// These actions represent domain-specific operations that can be performed
/// on a product beyond standard CRUD operations.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Takes a quantity out of stock.
    ///
    /// # Errors
    /// Fails if the product is inactive, the quantity is zero, or the
    /// requested amount exceeds available stock.
    Reserve(u32),
    /// Puts a previously reserved quantity back into stock.
    Release(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Price at the moment of reservation and the stock left afterwards
    Reserve { unit_price: Decimal, remaining: u32 },
    /// Stock level after the release
    Release(u32),
}
