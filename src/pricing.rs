//! Tax and shipping for a priced order.

use rust_decimal::Decimal;

use crate::domain::{round_money, ShippingInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub tax: Decimal,
    pub shipping_cost: Decimal,
}

impl PriceQuote {
    pub const ZERO: PriceQuote = PriceQuote {
        tax: Decimal::ZERO,
        shipping_cost: Decimal::ZERO,
    };
}

/// Computes tax and shipping once the subtotal, discount and destination are known.
pub trait PricingPolicy: Send + Sync {
    fn quote(&self, subtotal: Decimal, discount: Decimal, shipping: &ShippingInfo) -> PriceQuote;
}

/// No tax, free shipping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPricing;

impl PricingPolicy for ZeroPricing {
    fn quote(&self, _subtotal: Decimal, _discount: Decimal, _shipping: &ShippingInfo) -> PriceQuote {
        PriceQuote::ZERO
    }
}

/// Tax on the discounted subtotal plus one flat shipping fee, waived at or
/// above `free_shipping_threshold`. The destination does not matter.
#[derive(Debug, Clone, Copy)]
pub struct FlatRatePricing {
    pub tax_rate: Decimal,
    pub shipping_cost: Decimal,
    pub free_shipping_threshold: Option<Decimal>,
}

impl PricingPolicy for FlatRatePricing {
    fn quote(&self, subtotal: Decimal, discount: Decimal, _shipping: &ShippingInfo) -> PriceQuote {
        let taxable = (subtotal - discount).max(Decimal::ZERO);
        let shipping_cost = match self.free_shipping_threshold {
            Some(threshold) if taxable >= threshold => Decimal::ZERO,
            _ => self.shipping_cost,
        };
        PriceQuote {
            tax: round_money(taxable * self.tax_rate),
            shipping_cost,
        }
    }
}
