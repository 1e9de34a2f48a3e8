use rust_decimal::{Decimal, RoundingStrategy};

/// Minor-unit precision of every stored amount.
pub const MONEY_SCALE: u32 = 2;

/// Rounds to cents, half away from zero (half-up for the non-negative
/// amounts this crate stores).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

pub fn line_total(quantity: u32, unit_price: Decimal) -> Decimal {
    round_money(Decimal::from(quantity) * unit_price)
}
