//! Final price calculation.

use crate::domain::foundation::{Discount, Money};

/// Applies `discount` to `base`, rounding half-up to the centavo.
///
/// `final = base × (100 − discount) / 100`. Both inputs are already
/// validated value objects, so this cannot fail.
pub fn final_price(base: Money, discount: Discount) -> Money {
    let numerator = i128::from(base.cents()) * i128::from(discount.remaining_percent());
    let cents = (numerator + 50) / 100;
    // The result never exceeds `base`, so it is always a valid amount.
    Money::from_cents(cents as i64).unwrap_or(base)
}

/// Amount taken off `base` by `discount`.
pub fn discount_amount(base: Money, discount: Discount) -> Money {
    let remaining = final_price(base, discount);
    Money::from_cents(base.cents() - remaining.cents()).unwrap_or(Money::ZERO)
}
