//! Values derived from the cart on every read.

use rust_decimal::Decimal;

use super::state::CartState;
use super::types::CartLineItem;

/// Line items in display order.
#[must_use]
pub fn items(state: &CartState) -> &[CartLineItem] {
    state.items()
}

/// Total number of units across all lines.
#[must_use]
pub fn count(state: &CartState) -> u64 {
    state
        .items()
        .iter()
        .map(|line| u64::from(line.quantity))
        .sum()
}

/// Price of one line. A line without a price costs nothing.
#[must_use]
pub fn line_total(line: &CartLineItem) -> Decimal {
    line.price
        .map_or(Decimal::ZERO, |price| price.times(line.quantity))
}

/// Sum of every line's price times quantity, saturating at
/// [`Decimal::MAX`].
#[must_use]
pub fn subtotal(state: &CartState) -> Decimal {
    state
        .items()
        .iter()
        .map(line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
