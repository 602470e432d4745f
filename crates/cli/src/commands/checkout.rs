//! Order placement.
//!
//! Validates the contact form against the persisted cart, prints the
//! confirmation and leaves the cart empty.

use tote_core::format_money;
use tote_storefront::checkout::CheckoutForm;
use tote_storefront::{KeyValueStore, Store};

use super::CommandError;
use super::cart::print_summary;

/// Place the order for everything in the cart.
pub fn place_order<S: KeyValueStore>(
    store: &mut Store<S>,
    form: &CheckoutForm,
) -> Result<(), CommandError> {
    let confirmation = store.place_order(form)?;

    println!("Order placed: {}", confirmation.reference);
    println!(
        "Placed at {} for {} {}",
        confirmation.placed_at.format("%Y-%m-%d %H:%M UTC"),
        confirmation.customer.first_name,
        confirmation.customer.last_name
    );
    println!(
        "{} item(s), paying by {}",
        confirmation.item_count,
        confirmation.customer.payment_method.label()
    );
    print_summary(&confirmation.summary);
    tracing::debug!(total = %format_money(confirmation.summary.total), "Checkout complete");
    Ok(())
}
