//! Cart state engine.
//!
//! # Model
//!
//! A [`CartState`] is an ordered list of [`CartLineItem`]s, at most one per
//! product, each with a quantity of at least 1. It changes only through
//! [`CartAction`]s:
//!
//! | Action | Effect |
//! |--------|--------|
//! | `Add` | merge units into the product's line, creating it if needed |
//! | `Remove` | drop the product's line |
//! | `UpdateQuantity` | set the quantity; zero or below drops the line |
//! | `Increment` / `Decrement` | step the quantity by one |
//! | `Clear` | drop every line |
//!
//! Operations on a product that is not in the cart do nothing.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tote_core::{Price, ProductId};
//! use tote_storefront::cart::{self, CartAction, CartState, ItemRef};
//!
//! let mug = ItemRef::id(ProductId::new(1)).with_price(Price::from_cents(999).unwrap());
//!
//! let state = cart::reduce(CartState::new(), CartAction::add(mug));
//! let state = cart::reduce(state, CartAction::add_many(ProductId::new(1), 2));
//!
//! assert_eq!(cart::count(&state), 3);
//! assert_eq!(cart::subtotal(&state), Decimal::new(2997, 2));
//! ```

mod persistence;
mod selectors;
mod state;
mod types;

pub use persistence::{
    CART_STORAGE_KEY, CartStorage, SnapshotError, decode_snapshot, encode_snapshot,
};
pub use selectors::{count, items, line_total, subtotal};
pub use state::{CartState, reduce};
pub use types::{CartAction, CartLineItem, ItemRef};
