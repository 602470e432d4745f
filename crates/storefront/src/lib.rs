//! Tote Storefront library.
//!
//! Client-side storefront state: the cart engine with its persistence
//! adapter, search query state, the product catalog model, and checkout
//! pricing. Everything hangs off a [`Store`] that the embedding
//! application constructs and passes around.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod search;
pub mod storage;
pub mod store;

pub use cart::{CartAction, CartLineItem, CartState, CartStorage, ItemRef};
pub use catalog::Product;
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use search::{SearchAction, SearchState};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{Change, Store, StoreEvent, SubscriptionId};
