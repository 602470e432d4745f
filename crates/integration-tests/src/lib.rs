//! Integration tests for Tote.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tote-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart actions, selectors and the store surface
//! - `persistence` - Snapshots through the file and memory stores
//! - `catalog_checkout` - Catalog payloads feeding the cart and checkout
//!
//! This crate only holds shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use tote_core::{Price, ProductId};
use tote_storefront::cart::{CartStorage, ItemRef};
use tote_storefront::checkout::{CheckoutForm, PricingRules};
use tote_storefront::{FileStore, Store};

/// A catalog payload in the API envelope shape.
pub const SAMPLE_CATALOG: &str = r#"{
    "products": [
        {"id": 1, "title": "Essence Mascara Lash Princess", "category": "beauty",
         "price": 9.99, "rating": 4.94, "stock": 5, "brand": "Essence",
         "thumbnail": "https://cdn.example.com/1/thumbnail.png",
         "images": ["https://cdn.example.com/1/1.png"],
         "meta": {"barcode": "9164035109868"}},
        {"id": 2, "title": "Eyeshadow Palette with Mirror", "category": "beauty",
         "price": 19.99, "rating": 3.28, "stock": 44},
        {"id": 3, "title": "Powder Canister", "category": "beauty",
         "price": 14.99, "rating": 3.82, "stock": 59},
        {"id": 4, "title": "Red Lipstick", "category": "beauty",
         "price": 12.99, "rating": 4.36, "stock": 68},
        {"id": 5, "title": "Annibale Colombo Bed", "category": "furniture",
         "price": 1899.99, "rating": 4.14, "stock": 47}
    ],
    "total": 5,
    "skip": 0,
    "limit": 30
}"#;

/// Price from whole cents.
///
/// # Panics
///
/// Panics on negative input.
#[must_use]
pub fn cents(value: i64) -> Price {
    Price::from_cents(value).expect("fixture prices are non-negative")
}

/// A flat cart reference with a price.
#[must_use]
pub fn priced(id: u64, price_cents: i64) -> ItemRef {
    ItemRef::id(ProductId::new(id)).with_price(cents(price_cents))
}

/// Open a store persisted under `dir` with the default pricing rules.
#[must_use]
pub fn file_store(dir: &Path) -> Store<FileStore> {
    Store::with_storage(
        CartStorage::new(FileStore::new(dir)),
        PricingRules::default(),
    )
}

/// A checkout form that passes validation.
#[must_use]
pub fn valid_form() -> CheckoutForm {
    CheckoutForm {
        first_name: "Katherine".to_string(),
        last_name: "Johnson".to_string(),
        email: "katherine@example.com".to_string(),
        phone: "(757) 555-0142".to_string(),
        address: "1 NASA Drive".to_string(),
        city: "Hampton".to_string(),
        state: "VA".to_string(),
        zip_code: "23666".to_string(),
        payment_method: "cod".to_string(),
    }
}
