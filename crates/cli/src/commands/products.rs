//! Catalog listing.
//!
//! # Usage
//!
//! ```bash
//! tote products --catalog products.json
//! tote products --catalog products.json --query beauty --top-rated
//! ```

use std::path::Path;

use tote_storefront::catalog::{Product, load_products, top_rated};
use tote_storefront::{KeyValueStore, Store};

use super::CommandError;

/// Products to list, filtered by the store's search query.
pub fn select<'a, S: KeyValueStore>(
    store: &Store<S>,
    products: &'a [Product],
    best_first: bool,
) -> Vec<&'a Product> {
    if best_first {
        top_rated(products)
            .into_iter()
            .filter(|p| p.matches(store.query()))
            .collect()
    } else {
        store.visible_products(products)
    }
}

/// Print catalog products.
pub fn list<S: KeyValueStore>(
    store: &Store<S>,
    catalog: &Path,
    best_first: bool,
    json: bool,
) -> Result<(), CommandError> {
    let products = load_products(catalog)?;
    let selected = select(store, &products, best_first);
    tracing::debug!(
        total = products.len(),
        shown = selected.len(),
        query = store.query(),
        "Listing products"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("No products match.");
        return Ok(());
    }

    println!("{:<8} {:<40} {:<16} {:>10} {:>6}", "ID", "TITLE", "CATEGORY", "PRICE", "RATING");
    for product in selected {
        println!(
            "{:<8} {:<40} {:<16} {:>10} {:>6}",
            product.id,
            product.title,
            product.category,
            product
                .price
                .map_or_else(|| "-".to_string(), |p| p.to_string()),
            product
                .rating
                .map_or_else(|| "-".to_string(), |r| format!("{r:.2}")),
        );
    }
    Ok(())
}
