//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! tote cart add 1 --quantity 2 --title Mug --price 9.99
//! tote cart update 1 5
//! tote cart dec 1
//! tote cart show
//! ```

use std::path::Path;

use tote_core::{Price, ProductId, format_money};
use tote_storefront::cart::{self, CartAction, CartLineItem, ItemRef, encode_snapshot};
use tote_storefront::catalog::{find_product, load_products};
use tote_storefront::checkout::OrderSummary;
use tote_storefront::{KeyValueStore, Store, StorefrontError};

use super::CommandError;

/// A line described on the command line.
#[derive(Debug, Clone)]
pub struct NewLine {
    pub id: ProductId,
    pub quantity: u32,
    pub title: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
}

impl From<NewLine> for ItemRef {
    fn from(line: NewLine) -> Self {
        let mut item = Self::id(line.id);
        if let Some(title) = line.title {
            item = item.with_title(title);
        }
        if let Some(price) = line.price {
            item = item.with_price(price);
        }
        if let Some(image) = line.image {
            item = item.with_image(image);
        }
        item
    }
}

/// Print the cart, or its stored snapshot with `json`.
pub fn show<S: KeyValueStore>(store: &Store<S>, json: bool) -> Result<(), CommandError> {
    if json {
        println!("{}", encode_snapshot(store.cart())?);
        return Ok(());
    }

    if store.items().is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    println!("{:<8} {:<32} {:>5} {:>10} {:>10}", "ID", "TITLE", "QTY", "PRICE", "TOTAL");
    for line in store.items() {
        println!(
            "{:<8} {:<32} {:>5} {:>10} {:>10}",
            line.id,
            display_title(line),
            line.quantity,
            line.price.map_or_else(|| "-".to_string(), |p| p.to_string()),
            format_money(cart::line_total(line)),
        );
    }
    println!();
    println!("{} item(s)", store.count());
    print_summary(&store.order_summary());
    Ok(())
}

/// Print subtotal, tax, shipping and total.
pub fn print_summary(summary: &OrderSummary) {
    println!("Subtotal: {:>10}", format_money(summary.subtotal));
    println!("Tax:      {:>10}", format_money(summary.tax));
    if summary.is_free_shipping() {
        println!("Shipping: {:>10}", "FREE");
    } else {
        println!("Shipping: {:>10}", format_money(summary.shipping));
    }
    println!("Total:    {:>10}", format_money(summary.total));
    if let Some(remaining) = summary.remaining_for_free_shipping {
        println!("Add {} more for free shipping.", format_money(remaining));
    }
}

fn display_title(line: &CartLineItem) -> &str {
    line.title
        .as_deref()
        .or_else(|| line.product.as_ref().map(|p| p.title.as_str()))
        .filter(|t| !t.is_empty())
        .unwrap_or("-")
}

/// Add units of a product by id.
pub fn add<S: KeyValueStore>(store: &mut Store<S>, line: NewLine) {
    let id = line.id;
    let quantity = line.quantity;
    store.dispatch(CartAction::add_many(line, quantity));
    tracing::info!(%id, quantity = store.cart().quantity_of(id), "Cart updated");
}

/// Add units of a catalog product.
pub fn add_product<S: KeyValueStore>(
    store: &mut Store<S>,
    catalog: &Path,
    id: ProductId,
    quantity: u32,
) -> Result<(), CommandError> {
    let products = load_products(catalog)?;
    let product = find_product(&products, id)
        .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))?;

    store.dispatch(CartAction::add_many(product.clone(), quantity));
    tracing::info!(%id, quantity = store.cart().quantity_of(id), "Cart updated");
    Ok(())
}

/// Set a line's quantity.
pub fn update<S: KeyValueStore>(store: &mut Store<S>, id: ProductId, quantity: i64) {
    store.dispatch(CartAction::UpdateQuantity { id, quantity });
    tracing::info!(%id, quantity = store.cart().quantity_of(id), "Cart updated");
}

/// Add one unit.
pub fn increment<S: KeyValueStore>(store: &mut Store<S>, id: ProductId) {
    store.dispatch(CartAction::Increment(id));
    tracing::info!(%id, quantity = store.cart().quantity_of(id), "Cart updated");
}

/// Take one unit away.
pub fn decrement<S: KeyValueStore>(store: &mut Store<S>, id: ProductId) {
    store.dispatch(CartAction::Decrement(id));
    tracing::info!(%id, quantity = store.cart().quantity_of(id), "Cart updated");
}

/// Remove a line.
pub fn remove<S: KeyValueStore>(store: &mut Store<S>, id: ProductId) {
    store.dispatch(CartAction::Remove(id));
    tracing::info!(%id, "Removed from cart");
}

/// Empty the cart.
pub fn clear<S: KeyValueStore>(store: &mut Store<S>) {
    store.dispatch(CartAction::Clear);
    tracing::info!("Cart cleared");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use tote_storefront::MemoryStore;

    use super::*;

    #[test]
    fn test_add_with_details() {
        let mut store = Store::new(MemoryStore::new());
        add(
            &mut store,
            NewLine {
                id: ProductId::new(3),
                quantity: 2,
                title: Some("Mug".to_string()),
                price: Some("4.50".parse().unwrap()),
                image: None,
            },
        );

        let line = store.cart().get(ProductId::new(3)).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(display_title(line), "Mug");
        assert_eq!(store.subtotal(), rust_decimal::Decimal::from(9));
    }

    #[test]
    fn test_add_product_from_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(
            &path,
            r#"{"products":[{"id":7,"title":"Desk Lamp","price":20,"thumbnail":"t.png"}]}"#,
        )
        .unwrap();

        let mut store = Store::new(MemoryStore::new());
        add_product(&mut store, &path, ProductId::new(7), 2).unwrap();
        let line = store.cart().get(ProductId::new(7)).unwrap();
        assert_eq!(line.image.as_deref(), Some("t.png"));
        assert_eq!(store.count(), 2);

        let err = add_product(&mut store, &path, ProductId::new(8), 1).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Storefront(StorefrontError::NotFound(_))
        ));
    }

    #[test]
    fn test_step_commands() {
        let mut store = Store::new(MemoryStore::new());
        let id = ProductId::new(1);
        add(
            &mut store,
            NewLine {
                id,
                quantity: 1,
                title: None,
                price: None,
                image: None,
            },
        );
        increment(&mut store, id);
        assert_eq!(store.cart().quantity_of(id), 2);
        update(&mut store, id, 5);
        decrement(&mut store, id);
        assert_eq!(store.cart().quantity_of(id), 4);
        update(&mut store, id, -3);
        assert!(store.cart().is_empty());
    }
}
