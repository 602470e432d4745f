//! Cart snapshots through real storage backends.

#![allow(clippy::unwrap_used)]

use std::fs;

use rust_decimal::Decimal;
use tote_core::ProductId;
use tote_integration_tests::{file_store, priced};
use tote_storefront::cart::{CART_STORAGE_KEY, CartAction, CartStorage, decode_snapshot};
use tote_storefront::{KeyValueStore, MemoryStore, Store};

#[test]
fn test_cart_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = file_store(dir.path());
        store.dispatch(CartAction::add_many(priced(1, 999), 2));
        store.dispatch(CartAction::add(priced(2, 1500)));
    }

    let store = file_store(dir.path());
    assert_eq!(store.count(), 3);
    assert_eq!(store.subtotal(), Decimal::new(3498, 2));
    assert!(dir.path().join("cart_v1.json").exists());
}

#[test]
fn test_snapshot_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = file_store(dir.path());
    store.dispatch(CartAction::add_many(
        priced(4, 450).with_title("Mug"),
        2,
    ));

    let raw = fs::read_to_string(dir.path().join("cart_v1.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"items": [{"id": 4, "title": "Mug", "price": 4.5, "quantity": 2}]})
    );
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cart_v1.json"), "{not json").unwrap();

    let mut store = file_store(dir.path());
    assert!(store.cart().is_empty());

    // The next change overwrites the bad snapshot.
    store.dispatch(CartAction::add(priced(1, 100)));
    assert_eq!(file_store(dir.path()).count(), 1);
}

#[test]
fn test_missing_directory_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir.path().join("not-created-yet"));
    assert!(store.cart().is_empty());
}

#[test]
fn test_loose_snapshot_is_normalized() {
    let backend = MemoryStore::with_entry(
        CART_STORAGE_KEY,
        r#"{"items":[
            {"id":"5","price":2.5},
            {"id":5,"price":2.5,"quantity":2},
            {"id":6,"quantity":0}
        ]}"#,
    );
    let store = Store::new(&backend);

    assert_eq!(store.items().len(), 1);
    assert_eq!(store.cart().quantity_of(ProductId::new(5)), 3);
    assert_eq!(store.subtotal(), Decimal::new(75, 1));
}

#[test]
fn test_quota_failure_keeps_memory_state() {
    let backend = MemoryStore::with_quota(64);
    let mut store = Store::new(&backend);
    store.dispatch(CartAction::add(priced(1, 100)));
    let saved = backend.get(CART_STORAGE_KEY).unwrap().unwrap();

    store.dispatch(CartAction::add(
        priced(2, 100).with_title("A title far too long for the tiny quota"),
    ));
    assert_eq!(store.items().len(), 2);
    // The last snapshot that fit is still there.
    assert_eq!(backend.get(CART_STORAGE_KEY).unwrap(), Some(saved));
}

#[test]
fn test_custom_storage_key() {
    let backend = MemoryStore::new();
    let storage = CartStorage::with_key(&backend, "cart_test");
    let mut state = storage.load();
    state.apply(CartAction::add(priced(1, 100)));
    assert!(storage.save(&state));

    assert!(backend.get(CART_STORAGE_KEY).unwrap().is_none());
    let raw = backend.get("cart_test").unwrap().unwrap();
    assert_eq!(decode_snapshot(&raw).unwrap(), state);
}
