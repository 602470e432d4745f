//! Cart snapshot persistence.
//!
//! The whole cart is stored as one JSON document under [`CART_STORAGE_KEY`]:
//!
//! ```json
//! { "items": [ { "id": 1, "title": "Mug", "price": 4.5, "quantity": 2 } ] }
//! ```
//!
//! The stored cart is a convenience, not a system of record. [`CartStorage::load`]
//! and [`CartStorage::save`] never fail: problems are logged and the
//! in-memory cart carries on. The `try_` variants expose the errors for
//! callers that want them.

use thiserror::Error;
use tracing::{debug, warn};

use super::state::CartState;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the cart snapshot. A format change needs a new key.
pub const CART_STORAGE_KEY: &str = "cart_v1";

/// Errors that can occur when reading or writing a cart snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The backing store failed.
    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored value is not a valid cart snapshot.
    #[error("cart snapshot could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// The cart could not be serialized.
    #[error("cart snapshot could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Encode a cart as snapshot JSON.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] if serialization fails.
pub fn encode_snapshot(state: &CartState) -> Result<String, SnapshotError> {
    serde_json::to_string(state).map_err(SnapshotError::Encode)
}

/// Decode snapshot JSON into a normalized cart.
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] if the text is not a valid snapshot.
pub fn decode_snapshot(json: &str) -> Result<CartState, SnapshotError> {
    serde_json::from_str(json).map_err(SnapshotError::Decode)
}

/// Reads and writes the cart snapshot in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct CartStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartStorage<S> {
    /// Persist under [`CART_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Persist under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored cart.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the store fails or the value does not
    /// decode.
    pub fn try_load(&self) -> Result<Option<CartState>, SnapshotError> {
        self.store
            .get(&self.key)?
            .map(|json| decode_snapshot(&json))
            .transpose()
    }

    /// Overwrite the stored cart with `state`.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if encoding or the write fails. The
    /// previous stored value is then left in place.
    pub fn try_save(&self, state: &CartState) -> Result<(), SnapshotError> {
        let json = encode_snapshot(state)?;
        self.store.set(&self.key, &json)?;
        Ok(())
    }

    /// Read the stored cart, falling back to an empty cart.
    pub fn load(&self) -> CartState {
        match self.try_load() {
            Ok(Some(state)) => {
                debug!(key = %self.key, lines = state.len(), "Loaded cart from storage");
                state
            }
            Ok(None) => {
                debug!(key = %self.key, "No stored cart, starting empty");
                CartState::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not load cart from storage");
                CartState::new()
            }
        }
    }

    /// Overwrite the stored cart, logging instead of failing.
    ///
    /// Returns whether the write succeeded.
    pub fn save(&self, state: &CartState) -> bool {
        match self.try_save(state) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not save cart to storage");
                false
            }
        }
    }
}
