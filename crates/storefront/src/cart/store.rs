//! The persistent cart.

use std::sync::Arc;

use pokemart_core::{Cart, CartTotals, Product, ProductId};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::kv::{KeyValueStore, StoreError};

/// Durable store key holding the cart snapshot.
pub const CART_STORAGE_KEY: &str = "pokemonCart";

/// Errors from cart operations that cannot complete normally.
#[derive(Debug, Error)]
pub enum CartError {
    /// Checkout was requested on an empty cart. Nothing was changed.
    #[error("Cart is empty")]
    Empty,

    /// The cart was checked out and cleared in memory, but the cleared
    /// snapshot could not be written.
    #[error("Checked out but not saved: {source}")]
    Unsaved {
        totals: CartTotals,
        #[source]
        source: StoreError,
    },
}

/// A [`Cart`] that rewrites its durable snapshot after every mutation.
///
/// All operations are synchronous. When a write fails the in-memory change
/// stands and the error is returned; the next successful write stores the
/// full current cart, so nothing is lost once storage recovers.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    store: Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Rehydrate the cart from `store`.
    ///
    /// A missing key is an empty cart. An unreadable or corrupt snapshot is
    /// logged and also yields an empty cart.
    #[instrument(skip(store))]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let cart = match store.get(CART_STORAGE_KEY) {
            Ok(Some(snapshot)) => serde_json::from_str::<Cart>(&snapshot).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding corrupt cart snapshot");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read cart snapshot");
                Cart::new()
            }
        };

        debug!(lines = cart.len(), "Cart rehydrated");
        Self { cart, store }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Add one unit of `product`, merging by product id.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written. The line is
    /// still added.
    pub fn add(&mut self, product: &Product) -> Result<(), StoreError> {
        self.cart.add(product);
        self.persist()
    }

    /// Remove the line for `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written.
    pub fn remove(&mut self, id: ProductId) -> Result<(), StoreError> {
        self.cart.remove(id);
        self.persist()
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.cart.clear();
        self.persist()
    }

    /// Summarize, then clear the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] without touching the cart or the store
    /// when there is nothing to check out, and [`CartError::Unsaved`] when
    /// the cleared snapshot could not be written.
    pub fn checkout(&mut self) -> Result<CartTotals, CartError> {
        if self.cart.is_empty() {
            return Err(CartError::Empty);
        }

        let totals = self.cart.totals();
        self.clear()
            .map_err(|source| CartError::Unsaved { totals, source })?;
        Ok(totals)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let snapshot = serde_json::to_string(&self.cart)?;
        self.store.set(CART_STORAGE_KEY, &snapshot)
    }
}
