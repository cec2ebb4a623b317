//! Cart persistence.
//!
//! The cart itself lives in `pokemart_core`; this module binds it to a
//! durable key-value store so every mutation is written before it returns,
//! and the cart is rehydrated once at startup.

mod kv;
mod store;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use store::{CART_STORAGE_KEY, CartError, CartStore};
