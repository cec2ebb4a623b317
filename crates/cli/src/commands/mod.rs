//! Command implementations.

pub mod cart;
pub mod catalog;
mod prompt;

use std::io;
use std::sync::Arc;

use pokemart_storefront::cart::{CartStore, FileStore, StoreError};
use pokemart_storefront::catalog::{CatalogClient, LoadError};
use pokemart_storefront::config::{CatalogConfig, ConfigError, store_path_from_env};
use pokemart_storefront::shop::Shop;
use thiserror::Error;

pub use prompt::StdinPrompter;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog could not be loaded.
    #[error("Error loading Pokemon: {0}")]
    Load(#[from] LoadError),

    /// The cart store could not be opened.
    #[error("Cart store error: {0}")]
    Store(#[from] StoreError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),

    /// The requested product is not in the catalog.
    #[error("Pokemon #{0} is not in the catalog")]
    UnknownProduct(i32),
}

/// Open the shop around the cart in `POKEMART_STORE_PATH`.
fn open_shop() -> Result<Shop, CliError> {
    let store = FileStore::open(store_path_from_env())?;
    tracing::debug!(path = %store.path().display(), "Cart store opened");
    Ok(Shop::new(CartStore::load(Arc::new(store))))
}

/// Load the catalog into `shop`.
async fn load_catalog(shop: &mut Shop) -> Result<(), CliError> {
    let config = CatalogConfig::from_env()?;
    let client = CatalogClient::new(&config)?;
    match client.load_catalog().await {
        Ok(products) => {
            shop.set_catalog(products);
            Ok(())
        }
        Err(e) => {
            shop.catalog_failed(&e);
            Err(e.into())
        }
    }
}
