//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, instrument};

use crate::cart::{CartStore, KeyValueStore};
use crate::catalog::{CatalogClient, LoadError};
use crate::config::StorefrontConfig;
use crate::shop::{CatalogState, Shop};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The [`Shop`] sits behind one
/// async mutex, so cart mutations are applied one at a time.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: CatalogClient,
    shop: Mutex<Shop>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The cart is rehydrated from `store`; the catalog starts empty until
    /// [`AppState::start_catalog_loading`] or [`AppState::reload_catalog`]
    /// fills it.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built from the
    /// configured API base URL.
    pub fn new(
        config: &StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, LoadError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let shop = Shop::new(CartStore::load(store));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                catalog,
                shop: Mutex::new(shop),
            }),
        })
    }

    /// Lock the shop for reading or dispatching an action.
    pub async fn shop(&self) -> MutexGuard<'_, Shop> {
        self.inner.shop.lock().await
    }

    /// Whether a catalog has been loaded successfully.
    pub async fn is_ready(&self) -> bool {
        matches!(self.shop().await.catalog_state(), CatalogState::Ready)
    }

    /// Fetch the catalog and install it.
    ///
    /// The shop is not locked while the fetch runs. On failure the previous
    /// catalog is kept and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the loader error.
    #[instrument(skip(self))]
    pub async fn reload_catalog(&self) -> Result<usize, LoadError> {
        match self.inner.catalog.load_catalog().await {
            Ok(products) => {
                let count = products.len();
                self.shop().await.set_catalog(products);
                Ok(count)
            }
            Err(e) => {
                self.shop().await.catalog_failed(&e);
                Err(e)
            }
        }
    }

    /// Spawn a background task that performs the initial catalog load.
    ///
    /// Until it completes, the catalog view shows no products.
    pub fn start_catalog_loading(&self) {
        info!("Spawning background catalog load task");
        let state = self.clone();
        tokio::spawn(async move {
            match state.reload_catalog().await {
                Ok(count) => info!(count, "Catalog is now ready and serving requests"),
                Err(e) => error!(error = %e, "Initial catalog load failed"),
            }
        });
    }
}
