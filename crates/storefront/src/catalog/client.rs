//! PokeAPI client.

use std::sync::Arc;

use pokemart_core::Product;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, instrument};
use url::Url;

use super::LoadError;
use super::conversions::convert_pokemon;
use super::types::{ListingResponse, PokemonRecord};
use crate::config::CatalogConfig;

/// Client for the PokeAPI listing and detail endpoints.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    listing_url: Url,
    concurrency: usize,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing URL cannot be built from the base URL
    /// or the HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("pokemart/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut listing_url = config.api_base_url.join("pokemon")?;
        listing_url
            .query_pairs_mut()
            .append_pair("limit", &config.limit.to_string())
            .append_pair("offset", "0");

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                listing_url,
                concurrency: config.concurrency.max(1),
            }),
        })
    }

    /// The listing endpoint this client reads.
    #[must_use]
    pub fn listing_url(&self) -> &Url {
        &self.inner.listing_url
    }

    /// Load the full catalog.
    ///
    /// Fetches the listing, then every detail record concurrently (at most
    /// `concurrency` in flight). Completion order is arbitrary; the returned
    /// catalog follows listing order.
    ///
    /// # Errors
    ///
    /// Returns the first transport, status, or parse failure. Outstanding
    /// detail fetches are aborted.
    #[instrument(skip(self), fields(listing = %self.inner.listing_url))]
    pub async fn load_catalog(&self) -> Result<Vec<Product>, LoadError> {
        let listing: ListingResponse =
            get_json(&self.inner.client, self.inner.listing_url.as_str()).await?;
        let count = listing.results.len();
        debug!(count, "Fetched catalog listing");

        let semaphore = Arc::new(Semaphore::new(self.inner.concurrency));
        let mut tasks = JoinSet::new();

        for (index, entry) in listing.results.into_iter().enumerate() {
            let client = self.inner.client.clone();
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| LoadError::Join(e.to_string()))?;
                let record: PokemonRecord = get_json(&client, &entry.url).await?;
                Ok::<_, LoadError>((index, convert_pokemon(record)))
            });
        }

        let mut slots: Vec<Option<Product>> = std::iter::repeat_with(|| None).take(count).collect();

        while let Some(joined) = tasks.join_next().await {
            let (index, product) = joined.map_err(|e| LoadError::Join(e.to_string()))??;
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(product);
            }
        }

        let catalog: Vec<Product> = slots.into_iter().flatten().collect();
        debug!(count = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }
}

/// GET `url` and decode a JSON body.
async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T, LoadError> {
    let response = client.get(url).send().await?;
    let status = response.status();

    // Read the body as text first for better error diagnostics
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            url,
            body = %body.chars().take(200).collect::<String>(),
            "PokeAPI returned non-success status"
        );
        return Err(LoadError::Status {
            url: url.to_string(),
            status,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            url,
            body = %body.chars().take(200).collect::<String>(),
            "Failed to parse PokeAPI response"
        );
        LoadError::Parse(e)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config(base: &str) -> CatalogConfig {
        CatalogConfig {
            concurrency: 0,
            request_timeout: Duration::from_secs(5),
            ..CatalogConfig::new(base).unwrap()
        }
    }

    #[test]
    fn test_listing_url() {
        let client = CatalogClient::new(&config("https://pokeapi.co/api/v2")).unwrap();
        assert_eq!(
            client.listing_url().as_str(),
            "https://pokeapi.co/api/v2/pokemon?limit=151&offset=0"
        );
    }

    #[test]
    fn test_concurrency_floor() {
        let client = CatalogClient::new(&config("https://pokeapi.co/api/v2")).unwrap();
        assert_eq!(client.inner.concurrency, 1);
    }
}
