//! PokeAPI catalog loading and in-memory filtering.
//!
//! # Architecture
//!
//! - `reqwest` client against two read-only endpoints: a bounded listing and
//!   a per-entry detail record
//! - Detail records are fetched concurrently on a `JoinSet`, then reassembled
//!   in listing order
//! - No caching: the loaded catalog is held by the caller (`Shop`)
//!
//! # Example
//!
//! ```rust,ignore
//! use pokemart_storefront::catalog::{CatalogClient, filter_by_tag, search};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let catalog = client.load_catalog().await?;
//!
//! let fire = filter_by_tag(&catalog, "fire");
//! let pikachu = search(&catalog, "25");
//! ```

mod client;
mod conversions;
mod filter;
pub mod types;

pub use client::CatalogClient;
pub use conversions::convert_pokemon;
pub use filter::{ALL_TAGS, LIVE_SEARCH_MIN_CHARS, distinct_tags, filter_by_tag, search};

use thiserror::Error;

/// Errors that abandon a catalog load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot address the listing endpoint.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A detail fetch task panicked or was cancelled.
    #[error("Fetch task failed: {0}")]
    Join(String),
}
