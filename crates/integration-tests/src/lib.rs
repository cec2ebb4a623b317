//! Integration tests for Pokemart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pokemart-integration-tests
//! ```
//!
//! No network access is needed: every test talks to a [`MockPokeApi`]
//! bound to `127.0.0.1:0`, which serves the listing and detail endpoints
//! with per-entry delays and failures.
//!
//! # Test Categories
//!
//! - `catalog_loader` - Loader ordering, pricing, and failure handling
//! - `storefront_routes` - HTTP surface driven through `tower::ServiceExt::oneshot`
//! - `cart_persistence` - Cart survival across restarts with a `FileStore`

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use http_body_util::BodyExt;
use pokemart_storefront::cart::KeyValueStore;
use pokemart_storefront::config::{CatalogConfig, StorefrontConfig};
use pokemart_storefront::routes;
use pokemart_storefront::state::AppState;
use serde::Deserialize;
use serde_json::{Value, json};

// ============================================================================
// Mock PokeAPI
// ============================================================================

/// One entry served by [`MockPokeApi`].
#[derive(Debug, Clone)]
pub struct MockPokemon {
    pub id: i32,
    pub name: String,
    pub base_experience: Option<u32>,
    pub types: Vec<String>,
    pub sprite: bool,
    pub delay: Duration,
    pub status: StatusCode,
    pub malformed: bool,
}

/// Start describing a mock entry with sensible defaults.
#[must_use]
pub fn pokemon(id: i32, name: &str) -> MockPokemon {
    MockPokemon {
        id,
        name: name.to_string(),
        base_experience: Some(64),
        types: vec!["normal".to_string()],
        sprite: true,
        delay: Duration::ZERO,
        status: StatusCode::OK,
        malformed: false,
    }
}

impl MockPokemon {
    #[must_use]
    pub const fn base_experience(mut self, value: Option<u32>) -> Self {
        self.base_experience = value;
        self
    }

    #[must_use]
    pub fn types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub const fn no_sprite(mut self) -> Self {
        self.sprite = false;
        self
    }

    #[must_use]
    pub const fn delay_ms(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    #[must_use]
    pub const fn failing(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Answer 200 with a body that is not JSON.
    #[must_use]
    pub const fn malformed(mut self) -> Self {
        self.malformed = true;
        self
    }

    fn detail(&self) -> Value {
        let types: Vec<Value> = self
            .types
            .iter()
            .enumerate()
            .map(|(slot, name)| json!({ "slot": slot + 1, "type": { "name": name, "url": "" } }))
            .collect();
        let sprite = if self.sprite {
            json!(format!("https://sprites.example/{}.png", self.id))
        } else {
            Value::Null
        };

        json!({
            "id": self.id,
            "name": self.name,
            "base_experience": self.base_experience,
            "height": 7,
            "weight": 69,
            "sprites": { "front_default": sprite },
            "types": types,
            "abilities": [
                { "ability": { "name": "overgrow", "url": "" }, "is_hidden": false },
                { "ability": { "name": "chlorophyll", "url": "" }, "is_hidden": true }
            ],
            "stats": [
                { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } }
            ]
        })
    }
}

struct MockState {
    base_url: String,
    pokemon: Vec<MockPokemon>,
    detail_requests: AtomicUsize,
}

#[derive(Deserialize)]
struct ListingQuery {
    limit: Option<usize>,
}

async fn listing(State(state): State<Arc<MockState>>, Query(query): Query<ListingQuery>) -> Json<Value> {
    let limit = query.limit.unwrap_or(20);
    let results: Vec<Value> = state
        .pokemon
        .iter()
        .take(limit)
        .map(|p| json!({ "name": p.name, "url": format!("{}pokemon/{}", state.base_url, p.id) }))
        .collect();

    Json(json!({ "count": state.pokemon.len(), "next": null, "previous": null, "results": results }))
}

async fn detail(State(state): State<Arc<MockState>>, Path(id): Path<i32>) -> Response {
    state.detail_requests.fetch_add(1, Ordering::SeqCst);
    let Some(entry) = state.pokemon.iter().find(|p| p.id == id) else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    tokio::time::sleep(entry.delay).await;
    if entry.status != StatusCode::OK {
        return (entry.status, "upstream failure").into_response();
    }
    if entry.malformed {
        return ([(header::CONTENT_TYPE, "application/json")], "<html>maintenance</html>").into_response();
    }
    Json(entry.detail()).into_response()
}

/// A PokeAPI stand-in served from a background task.
pub struct MockPokeApi {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockPokeApi {
    /// Bind to an ephemeral port and start serving `pokemon` in order.
    pub async fn start(pokemon: Vec<MockPokemon>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(MockState {
            base_url: format!("http://{addr}/api/v2/"),
            pokemon,
            detail_requests: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/api/v2/pokemon", get(listing))
            .route("/api/v2/pokemon/{id}", get(detail))
            .with_state(Arc::clone(&state));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// API base URL, e.g. `http://127.0.0.1:41234/api/v2/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v2/", self.addr)
    }

    /// Catalog settings pointed at this mock.
    #[must_use]
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            request_timeout: Duration::from_secs(5),
            ..CatalogConfig::new(&self.base_url()).unwrap()
        }
    }

    /// Number of detail requests served so far.
    #[must_use]
    pub fn detail_requests(&self) -> usize {
        self.state.detail_requests.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Storefront Helpers
// ============================================================================

/// Storefront settings pointed at `mock`.
#[must_use]
pub fn storefront_config(mock: &MockPokeApi) -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        catalog: mock.catalog_config(),
        store_path: "unused.json".into(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Application state and router over `store`, with the catalog not yet loaded.
#[must_use]
pub fn test_app(mock: &MockPokeApi, store: Arc<dyn KeyValueStore>) -> (AppState, Router) {
    let state = AppState::new(&storefront_config(mock), store).unwrap();
    let app = routes::app(state.clone());
    (state, app)
}

/// A GET request.
#[must_use]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A urlencoded form POST, as HTMX sends it.
#[must_use]
pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("HX-Request", "true")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
