//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog page (query: type, q)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog loaded)
//!
//! # Catalog (HTMX fragments)
//! GET  /products               - Product grid (query: type, q, live)
//! POST /catalog/reload         - Reload catalog from the API
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart panel
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add to cart (form: id, confirmed)
//! POST /cart/remove            - Remove line (form: id)
//! POST /cart/clear             - Clear cart (form: confirmed)
//! POST /cart/checkout          - Check out
//! POST /cart/open              - Open cart panel
//! POST /cart/close             - Close cart panel
//! ```

pub mod cart;
pub mod catalog;
pub mod prompter;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/products", get(catalog::products))
        .route("/catalog/reload", post(catalog::reload))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
}

/// Build the full application: routes, static assets, and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until a catalog has loaded.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
