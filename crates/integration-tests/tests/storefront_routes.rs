//! Integration tests for the storefront HTTP surface.
//!
//! Requests go straight into the router with `tower::ServiceExt::oneshot`;
//! the catalog comes from a mock PokeAPI.
//!
//! Run with: cargo test -p pokemart-integration-tests

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use pokemart_integration_tests::{
    MockPokeApi, body_text, form_request, get_request, pokemon, test_app,
};
use pokemart_storefront::cart::{CART_STORAGE_KEY, KeyValueStore, MemoryStore};
use pokemart_storefront::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

async fn loaded_app() -> (MockPokeApi, Arc<MemoryStore>, AppState, Router) {
    let mock = MockPokeApi::start(vec![
        pokemon(4, "charmander").types(&["fire"]),
        pokemon(7, "squirtle").types(&["water"]),
        pokemon(25, "pikachu").types(&["electric"]).base_experience(Some(112)),
        pokemon(132, "ditto").no_sprite(),
    ])
    .await;
    let store = Arc::new(MemoryStore::new());
    let (state, app) = test_app(&mock, store.clone());
    state.reload_catalog().await.unwrap();
    (mock, store, state, app)
}

async fn send(app: &Router, request: axum::http::Request<axum::body::Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_text(response).await)
}

fn stored_lines(store: &MemoryStore) -> Vec<(i64, i64)> {
    let Some(snapshot) = store.get(CART_STORAGE_KEY).unwrap() else {
        return Vec::new();
    };
    let lines: Vec<Value> = serde_json::from_str(&snapshot).unwrap();
    lines
        .iter()
        .map(|l| (l["id"].as_i64().unwrap(), l["quantity"].as_i64().unwrap()))
        .collect()
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (_mock, _store, _state, app) = loaded_app().await;
    let (status, body) = send(&app, get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_readiness_waits_for_catalog() {
    let mock = MockPokeApi::start(vec![pokemon(1, "bulbasaur")]).await;
    let (state, app) = test_app(&mock, Arc::new(MemoryStore::new()));

    let (status, _) = send(&app, get_request("/health/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    state.reload_catalog().await.unwrap();
    let (status, _) = send(&app, get_request("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (_mock, _store, _state, app) = loaded_app().await;
    let (status, _) = send(&app, get_request("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_catalog_page_renders_products() {
    let (_mock, _store, _state, app) = loaded_app().await;
    let (status, body) = send(&app, get_request("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Charmander"));
    assert!(body.contains("Pikachu"));
    assert!(body.contains("$110"));
    assert!(body.contains("#132"));
    // Ditto has no sprite
    assert!(body.contains('\u{26a1}'));
    assert!(body.contains("Your cart is empty"));
    assert!(body.contains("$0.00"));
    // Escape closes an open cart panel
    assert!(body.contains(r#"event.key === "Escape""#));
}

#[tokio::test]
async fn test_broken_sprite_falls_back_to_placeholder() {
    let (_mock, _store, _state, app) = loaded_app().await;

    let (_, body) = send(&app, get_request("/products?type=fire")).await;
    assert!(body.contains(r#"onerror="this.hidden = true; this.nextElementSibling.hidden = false;""#));
    assert!(body.contains("<span class=\"placeholder\" aria-hidden=\"true\" hidden>\u{26a1}</span>"));

    let (_, body) = send(&app, get_request("/products?q=ditto")).await;
    assert!(!body.contains("<img"));
    assert!(body.contains("<span class=\"placeholder\" aria-hidden=\"true\">\u{26a1}</span>"));
}

#[tokio::test]
async fn test_filter_by_type() {
    let (_mock, _store, _state, app) = loaded_app().await;
    let (status, body) = send(&app, get_request("/products?type=water")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Squirtle"));
    assert!(!body.contains("Charmander"));
    assert!(body.contains(r#"<option value="water" selected>"#));
}

#[tokio::test]
async fn test_search_without_matches() {
    let (_mock, _store, _state, app) = loaded_app().await;
    let (_, body) = send(&app, get_request("/products?q=mewtwo")).await;
    assert!(body.contains("No Pokemon found."));
}

#[tokio::test]
async fn test_search_by_number() {
    let (_mock, _store, _state, app) = loaded_app().await;
    let (_, body) = send(&app, get_request("/products?q=25")).await;
    assert!(body.contains("Pikachu"));
    assert!(!body.contains("Squirtle"));
}

#[tokio::test]
async fn test_live_search_ignores_one_character() {
    let (_mock, _store, _state, app) = loaded_app().await;

    let (status, _) = send(&app, get_request("/products?q=p&live=true")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, get_request("/products?q=pi&live=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Pikachu"));
    assert!(!body.contains("Charmander"));
    // The search box is not re-rendered while typing
    assert!(!body.contains(r#"id="search-input""#));
}

#[tokio::test]
async fn test_failed_first_load_shows_error_message() {
    let mock = MockPokeApi::start(vec![
        pokemon(1, "bulbasaur").failing(StatusCode::INTERNAL_SERVER_ERROR),
    ])
    .await;
    let (state, app) = test_app(&mock, Arc::new(MemoryStore::new()));
    assert!(state.reload_catalog().await.is_err());

    let (status, body) = send(&app, get_request("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error loading Pokemon. Please reload the page."));
}

#[tokio::test]
async fn test_reload_endpoint() {
    let mock = MockPokeApi::start(vec![pokemon(1, "bulbasaur").types(&["grass"])]).await;
    let (_state, app) = test_app(&mock, Arc::new(MemoryStore::new()));

    let (status, body) = send(&app, form_request("/catalog/reload", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<div class="toast" role="status">Loaded 1 Pokemon</div>"#));
    assert!(body.contains("Bulbasaur"));
}

// ============================================================================
// Cart Tests
// ============================================================================

#[tokio::test]
async fn test_add_asks_before_changing_anything() {
    let (_mock, store, _state, app) = loaded_app().await;

    let (status, body) = send(&app, form_request("/cart/add", "id=25")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Add Pikachu to cart?"));
    assert!(body.contains(r#"name="confirmed" value="true""#));
    assert!(store.get(CART_STORAGE_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_confirmed_add_updates_cart_and_store() {
    let (_mock, store, _state, app) = loaded_app().await;

    let response = app
        .clone()
        .oneshot(form_request("/cart/add", "id=25&confirmed=true"))
        .await
        .unwrap();
    assert_eq!(response.headers()["HX-Trigger"], "cart-updated");
    let body = body_text(response).await;

    // Clicking the toast opens the cart
    assert!(body.contains(r#"hx-post="/cart/open" hx-swap="none">Pikachu added to cart</div>"#));
    assert!(body.contains(r#"alt="Pikachu" onerror="this.hidden = true;"#));
    assert!(body.contains(r#"<span id="cart-count" class="cart-count" hx-swap-oob="true">1</span>"#));
    assert!(body.contains("$110.00"));
    assert_eq!(stored_lines(&store), vec![(25, 1)]);
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let (_mock, store, _state, app) = loaded_app().await;

    let (status, _) = send(&app, form_request("/cart/add", "id=9999&confirmed=true")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(store.get(CART_STORAGE_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_add_add_add_remove_scenario() {
    let (_mock, store, _state, app) = loaded_app().await;

    send(&app, form_request("/cart/add", "id=4&confirmed=true")).await;
    send(&app, form_request("/cart/add", "id=4&confirmed=true")).await;
    send(&app, form_request("/cart/add", "id=7&confirmed=true")).await;
    let (_, body) = send(&app, form_request("/cart/remove", "id=7")).await;

    assert_eq!(stored_lines(&store), vec![(4, 2)]);
    assert!(body.contains("$120.00"));
}

#[tokio::test]
async fn test_clear_empty_cart_shows_notice() {
    let (_mock, store, _state, app) = loaded_app().await;

    let (_, body) = send(&app, form_request("/cart/clear", "")).await;

    assert!(body.contains("Your cart is already empty"));
    assert!(store.get(CART_STORAGE_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_clear_needs_confirmation() {
    let (_mock, store, _state, app) = loaded_app().await;
    send(&app, form_request("/cart/add", "id=4&confirmed=true")).await;

    let (_, body) = send(&app, form_request("/cart/clear", "")).await;
    assert!(body.contains("Clear cart?"));
    assert_eq!(stored_lines(&store), vec![(4, 1)]);

    let (_, body) = send(&app, form_request("/cart/clear", "confirmed=true")).await;
    assert!(body.contains("Cart cleared!"));
    assert!(stored_lines(&store).is_empty());
}

#[tokio::test]
async fn test_checkout_summarizes_and_empties() {
    let (_mock, store, state, app) = loaded_app().await;
    send(&app, form_request("/cart/open", "")).await;
    send(&app, form_request("/cart/add", "id=4&confirmed=true")).await;
    send(&app, form_request("/cart/add", "id=25&confirmed=true")).await;

    let (_, body) = send(&app, form_request("/cart/checkout", "")).await;

    assert!(body.contains("Thank you for your purchase!"));
    assert!(body.contains("2 Pokemon"));
    assert!(body.contains("Total: $170.00"));
    assert!(body.contains("Your cart is empty"));
    assert!(stored_lines(&store).is_empty());
    assert!(!state.shop().await.is_cart_open());
}

#[tokio::test]
async fn test_checkout_empty_cart() {
    let (_mock, store, _state, app) = loaded_app().await;

    let (status, body) = send(&app, form_request("/cart/checkout", "")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Cart is empty"));
    assert!(store.get(CART_STORAGE_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_cart_fragments() {
    let (_mock, _store, _state, app) = loaded_app().await;
    send(&app, form_request("/cart/add", "id=132&confirmed=true")).await;

    let (_, count) = send(&app, get_request("/cart/count")).await;
    assert!(count.contains(">1</span>"));

    let (_, panel) = send(&app, get_request("/cart")).await;
    assert!(panel.contains("Ditto"));
    assert!(panel.contains("\u{26a1}"));
    assert!(panel.contains("$60.00"));
}

#[tokio::test]
async fn test_open_and_close_panel() {
    let (_mock, _store, _state, app) = loaded_app().await;

    let (_, body) = send(&app, form_request("/cart/open", "")).await;
    assert!(body.contains(r#"class="cart-panel open""#));

    let (_, body) = send(&app, form_request("/cart/close", "")).await;
    assert!(body.contains(r#"class="cart-panel""#));
}
