//! Integration tests for cart persistence across restarts.
//!
//! Run with: cargo test -p pokemart-integration-tests

#![allow(clippy::unwrap_used)]

use std::fs;
use std::sync::Arc;

use pokemart_integration_tests::{MockPokeApi, body_text, form_request, get_request, pokemon, test_app};
use pokemart_storefront::cart::FileStore;
use tower::ServiceExt;

// ============================================================================
// Restart Tests
// ============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let mock = MockPokeApi::start(vec![pokemon(1, "bulbasaur"), pokemon(4, "charmander")]).await;

    {
        let (state, app) = test_app(&mock, Arc::new(FileStore::open(&path).unwrap()));
        state.reload_catalog().await.unwrap();
        for id in ["4", "1", "4"] {
            app.clone()
                .oneshot(form_request("/cart/add", &format!("id={id}&confirmed=true")))
                .await
                .unwrap();
        }
    }

    let (_state, app) = test_app(&mock, Arc::new(FileStore::open(&path).unwrap()));
    let response = app.oneshot(get_request("/cart")).await.unwrap();
    let body = body_text(response).await;

    let charmander = body.find("Charmander").unwrap();
    let bulbasaur = body.find("Bulbasaur").unwrap();
    assert!(charmander < bulbasaur, "lines keep first-add order");
    assert!(body.contains("$60 &times; 2"));
    assert!(body.contains("$180.00"));
}

#[tokio::test]
async fn test_rehydrated_lines_keep_their_price() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let cheap = MockPokeApi::start(vec![pokemon(1, "bulbasaur").base_experience(Some(64))]).await;
    {
        let (state, app) = test_app(&cheap, Arc::new(FileStore::open(&path).unwrap()));
        state.reload_catalog().await.unwrap();
        app.oneshot(form_request("/cart/add", "id=1&confirmed=true"))
            .await
            .unwrap();
    }

    // The catalog now prices the same product differently
    let pricey = MockPokeApi::start(vec![pokemon(1, "bulbasaur").base_experience(Some(300))]).await;
    let (state, app) = test_app(&pricey, Arc::new(FileStore::open(&path).unwrap()));
    state.reload_catalog().await.unwrap();

    let body = body_text(app.oneshot(get_request("/cart")).await.unwrap()).await;
    assert!(body.contains("$60.00"));
    assert!(!body.contains("$300.00"));
}

#[tokio::test]
async fn test_corrupt_store_starts_with_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, r#"{"pokemonCart": "not a cart"}"#).unwrap();
    let mock = MockPokeApi::start(vec![pokemon(1, "bulbasaur")]).await;

    let (_state, app) = test_app(&mock, Arc::new(FileStore::open(&path).unwrap()));
    let body = body_text(app.oneshot(get_request("/cart")).await.unwrap()).await;

    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_store_file_holds_snapshot_under_cart_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");
    let mock = MockPokeApi::start(vec![pokemon(25, "pikachu")]).await;

    let (state, app) = test_app(&mock, Arc::new(FileStore::open(&path).unwrap()));
    state.reload_catalog().await.unwrap();
    app.oneshot(form_request("/cart/add", "id=25&confirmed=true"))
        .await
        .unwrap();

    let file: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let snapshot: serde_json::Value =
        serde_json::from_str(file["pokemonCart"].as_str().unwrap()).unwrap();
    assert_eq!(snapshot[0]["id"], 25);
    assert_eq!(snapshot[0]["name"], "pikachu");
    assert_eq!(snapshot[0]["quantity"], 1);
}
