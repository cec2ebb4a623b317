//! Handler errors and Sentry reporting.
//!
//! Shop actions never fail from the shopper's point of view (declines, empty
//! carts, and unsaved snapshots are all rendered as notices). What is left
//! for [`AppError`] is requests that name something that does not exist, and
//! a catalog reload that died before it could report back.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pokemart_core::ProductId;
use thiserror::Error;

/// Error returned by storefront handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// The form named a product that is not in the loaded catalog.
    #[error("Pokemon #{0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// No route matches the path.
    #[error("No page at {0}")]
    NotFound(String),

    /// The catalog reload task panicked or was cancelled.
    #[error("Catalog reload task failed: {0}")]
    ReloadTask(#[from] tokio::task::JoinError),
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UnknownProduct(_) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ReloadTask(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Request failed");
            return (status, "Internal server error").into_response();
        }

        tracing::debug!(error = %self, "Request rejected");
        (status, self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a cart action as a Sentry breadcrumb.
///
/// `data` is attached as string fields, e.g. `[("product_id", "25".into())]`.
pub fn cart_breadcrumb(message: &str, data: &[(&str, String)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some("cart".to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };
    for (key, value) in data {
        breadcrumb
            .data
            .insert((*key).to_string(), serde_json::Value::String(value.clone()));
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_product_names_the_id() {
        let (status, text) = body(AppError::UnknownProduct(ProductId::new(9999))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(text, "Pokemon #9999 is not in the catalog");
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (status, text) = body(AppError::NotFound("/pokedex".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(text, "No page at /pokedex");
    }

    #[tokio::test]
    async fn test_reload_panic_is_hidden_from_client() {
        let join_error = tokio::spawn(async { panic!("listing exploded") })
            .await
            .unwrap_err();
        let (status, text) = body(AppError::ReloadTask(join_error)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text, "Internal server error");
    }
}
