//! Catalog route handlers.
//!
//! The catalog page renders once in full; filtering and search swap only the
//! product grid (HTMX), with the filter controls updated out of band.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pokemart_core::{Product, capitalize};
use serde::Deserialize;
use tracing::instrument;

use super::cart::{CartView, ShopUpdateTemplate};
use super::prompter::{FormPrompter, ModalView, ToastView};
use crate::catalog::ALL_TAGS;
use crate::error::Result;
use crate::shop::{Action, CatalogState, LOAD_ERROR_MESSAGE, Outcome, Shop};
use crate::state::AppState;

/// Placeholder shown for products without an image.
pub const PLACEHOLDER_GLYPH: &str = "\u{26a1}";

/// Shown when the grid has nothing to display.
pub const EMPTY_MESSAGE: &str = "No Pokemon found.";

/// Shown while the initial catalog load is still running.
pub const LOADING_MESSAGE: &str = "Loading Pokemon...";

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub price: String,
    pub types: Vec<String>,
    pub dimensions: String,
    pub abilities: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.display_name(),
            image: product.image.clone(),
            price: product.price.to_string(),
            types: product.types.clone(),
            dimensions: product.dimensions(),
            abilities: product.abilities.clone(),
        }
    }
}

/// Tag filter option for templates.
#[derive(Clone)]
pub struct TagOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Product grid display data for templates.
#[derive(Clone)]
pub struct GridView {
    pub products: Vec<ProductCardView>,
    /// Replaces the grid when set.
    pub message: Option<&'static str>,
    pub tags: Vec<TagOption>,
    pub query: String,
}

impl GridView {
    /// Render the grid for the shop's current catalog and view state.
    ///
    /// A failed load only shows the error message when there is no earlier
    /// catalog to fall back on.
    #[must_use]
    pub fn from_shop(shop: &Shop) -> Self {
        let products: Vec<ProductCardView> = shop
            .visible_products()
            .into_iter()
            .map(ProductCardView::from)
            .collect();

        let message = if products.is_empty() {
            Some(match shop.catalog_state() {
                _ if !shop.catalog().is_empty() => EMPTY_MESSAGE,
                CatalogState::Loading => LOADING_MESSAGE,
                CatalogState::Ready => EMPTY_MESSAGE,
                CatalogState::Failed(_) => LOAD_ERROR_MESSAGE,
            })
        } else {
            None
        };

        Self {
            products,
            message,
            tags: tag_options(shop),
            query: shop.query().to_string(),
        }
    }
}

fn tag_options(shop: &Shop) -> Vec<TagOption> {
    let active = shop.active_tag();
    let mut options = vec![TagOption {
        value: ALL_TAGS.to_string(),
        label: "All types".to_string(),
        selected: active == ALL_TAGS,
    }];
    options.extend(shop.tags().into_iter().map(|tag| TagOption {
        label: capitalize(&tag),
        selected: active == tag,
        value: tag,
    }));
    options
}

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(rename = "type")]
    pub tag: Option<String>,
    pub q: Option<String>,
    #[serde(default)]
    pub live: bool,
}

impl CatalogQuery {
    /// The action this query asks for, if any.
    ///
    /// A non-empty search wins over a tag. An empty search only counts when
    /// no tag was given, where it clears the previous query.
    fn action(self) -> Option<Action> {
        let has_tag = self.tag.is_some();
        let q = self.q.filter(|q| !q.is_empty() || !has_tag || self.live);
        match (q, self.tag) {
            (Some(q), _) if self.live => Some(Action::LiveSearch(q)),
            (Some(q), _) => Some(Action::Search(q)),
            (None, Some(tag)) => Some(Action::FilterByTag(tag)),
            (None, None) => None,
        }
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub grid: GridView,
    pub cart: CartView,
    pub count: u32,
    pub modal: Option<ModalView>,
    pub toasts: Vec<ToastView>,
    pub live: bool,
    pub oob: bool,
    pub placeholder: &'static str,
}

/// Product grid fragment template (for HTMX).
///
/// The grid replaces the request target; the filter controls follow out of
/// band.
#[derive(Template, WebTemplate)]
#[template(path = "partials/products_response.html")]
pub struct ProductGridTemplate {
    pub grid: GridView,
    /// Live-search responses leave the search box alone.
    pub live: bool,
    pub placeholder: &'static str,
}

/// Display the catalog page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> IndexTemplate {
    let mut shop = state.shop().await;
    if let Some(action) = query.action() {
        shop.dispatch(action, &mut FormPrompter::unprompted()).await;
    }

    IndexTemplate {
        grid: GridView::from_shop(&shop),
        cart: CartView::from_shop(&shop),
        count: shop.cart().totals().item_count,
        modal: None,
        toasts: Vec::new(),
        live: false,
        oob: false,
        placeholder: PLACEHOLDER_GLYPH,
    }
}

/// Filter or search the product grid (HTMX).
///
/// Returns 204 for live-search input too short to act on, so the grid is
/// left as it is.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let live = query.live;
    let mut shop = state.shop().await;
    if let Some(action) = query.action()
        && shop.dispatch(action, &mut FormPrompter::unprompted()).await == Outcome::Ignored
    {
        return StatusCode::NO_CONTENT.into_response();
    }

    ProductGridTemplate {
        grid: GridView::from_shop(&shop),
        live,
        placeholder: PLACEHOLDER_GLYPH,
    }
    .into_response()
}

/// Reload the catalog from the API (HTMX).
///
/// The load runs on its own task so a disconnecting client cannot abort it
/// halfway. On failure the previous catalog stays in place and the shopper
/// sees the load error in a toast, or in the grid if nothing was loaded
/// before.
///
/// # Errors
///
/// Returns an internal error if the load task panicked.
#[instrument(skip(state))]
pub async fn reload(State(state): State<AppState>) -> Result<ShopUpdateTemplate> {
    let task_state = state.clone();
    let loaded = tokio::spawn(async move { task_state.reload_catalog().await })
        .await?;

    let toasts = match loaded {
        Ok(count) => vec![ToastView::plain(format!("Loaded {count} Pokemon"))],
        Err(_) => vec![ToastView::plain(LOAD_ERROR_MESSAGE)],
    };

    let shop = state.shop().await;
    Ok(ShopUpdateTemplate::new(&shop, None, toasts).with_grid(GridView::from_shop(&shop)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_action_prefers_search() {
        let query = CatalogQuery {
            tag: Some("fire".to_string()),
            q: Some("char".to_string()),
            live: false,
        };
        assert_eq!(query.action(), Some(Action::Search("char".to_string())));
    }

    #[test]
    fn test_query_action_live() {
        let query = CatalogQuery {
            tag: None,
            q: Some("c".to_string()),
            live: true,
        };
        assert_eq!(query.action(), Some(Action::LiveSearch("c".to_string())));
    }

    #[test]
    fn test_query_action_tag_and_none() {
        let query = CatalogQuery {
            tag: Some("water".to_string()),
            ..CatalogQuery::default()
        };
        assert_eq!(query.action(), Some(Action::FilterByTag("water".to_string())));
        assert_eq!(CatalogQuery::default().action(), None);
    }

    #[test]
    fn test_query_action_empty_search() {
        let with_tag = CatalogQuery {
            tag: Some("fire".to_string()),
            q: Some(String::new()),
            live: false,
        };
        assert_eq!(with_tag.action(), Some(Action::FilterByTag("fire".to_string())));

        let alone = CatalogQuery {
            q: Some(String::new()),
            ..CatalogQuery::default()
        };
        assert_eq!(alone.action(), Some(Action::Search(String::new())));
    }
}
