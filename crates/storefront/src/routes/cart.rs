//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutating handler answers with a [`ShopUpdateTemplate`]: the cart
//! panel, badge, modal, and toasts are all swapped out of band.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use pokemart_core::{ProductId, format_money};
use serde::Deserialize;
use tracing::instrument;

use super::catalog::{GridView, PLACEHOLDER_GLYPH};
use super::prompter::{FormPrompter, ModalView, Resubmit, ToastView};
use crate::error::{AppError, Result, cart_breadcrumb};
use crate::shop::{Action, Outcome, Shop};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
    pub open: bool,
}

impl CartView {
    /// Render the shop's cart and panel state.
    #[must_use]
    pub fn from_shop(shop: &Shop) -> Self {
        let totals = shop.cart().totals();
        Self {
            lines: shop
                .cart()
                .cart()
                .lines()
                .iter()
                .map(|line| CartLineView {
                    id: line.id().as_i32(),
                    name: line.product.display_name(),
                    image: line.product.image.clone(),
                    price: line.product.price.to_string(),
                    quantity: line.quantity,
                    line_total: format_money(line.line_total()),
                })
                .collect(),
            total: totals.display_total(),
            item_count: totals.item_count,
            open: shop.is_cart_open(),
        }
    }
}

/// Add/remove form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub id: ProductId,
    #[serde(default)]
    pub confirmed: bool,
}

/// Clear form data.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub confirmed: bool,
}

/// Out-of-band update after any shop action (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/shop_update.html")]
pub struct ShopUpdateTemplate {
    pub cart: CartView,
    pub count: u32,
    pub modal: Option<ModalView>,
    pub toasts: Vec<ToastView>,
    pub grid: Option<GridView>,
    pub live: bool,
    pub oob: bool,
    pub placeholder: &'static str,
}

impl ShopUpdateTemplate {
    #[must_use]
    pub fn new(shop: &Shop, modal: Option<ModalView>, toasts: Vec<ToastView>) -> Self {
        Self {
            cart: CartView::from_shop(shop),
            count: shop.cart().totals().item_count,
            modal,
            toasts,
            grid: None,
            live: false,
            oob: true,
            placeholder: PLACEHOLDER_GLYPH,
        }
    }

    /// Also re-render the product grid.
    #[must_use]
    pub fn with_grid(mut self, grid: GridView) -> Self {
        self.grid = Some(grid);
        self
    }

    fn from_prompter(shop: &Shop, prompter: FormPrompter) -> Self {
        let (modal, toasts) = prompter.into_parts();
        Self::new(shop, modal, toasts)
    }
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
    pub oob: bool,
    pub placeholder: &'static str,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
    pub oob: bool,
}

/// Attach the `cart-updated` trigger when the cart changed.
fn respond(outcome: &Outcome, update: ShopUpdateTemplate) -> Response {
    if matches!(outcome, Outcome::CartChanged | Outcome::CheckedOut(_)) {
        (AppendHeaders([("HX-Trigger", "cart-updated")]), update).into_response()
    } else {
        update.into_response()
    }
}

/// Display the cart panel.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> CartPanelTemplate {
    let shop = state.shop().await;
    CartPanelTemplate {
        cart: CartView::from_shop(&shop),
        oob: false,
        placeholder: PLACEHOLDER_GLYPH,
    }
}

/// Get cart count badge (HTMX fragment).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> CartCountTemplate {
    let shop = state.shop().await;
    CartCountTemplate {
        count: shop.cart().totals().item_count,
        oob: false,
    }
}

/// Add one unit to the cart (HTMX).
///
/// Without `confirmed=true` nothing changes and a confirmation modal is
/// returned instead.
///
/// # Errors
///
/// Returns [`AppError::UnknownProduct`] if the product is not in the catalog.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<ProductForm>) -> Result<Response> {
    let mut shop = state.shop().await;
    if shop.product(form.id).is_none() {
        return Err(AppError::UnknownProduct(form.id));
    }

    let mut prompter = FormPrompter::new(
        form.confirmed,
        Resubmit::new("/cart/add").field("id", form.id),
    )
    .toasts_open_cart();
    let outcome = shop.dispatch(Action::Add(form.id), &mut prompter).await;
    if outcome == Outcome::CartChanged {
        cart_breadcrumb("Added to cart", &[("product_id", form.id.to_string())]);
    }

    Ok(respond(&outcome, ShopUpdateTemplate::from_prompter(&shop, prompter)))
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<ProductForm>) -> Response {
    let mut shop = state.shop().await;
    let mut prompter = FormPrompter::unprompted();
    let outcome = shop.dispatch(Action::Remove(form.id), &mut prompter).await;
    cart_breadcrumb("Removed from cart", &[("product_id", form.id.to_string())]);

    respond(&outcome, ShopUpdateTemplate::from_prompter(&shop, prompter))
}

/// Clear the cart (HTMX).
///
/// Asks for confirmation first, like [`add`]. An empty cart gets a notice.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>, Form(form): Form<ConfirmForm>) -> Response {
    let mut shop = state.shop().await;
    let mut prompter = FormPrompter::new(form.confirmed, Resubmit::new("/cart/clear"));
    let outcome = shop.dispatch(Action::Clear, &mut prompter).await;

    respond(&outcome, ShopUpdateTemplate::from_prompter(&shop, prompter))
}

/// Check out (HTMX).
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Response {
    let mut shop = state.shop().await;
    let mut prompter = FormPrompter::unprompted();
    let outcome = shop.dispatch(Action::Checkout, &mut prompter).await;
    if let Outcome::CheckedOut(totals) = &outcome {
        cart_breadcrumb("Checked out", &[("total", format_money(totals.total))]);
    }

    respond(&outcome, ShopUpdateTemplate::from_prompter(&shop, prompter))
}

/// Open the cart panel (HTMX).
#[instrument(skip(state))]
pub async fn open(State(state): State<AppState>) -> ShopUpdateTemplate {
    set_panel(&state, Action::OpenCart).await
}

/// Close the cart panel (HTMX).
#[instrument(skip(state))]
pub async fn close(State(state): State<AppState>) -> ShopUpdateTemplate {
    set_panel(&state, Action::CloseCart).await
}

async fn set_panel(state: &AppState, action: Action) -> ShopUpdateTemplate {
    let mut shop = state.shop().await;
    let mut prompter = FormPrompter::unprompted();
    shop.dispatch(action, &mut prompter).await;
    ShopUpdateTemplate::from_prompter(&shop, prompter)
}
