//! The storefront's explicit state and command dispatch.
//!
//! [`Shop`] owns everything that changes while the app runs: the loaded
//! catalog, the persistent cart, and view state (active tag, search query,
//! cart panel). User actions arrive as [`Action`] values and each maps to one
//! handler. Confirmation prompts are awaited through [`Interaction`] before
//! any mutation, so a declined prompt never touches the cart.

mod interaction;

use std::collections::BTreeSet;

use pokemart_core::{CartTotals, Product, ProductId, format_money};
use tracing::{info, instrument, warn};

pub use interaction::{AutoConfirm, Interaction, Notice, NoticeKind, Prompt, PromptTone};

use crate::cart::{CartError, CartStore, StoreError};
use crate::catalog::{
    ALL_TAGS, LIVE_SEARCH_MIN_CHARS, LoadError, distinct_tags, filter_by_tag, search,
};

/// Message shown in place of the grid when the catalog failed to load.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading Pokemon. Please reload the page.";

/// Toast shown when a mutation could not be saved.
pub const UNSAVED_MESSAGE: &str = "Your cart could not be saved. It will be saved on the next change.";

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add one unit of a catalog product, after confirmation.
    Add(ProductId),
    /// Remove a cart line.
    Remove(ProductId),
    /// Show only products with this tag (`"all"` for everything).
    FilterByTag(String),
    /// Submitted search.
    Search(String),
    /// As-you-type search; ignored for 1-character queries.
    LiveSearch(String),
    /// Empty the cart, after confirmation.
    Clear,
    /// Summarize and empty the cart.
    Checkout,
    OpenCart,
    CloseCart,
}

/// What a dispatched action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Cart contents changed.
    CartChanged,
    /// Only view state (filter, search, panel) changed.
    ViewChanged,
    /// The shopper declined the confirmation prompt.
    Declined,
    /// Nothing to do (unknown product, short live query).
    Ignored,
    /// The cart was already empty; an informational notice was shown.
    CartEmpty,
    /// The cart was checked out.
    CheckedOut(CartTotals),
}

/// Catalog load status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready,
    Failed(String),
}

/// Explicit application state.
#[derive(Debug)]
pub struct Shop {
    catalog: Vec<Product>,
    catalog_state: CatalogState,
    cart: CartStore,
    active_tag: String,
    query: String,
    cart_open: bool,
}

impl Shop {
    /// Create a shop with an empty catalog around a rehydrated cart.
    #[must_use]
    pub fn new(cart: CartStore) -> Self {
        Self {
            catalog: Vec::new(),
            catalog_state: CatalogState::Loading,
            cart,
            active_tag: ALL_TAGS.to_string(),
            query: String::new(),
            cart_open: false,
        }
    }

    /// Install a freshly loaded catalog.
    ///
    /// An active tag that no longer exists falls back to `"all"`.
    pub fn set_catalog(&mut self, catalog: Vec<Product>) {
        info!(count = catalog.len(), "Catalog ready");
        self.catalog = catalog;
        self.catalog_state = CatalogState::Ready;
        if self.active_tag != ALL_TAGS && !distinct_tags(&self.catalog).contains(&self.active_tag) {
            self.active_tag = ALL_TAGS.to_string();
        }
    }

    /// Record a failed catalog load. The previous catalog is kept unchanged.
    pub fn catalog_failed(&mut self, error: &LoadError) {
        tracing::error!(error = %error, "Error loading catalog");
        self.catalog_state = CatalogState::Failed(error.to_string());
    }

    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    #[must_use]
    pub const fn catalog_state(&self) -> &CatalogState {
        &self.catalog_state
    }

    /// Look up a catalog product.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.iter().find(|product| product.id == id)
    }

    /// Tags available for filtering, ascending.
    #[must_use]
    pub fn tags(&self) -> BTreeSet<String> {
        distinct_tags(&self.catalog)
    }

    #[must_use]
    pub fn active_tag(&self) -> &str {
        &self.active_tag
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Products the catalog view should show right now.
    ///
    /// An active search query wins over the tag filter; the two never apply
    /// together because setting one resets the other.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        if self.query.trim().is_empty() {
            filter_by_tag(&self.catalog, &self.active_tag)
        } else {
            search(&self.catalog, &self.query)
        }
    }

    /// Run one action to completion.
    #[instrument(skip(self, ui))]
    pub async fn dispatch<I>(&mut self, action: Action, ui: &mut I) -> Outcome
    where
        I: Interaction + Send,
    {
        match action {
            Action::Add(id) => self.add(id, ui).await,
            Action::Remove(id) => {
                let saved = self.cart.remove(id);
                Self::report_unsaved(saved, ui).await;
                Outcome::CartChanged
            }
            Action::FilterByTag(tag) => {
                self.active_tag = tag;
                self.query.clear();
                Outcome::ViewChanged
            }
            Action::Search(query) => {
                self.set_query(query);
                Outcome::ViewChanged
            }
            Action::LiveSearch(query) => {
                if query.is_empty() || query.chars().count() >= LIVE_SEARCH_MIN_CHARS {
                    self.set_query(query);
                    Outcome::ViewChanged
                } else {
                    Outcome::Ignored
                }
            }
            Action::Clear => self.clear(ui).await,
            Action::Checkout => self.checkout(ui).await,
            Action::OpenCart => {
                self.cart_open = true;
                Outcome::ViewChanged
            }
            Action::CloseCart => {
                self.cart_open = false;
                Outcome::ViewChanged
            }
        }
    }

    fn set_query(&mut self, query: String) {
        self.query = query;
        self.active_tag = ALL_TAGS.to_string();
    }

    async fn add<I>(&mut self, id: ProductId, ui: &mut I) -> Outcome
    where
        I: Interaction + Send,
    {
        let Some(product) = self.product(id).cloned() else {
            warn!(%id, "Add requested for unknown product");
            return Outcome::Ignored;
        };

        let name = product.display_name();
        let prompt = Prompt {
            title: format!("Add {name} to cart?"),
            text: format!("Are you sure you want to add {name} to your cart?"),
            image: product.image.clone(),
            confirm_label: "Yes, add it".to_string(),
            cancel_label: "Cancel".to_string(),
            tone: PromptTone::Question,
        };

        if !ui.confirm(&prompt).await {
            return Outcome::Declined;
        }

        let saved = self.cart.add(&product);
        Self::report_unsaved(saved, ui).await;
        ui.toast(&format!("{name} added to cart")).await;
        Outcome::CartChanged
    }

    async fn clear<I>(&mut self, ui: &mut I) -> Outcome
    where
        I: Interaction + Send,
    {
        if self.cart.is_empty() {
            ui.inform(&Notice {
                title: "Cart is empty".to_string(),
                lines: vec!["Your cart is already empty".to_string()],
                dismiss_label: "Got it".to_string(),
                kind: NoticeKind::Info,
            })
            .await;
            return Outcome::CartEmpty;
        }

        let prompt = Prompt {
            title: "Clear cart?".to_string(),
            text: "Are you sure you want to clear your cart?".to_string(),
            image: None,
            confirm_label: "Yes, clear it".to_string(),
            cancel_label: "Cancel".to_string(),
            tone: PromptTone::Warning,
        };

        if !ui.confirm(&prompt).await {
            return Outcome::Declined;
        }

        let saved = self.cart.clear();
        Self::report_unsaved(saved, ui).await;
        ui.inform(&Notice {
            title: "Cart cleared!".to_string(),
            lines: vec!["Your cart has been cleared successfully".to_string()],
            dismiss_label: "Perfect".to_string(),
            kind: NoticeKind::Success,
        })
        .await;
        Outcome::CartChanged
    }

    async fn checkout<I>(&mut self, ui: &mut I) -> Outcome
    where
        I: Interaction + Send,
    {
        let totals = match self.cart.checkout() {
            Ok(totals) => totals,
            Err(CartError::Empty) => {
                ui.inform(&Notice {
                    title: "Cart is empty".to_string(),
                    lines: vec!["Your cart is empty".to_string()],
                    dismiss_label: "Got it".to_string(),
                    kind: NoticeKind::Info,
                })
                .await;
                return Outcome::CartEmpty;
            }
            Err(CartError::Unsaved { totals, source }) => {
                Self::report_unsaved(Err(source), ui).await;
                totals
            }
        };

        info!(items = totals.item_count, total = %totals.total, "Checked out");
        ui.inform(&Notice {
            title: "Thank you for your purchase!".to_string(),
            lines: vec![
                "Summary:".to_string(),
                format!("{} Pokemon", totals.item_count),
                format!("Total: {}", format_money(totals.total)),
                "Your Pokemon will be delivered soon.".to_string(),
            ],
            dismiss_label: "Awesome!".to_string(),
            kind: NoticeKind::Success,
        })
        .await;
        self.cart_open = false;
        Outcome::CheckedOut(totals)
    }

    async fn report_unsaved<I>(saved: Result<(), StoreError>, ui: &mut I)
    where
        I: Interaction + Send,
    {
        if let Err(e) = saved {
            warn!(error = %e, "Cart snapshot not saved");
            ui.toast(UNSAVED_MESSAGE).await;
        }
    }
}
