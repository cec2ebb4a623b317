//! Form-backed confirmation for the web surface.
//!
//! A request arrives either unconfirmed or with `confirmed=true`. Unconfirmed
//! requests record the prompt instead of answering it; the response renders
//! it as a modal whose "Yes" button resubmits the same form confirmed.

use crate::shop::{Interaction, Notice, Prompt};

/// The form a modal's confirm button submits.
#[derive(Debug, Clone)]
pub struct Resubmit {
    pub url: &'static str,
    pub fields: Vec<(&'static str, String)>,
}

impl Resubmit {
    #[must_use]
    pub const fn new(url: &'static str) -> Self {
        Self {
            url,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, name: &'static str, value: impl ToString) -> Self {
        self.fields.push((name, value.to_string()));
        self
    }
}

/// Toast display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub message: String,
    /// Clicking the toast opens the cart panel.
    pub opens_cart: bool,
}

impl ToastView {
    #[must_use]
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            opens_cart: false,
        }
    }
}

/// Modal display data for templates.
#[derive(Debug, Clone)]
pub struct ModalView {
    pub title: String,
    pub lines: Vec<String>,
    pub image: Option<String>,
    pub tone: &'static str,
    /// Present for confirmation prompts; absent for notices.
    pub confirm: Option<Resubmit>,
    pub confirm_label: String,
    pub dismiss_label: String,
}

impl ModalView {
    fn for_prompt(prompt: &Prompt, resubmit: Resubmit) -> Self {
        Self {
            title: prompt.title.clone(),
            lines: vec![prompt.text.clone()],
            image: prompt.image.clone(),
            tone: prompt.tone.as_str(),
            confirm: Some(resubmit),
            confirm_label: prompt.confirm_label.clone(),
            dismiss_label: prompt.cancel_label.clone(),
        }
    }

    fn for_notice(notice: &Notice) -> Self {
        Self {
            title: notice.title.clone(),
            lines: notice.lines.clone(),
            image: None,
            tone: notice.kind.as_str(),
            confirm: None,
            confirm_label: String::new(),
            dismiss_label: notice.dismiss_label.clone(),
        }
    }
}

/// [`Interaction`] for one HTTP request.
#[derive(Debug)]
pub struct FormPrompter {
    confirmed: bool,
    resubmit: Option<Resubmit>,
    modal: Option<ModalView>,
    toasts: Vec<ToastView>,
    toasts_open_cart: bool,
}

impl FormPrompter {
    /// A prompter for a request that may need confirmation.
    ///
    /// If `confirmed` is false, the first prompt is declined and rendered as
    /// a modal that resubmits `resubmit` with `confirmed=true`.
    #[must_use]
    pub fn new(confirmed: bool, resubmit: Resubmit) -> Self {
        Self {
            confirmed,
            resubmit: Some(resubmit.field("confirmed", true)),
            modal: None,
            toasts: Vec::new(),
            toasts_open_cart: false,
        }
    }

    /// A prompter for actions that never ask.
    #[must_use]
    pub const fn unprompted() -> Self {
        Self {
            confirmed: false,
            resubmit: None,
            modal: None,
            toasts: Vec::new(),
            toasts_open_cart: false,
        }
    }

    /// Make every toast from this request open the cart when clicked.
    #[must_use]
    pub const fn toasts_open_cart(mut self) -> Self {
        self.toasts_open_cart = true;
        self
    }

    /// Split into the modal to show (if any) and pending toasts.
    #[must_use]
    pub fn into_parts(self) -> (Option<ModalView>, Vec<ToastView>) {
        (self.modal, self.toasts)
    }
}

impl Interaction for FormPrompter {
    async fn confirm(&mut self, prompt: &Prompt) -> bool {
        if self.confirmed {
            return true;
        }
        if let Some(resubmit) = self.resubmit.take() {
            self.modal = Some(ModalView::for_prompt(prompt, resubmit));
        }
        false
    }

    async fn toast(&mut self, message: &str) {
        self.toasts.push(ToastView {
            message: message.to_string(),
            opens_cart: self.toasts_open_cart,
        });
    }

    async fn inform(&mut self, notice: &Notice) {
        self.modal = Some(ModalView::for_notice(notice));
    }
}
