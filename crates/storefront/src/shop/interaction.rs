//! User confirmation and notification capability.
//!
//! The shop never talks to a UI directly. Front ends implement
//! [`Interaction`]; the web surface renders prompts as modals, the CLI asks
//! on stdin.

use std::future::Future;

/// Visual tone of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTone {
    Question,
    Warning,
}

impl PromptTone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Warning => "warning",
        }
    }
}

/// A yes/no question put to the shopper before a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub confirm_label: String,
    pub cancel_label: String,
    pub tone: PromptTone,
}

/// Kind of informational notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
}

impl NoticeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
        }
    }
}

/// A blocking informational message with a single dismiss button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub lines: Vec<String>,
    pub dismiss_label: String,
    pub kind: NoticeKind,
}

/// Confirmation and notification, supplied by the front end.
pub trait Interaction {
    /// Ask a yes/no question. `false` means declined or dismissed.
    fn confirm(&mut self, prompt: &Prompt) -> impl Future<Output = bool> + Send;

    /// Show a transient notification.
    fn toast(&mut self, message: &str) -> impl Future<Output = ()> + Send;

    /// Show an informational notice.
    fn inform(&mut self, notice: &Notice) -> impl Future<Output = ()> + Send;
}

/// Confirms everything and records what it was shown.
///
/// Used for non-interactive runs (`--yes`) and in tests.
#[derive(Debug, Default)]
pub struct AutoConfirm {
    pub prompts: Vec<Prompt>,
    pub toasts: Vec<String>,
    pub notices: Vec<Notice>,
    decline: bool,
}

impl AutoConfirm {
    /// An interaction that answers yes to every prompt.
    #[must_use]
    pub fn accepting() -> Self {
        Self::default()
    }

    /// An interaction that answers no to every prompt.
    #[must_use]
    pub fn declining() -> Self {
        Self {
            decline: true,
            ..Self::default()
        }
    }
}

impl Interaction for AutoConfirm {
    async fn confirm(&mut self, prompt: &Prompt) -> bool {
        self.prompts.push(prompt.clone());
        !self.decline
    }

    async fn toast(&mut self, message: &str) {
        self.toasts.push(message.to_string());
    }

    async fn inform(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
