use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier correlating a dialog event with its resolution command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogId(pub String);

impl DialogId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for DialogId {
    fn default() -> Self {
        Self::new()
    }
}

/// Native browser modal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogKind {
    Alert,
    Confirm,
    Prompt,
}

/// A dialog the page has opened.
///
/// The engine delivers this as an event and blocks the page until
/// [`crate::PagePort::handle_dialog`] resolves it, mirroring how DevTools
/// splits `javascriptDialogOpening` from `handleJavaScriptDialog`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogEvent {
    pub id: DialogId,
    pub kind: DialogKind,
    pub message: String,

    /// Pre-filled prompt text, if any
    pub default_text: Option<String>,
}

/// How to resolve an open dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogDecision {
    /// Accept; `text` is injected into prompt dialogs and ignored otherwise
    Accept { text: Option<String> },

    /// Dismiss (cancel)
    Dismiss,
}

impl DialogDecision {
    pub fn accept_with(text: impl Into<String>) -> Self {
        DialogDecision::Accept {
            text: Some(text.into()),
        }
    }
}
