//! One-shot interception of native browser dialogs.
//!
//! [`DialogGuard::arm`] subscribes to a page's event stream before the
//! triggering action is dispatched and resolves exactly one dialog, then
//! disarms. The handler runs concurrently with the rest of the test body
//! until the dialog is dismissed; a second dialog racing the first is
//! dismissed loudly rather than double-handled.

use std::sync::Arc;

use page_port::{DialogDecision, DialogKind, PageEvent, PagePort};
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// What to do with the next dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    /// Accept; `text` is injected into prompt dialogs
    Accept { text: Option<String> },

    /// Dismiss (cancel)
    Dismiss,
}

impl GuardAction {
    pub fn accept() -> Self {
        GuardAction::Accept { text: None }
    }

    pub fn accept_with(text: impl Into<String>) -> Self {
        GuardAction::Accept {
            text: Some(text.into()),
        }
    }

    fn decision(&self) -> DialogDecision {
        match self {
            GuardAction::Accept { text } => DialogDecision::Accept { text: text.clone() },
            GuardAction::Dismiss => DialogDecision::Dismiss,
        }
    }
}

/// Record of the dialog a guard resolved.
#[derive(Debug, Clone)]
pub struct HandledDialog {
    pub kind: DialogKind,
    pub message: String,
    pub decision: DialogDecision,
}

#[derive(Debug, Error)]
pub enum GuardError {
    /// The event stream closed before any dialog appeared
    #[error("page event stream closed before a dialog appeared")]
    StreamClosed,

    /// The guard task was aborted or panicked
    #[error("dialog guard task failed: {0}")]
    Join(String),

    /// The engine rejected the resolution
    #[error("dialog resolution failed: {0}")]
    Resolution(String),
}

/// A one-shot, armed dialog handler.
pub struct DialogGuard {
    handle: JoinHandle<Result<HandledDialog, GuardError>>,
}

impl DialogGuard {
    /// Subscribe to `page`'s events and resolve the next dialog with
    /// `action`. Must be armed before the triggering interaction is
    /// dispatched; the dialog event is only guaranteed to arrive after that
    /// dispatch.
    pub fn arm(page: Arc<dyn PagePort>, action: GuardAction) -> Self {
        let mut events = page.events();
        let handle = tokio::spawn(async move {
            let dialog = loop {
                match events.recv().await {
                    Ok(PageEvent::Dialog(dialog)) => break dialog,
                    Ok(_) => continue,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "dialog guard lagged behind page events");
                        continue;
                    }
                    Err(RecvError::Closed) => return Err(GuardError::StreamClosed),
                }
            };

            debug!(kind = ?dialog.kind, message = %dialog.message, "resolving dialog");
            let decision = action.decision();
            page.handle_dialog(&dialog.id, decision.clone())
                .await
                .map_err(|err| GuardError::Resolution(err.to_string()))?;

            reject_stragglers(&mut events, page.as_ref()).await;

            Ok(HandledDialog {
                kind: dialog.kind,
                message: dialog.message,
                decision,
            })
        });
        Self { handle }
    }

    /// Wait for the guard to resolve its dialog.
    pub async fn wait(self) -> Result<HandledDialog, GuardError> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(GuardError::Join(err.to_string())),
        }
    }

    /// Disarm without handling anything.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// Drain dialogs that were already queued behind the handled one: the
/// single-slot rule says they are dismissed with a warning, never silently
/// handled with the caller's action.
async fn reject_stragglers(events: &mut page_port::EventReceiver, page: &dyn PagePort) {
    loop {
        match events.try_recv() {
            Ok(PageEvent::Dialog(extra)) => {
                warn!(
                    kind = ?extra.kind,
                    message = %extra.message,
                    "second dialog raced a one-shot guard, dismissing"
                );
                if let Err(err) = page.handle_dialog(&extra.id, DialogDecision::Dismiss).await {
                    warn!(error = %err, "failed to dismiss straggler dialog");
                }
            }
            Ok(_) => continue,
            Err(_) => break,
        }
    }
}
