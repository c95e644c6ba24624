use std::time::Duration;

use async_trait::async_trait;
use pageprobe_core_types::Viewport;

use crate::{
    dialog::{DialogDecision, DialogId},
    error::PortError,
    events::EventReceiver,
    files::FilePayload,
    selector::{ElementState, Selector},
};

/// Operations the toolkit requires from a page-automation engine.
///
/// Methods carry explicit per-operation deadlines; there is no global
/// deadline aggregated across a multi-step flow. Implementations must be
/// safe to share across tasks.
#[async_trait]
pub trait PagePort: Send + Sync {
    /// Navigate to a URL and wait for the load to settle.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), PortError>;

    /// Set an input's value wholesale.
    async fn fill(&self, target: &Selector, value: &str, timeout: Duration)
        -> Result<(), PortError>;

    /// Empty an input's value.
    async fn clear(&self, target: &Selector, timeout: Duration) -> Result<(), PortError>;

    /// Click an element.
    async fn click(&self, target: &Selector, timeout: Duration) -> Result<(), PortError>;

    /// Send a key press (e.g. "Enter") to an element.
    async fn press(&self, target: &Selector, key: &str, timeout: Duration)
        -> Result<(), PortError>;

    /// Choose an option in a `<select>` by value.
    async fn select_option(
        &self,
        target: &Selector,
        value: &str,
        timeout: Duration,
    ) -> Result<(), PortError>;

    /// Read an element's text content. `None` when the node has no text.
    async fn text_content(
        &self,
        target: &Selector,
        timeout: Duration,
    ) -> Result<Option<String>, PortError>;

    /// Read an input's current value.
    async fn input_value(&self, target: &Selector, timeout: Duration)
        -> Result<String, PortError>;

    /// Whether a checkbox/radio is currently checked.
    async fn is_checked(&self, target: &Selector, timeout: Duration) -> Result<bool, PortError>;

    /// Wait until the element reaches the given lifecycle state.
    async fn wait_for(
        &self,
        target: &Selector,
        state: ElementState,
        timeout: Duration,
    ) -> Result<(), PortError>;

    /// Wait until no network requests have been in flight for the engine's
    /// quiet window.
    async fn wait_network_idle(&self, timeout: Duration) -> Result<(), PortError>;

    /// Scroll the element into the viewport if needed.
    async fn scroll_into_view(&self, target: &Selector, timeout: Duration)
        -> Result<(), PortError>;

    /// Attach files to a file input.
    async fn set_input_files(
        &self,
        target: &Selector,
        files: &[FilePayload],
        timeout: Duration,
    ) -> Result<(), PortError>;

    /// Capture a screenshot of the current viewport.
    async fn screenshot(&self) -> Result<Vec<u8>, PortError>;

    /// Resize the viewport.
    async fn set_viewport(&self, viewport: Viewport) -> Result<(), PortError>;

    async fn current_url(&self) -> Result<String, PortError>;

    async fn title(&self) -> Result<String, PortError>;

    /// Subscribe to asynchronous page events (dialogs, console, responses).
    fn events(&self) -> EventReceiver;

    /// Resolve an open dialog. The `id` must match a previously delivered
    /// [`crate::DialogEvent`]; resolving twice is an error.
    async fn handle_dialog(&self, id: &DialogId, decision: DialogDecision)
        -> Result<(), PortError>;
}
