use tokio::sync::broadcast;

use crate::dialog::DialogEvent;

/// Asynchronous page activity surfaced by the engine.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// A modal dialog opened and is blocking the page
    Dialog(DialogEvent),

    /// A console message was written
    Console { level: ConsoleLevel, text: String },

    /// A network response completed
    Response { url: String, status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Warning,
    Error,
}

pub type EventSender = broadcast::Sender<PageEvent>;
pub type EventReceiver = broadcast::Receiver<PageEvent>;

/// Build the broadcast pair engines publish page events on.
pub fn event_bus(capacity: usize) -> (EventSender, EventReceiver) {
    broadcast::channel(capacity.max(1))
}
