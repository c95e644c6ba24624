//! Contract between the probe toolkit and the external page-automation engine.
//!
//! Everything that actually drives a browser lives behind [`PagePort`]. The
//! toolkit only assumes the operations below plus an event stream for
//! asynchronous page activity (dialogs, console output, responses).

mod dialog;
mod error;
mod events;
mod files;
mod port;
mod selector;

pub use dialog::*;
pub use error::*;
pub use events::*;
pub use files::*;
pub use port::*;
pub use selector::*;
