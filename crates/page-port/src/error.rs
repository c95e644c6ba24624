use thiserror::Error;

/// Errors raised by the underlying page-automation engine.
#[derive(Debug, Error, Clone)]
pub enum PortError {
    /// No element matched the selector before the deadline
    #[error("target not found: {0}")]
    TargetNotFound(String),

    /// Element exists but cannot receive the interaction
    #[error("element not interactable: {0}")]
    NotInteractable(String),

    /// Navigation did not settle before the deadline
    #[error("navigation timeout: {0}")]
    NavTimeout(String),

    /// A wait condition did not hold before the deadline
    #[error("wait timeout: {0}")]
    WaitTimeout(String),

    /// The engine does not implement the requested operation
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Transport or protocol failure talking to the engine
    #[error("engine i/o error: {0}")]
    Io(String),
}
