use page_port::PortError;
use thiserror::Error;

/// Errors an action can terminate with.
///
/// Assertion failures are deliberately absent: a failed test expectation is
/// fatal to the test case and must never pass through the retry loop.
#[derive(Debug, Error, Clone)]
pub enum ActionError {
    /// No element matched the target before the deadline
    #[error("target not found: {0}")]
    NotFound(String),

    /// Element exists but refused the interaction
    #[error("element not interactable: {0}")]
    NotInteractable(String),

    /// Navigation did not settle before the deadline
    #[error("navigation timeout: {0}")]
    NavTimeout(String),

    /// A wait condition did not hold before the deadline
    #[error("wait timeout: {0}")]
    WaitTimeout(String),

    /// Post-fill read-back differed from the requested value
    #[error("verification mismatch: expected {expected:?}, got {actual:?}")]
    VerificationMismatch { expected: String, actual: String },

    /// The caller-supplied verify predicate rejected the observed value
    #[error("verify predicate rejected value {actual:?}")]
    PredicateRejected { actual: String },

    /// The engine does not implement the requested operation
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Transport or protocol failure talking to the engine
    #[error("engine i/o error: {0}")]
    Io(String),

    /// Invalid input or executor bug
    #[error("internal error: {0}")]
    Internal(String),
}

impl ActionError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            ActionError::Unsupported(_) | ActionError::Internal(_)
        )
    }
}

impl From<PortError> for ActionError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::TargetNotFound(detail) => ActionError::NotFound(detail),
            PortError::NotInteractable(detail) => ActionError::NotInteractable(detail),
            PortError::NavTimeout(detail) => ActionError::NavTimeout(detail),
            PortError::WaitTimeout(detail) => ActionError::WaitTimeout(detail),
            PortError::Unsupported(detail) => ActionError::Unsupported(detail),
            PortError::Io(detail) => ActionError::Io(detail),
        }
    }
}
