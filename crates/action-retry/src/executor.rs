//! The retry loop around a single page interaction.

use chrono::{DateTime, Utc};
use page_port::{ElementState, PagePort};
use pageprobe_core_types::ActionId;
use std::time::Instant;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{action::Action, errors::ActionError, policy::RetryPolicy};

/// Result of executing an [`Action`] under a [`RetryPolicy`].
///
/// Either `ok` with the observed value (final field contents for fills, text
/// for reads) or the last error after exhausting the attempt budget. Callers
/// must treat failure as fatal to the test step, not retryable at a higher
/// layer.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub ok: bool,

    /// Correlates this execution's log lines and artifacts
    pub action_id: ActionId,

    /// Attempts consumed, including the successful one
    pub attempts: u32,

    /// Observed value for actions that read one back
    pub value: Option<String>,

    /// Last error when `ok` is false
    pub error: Option<ActionError>,

    pub started_at: DateTime<Utc>,
    pub latency_ms: u64,
}

impl Outcome {
    fn success(
        action_id: ActionId,
        started_at: DateTime<Utc>,
        latency_ms: u64,
        attempts: u32,
        value: Option<String>,
    ) -> Self {
        Self {
            ok: true,
            action_id,
            attempts,
            value,
            error: None,
            started_at,
            latency_ms,
        }
    }

    fn failure(
        action_id: ActionId,
        started_at: DateTime<Utc>,
        latency_ms: u64,
        attempts: u32,
        error: ActionError,
    ) -> Self {
        Self {
            ok: false,
            action_id,
            attempts,
            value: None,
            error: Some(error),
            started_at,
            latency_ms,
        }
    }

    /// Bridge to `?` call sites.
    pub fn into_result(self) -> Result<Option<String>, ActionError> {
        if self.ok {
            Ok(self.value)
        } else {
            Err(self
                .error
                .unwrap_or_else(|| ActionError::Internal("failed outcome without error".into())))
        }
    }
}

/// Execute `action` against `page`, retrying per `policy`.
///
/// Each attempt runs the full action: fills clear the field first, so a
/// partial fill left by a failed attempt never leaks into the next one. A
/// fill attempt only succeeds once the re-read value equals the requested
/// value byte-for-byte; the policy's custom predicate, if any, is checked
/// after that. Failed attempts sleep the policy's backoff delay (constant
/// across attempts unless the caller opted into exponential) and the last
/// error is returned once the budget is spent.
pub async fn execute(page: &dyn PagePort, action: &Action, policy: &RetryPolicy) -> Outcome {
    let action_id = ActionId::new();
    let started_at = Utc::now();
    let start = Instant::now();

    debug!(
        action_id = %action_id,
        action = action.kind(),
        target = %action.target(),
        max_attempts = policy.max_attempts(),
        "executing action"
    );

    let mut attempt = 0;
    loop {
        attempt += 1;
        match attempt_once(page, action, policy).await {
            Ok(value) => {
                debug!(
                    action_id = %action_id,
                    action = action.kind(),
                    target = %action.target(),
                    attempt,
                    "action succeeded"
                );
                return Outcome::success(
                    action_id,
                    started_at,
                    start.elapsed().as_millis() as u64,
                    attempt,
                    value,
                );
            }
            Err(err) => {
                if attempt >= policy.max_attempts() || !err.is_retryable() {
                    warn!(
                        action_id = %action_id,
                        action = action.kind(),
                        target = %action.target(),
                        attempt,
                        error = %err,
                        "action failed"
                    );
                    return Outcome::failure(
                        action_id,
                        started_at,
                        start.elapsed().as_millis() as u64,
                        attempt,
                        err,
                    );
                }
                let delay = policy.backoff_schedule().delay_for(attempt);
                debug!(
                    action_id = %action_id,
                    action = action.kind(),
                    target = %action.target(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "attempt failed, backing off"
                );
                sleep(delay).await;
            }
        }
    }
}

async fn attempt_once(
    page: &dyn PagePort,
    action: &Action,
    policy: &RetryPolicy,
) -> Result<Option<String>, ActionError> {
    let timeout = policy.timeout();
    let observed = match action {
        Action::Fill { target, value } => {
            page.clear(target, timeout).await?;
            page.fill(target, value, timeout).await?;
            let actual = page.input_value(target, timeout).await?;
            if actual != *value {
                return Err(ActionError::VerificationMismatch {
                    expected: value.clone(),
                    actual,
                });
            }
            Some(actual)
        }
        Action::Click { target } => {
            page.click(target, timeout).await?;
            None
        }
        Action::ReadText { target } => {
            page.wait_for(target, ElementState::Visible, timeout).await?;
            let text = page.text_content(target, timeout).await?.unwrap_or_default();
            Some(text)
        }
        Action::Press { target, key } => {
            page.press(target, key, timeout).await?;
            None
        }
    };

    if let (Some(value), Some(verify)) = (&observed, policy.verify_fn()) {
        if !verify(value) {
            return Err(ActionError::PredicateRejected {
                actual: value.clone(),
            });
        }
    }

    Ok(observed)
}
