use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Predicate applied to the value an action observed (final field contents
/// for fills, text for reads). Returning `false` fails the attempt.
pub type VerifyFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Delay schedule between attempts.
///
/// The constant schedule is the default and matches the observed behavior of
/// the helpers this crate generalizes; exponential is available for callers
/// that opt in.
#[derive(Debug, Clone)]
pub enum Backoff {
    /// Same delay after every failed attempt
    Constant(Duration),

    /// `initial * factor^(attempt-1)`, capped at `max`
    Exponential {
        initial: Duration,
        factor: f64,
        max: Duration,
    },
}

impl Backoff {
    /// Delay to apply after the given failed attempt (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Constant(delay) => *delay,
            Backoff::Exponential {
                initial,
                factor,
                max,
            } => {
                let exp = factor.powi(attempt.saturating_sub(1) as i32);
                let millis = (initial.as_millis() as f64 * exp).round() as u64;
                Duration::from_millis(millis).min(*max)
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Constant(Duration::from_millis(1000))
    }
}

/// Bounded-attempt configuration governing one action's execution.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
    op_timeout: Duration,
    verify: Option<VerifyFn>,
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::default(),
            op_timeout: Duration::from_secs(10),
            verify: None,
        }
    }

    /// Attempt budget; values below 1 are clamped to 1.
    pub fn attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Per-engine-call deadline; independent attempts each get the full
    /// timeout.
    pub fn op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    /// Custom post-condition on the observed value, checked after the
    /// built-in fill verification.
    pub fn verify<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.verify = Some(Arc::new(predicate));
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_schedule(&self) -> &Backoff {
        &self.backoff
    }

    pub fn timeout(&self) -> Duration {
        self.op_timeout
    }

    pub(crate) fn verify_fn(&self) -> Option<&VerifyFn> {
        self.verify.as_ref()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("backoff", &self.backoff)
            .field("op_timeout", &self.op_timeout)
            .field("verify", &self.verify.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
