//! Per-descriptor retry and fallback state machine.
//!
//! The executor drives one [`AttemptState`] per descriptor through
//! [`RetryPolicy::next`]. The transition function does no I/O, so every
//! retry, fallback and backoff decision can be tested directly.

use crate::error::BackendError;
use std::time::Duration;

/// Rate limit backoff multiplier (longer wait for rate limits).
pub const RATE_LIMIT_BACKOFF_MULTIPLIER: u32 = 3;

/// Where a descriptor is in its trip through the backend list.
///
/// `backend` indexes the resolved backend order for the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// Not started
    Pending,
    /// About to call (or calling) `backend` for the `attempt`-th time, from zero
    Trying {
        /// Index into the backend order
        backend: usize,
        /// Retry count on this backend
        attempt: u32,
    },
    /// A backend returned results
    Succeeded {
        /// Index into the backend order
        backend: usize,
    },
    /// Every backend was skipped or failed
    BackendExhausted,
    /// The batch was cancelled first
    Cancelled,
}

impl AttemptState {
    /// No further transitions happen from this state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded { .. } | Self::BackendExhausted | Self::Cancelled
        )
    }
}

/// What happened since the last transition.
#[derive(Debug, Clone, Copy)]
pub enum AttemptEvent<'a> {
    /// Begin processing
    Start,
    /// Current backend is unavailable (no credentials, disabled, not registered)
    Skipped,
    /// Current backend call failed
    Failed(&'a BackendError),
    /// Current backend call succeeded
    Succeeded,
    /// Batch cancelled
    Cancelled,
}

/// Next state plus how long to wait before acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// State to move to
    pub state: AttemptState,
    /// Backoff before the next call, if any
    pub delay: Option<Duration>,
}

impl Step {
    fn now(state: AttemptState) -> Self {
        Self { state, delay: None }
    }
}

/// Retry budget and backoff parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries on the same backend after a transient failure
    pub retry_budget: u32,
    /// Delay before the first retry
    pub backoff_base: Duration,
    /// Upper bound on any delay
    pub backoff_cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_budget: 2,
            backoff_base: Duration::from_millis(500),
            backoff_cap: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Transition `state` on `event`, given `backends` entries in the order.
    ///
    /// Terminal states absorb every event. Cancellation wins over anything
    /// non-terminal.
    #[must_use]
    pub fn next(&self, state: AttemptState, event: AttemptEvent<'_>, backends: usize) -> Step {
        if state.is_terminal() {
            return Step::now(state);
        }
        if matches!(event, AttemptEvent::Cancelled) {
            return Step::now(AttemptState::Cancelled);
        }

        match (state, event) {
            (AttemptState::Pending, _) => Step::now(Self::first_from(0, backends)),
            (AttemptState::Trying { backend, .. }, AttemptEvent::Succeeded) => {
                Step::now(AttemptState::Succeeded { backend })
            }
            (AttemptState::Trying { backend, .. }, AttemptEvent::Skipped) => {
                Step::now(Self::first_from(backend + 1, backends))
            }
            (AttemptState::Trying { backend, attempt }, AttemptEvent::Failed(error)) => {
                if error.is_transient() && attempt < self.retry_budget {
                    Step {
                        state: AttemptState::Trying {
                            backend,
                            attempt: attempt + 1,
                        },
                        delay: Some(self.backoff(attempt, error)),
                    }
                } else {
                    Step::now(Self::first_from(backend + 1, backends))
                }
            }
            // Start while already trying is a no-op.
            (current, _) => Step::now(current),
        }
    }

    /// Delay before retry number `attempt + 1`.
    ///
    /// `min(base * 2^attempt, cap)`, tripled for rate limits and never
    /// shorter than a server-supplied `Retry-After`, still bounded by the cap.
    #[must_use]
    pub fn backoff(&self, attempt: u32, error: &BackendError) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        let mut delay = self.backoff_base.saturating_mul(factor);

        if error.is_rate_limited() {
            delay = delay.saturating_mul(RATE_LIMIT_BACKOFF_MULTIPLIER);
        }
        if let Some(retry_after) = error.retry_after() {
            delay = delay.max(retry_after);
        }

        delay.min(self.backoff_cap)
    }

    fn first_from(index: usize, backends: usize) -> AttemptState {
        if index < backends {
            AttemptState::Trying {
                backend: index,
                attempt: 0,
            }
        } else {
            AttemptState::BackendExhausted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_core::BackendKind;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            retry_budget: 2,
            backoff_base: Duration::from_millis(100),
            backoff_cap: Duration::from_secs(2),
        }
    }

    fn server_error() -> BackendError {
        BackendError::Http {
            backend: BackendKind::HostedSearchApi,
            status: 502,
            message: String::new(),
        }
    }

    fn rate_limited(retry_after: Option<Duration>) -> BackendError {
        BackendError::RateLimited {
            backend: BackendKind::DirectScrape,
            retry_after,
        }
    }

    fn trying(backend: usize, attempt: u32) -> AttemptState {
        AttemptState::Trying { backend, attempt }
    }

    #[test]
    fn test_start() {
        let p = policy();
        assert_eq!(p.next(AttemptState::Pending, AttemptEvent::Start, 3).state, trying(0, 0));
        assert_eq!(
            p.next(AttemptState::Pending, AttemptEvent::Start, 0).state,
            AttemptState::BackendExhausted
        );
    }

    #[test]
    fn test_transient_retries_then_falls_back() {
        let p = policy();
        let err = server_error();

        let step = p.next(trying(0, 0), AttemptEvent::Failed(&err), 2);
        assert_eq!(step.state, trying(0, 1));
        assert_eq!(step.delay, Some(Duration::from_millis(100)));

        let step = p.next(trying(0, 1), AttemptEvent::Failed(&err), 2);
        assert_eq!(step.state, trying(0, 2));
        assert_eq!(step.delay, Some(Duration::from_millis(200)));

        let step = p.next(trying(0, 2), AttemptEvent::Failed(&err), 2);
        assert_eq!(step.state, trying(1, 0));
        assert_eq!(step.delay, None);

        let step = p.next(trying(1, 2), AttemptEvent::Failed(&err), 2);
        assert_eq!(step.state, AttemptState::BackendExhausted);
    }

    #[test]
    fn test_permanent_failure_advances_immediately() {
        let err = BackendError::Http {
            backend: BackendKind::GeneralSearchApi,
            status: 403,
            message: String::new(),
        };
        let step = policy().next(trying(0, 0), AttemptEvent::Failed(&err), 3);
        assert_eq!(step, Step { state: trying(1, 0), delay: None });
    }

    #[test]
    fn test_skip_advances_without_delay() {
        let step = policy().next(trying(1, 0), AttemptEvent::Skipped, 3);
        assert_eq!(step, Step { state: trying(2, 0), delay: None });
        let step = policy().next(trying(2, 0), AttemptEvent::Skipped, 3);
        assert_eq!(step.state, AttemptState::BackendExhausted);
    }

    #[test]
    fn test_success_records_backend() {
        let step = policy().next(trying(2, 1), AttemptEvent::Succeeded, 3);
        assert_eq!(step.state, AttemptState::Succeeded { backend: 2 });
    }

    #[test]
    fn test_cancel_and_terminal_absorb() {
        let p = policy();
        assert_eq!(
            p.next(trying(0, 1), AttemptEvent::Cancelled, 3).state,
            AttemptState::Cancelled
        );
        assert_eq!(
            p.next(AttemptState::Pending, AttemptEvent::Cancelled, 3).state,
            AttemptState::Cancelled
        );
        let done = AttemptState::Succeeded { backend: 0 };
        assert_eq!(p.next(done, AttemptEvent::Cancelled, 3).state, done);
        assert_eq!(
            p.next(AttemptState::BackendExhausted, AttemptEvent::Start, 3).state,
            AttemptState::BackendExhausted
        );
    }

    #[test]
    fn test_zero_budget_never_retries() {
        let p = RetryPolicy {
            retry_budget: 0,
            ..policy()
        };
        let step = p.next(trying(0, 0), AttemptEvent::Failed(&server_error()), 2);
        assert_eq!(step.state, trying(1, 0));
    }

    #[test]
    fn test_backoff_growth_and_cap() {
        let p = policy();
        let err = server_error();
        assert_eq!(p.backoff(0, &err), Duration::from_millis(100));
        assert_eq!(p.backoff(3, &err), Duration::from_millis(800));
        assert_eq!(p.backoff(10, &err), Duration::from_secs(2));
        assert_eq!(p.backoff(u32::MAX, &err), Duration::from_secs(2));
    }

    #[test]
    fn test_backoff_rate_limit_multiplier() {
        let p = policy();
        assert_eq!(p.backoff(0, &rate_limited(None)), Duration::from_millis(300));
        assert_eq!(p.backoff(1, &rate_limited(None)), Duration::from_millis(600));
    }

    #[test]
    fn test_backoff_honors_retry_after_within_cap() {
        let p = policy();
        assert_eq!(
            p.backoff(0, &rate_limited(Some(Duration::from_secs(1)))),
            Duration::from_secs(1)
        );
        assert_eq!(
            p.backoff(0, &rate_limited(Some(Duration::from_secs(60)))),
            Duration::from_secs(2)
        );
    }
}
