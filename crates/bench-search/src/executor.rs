//! Search executor for running query descriptors against backends.
//!
//! This module provides the `SearchExecutor` which runs a batch of
//! descriptors concurrently, walks each one through the backend preference
//! order with retry and fallback, and de-duplicates the results.

use crate::backend::SearchBackend;
use crate::backends;
use crate::error::{BackendError, Result, SearchError};
use crate::query::QueryDescriptor;
use crate::result::{RawHit, SearchResult};
use crate::retry::{AttemptEvent, AttemptState, RetryPolicy};
use bench_core::{AppConfig, BackendKind, SearchConfig};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Concurrency, timeout and retry settings for one executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Maximum descriptors (and therefore backend calls) in flight
    pub concurrency_limit: usize,
    /// Timeout applied to every backend call
    pub call_timeout: Duration,
    /// Retry budget and backoff
    pub retry: RetryPolicy,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for ExecutorConfig {
    fn from(config: &SearchConfig) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit.max(1),
            call_timeout: Duration::from_secs(config.timeout_secs),
            retry: RetryPolicy {
                retry_budget: config.retry_budget,
                backoff_base: Duration::from_millis(config.backoff_base_ms),
                backoff_cap: Duration::from_millis(config.backoff_cap_ms),
            },
        }
    }
}

/// One failed backend call, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendFailure {
    /// Backend that failed
    pub backend: BackendKind,
    /// Retry count on that backend, from zero
    pub attempt: u32,
    /// Error description
    pub error: String,
}

/// Final state of one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DescriptorOutcome {
    /// A backend returned results (possibly none)
    Succeeded {
        /// Backend that answered
        backend: BackendKind,
        /// Hits returned, before de-duplication
        hits: usize,
        /// Backend calls made for this descriptor
        attempts: u32,
    },
    /// Every backend in the order was skipped or failed
    BackendExhausted {
        /// Failed calls; empty when every backend was skipped
        failures: Vec<BackendFailure>,
    },
    /// The batch was cancelled before this descriptor finished
    Cancelled,
}

impl DescriptorOutcome {
    /// Whether at least one backend call was actually made and failed.
    #[must_use]
    pub fn attempted_and_failed(&self) -> bool {
        matches!(self, Self::BackendExhausted { failures } if !failures.is_empty())
    }
}

/// A descriptor paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorReport {
    /// The descriptor that was run
    pub descriptor: QueryDescriptor,
    /// How it ended
    pub outcome: DescriptorOutcome,
}

/// Results and per-descriptor outcomes of one execution, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchBatch {
    /// De-duplicated results
    pub results: Vec<SearchResult>,
    /// One report per input descriptor
    pub reports: Vec<DescriptorReport>,
}

impl SearchBatch {
    /// Descriptors that got an answer.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, DescriptorOutcome::Succeeded { .. }))
    }

    /// Descriptors that ran out of backends.
    #[must_use]
    pub fn exhausted(&self) -> usize {
        self.count(|o| matches!(o, DescriptorOutcome::BackendExhausted { .. }))
    }

    /// Descriptors cut short by cancellation.
    #[must_use]
    pub fn cancelled(&self) -> usize {
        self.count(|o| matches!(o, DescriptorOutcome::Cancelled))
    }

    fn count(&self, predicate: impl Fn(&DescriptorOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// Runs descriptors against registered backends.
pub struct SearchExecutor {
    backends: HashMap<BackendKind, Arc<dyn SearchBackend>>,
    default_order: Vec<BackendKind>,
    config: ExecutorConfig,
}

impl SearchExecutor {
    /// Create an executor with no backends registered.
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            backends: HashMap::new(),
            default_order: BackendKind::DEFAULT_ORDER.to_vec(),
            config,
        }
    }

    /// Build the executor and the three HTTP backends from application config.
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        if config.search.concurrency_limit == 0 {
            return Err(SearchError::InvalidConfig(
                "concurrency_limit must be at least 1".to_string(),
            ));
        }

        let executor = backends::from_config(config)?
            .into_iter()
            .fold(Self::new(ExecutorConfig::from(&config.search)), Self::with_backend)
            .with_default_order(config.search.backend_order.clone());
        Ok(executor)
    }

    /// Register a backend, replacing any earlier one of the same kind.
    #[must_use]
    pub fn with_backend(mut self, backend: Arc<dyn SearchBackend>) -> Self {
        self.backends.insert(backend.kind(), backend);
        self
    }

    /// Set the order used by [`SearchExecutor::execute_default`].
    #[must_use]
    pub fn with_default_order(mut self, order: Vec<BackendKind>) -> Self {
        self.default_order = order;
        self
    }

    /// Executor settings.
    #[must_use]
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute with the configured backend order.
    pub async fn execute_default(&self, descriptors: &[QueryDescriptor]) -> Result<SearchBatch> {
        self.execute(descriptors, &self.default_order).await
    }

    /// Execute descriptors, trying backends in `preference` order.
    ///
    /// # Errors
    /// Returns `SearchUnavailable`, carrying every report, only when every
    /// descriptor exhausted its backends and at least one backend call was
    /// actually made.
    pub async fn execute(
        &self,
        descriptors: &[QueryDescriptor],
        preference: &[BackendKind],
    ) -> Result<SearchBatch> {
        self.execute_with_cancel(descriptors, preference, CancellationToken::new())
            .await
    }

    /// Execute descriptors until done or until `cancel` fires.
    ///
    /// After cancellation no new backend calls start, in-flight calls finish,
    /// backoff sleeps end early, and unfinished descriptors report `Cancelled`.
    pub async fn execute_with_cancel(
        &self,
        descriptors: &[QueryDescriptor],
        preference: &[BackendKind],
        cancel: CancellationToken,
    ) -> Result<SearchBatch> {
        let order = dedup_order(preference);
        info!(
            descriptors = descriptors.len(),
            backends = ?order,
            concurrency = self.config.concurrency_limit,
            "executing search batch"
        );

        // One slot per descriptor so output follows input order.
        let mut slots: Vec<Option<(Vec<RawHit>, DescriptorOutcome)>> =
            (0..descriptors.len()).map(|_| None).collect();

        let order_ref = &order;
        let cancel_ref = &cancel;
        let mut runs = stream::iter(descriptors.iter().enumerate().map(|(index, descriptor)| {
            async move {
                (
                    index,
                    self.run_descriptor(descriptor, order_ref, cancel_ref).await,
                )
            }
        }))
        .buffer_unordered(self.config.concurrency_limit.max(1));

        while let Some((index, run)) = runs.next().await {
            slots[index] = Some(run);
        }
        drop(runs);

        let mut seen = HashSet::new();
        let mut batch = SearchBatch::default();

        for (descriptor, slot) in descriptors.iter().zip(slots) {
            let (hits, outcome) = slot.unwrap_or((Vec::new(), DescriptorOutcome::Cancelled));

            if let DescriptorOutcome::Succeeded { backend, .. } = outcome {
                for hit in hits {
                    let result = SearchResult::from_hit(
                        hit,
                        descriptor.platform.clone(),
                        descriptor.category,
                        backend,
                    );
                    if !result.url.is_empty() && seen.insert(result.normalized_url()) {
                        batch.results.push(result);
                    }
                }
            }

            batch.reports.push(DescriptorReport {
                descriptor: descriptor.clone(),
                outcome,
            });
        }

        info!(
            results = batch.results.len(),
            succeeded = batch.succeeded(),
            exhausted = batch.exhausted(),
            cancelled = batch.cancelled(),
            "search batch finished"
        );

        let all_exhausted = !batch.reports.is_empty() && batch.exhausted() == batch.reports.len();
        let any_attempted = batch
            .reports
            .iter()
            .any(|r| r.outcome.attempted_and_failed());
        if all_exhausted && any_attempted {
            return Err(SearchError::SearchUnavailable {
                reports: batch.reports,
            });
        }

        Ok(batch)
    }

    /// Drive one descriptor through the retry state machine.
    async fn run_descriptor(
        &self,
        descriptor: &QueryDescriptor,
        order: &[BackendKind],
        cancel: &CancellationToken,
    ) -> (Vec<RawHit>, DescriptorOutcome) {
        let policy = &self.config.retry;
        let backends = order.len();
        let mut failures = Vec::new();
        let mut calls = 0u32;
        let mut found = Vec::new();

        let first = if cancel.is_cancelled() {
            AttemptEvent::Cancelled
        } else {
            AttemptEvent::Start
        };
        let mut step = policy.next(AttemptState::Pending, first, backends);

        loop {
            if let Some(delay) = step.delay {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => {
                        step = policy.next(step.state, AttemptEvent::Cancelled, backends);
                    }
                    () = tokio::time::sleep(delay) => {}
                }
            }

            let state = step.state;
            match state {
                AttemptState::Trying { backend, attempt } => {
                    if cancel.is_cancelled() {
                        step = policy.next(state, AttemptEvent::Cancelled, backends);
                        continue;
                    }

                    let kind = order[backend];
                    let Some(client) = self.backends.get(&kind).filter(|b| b.is_available())
                    else {
                        debug!(platform = %descriptor.platform, backend = %kind, "backend unavailable, skipping");
                        step = policy.next(state, AttemptEvent::Skipped, backends);
                        continue;
                    };

                    calls += 1;
                    step = match self.call(client.as_ref(), &descriptor.query).await {
                        Ok(hits) => {
                            debug!(
                                platform = %descriptor.platform,
                                backend = %kind,
                                hits = hits.len(),
                                "backend call succeeded"
                            );
                            found = hits;
                            policy.next(state, AttemptEvent::Succeeded, backends)
                        }
                        Err(error) if error.is_skip() => {
                            debug!(platform = %descriptor.platform, backend = %kind, %error, "backend declined, skipping");
                            policy.next(state, AttemptEvent::Skipped, backends)
                        }
                        Err(error) => {
                            let next = policy.next(state, AttemptEvent::Failed(&error), backends);
                            warn!(
                                platform = %descriptor.platform,
                                backend = %kind,
                                attempt = attempt + 1,
                                retry_in = ?next.delay,
                                %error,
                                "backend call failed"
                            );
                            failures.push(BackendFailure {
                                backend: kind,
                                attempt,
                                error: error.to_string(),
                            });
                            next
                        }
                    };
                }
                AttemptState::Succeeded { backend } => {
                    let outcome = DescriptorOutcome::Succeeded {
                        backend: order[backend],
                        hits: found.len(),
                        attempts: calls,
                    };
                    return (found, outcome);
                }
                AttemptState::BackendExhausted => {
                    return (Vec::new(), DescriptorOutcome::BackendExhausted { failures });
                }
                AttemptState::Cancelled => {
                    return (Vec::new(), DescriptorOutcome::Cancelled);
                }
                AttemptState::Pending => {
                    step = policy.next(state, AttemptEvent::Start, backends);
                }
            }
        }
    }

    /// One backend call under the per-call timeout.
    async fn call(
        &self,
        backend: &dyn SearchBackend,
        query: &str,
    ) -> std::result::Result<Vec<RawHit>, BackendError> {
        let after = self.config.call_timeout;
        match tokio::time::timeout(after, backend.submit(query)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout {
                backend: backend.kind(),
                after,
            }),
        }
    }
}

/// Drop repeated kinds, keeping the first occurrence.
fn dedup_order(preference: &[BackendKind]) -> Vec<BackendKind> {
    let mut seen = HashSet::new();
    preference
        .iter()
        .copied()
        .filter(|kind| seen.insert(*kind))
        .collect()
}
