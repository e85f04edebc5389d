//! Retrying decorator around the raw upstream directory port.
//!
//! [`RetryingDirectoryClient`] wraps an [`EmployeeDirectorySource`] and owns
//! every upstream-facing failure decision: rate limiting is retried with
//! exponential backoff, everything else fails fast. Rate-limit errors never
//! leave this module; exhaustion surfaces as `service_unavailable`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{DirectorySourceError, EmployeeDirectorySource};
use crate::domain::{CreateEmployeeRequest, Employee, Error, RequestContext};

mod mapping;
mod policy;
mod runtime;

pub use policy::{DEFAULT_MULTIPLIER, RetryDecision, RetryPolicy, RetryState};
pub use runtime::TokioSleeper;

/// Async sleeping abstraction used between retries.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    ///
    /// ```rust,no_run
    /// use async_trait::async_trait;
    /// use directory_gateway::domain::RetrySleeper;
    /// use std::sync::Mutex;
    /// use std::time::Duration;
    ///
    /// #[derive(Default)]
    /// struct CountingSleeper(Mutex<u32>);
    ///
    /// #[async_trait]
    /// impl RetrySleeper for CountingSleeper {
    ///     async fn sleep(&self, _duration: Duration) {
    ///         *self.0.lock().expect("calls mutex") += 1;
    ///     }
    /// }
    /// ```
    async fn sleep(&self, duration: Duration);
}

/// Upstream client that absorbs rate limiting behind bounded retries.
#[derive(Clone)]
pub struct RetryingDirectoryClient {
    source: Arc<dyn EmployeeDirectorySource>,
    sleeper: Arc<dyn RetrySleeper>,
    policy: RetryPolicy,
}

impl RetryingDirectoryClient {
    /// Wrap `source`, waiting with [`TokioSleeper`].
    pub fn new(source: Arc<dyn EmployeeDirectorySource>, policy: RetryPolicy) -> Self {
        Self::with_sleeper(source, Arc::new(TokioSleeper), policy)
    }

    /// Wrap `source` with an injected sleeper.
    pub fn with_sleeper(
        source: Arc<dyn EmployeeDirectorySource>,
        sleeper: Arc<dyn RetrySleeper>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            source,
            sleeper,
            policy,
        }
    }

    /// List every employee upstream.
    pub async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Employee>, Error> {
        self.execute(ctx, "list", || self.source.list_employees(ctx))
            .await
    }

    /// Create an employee upstream.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: &CreateEmployeeRequest,
    ) -> Result<Employee, Error> {
        self.execute(ctx, "create", || self.source.create_employee(ctx, request))
            .await
    }

    /// Delete by name upstream; `false` when the upstream refused.
    pub async fn delete_by_name(&self, ctx: &RequestContext, name: &str) -> Result<bool, Error> {
        self.execute(ctx, "delete", || {
            self.source.delete_employee_by_name(ctx, name)
        })
        .await
    }

    async fn execute<T, F, Fut>(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        mut call: F,
    ) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DirectorySourceError>>,
    {
        let trace_id = ctx.trace_id();
        let mut state = RetryState::new(&self.policy);

        loop {
            let error = match call().await {
                Ok(value) => {
                    debug!(
                        %trace_id,
                        operation,
                        attempt = state.attempt(),
                        "directory call succeeded"
                    );
                    return Ok(value);
                }
                Err(error) => error,
            };

            if !error.is_retryable() {
                warn!(
                    %trace_id,
                    operation,
                    attempt = state.attempt(),
                    status = error.upstream_status(),
                    %error,
                    "directory call failed"
                );
                return Err(mapping::map_source_error(error, &self.policy, ctx));
            }

            match state.record_transient_failure(&self.policy) {
                RetryDecision::Retry {
                    delay,
                    next_attempt,
                } => {
                    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                    debug!(
                        %trace_id,
                        operation,
                        attempt = next_attempt,
                        delay_ms,
                        "directory rate limited; backing off"
                    );
                    self.sleeper.sleep(delay).await;
                }
                RetryDecision::Exhausted { attempts } => {
                    warn!(
                        %trace_id,
                        operation,
                        attempts,
                        "directory retries exhausted"
                    );
                    return Err(mapping::map_retry_exhausted(attempts, &self.policy, ctx));
                }
            }
        }
    }
}
