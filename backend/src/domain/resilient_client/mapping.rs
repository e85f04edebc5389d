//! Translation of upstream failures into the domain error envelope.

use crate::domain::ports::DirectorySourceError;
use crate::domain::{Error, RequestContext};

use super::RetryPolicy;

pub(super) fn map_source_error(
    error: DirectorySourceError,
    policy: &RetryPolicy,
    ctx: &RequestContext,
) -> Error {
    let status = error.upstream_status();
    let mapped = match error {
        DirectorySourceError::RateLimited { message } => {
            Error::rate_limited(format!("employee directory rate limited request: {message}"))
                .with_retry_after(policy.retry_after)
        }
        DirectorySourceError::ServerError { status, .. } => Error::upstream(format!(
            "employee directory failed with status {status}"
        )),
        DirectorySourceError::Rejected { status, .. } => Error::upstream(format!(
            "employee directory rejected the request with status {status}"
        )),
        DirectorySourceError::Timeout { message } => {
            Error::upstream(format!("employee directory timed out: {message}"))
        }
        DirectorySourceError::Transport { message } => {
            Error::upstream(format!("employee directory unreachable: {message}"))
        }
        DirectorySourceError::Decode { message } => Error::upstream(format!(
            "employee directory returned a malformed response: {message}"
        )),
    };

    let mapped = match status {
        Some(status) => mapped.with_upstream_status(status),
        None => mapped,
    };
    mapped.with_trace_id(ctx.trace_id().to_string())
}

pub(super) fn map_retry_exhausted(
    attempts: u32,
    policy: &RetryPolicy,
    ctx: &RequestContext,
) -> Error {
    Error::service_unavailable(format!(
        "employee directory still rate limiting after {attempts} attempts"
    ))
    .with_upstream_status(429)
    .with_retry_after(policy.retry_after)
    .with_trace_id(ctx.trace_id().to_string())
}
