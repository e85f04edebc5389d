//! Domain-level error envelope.
//!
//! Every failure that leaves the data-access layer is an [`Error`]: a tagged
//! [`ErrorCode`], a retry flag, and optional upstream metadata. The type is
//! transport agnostic. Inbound adapters translate it into HTTP responses (see
//! `inbound::http::error`).
//!
//! `rate_limited` is produced by the retry loop only while it is still
//! retrying and never escapes it; it stays in the taxonomy so the translator
//! table remains total.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The requested employee does not exist in the current snapshot.
    NotFound,
    /// Input was rejected before reaching the directory.
    ValidationFailure,
    /// The upstream rate-limited a single call.
    RateLimited,
    /// Retries against a rate-limited upstream were exhausted.
    ServiceUnavailable,
    /// The upstream failed in a way retrying cannot fix.
    UpstreamError,
    /// A name-based delete reported failure for a resolved employee.
    DeletionConflict,
    /// Catch-all for failures nothing else describes.
    Unexpected,
}

impl ErrorCode {
    /// Whether a caller may reasonably try the same request again later.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimited | Self::ServiceUnavailable)
    }

    /// Message used when a constructor receives a blank one.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::NotFound => "Employee not found",
            Self::ValidationFailure => "Validation failed",
            Self::RateLimited => "Too many requests",
            Self::ServiceUnavailable => "Employee service temporarily unavailable",
            Self::UpstreamError => "Employee service returned an error",
            Self::DeletionConflict => "Employee deletion failed",
            Self::Unexpected => "An unexpected error occurred",
        }
    }
}

/// Error envelope carried from the data-access layer to adapters.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use directory_gateway::domain::{Error, ErrorCode};
///
/// let err = Error::service_unavailable("upstream kept rate limiting")
///     .with_retry_after(Duration::from_secs(5));
/// assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
/// assert!(err.is_retryable());
/// assert_eq!(err.retry_after(), Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    retryable: bool,
    upstream_status: Option<u16>,
    retry_after: Option<Duration>,
    details: Option<Value>,
    trace_id: Option<String>,
}

impl Error {
    /// Create an error of the given kind.
    ///
    /// Blank messages are replaced by [`ErrorCode::default_message`].
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            retryable: code.is_retryable(),
            upstream_status: None,
            retry_after: None,
            details: None,
            trace_id: None,
        }
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailure`].
    pub fn validation_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailure, message)
    }

    /// Convenience constructor for [`ErrorCode::RateLimited`].
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RateLimited, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::UpstreamError`].
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamError, message)
    }

    /// Convenience constructor for [`ErrorCode::DeletionConflict`].
    pub fn deletion_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeletionConflict, message)
    }

    /// Convenience constructor for [`ErrorCode::Unexpected`].
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unexpected, message)
    }

    /// Stable machine-readable error kind.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Whether retrying later may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// HTTP status returned by the upstream, when one was received.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        self.upstream_status
    }

    /// Suggested wait before the caller retries.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Supplementary structured details (for example per-field messages).
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Correlation identifier of the request that failed.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach the upstream HTTP status.
    #[must_use]
    pub fn with_upstream_status(mut self, status: u16) -> Self {
        self.upstream_status = Some(status);
        self
    }

    /// Attach a retry-after hint.
    #[must_use]
    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }

    /// Attach the request correlation identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        let trace_id = trace_id.into();
        if !trace_id.trim().is_empty() {
            self.trace_id = Some(trace_id);
        }
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// Round a retry hint up to whole seconds, as used by `Retry-After`.
pub(crate) fn retry_after_seconds(retry_after: Duration) -> u64 {
    retry_after
        .as_secs()
        .saturating_add(u64::from(retry_after.subsec_nanos() > 0))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    retryable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    upstream_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    retry_after_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            retryable: value.retryable,
            upstream_status: value.upstream_status,
            retry_after_seconds: value.retry_after.map(retry_after_seconds),
            details: value.details,
            trace_id: value.trace_id,
        }
    }
}

impl From<ErrorDto> for Error {
    fn from(value: ErrorDto) -> Self {
        let ErrorDto {
            code,
            message,
            retryable,
            upstream_status,
            retry_after_seconds,
            details,
            trace_id,
        } = value;

        let mut error = Error::new(code, message);
        error.retryable = retryable;
        error.upstream_status = upstream_status;
        error.retry_after = retry_after_seconds.map(Duration::from_secs);
        error.details = details;
        error.trace_id = trace_id;
        error
    }
}
