//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the serialised shape of their domain counterparts and
//! are registered with utoipa under the domain type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// No employee has the requested identifier.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request failed validation.
    #[schema(rename = "validation_failure")]
    ValidationFailure,
    /// The upstream rate limited a single call.
    #[schema(rename = "rate_limited")]
    RateLimited,
    /// Retries against a rate-limited upstream were exhausted.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// The upstream failed in a way retrying cannot fix.
    #[schema(rename = "upstream_error")]
    UpstreamError,
    /// The upstream refused to delete a resolved employee.
    #[schema(rename = "deletion_conflict")]
    DeletionConflict,
    /// An unexpected error occurred on the server.
    #[schema(rename = "unexpected")]
    Unexpected,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Error payload with a machine-readable code, a retry hint and optional
/// upstream metadata.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "service_unavailable")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Employee service temporarily unavailable")]
    message: String,
    /// Whether the same request may succeed if retried later.
    retryable: bool,
    /// HTTP status the upstream answered with, when one was received.
    #[schema(example = 429)]
    upstream_status: Option<u16>,
    /// Suggested wait in whole seconds; mirrors the `Retry-After` header.
    #[schema(example = 5)]
    retry_after_seconds: Option<u64>,
    /// Supplementary error details such as per-field validation messages.
    details: Option<serde_json::Value>,
    /// Correlation identifier; mirrors the `trace-id` response header.
    #[schema(example = "7b0f6d5e-2a51-4c2e-9a4f-0d8f1e6c3b21")]
    trace_id: Option<String>,
}
