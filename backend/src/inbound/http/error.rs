//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error envelope HTTP-agnostic while letting Actix
//! handlers turn failures into consistent JSON responses, status codes and
//! `Retry-After` hints.

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::http::header::RETRY_AFTER;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::error::retry_after_seconds;
use crate::domain::{Error, ErrorCode};
use crate::middleware::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Hint used when a retryable error carries none of its own.
const FALLBACK_RETRY_AFTER: Duration = Duration::from_secs(5);

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ValidationFailure => StatusCode::BAD_REQUEST,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::UpstreamError => StatusCode::BAD_GATEWAY,
        ErrorCode::DeletionConflict | ErrorCode::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn retry_after_for(error: &Error) -> Option<Duration> {
    match error.code() {
        ErrorCode::RateLimited | ErrorCode::ServiceUnavailable => {
            Some(error.retry_after().unwrap_or(FALLBACK_RETRY_AFTER))
        }
        _ => None,
    }
}

fn sanitise_if_unexpected(error: &Error) -> Error {
    if !matches!(error.code(), ErrorCode::Unexpected) {
        return error.clone();
    }

    error!(
        trace_id = error.trace_id().unwrap_or_default(),
        message = error.message(),
        details = ?error.details(),
        "unexpected error reached the HTTP boundary"
    );
    let sanitised = Error::unexpected(ErrorCode::Unexpected.default_message());
    match error.trace_id() {
        Some(id) => sanitised.with_trace_id(id.to_owned()),
        None => sanitised,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        let body = sanitise_if_unexpected(self);
        if let Some(retry_after) = retry_after_for(self) {
            builder.insert_header((RETRY_AFTER, retry_after_seconds(retry_after).to_string()));
            return builder.json(body.with_retry_after(retry_after));
        }

        builder.json(body)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::unexpected(ErrorCode::Unexpected.default_message())
    }
}

#[cfg(test)]
mod tests;
