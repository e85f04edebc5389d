//! Driven port for the upstream Employee Directory Service.
//!
//! The upstream only lists, creates, and deletes by name. Lookups by id and
//! the id-to-name delete workaround live in the domain, not the adapter.

use async_trait::async_trait;

use crate::domain::{CreateEmployeeRequest, Employee, RequestContext};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the upstream directory.
    pub enum DirectorySourceError {
        /// The upstream answered 429 Too Many Requests.
        RateLimited { message: String } =>
            "directory rate limited request: {message}",
        /// The upstream answered with a 5xx status.
        ServerError { status: u16, message: String } =>
            "directory server error ({status}): {message}",
        /// The upstream rejected the request with a 4xx status other than 429.
        Rejected { status: u16, message: String } =>
            "directory rejected request ({status}): {message}",
        /// Connecting or reading exceeded the configured timeout.
        Timeout { message: String } =>
            "directory timeout: {message}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "directory transport failed: {message}",
        /// A 2xx response body could not be decoded.
        Decode { message: String } =>
            "directory response decode failed: {message}",
    }
}

impl DirectorySourceError {
    /// Return whether retrying this error is expected to help.
    ///
    /// Only rate limiting is transient; server errors fail fast.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// HTTP status received from the upstream, when there was a response.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::ServerError { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::Timeout { .. } | Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Port for raw, single-shot calls to the upstream directory.
///
/// Implementations issue exactly one upstream request per call and never
/// retry; retry policy belongs to the domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectorySource: Send + Sync {
    /// Fetch every employee currently known upstream.
    async fn list_employees(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Employee>, DirectorySourceError>;

    /// Create one employee and return the upstream's copy of it.
    async fn create_employee(
        &self,
        ctx: &RequestContext,
        request: &CreateEmployeeRequest,
    ) -> Result<Employee, DirectorySourceError>;

    /// Delete the employee with `name`; `false` means the upstream refused.
    async fn delete_employee_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<bool, DirectorySourceError>;
}

#[cfg(test)]
mod tests {
    //! Classification rules for upstream failures.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::rate_limited(DirectorySourceError::rate_limited("slow"), true, Some(429))]
    #[case::server(DirectorySourceError::server_error(503_u16, "down"), false, Some(503))]
    #[case::rejected(DirectorySourceError::rejected(400_u16, "bad"), false, Some(400))]
    #[case::timeout(DirectorySourceError::timeout("slow read"), false, None)]
    #[case::transport(DirectorySourceError::transport("refused"), false, None)]
    #[case::decode(DirectorySourceError::decode("eof"), false, None)]
    fn classifies_failures(
        #[case] error: DirectorySourceError,
        #[case] retryable: bool,
        #[case] status: Option<u16>,
    ) {
        assert_eq!(error.is_retryable(), retryable);
        assert_eq!(error.upstream_status(), status);
    }

    #[rstest]
    fn messages_include_status() {
        let error = DirectorySourceError::server_error(502_u16, "bad gateway");
        assert_eq!(
            error.to_string(),
            "directory server error (502): bad gateway"
        );
    }
}
