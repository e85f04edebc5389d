//! Reqwest-backed directory source adapter.
//!
//! This adapter owns transport details only: request serialisation, timeouts,
//! HTTP status mapping and envelope decoding into domain employees. It makes
//! exactly one request per call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::dto::{CreateEmployeeDto, DeleteEmployeeDto, EmployeeDto, EnvelopeDto};
use crate::domain::ports::{DirectorySourceError, EmployeeDirectorySource};
use crate::domain::{CreateEmployeeRequest, Employee, RequestContext};

const TRACE_HEADER: &str = "trace-id";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection and whole-request timeouts for upstream calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryHttpTimeouts {
    /// Limit for establishing the TCP/TLS connection.
    pub connect: Duration,
    /// Limit for the whole request, body included.
    pub read: Duration,
}

impl Default for DirectoryHttpTimeouts {
    fn default() -> Self {
        Self {
            connect: DEFAULT_CONNECT_TIMEOUT,
            read: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// Directory source that talks JSON to one upstream endpoint.
pub struct HttpDirectorySource {
    client: Client,
    endpoint: Url,
}

impl HttpDirectorySource {
    /// Build an adapter using a reqwest client with explicit timeouts.
    /// ```rust,ignore
    /// let source = HttpDirectorySource::new(endpoint, DirectoryHttpTimeouts::default());
    /// assert!(source.is_ok() || source.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeouts: DirectoryHttpTimeouts) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.read)
            .build()?;
        Ok(Self { client, endpoint })
    }

    fn request(&self, method: Method, ctx: &RequestContext) -> RequestBuilder {
        self.client
            .request(method, self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(TRACE_HEADER, ctx.trace_id().to_string())
    }

    async fn exchange<T, B>(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        method: Method,
        body: Option<&B>,
    ) -> Result<EnvelopeDto<T>, DirectorySourceError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method, ctx);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(
            trace_id = %ctx.trace_id(),
            operation,
            status = status.as_u16(),
            bytes = body.len(),
            "directory responded"
        );
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode_envelope(body.as_ref())
    }
}

#[async_trait]
impl EmployeeDirectorySource for HttpDirectorySource {
    async fn list_employees(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Employee>, DirectorySourceError> {
        let envelope = self
            .exchange::<Vec<EmployeeDto>, ()>(ctx, "list", Method::GET, None)
            .await?;
        Ok(listed_employees(envelope))
    }

    async fn create_employee(
        &self,
        ctx: &RequestContext,
        request: &CreateEmployeeRequest,
    ) -> Result<Employee, DirectorySourceError> {
        let body = CreateEmployeeDto::from(request);
        let envelope = self
            .exchange::<EmployeeDto, _>(ctx, "create", Method::POST, Some(&body))
            .await?;
        created_employee(envelope)
    }

    async fn delete_employee_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<bool, DirectorySourceError> {
        let body = DeleteEmployeeDto { name };
        let envelope = self
            .exchange::<Value, _>(ctx, "delete", Method::DELETE, Some(&body))
            .await?;
        Ok(deletion_confirmed(&envelope))
    }
}

fn decode_envelope<T: DeserializeOwned>(
    body: &[u8],
) -> Result<EnvelopeDto<T>, DirectorySourceError> {
    serde_json::from_slice(body).map_err(|error| {
        DirectorySourceError::decode(format!("invalid directory JSON payload: {error}"))
    })
}

/// A missing list means the directory is empty.
fn listed_employees(envelope: EnvelopeDto<Vec<EmployeeDto>>) -> Vec<Employee> {
    envelope
        .data
        .unwrap_or_default()
        .into_iter()
        .map(EmployeeDto::into_domain)
        .collect()
}

fn created_employee(envelope: EnvelopeDto<EmployeeDto>) -> Result<Employee, DirectorySourceError> {
    match envelope.data {
        Some(dto) => Ok(dto.into_domain()),
        None => Err(DirectorySourceError::decode(match envelope.error {
            Some(error) if !error.trim().is_empty() => format!("no data returned: {error}"),
            _ => "no data returned".to_owned(),
        })),
    }
}

/// Anything other than a literal `true` counts as a refusal.
fn deletion_confirmed(envelope: &EnvelopeDto<Value>) -> bool {
    matches!(envelope.data, Some(Value::Bool(true)))
}

fn map_transport_error(error: reqwest::Error) -> DirectorySourceError {
    if error.is_timeout() {
        DirectorySourceError::timeout(error.to_string())
    } else if error.is_decode() {
        DirectorySourceError::decode(error.to_string())
    } else {
        DirectorySourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DirectorySourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => DirectorySourceError::rate_limited(message),
        _ if status.is_server_error() => {
            DirectorySourceError::server_error(status.as_u16(), message)
        }
        _ => DirectorySourceError::rejected(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = compact.chars();
    let preview = chars.by_ref().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}
