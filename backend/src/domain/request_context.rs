//! Request-scoped correlation context.
//!
//! A [`RequestContext`] is created once per inbound request and passed by
//! reference to every domain and outbound call made on its behalf. Nothing is
//! stored in task-local or global state, so spawned work only sees a context
//! when one is handed to it.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Correlation identifier that follows one request through logs, errors and
/// upstream calls.
///
/// # Examples
/// ```
/// use directory_gateway::domain::TraceId;
///
/// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// assert_eq!(trace_id.to_string(), "00000000-0000-0000-0000-000000000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random trace identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct a trace identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Values that belong to one inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    trace_id: TraceId,
}

impl RequestContext {
    /// Build a context carrying `trace_id`.
    #[must_use]
    pub const fn new(trace_id: TraceId) -> Self {
        Self { trace_id }
    }

    /// Build a context with a freshly generated trace identifier.
    ///
    /// Used for work that does not originate from an HTTP request.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(TraceId::generate())
    }

    /// Correlation identifier of the request.
    #[must_use]
    pub const fn trace_id(&self) -> TraceId {
        self.trace_id
    }
}
