//! Domain types, ports and services for the employee directory gateway.
//!
//! Purpose: keep every upstream-facing decision (retry, caching, error
//! classification, the id-to-name delete workaround) free of HTTP and
//! transport details. Adapters live in `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: the error envelope every operation returns.
//! - Employee, EmployeeId, CreateEmployeeRequest: directory entries and input.
//! - Snapshot, SnapshotCache: the cached full list.
//! - RetryingDirectoryClient, RetryPolicy: bounded retries upstream.
//! - EmployeeDirectoryService: the use cases behind the HTTP API.
//! - RequestContext, TraceId: explicit per-request correlation.

pub mod aggregation;
pub mod directory_service;
pub mod employee;
pub mod error;
pub mod ports;
pub mod request_context;
pub mod resilient_client;
pub mod snapshot;
pub mod snapshot_cache;

pub use self::directory_service::EmployeeDirectoryService;
pub use self::employee::{
    CreateEmployeeDraft, CreateEmployeeRequest, CreateEmployeeValidationError, Employee,
    EmployeeId, FieldViolation, MAX_AGE, MIN_AGE,
};
pub use self::error::{Error, ErrorCode};
pub use self::request_context::{RequestContext, TraceId};
pub use self::resilient_client::{
    RetryDecision, RetryPolicy, RetrySleeper, RetryState, RetryingDirectoryClient, TokioSleeper,
};
pub use self::snapshot::Snapshot;
pub use self::snapshot_cache::{DEFAULT_SNAPSHOT_TTL, SnapshotCache};
