//! Driving port exposing directory operations to inbound adapters.

use async_trait::async_trait;

use crate::domain::{CreateEmployeeRequest, Employee, EmployeeId, Error, RequestContext};

/// Employee directory use cases consumed by HTTP handlers.
///
/// Every failure is an [`Error`] envelope ready for translation at the
/// boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Every employee in the current snapshot.
    async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Employee>, Error>;

    /// Employees whose name contains `query`, ignoring case.
    async fn search(&self, ctx: &RequestContext, query: &str) -> Result<Vec<Employee>, Error>;

    /// The employee with `id`, or a `not_found` error.
    async fn get_by_id(&self, ctx: &RequestContext, id: EmployeeId) -> Result<Employee, Error>;

    /// Highest known salary; `0` when no salary is known.
    async fn highest_salary(&self, ctx: &RequestContext) -> Result<u32, Error>;

    /// Names of the ten best paid employees, highest first.
    async fn top_ten_names(&self, ctx: &RequestContext) -> Result<Vec<String>, Error>;

    /// Create an employee upstream.
    async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateEmployeeRequest,
    ) -> Result<Employee, Error>;

    /// Delete the employee with `id` and return the deleted name.
    async fn delete_by_id(&self, ctx: &RequestContext, id: EmployeeId) -> Result<String, Error>;
}
