//! Employee directory HTTP handlers.
//!
//! ```text
//! GET    /api/v1/employee
//! GET    /api/v1/employee/search/{searchString}
//! GET    /api/v1/employee/highestSalary
//! GET    /api/v1/employee/topTenHighestEarningEmployeeNames
//! GET    /api/v1/employee/{id}
//! POST   /api/v1/employee {"name":"Ada","salary":90000,"age":36,"title":"Engineer"}
//! DELETE /api/v1/employee/{id}
//! ```
//!
//! Handlers only translate between HTTP and the
//! [`EmployeeDirectory`](crate::domain::ports::EmployeeDirectory) port.
//! Every failure leaves through the error translator in
//! [`crate::inbound::http::error`].

use actix_web::http::header::ContentType;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    CreateEmployeeDraft, CreateEmployeeRequest, Employee, EmployeeId, Error, RequestContext,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Mount point of the employee endpoints.
pub const EMPLOYEE_SCOPE: &str = "/api/v1/employee";

/// Employee as returned to clients, using the directory's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: Uuid,
    #[schema(example = "Ada Lovelace")]
    pub employee_name: Option<String>,
    #[schema(example = 90_000)]
    pub employee_salary: Option<u32>,
    #[schema(example = 36)]
    pub employee_age: Option<i32>,
    #[schema(example = "Engineer")]
    pub employee_title: String,
    #[schema(example = "ada@example.com")]
    pub employee_email: String,
}

impl From<&Employee> for EmployeeResponse {
    fn from(value: &Employee) -> Self {
        Self {
            id: *value.id().as_uuid(),
            employee_name: value.name().map(str::to_owned),
            employee_salary: value.salary(),
            employee_age: value.age(),
            employee_title: value.title().to_owned(),
            employee_email: value.contact().to_owned(),
        }
    }
}

/// Request body for `POST /api/v1/employee`.
///
/// Every field is optional at the wire level so missing values are reported
/// together as validation failures rather than as a JSON parse error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployeeBody {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = 90_000)]
    pub salary: Option<i64>,
    #[schema(example = 36)]
    pub age: Option<i64>,
    #[schema(example = "Engineer")]
    pub title: Option<String>,
}

impl From<CreateEmployeeBody> for CreateEmployeeDraft {
    fn from(value: CreateEmployeeBody) -> Self {
        Self {
            name: value.name,
            salary: value.salary,
            age: value.age,
            title: value.title,
        }
    }
}

fn parse_employee_id(ctx: &RequestContext, raw: &str) -> Result<EmployeeId, Error> {
    raw.parse::<EmployeeId>()
        .map_err(|err| err.with_trace_id(ctx.trace_id().to_string()))
}

fn to_responses(employees: &[Employee]) -> Vec<EmployeeResponse> {
    employees.iter().map(EmployeeResponse::from).collect()
}

/// JSON extractor settings that report malformed bodies as validation
/// failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req: &HttpRequest| {
        let ctx = req
            .extensions()
            .get::<RequestContext>()
            .copied()
            .unwrap_or_else(RequestContext::detached);
        Error::validation_failure(format!("invalid request body: {err}"))
            .with_trace_id(ctx.trace_id().to_string())
            .into()
    })
}

/// Register the employee endpoints.
///
/// Fixed paths are registered before `/{id}` so they are never parsed as
/// identifiers.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use directory_gateway::inbound::http::employees::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(EMPLOYEE_SCOPE)
            .app_data(json_config())
            .service(list_employees)
            .service(search_employees)
            .service(highest_salary)
            .service(top_ten_highest_earning_employee_names)
            .service(get_employee)
            .service(create_employee)
            .service(delete_employee),
    );
}

/// List every employee in the directory.
#[utoipa::path(
    get,
    path = "/api/v1/employee",
    responses(
        (status = 200, description = "All employees", body = [EmployeeResponse]),
        (status = 502, description = "Upstream failure", body = ErrorSchema),
        (status = 503, description = "Upstream rate limited", body = ErrorSchema,
            headers(("Retry-After" = u64, description = "Seconds to wait")))
    ),
    tags = ["employees"],
    operation_id = "getAllEmployees"
)]
#[get("")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    ctx: RequestContext,
) -> ApiResult<web::Json<Vec<EmployeeResponse>>> {
    let employees = state.directory.list_all(&ctx).await?;
    Ok(web::Json(to_responses(&employees)))
}

/// Case-insensitive substring search on employee names.
#[utoipa::path(
    get,
    path = "/api/v1/employee/search/{search_string}",
    params(("search_string" = String, Path, description = "Name fragment to look for")),
    responses(
        (status = 200, description = "Matching employees", body = [EmployeeResponse]),
        (status = 502, description = "Upstream failure", body = ErrorSchema),
        (status = 503, description = "Upstream rate limited", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployeesByNameSearch"
)]
#[get("/search/{search_string}")]
pub async fn search_employees(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<EmployeeResponse>>> {
    let employees = state.directory.search(&ctx, path.as_str()).await?;
    Ok(web::Json(to_responses(&employees)))
}

/// Highest known salary, `0` for an empty directory.
#[utoipa::path(
    get,
    path = "/api/v1/employee/highestSalary",
    responses(
        (status = 200, description = "Highest salary", body = u32),
        (status = 502, description = "Upstream failure", body = ErrorSchema),
        (status = 503, description = "Upstream rate limited", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getHighestSalaryOfEmployees"
)]
#[get("/highestSalary")]
pub async fn highest_salary(
    state: web::Data<HttpState>,
    ctx: RequestContext,
) -> ApiResult<web::Json<u32>> {
    let salary = state.directory.highest_salary(&ctx).await?;
    Ok(web::Json(salary))
}

/// Names of the ten best paid employees, highest first.
#[utoipa::path(
    get,
    path = "/api/v1/employee/topTenHighestEarningEmployeeNames",
    responses(
        (status = 200, description = "Top earner names", body = [String]),
        (status = 502, description = "Upstream failure", body = ErrorSchema),
        (status = 503, description = "Upstream rate limited", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getTopTenHighestEarningEmployeeNames"
)]
#[get("/topTenHighestEarningEmployeeNames")]
pub async fn top_ten_highest_earning_employee_names(
    state: web::Data<HttpState>,
    ctx: RequestContext,
) -> ApiResult<web::Json<Vec<String>>> {
    let names = state.directory.top_ten_names(&ctx).await?;
    Ok(web::Json(names))
}

/// Fetch one employee by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/employee/{id}",
    params(("id" = Uuid, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee", body = EmployeeResponse),
        (status = 400, description = "Identifier is not a UUID", body = ErrorSchema),
        (status = 404, description = "No such employee", body = ErrorSchema),
        (status = 502, description = "Upstream failure", body = ErrorSchema),
        (status = 503, description = "Upstream rate limited", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployeeById"
)]
#[get("/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let id = parse_employee_id(&ctx, path.as_str())?;
    let employee = state.directory.get_by_id(&ctx, id).await?;
    Ok(web::Json(EmployeeResponse::from(&employee)))
}

/// Create an employee.
#[utoipa::path(
    post,
    path = "/api/v1/employee",
    request_body = CreateEmployeeBody,
    responses(
        (status = 200, description = "Created employee", body = EmployeeResponse),
        (status = 400, description = "Invalid request body", body = ErrorSchema),
        (status = 502, description = "Upstream failure", body = ErrorSchema),
        (status = 503, description = "Upstream rate limited", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    payload: web::Json<CreateEmployeeBody>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let draft = CreateEmployeeDraft::from(payload.into_inner());
    let request = CreateEmployeeRequest::try_from_draft(draft)
        .map_err(|err| Error::from(err).with_trace_id(ctx.trace_id().to_string()))?;
    let created = state.directory.create(&ctx, request).await?;
    Ok(web::Json(EmployeeResponse::from(&created)))
}

/// Delete an employee and return its name as plain text.
#[utoipa::path(
    delete,
    path = "/api/v1/employee/{id}",
    params(("id" = Uuid, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Name of the deleted employee", body = String, content_type = "text/plain"),
        (status = 400, description = "Identifier is not a UUID", body = ErrorSchema),
        (status = 404, description = "No such employee", body = ErrorSchema),
        (status = 500, description = "Upstream refused the deletion", body = ErrorSchema),
        (status = 502, description = "Upstream failure", body = ErrorSchema),
        (status = 503, description = "Upstream rate limited", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployeeById"
)]
#[delete("/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_employee_id(&ctx, path.as_str())?;
    let name = state.directory.delete_by_id(&ctx, id).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(name))
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
