//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the employee endpoints, the health probes and the
//! schema wrappers from [`crate::inbound::http::schemas`], which give the
//! domain error envelope an OpenAPI definition without coupling domain types
//! to utoipa. Swagger UI serves the document in debug builds.

use crate::inbound::http::employees::{CreateEmployeeBody, EmployeeResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee directory gateway API",
        description = "Resilient, cached access to the upstream Employee Directory Service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::search_employees,
        crate::inbound::http::employees::highest_salary,
        crate::inbound::http::employees::top_ten_highest_earning_employee_names,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(EmployeeResponse, CreateEmployeeBody, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "employees", description = "Employee directory operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
