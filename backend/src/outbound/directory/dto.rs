//! Wire DTOs for the upstream directory.
//!
//! Every upstream response is wrapped in an envelope
//! `{ "data": ..., "status": "...", "error": "..." }`. The adapter decodes the
//! envelope first, then maps the payload into domain records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CreateEmployeeRequest, Employee, EmployeeId};

#[derive(Debug, Deserialize)]
pub(super) struct EnvelopeDto<T> {
    pub(super) data: Option<T>,
    #[serde(default)]
    pub(super) error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EmployeeDto {
    pub(super) id: Uuid,
    #[serde(default)]
    pub(super) employee_name: Option<String>,
    #[serde(default)]
    pub(super) employee_salary: Option<i64>,
    #[serde(default)]
    pub(super) employee_age: Option<i64>,
    #[serde(default)]
    pub(super) employee_title: Option<String>,
    #[serde(default)]
    pub(super) employee_email: Option<String>,
}

impl EmployeeDto {
    /// Out-of-range numbers are treated as unknown values.
    pub(super) fn into_domain(self) -> Employee {
        Employee::new(
            EmployeeId::from_uuid(self.id),
            self.employee_name,
            self.employee_salary
                .and_then(|salary| u32::try_from(salary).ok()),
            self.employee_age.and_then(|age| i32::try_from(age).ok()),
            self.employee_title.unwrap_or_default(),
            self.employee_email.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreateEmployeeDto<'a> {
    pub(super) name: &'a str,
    pub(super) salary: u32,
    pub(super) age: u32,
    pub(super) title: &'a str,
}

impl<'a> From<&'a CreateEmployeeRequest> for CreateEmployeeDto<'a> {
    fn from(value: &'a CreateEmployeeRequest) -> Self {
        Self {
            name: value.name(),
            salary: value.salary(),
            age: value.age(),
            title: value.title(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteEmployeeDto<'a> {
    pub(super) name: &'a str,
}
