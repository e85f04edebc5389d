//! Employee directory entries and creation requests.
//!
//! [`Employee`] values are immutable once parsed from an upstream response.
//! Identifier uniqueness holds only within a single snapshot; the upstream may
//! regenerate its data at any time.

use std::fmt;
use std::str::FromStr;

use serde_json::json;
use uuid::Uuid;

use super::Error;

/// Youngest age accepted by [`CreateEmployeeRequest`].
pub const MIN_AGE: u32 = 16;
/// Oldest age accepted by [`CreateEmployeeRequest`].
pub const MAX_AGE: u32 = 75;

/// Identifier assigned to an employee by the upstream directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self).map_err(|_| {
            Error::validation_failure(format!("invalid employee id: {s}")).with_details(json!({
                "fields": [{ "field": "id", "message": "must be a valid UUID" }],
            }))
        })
    }
}

/// One employee as reported by the upstream directory.
///
/// `name` and `salary` are optional because the upstream does not guarantee
/// them; aggregation skips entries where they are missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    name: Option<String>,
    salary: Option<u32>,
    age: Option<i32>,
    title: String,
    contact: String,
}

impl Employee {
    /// Assemble an employee from parsed upstream fields.
    ///
    /// # Examples
    /// ```
    /// use directory_gateway::domain::{Employee, EmployeeId};
    ///
    /// let employee = Employee::new(
    ///     EmployeeId::random(),
    ///     Some("Ada Lovelace".to_owned()),
    ///     Some(120_000),
    ///     Some(36),
    ///     "Analyst".to_owned(),
    ///     "ada@example.com".to_owned(),
    /// );
    /// assert_eq!(employee.name(), Some("Ada Lovelace"));
    /// ```
    #[must_use]
    pub fn new(
        id: EmployeeId,
        name: Option<String>,
        salary: Option<u32>,
        age: Option<i32>,
        title: String,
        contact: String,
    ) -> Self {
        Self {
            id,
            name,
            salary,
            age,
            title,
            contact,
        }
    }

    /// Upstream identifier.
    #[must_use]
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Display name, if the upstream supplied one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Annual salary, if known.
    #[must_use]
    pub fn salary(&self) -> Option<u32> {
        self.salary
    }

    /// Age in years, if known.
    #[must_use]
    pub fn age(&self) -> Option<i32> {
        self.age
    }

    /// Job title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Contact address (the upstream's e-mail field).
    #[must_use]
    pub fn contact(&self) -> &str {
        self.contact.as_str()
    }
}

/// Unvalidated creation input as received at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateEmployeeDraft {
    /// Requested display name.
    pub name: Option<String>,
    /// Requested salary.
    pub salary: Option<i64>,
    /// Requested age.
    pub age: Option<i64>,
    /// Requested job title.
    pub title: Option<String>,
}

/// One rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name as exposed on the wire.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

/// Validation failures collected while building a [`CreateEmployeeRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeValidationError {
    violations: Vec<FieldViolation>,
}

impl CreateEmployeeValidationError {
    /// Every rejected field, in declaration order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        self.violations.as_slice()
    }
}

impl fmt::Display for CreateEmployeeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(|violation| format!("{}: {}", violation.field, violation.message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl std::error::Error for CreateEmployeeValidationError {}

impl From<CreateEmployeeValidationError> for Error {
    fn from(value: CreateEmployeeValidationError) -> Self {
        let fields = value
            .violations
            .iter()
            .map(|violation| json!({ "field": violation.field, "message": violation.message }))
            .collect::<Vec<_>>();
        Error::validation_failure(value.to_string()).with_details(json!({ "fields": fields }))
    }
}

/// Validated request to create an employee upstream.
///
/// ## Invariants
/// - `name` and `title` are non-blank.
/// - `salary` is positive.
/// - `age` lies within [`MIN_AGE`]..=[`MAX_AGE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeRequest {
    name: String,
    salary: u32,
    age: u32,
    title: String,
}

impl CreateEmployeeRequest {
    /// Validate a draft, reporting every offending field at once.
    ///
    /// # Examples
    /// ```
    /// use directory_gateway::domain::{CreateEmployeeDraft, CreateEmployeeRequest};
    ///
    /// let draft = CreateEmployeeDraft {
    ///     name: Some("Grace Hopper".to_owned()),
    ///     salary: Some(95_000),
    ///     age: Some(40),
    ///     title: Some("Engineer".to_owned()),
    /// };
    /// let request = CreateEmployeeRequest::try_from_draft(draft).expect("valid draft");
    /// assert_eq!(request.salary(), 95_000);
    ///
    /// let err = CreateEmployeeRequest::try_from_draft(Default::default()).unwrap_err();
    /// assert_eq!(err.violations().len(), 4);
    /// ```
    pub fn try_from_draft(
        draft: CreateEmployeeDraft,
    ) -> Result<Self, CreateEmployeeValidationError> {
        let mut violations = Vec::new();

        let name = required_text("name", draft.name, &mut violations);
        let salary = match draft.salary {
            None => {
                violations.push(missing("salary"));
                None
            }
            Some(raw) if raw <= 0 => {
                violations.push(violation("salary", "must be greater than 0"));
                None
            }
            Some(raw) => match u32::try_from(raw) {
                Ok(value) => Some(value),
                Err(_) => {
                    violations.push(violation(
                        "salary",
                        format!("must be at most {}", u32::MAX),
                    ));
                    None
                }
            },
        };
        let age = match draft.age {
            None => {
                violations.push(missing("age"));
                None
            }
            Some(raw) => match u32::try_from(raw) {
                Ok(value) if (MIN_AGE..=MAX_AGE).contains(&value) => Some(value),
                _ => {
                    violations.push(violation(
                        "age",
                        format!("must be between {MIN_AGE} and {MAX_AGE}"),
                    ));
                    None
                }
            },
        };
        let title = required_text("title", draft.title, &mut violations);

        match (name, salary, age, title) {
            (Some(name), Some(salary), Some(age), Some(title)) if violations.is_empty() => {
                Ok(Self {
                    name,
                    salary,
                    age,
                    title,
                })
            }
            _ => Err(CreateEmployeeValidationError { violations }),
        }
    }

    /// Requested display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Requested salary.
    #[must_use]
    pub fn salary(&self) -> u32 {
        self.salary
    }

    /// Requested age.
    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Requested job title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            violations.push(violation(field, "must not be blank"));
            None
        }
    }
}

fn missing(field: &'static str) -> FieldViolation {
    violation(field, "must not be null")
}

fn violation(field: &'static str, message: impl Into<String>) -> FieldViolation {
    FieldViolation {
        field,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    //! Validation coverage for employee identifiers and creation requests.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    fn valid_draft() -> CreateEmployeeDraft {
        CreateEmployeeDraft {
            name: Some("Grace Hopper".to_owned()),
            salary: Some(95_000),
            age: Some(40),
            title: Some("Engineer".to_owned()),
        }
    }

    #[fixture]
    fn draft() -> CreateEmployeeDraft {
        valid_draft()
    }

    #[rstest]
    fn valid_draft_builds_request(draft: CreateEmployeeDraft) {
        let request = CreateEmployeeRequest::try_from_draft(draft).expect("valid draft");
        assert_eq!(request.name(), "Grace Hopper");
        assert_eq!(request.salary(), 95_000);
        assert_eq!(request.age(), 40);
        assert_eq!(request.title(), "Engineer");
    }

    #[rstest]
    #[case::age_lower_bound(16)]
    #[case::age_upper_bound(75)]
    fn age_bounds_are_inclusive(mut draft: CreateEmployeeDraft, #[case] age: i64) {
        draft.age = Some(age);
        assert!(CreateEmployeeRequest::try_from_draft(draft).is_ok());
    }

    #[rstest]
    #[case::blank_name(CreateEmployeeDraft { name: Some("  ".to_owned()), ..valid_draft() }, "name")]
    #[case::zero_salary(CreateEmployeeDraft { salary: Some(0), ..valid_draft() }, "salary")]
    #[case::negative_salary(CreateEmployeeDraft { salary: Some(-5), ..valid_draft() }, "salary")]
    #[case::too_young(CreateEmployeeDraft { age: Some(15), ..valid_draft() }, "age")]
    #[case::too_old(CreateEmployeeDraft { age: Some(76), ..valid_draft() }, "age")]
    #[case::missing_title(CreateEmployeeDraft { title: None, ..valid_draft() }, "title")]
    fn invalid_fields_are_reported(#[case] input: CreateEmployeeDraft, #[case] field: &str) {
        let err = CreateEmployeeRequest::try_from_draft(input).expect_err("draft is invalid");
        let fields = err
            .violations()
            .iter()
            .map(|violation| violation.field)
            .collect::<Vec<_>>();
        assert_eq!(fields, vec![field]);
    }

    #[rstest]
    fn validation_error_converts_to_envelope_with_field_details() {
        let err = CreateEmployeeRequest::try_from_draft(CreateEmployeeDraft::default())
            .expect_err("empty draft is invalid");
        let error = Error::from(err);
        assert_eq!(error.code(), ErrorCode::ValidationFailure);
        let fields = error
            .details()
            .and_then(|details| details.get("fields"))
            .and_then(|fields| fields.as_array())
            .expect("field details present");
        assert_eq!(fields.len(), 4);
    }

    #[rstest]
    fn employee_id_rejects_non_uuid_input() {
        let err = "not-a-uuid"
            .parse::<EmployeeId>()
            .expect_err("invalid id rejected");
        assert_eq!(err.code(), ErrorCode::ValidationFailure);
    }

    #[rstest]
    fn employee_id_round_trips_through_display() {
        let id = EmployeeId::random();
        let parsed: EmployeeId = id.to_string().parse().expect("valid id");
        assert_eq!(parsed, id);
    }
}
