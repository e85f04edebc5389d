//! Read-side aggregation over a list of employees.
//!
//! Every function here is pure: no I/O and no shared state. Callers pass the
//! entries of whichever snapshot they currently hold.

use super::{Employee, EmployeeId};

/// Number of names returned by the top earners query.
pub const TOP_EARNER_LIMIT: usize = 10;

/// Case-insensitive substring search on employee names.
///
/// A missing or blank query returns every entry. Entries without a name never
/// match a non-blank query. Lowercasing follows Unicode default case mapping,
/// so results do not depend on the host locale.
///
/// # Examples
/// ```
/// use directory_gateway::domain::{Employee, EmployeeId, aggregation};
///
/// let john = Employee::new(
///     EmployeeId::random(),
///     Some("John Doe".to_owned()),
///     Some(50_000),
///     None,
///     "Clerk".to_owned(),
///     "john@example.com".to_owned(),
/// );
/// let entries = vec![john];
/// assert_eq!(aggregation::search(&entries, Some("JOHN")).len(), 1);
/// assert_eq!(aggregation::search(&entries, Some("jane")).len(), 0);
/// ```
#[must_use]
pub fn search<'a>(entries: &'a [Employee], query: Option<&str>) -> Vec<&'a Employee> {
    let needle = match query.map(str::trim) {
        Some(query) if !query.is_empty() => query.to_lowercase(),
        _ => return entries.iter().collect(),
    };

    entries
        .iter()
        .filter(|employee| {
            employee
                .name()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Highest known salary across `entries`.
///
/// Returns `0` when `entries` is empty or no entry has a salary. Zero is a
/// "no data" sentinel, not a salary anyone earns.
#[must_use]
pub fn highest_salary(entries: &[Employee]) -> u32 {
    entries
        .iter()
        .filter_map(Employee::salary)
        .max()
        .unwrap_or(0)
}

/// Names of the `n` best paid employees, highest salary first.
///
/// Entries without a salary or a name are skipped. Equal salaries keep their
/// original order.
#[must_use]
pub fn top_n(entries: &[Employee], n: usize) -> Vec<String> {
    let mut ranked = entries
        .iter()
        .filter_map(|employee| Some((employee.salary()?, employee.name()?)))
        .collect::<Vec<_>>();
    // `sort_by` is stable, so ties stay in list order.
    ranked.sort_by(|(left, _), (right, _)| right.cmp(left));
    ranked
        .into_iter()
        .take(n)
        .map(|(_, name)| name.to_owned())
        .collect()
}

/// Locate an employee by identifier with a linear scan.
#[must_use]
pub fn find_by_id(entries: &[Employee], id: EmployeeId) -> Option<&Employee> {
    entries.iter().find(|employee| employee.id() == id)
}
