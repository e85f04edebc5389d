//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod directory_source;
mod employee_directory;

#[cfg(test)]
pub use directory_source::MockEmployeeDirectorySource;
pub use directory_source::{DirectorySourceError, EmployeeDirectorySource};
#[cfg(test)]
pub use employee_directory::MockEmployeeDirectory;
pub use employee_directory::EmployeeDirectory;
