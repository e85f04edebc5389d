//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the directory port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::EmployeeDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn EmployeeDirectory>,
}

impl HttpState {
    /// Construct state around a directory implementation.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use directory_gateway::domain::ports::EmployeeDirectory;
    /// use directory_gateway::inbound::http::state::HttpState;
    ///
    /// fn state(directory: Arc<dyn EmployeeDirectory>) -> HttpState {
    ///     HttpState::new(directory)
    /// }
    /// ```
    pub fn new(directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { directory }
    }
}
