//! Upstream Employee Directory Service adapter.
//!
//! This module provides a thin reqwest implementation of the
//! `EmployeeDirectorySource` port.

mod dto;
mod http_source;

pub use http_source::{DirectoryHttpTimeouts, HttpDirectorySource};
