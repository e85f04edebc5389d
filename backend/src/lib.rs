//! Employee directory gateway library modules.
//!
//! The crate follows a ports-and-adapters layout: [`domain`] owns the retry,
//! caching and aggregation rules, [`outbound`] talks to the upstream
//! directory, and [`inbound`] exposes the REST surface.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
