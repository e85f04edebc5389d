//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **directory**: reqwest-backed client for the upstream Employee Directory
//!   Service
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no retry or caching logic.

pub mod directory;
