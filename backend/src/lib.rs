//! Recipe backend library.
//!
//! Hexagonal layout: [`domain`] holds transport-agnostic types, services,
//! and ports; [`inbound`] adapts HTTP requests onto the domain; [`outbound`]
//! implements the driven ports against PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
