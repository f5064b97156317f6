//! Salad ordering backend library modules.
//!
//! Hexagonal layout: `domain` owns the records, services and ports;
//! `inbound::http` adapts them to Actix handlers; `outbound::persistence`
//! implements the driven ports over PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
