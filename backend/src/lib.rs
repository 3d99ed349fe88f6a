//! House builders service library.
//!
//! Layout follows ports and adapters:
//! - [`domain`]: entities, validation, services and port traits.
//! - [`inbound`]: the actix-web REST adapter.
//! - [`outbound`]: PostgreSQL, in-memory and security adapters.
//! - [`middleware`]: request tracing and the bearer gate.
//! - [`bootstrap`]: settings and first-run provisioning.

pub mod bootstrap;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
