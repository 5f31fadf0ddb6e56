//! Spectrum registry backend library modules.
//!
//! A single-tenant administrative registry: a login gate over a CRUD
//! collection of personnel records, backed by a remote document store with
//! a local fallback snapshot. Organised hexagonally: `domain` holds the
//! entities, credential rules, and the working-set service; `inbound` and
//! `outbound` hold the HTTP adapter and the store/cache adapters; `server`
//! wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware applied to every route.
pub use middleware::Trace;
