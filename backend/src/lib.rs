//! Bulletin board backend: groups, posts and comments behind a
//! password-gated mutation protocol.
//!
//! Layout follows ports and adapters:
//! - [`domain`]: entities, tagged outcomes, services and port traits.
//! - [`inbound`]: Actix HTTP handlers mapping outcomes to responses.
//! - [`outbound`]: Diesel and in-memory repositories, Argon2id hashing.
//! - [`middleware`]: request tracing.
//! - [`settings`]: `BOARD_*` process configuration.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
