//! Shared helpers for board integration tests.
//!
//! Each file under `backend/tests/` compiles as its own crate; suites that
//! need embedded PostgreSQL pull these helpers in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_template_database, shared_cluster};
