//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`) and domain types. Row types never leave this module, and read
//! rows never carry a password digest.
//!
//! # Example
//!
//! ```no_run
//! use board::outbound::persistence::{DbPool, DieselGroupRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), board::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/board")).await?;
//! let groups = DieselGroupRepository::new(pool);
//! # let _ = groups;
//! # Ok(())
//! # }
//! ```

mod diesel_comment_repository;
mod diesel_group_repository;
mod diesel_post_repository;
mod migrations;
mod models;
mod pool;
mod row_mapping;
mod schema;
mod store_error_mapping;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_group_repository::DieselGroupRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
