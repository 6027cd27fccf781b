//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_command;
mod comment_query;
mod comment_repository;
mod credential_hasher;
mod group_command;
mod group_query;
mod group_repository;
mod post_command;
mod post_query;
mod post_repository;
mod resource_store;

pub use comment_command::CommentCommand;
#[cfg(test)]
pub use comment_command::MockCommentCommand;
pub use comment_query::CommentQuery;
#[cfg(test)]
pub use comment_query::MockCommentQuery;
pub use comment_repository::CommentRepository;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use group_command::GroupCommand;
#[cfg(test)]
pub use group_command::MockGroupCommand;
#[cfg(test)]
pub use group_query::MockGroupQuery;
pub use group_query::GroupQuery;
#[cfg(test)]
pub use group_repository::MockGroupRepository;
pub use group_repository::GroupRepository;
#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::PostCommand;
#[cfg(test)]
pub use post_query::MockPostQuery;
pub use post_query::PostQuery;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::PostRepository;
pub use resource_store::ResourceStoreError;
