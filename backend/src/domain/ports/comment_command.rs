//! Driving port for comment mutations.

use async_trait::async_trait;

use crate::domain::{
    Comment, CommentChanges, CommentId, Error, Guarded, NewComment, PlainSecret,
};

/// Driving port for comment write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// Attach a comment to a post. `None` means the post does not exist.
    async fn create(
        &self,
        comment: NewComment,
        secret: PlainSecret,
    ) -> Result<Option<Comment>, Error>;

    /// Apply changes when `secret` verifies against the comment.
    async fn update(
        &self,
        id: CommentId,
        secret: PlainSecret,
        changes: CommentChanges,
    ) -> Result<Guarded<Comment>, Error>;

    /// Delete a comment when `secret` verifies.
    async fn delete(&self, id: CommentId, secret: PlainSecret) -> Result<Guarded<()>, Error>;
}
