//! Driving port for post mutations.

use async_trait::async_trait;

use crate::domain::{
    Error, Guarded, LikeOutcome, NewPost, PlainSecret, Post, PostChanges, PostId,
};

/// Driving port for post write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Create a post after `group_secret` verifies against the owning group.
    ///
    /// `NotFound` means the group is missing and `Forbidden` that the group
    /// secret was wrong; no post is written in either case.
    async fn create(
        &self,
        post: NewPost,
        post_secret: PlainSecret,
        group_secret: PlainSecret,
    ) -> Result<Guarded<Post>, Error>;

    /// Apply changes when `secret` verifies against the post.
    async fn update(
        &self,
        id: PostId,
        secret: PlainSecret,
        changes: PostChanges,
    ) -> Result<Guarded<Post>, Error>;

    /// Delete a post and its comments when `secret` verifies.
    async fn delete(&self, id: PostId, secret: PlainSecret) -> Result<Guarded<()>, Error>;

    /// Add one like.
    async fn like(&self, id: PostId) -> Result<LikeOutcome, Error>;
}
