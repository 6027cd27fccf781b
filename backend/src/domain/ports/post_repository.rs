//! Port for post persistence and listing.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{
    NewPost, PasswordDigest, Post, PostChanges, PostId, PostListQuery, Visibility,
};

use super::ResourceStoreError;

/// Port for storing posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and bump its group's post count in one transaction.
    ///
    /// Returns `None` when the owning group no longer exists.
    async fn create(
        &self,
        post: &NewPost,
        digest: &PasswordDigest,
    ) -> Result<Option<Post>, ResourceStoreError>;

    /// Find a post by id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, ResourceStoreError>;

    /// Read the stored secret digest of a post.
    async fn find_digest(&self, id: PostId) -> Result<Option<PasswordDigest>, ResourceStoreError>;

    /// Apply changes when the row still holds `digest`.
    async fn update(
        &self,
        id: PostId,
        digest: &PasswordDigest,
        changes: &PostChanges,
    ) -> Result<Option<Post>, ResourceStoreError>;

    /// Delete the row when it still holds `digest` and decrement the group's
    /// post count.
    async fn delete(&self, id: PostId, digest: &PasswordDigest) -> Result<bool, ResourceStoreError>;

    /// Atomically add one like. Returns whether the post exists.
    async fn increment_likes(&self, id: PostId) -> Result<bool, ResourceStoreError>;

    /// Read only the visibility flag.
    async fn visibility(&self, id: PostId)
    -> Result<Option<Visibility<PostId>>, ResourceStoreError>;

    /// List one page of a group's posts.
    async fn list(&self, query: &PostListQuery) -> Result<Page<Post>, ResourceStoreError>;
}
