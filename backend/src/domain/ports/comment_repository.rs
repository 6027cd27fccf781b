//! Port for comment persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Comment, CommentChanges, CommentId, NewComment, PasswordDigest, PostId};

use super::ResourceStoreError;

/// Port for storing comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment and bump the post's comment count in one transaction.
    ///
    /// Returns `None` when the post does not exist.
    async fn create(
        &self,
        comment: &NewComment,
        digest: &PasswordDigest,
    ) -> Result<Option<Comment>, ResourceStoreError>;

    /// List one page of a post's comments, newest first.
    async fn list(
        &self,
        post_id: PostId,
        page: PageRequest,
    ) -> Result<Page<Comment>, ResourceStoreError>;

    /// Read the stored secret digest of a comment.
    async fn find_digest(
        &self,
        id: CommentId,
    ) -> Result<Option<PasswordDigest>, ResourceStoreError>;

    /// Apply changes when the row still holds `digest`.
    async fn update(
        &self,
        id: CommentId,
        digest: &PasswordDigest,
        changes: &CommentChanges,
    ) -> Result<Option<Comment>, ResourceStoreError>;

    /// Delete the row when it still holds `digest` and decrement the post's
    /// comment count.
    async fn delete(
        &self,
        id: CommentId,
        digest: &PasswordDigest,
    ) -> Result<bool, ResourceStoreError>;
}
