//! Driving port for comment reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Comment, Error, PostId};

/// Driving port for comment read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentQuery: Send + Sync {
    /// List a page of a post's comments, newest first.
    async fn list(&self, post_id: PostId, page: PageRequest) -> Result<Page<Comment>, Error>;
}
