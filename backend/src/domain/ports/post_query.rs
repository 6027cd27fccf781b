//! Driving port for post reads.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{
    Error, PasswordCheck, PlainSecret, Post, PostId, PostListQuery, Visibility,
};

/// Driving port for post read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostQuery: Send + Sync {
    /// Fetch a post by id.
    async fn get(&self, id: PostId) -> Result<Option<Post>, Error>;

    /// List a page of a group's posts.
    async fn list(&self, query: PostListQuery) -> Result<Page<Post>, Error>;

    /// Read a post's visibility flag.
    async fn visibility(&self, id: PostId) -> Result<Option<Visibility<PostId>>, Error>;

    /// Check `secret` without changing anything.
    async fn verify_password(&self, id: PostId, secret: PlainSecret)
    -> Result<PasswordCheck, Error>;
}
