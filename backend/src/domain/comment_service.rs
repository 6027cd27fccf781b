//! Comment domain service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::guarded_mutation::map_store_error;
use crate::domain::ports::{CommentCommand, CommentQuery, CommentRepository, CredentialHasher};
use crate::domain::{
    Comment, CommentChanges, CommentId, Error, GateTarget, Guarded, NewComment, PlainSecret,
    PostId, ResourceKind, SecretGate,
};

/// Comment service implementing [`CommentCommand`] and [`CommentQuery`].
pub struct CommentService<C, H> {
    comments: Arc<C>,
    gate: SecretGate<H>,
}

impl<C, H> CommentService<C, H>
where
    H: CredentialHasher,
{
    /// Create a service over the comment repository.
    pub fn new(comments: Arc<C>, hasher: Arc<H>) -> Self {
        Self {
            comments,
            gate: SecretGate::new(hasher),
        }
    }
}

fn target(id: CommentId) -> GateTarget {
    GateTarget::new(ResourceKind::Comment, id)
}

#[async_trait]
impl<C, H> CommentCommand for CommentService<C, H>
where
    C: CommentRepository,
    H: CredentialHasher,
{
    async fn create(
        &self,
        comment: NewComment,
        secret: PlainSecret,
    ) -> Result<Option<Comment>, Error> {
        let digest = self.gate.digest(&secret).await?;
        let created = self
            .comments
            .create(&comment, &digest)
            .await
            .map_err(map_store_error)?;
        if created.is_none() {
            debug!(resource = "post", id = comment.post_id.get(), "comment on missing post");
        }
        Ok(created)
    }

    async fn update(
        &self,
        id: CommentId,
        secret: PlainSecret,
        changes: CommentChanges,
    ) -> Result<Guarded<Comment>, Error> {
        let stored = self
            .comments
            .find_digest(id)
            .await
            .map_err(map_store_error)?;
        let comments = &self.comments;
        let changes = &changes;
        self.gate
            .guard(target(id), stored, &secret, |digest| async move {
                comments
                    .update(id, &digest, changes)
                    .await
                    .map_err(map_store_error)
            })
            .await
    }

    async fn delete(&self, id: CommentId, secret: PlainSecret) -> Result<Guarded<()>, Error> {
        let stored = self
            .comments
            .find_digest(id)
            .await
            .map_err(map_store_error)?;
        let comments = &self.comments;
        self.gate
            .guard(target(id), stored, &secret, |digest| async move {
                let removed = comments
                    .delete(id, &digest)
                    .await
                    .map_err(map_store_error)?;
                Ok(removed.then_some(()))
            })
            .await
    }
}

#[async_trait]
impl<C, H> CommentQuery for CommentService<C, H>
where
    C: CommentRepository,
    H: CredentialHasher,
{
    async fn list(&self, post_id: PostId, page: PageRequest) -> Result<Page<Comment>, Error> {
        self.comments
            .list(post_id, page)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
