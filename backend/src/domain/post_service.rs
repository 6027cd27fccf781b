//! Post domain service.
//!
//! Post creation is gated twice: the group secret must verify against the
//! owning group before the post secret is digested and the row written.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;

use crate::domain::guarded_mutation::map_store_error;
use crate::domain::ports::{CredentialHasher, GroupRepository, PostCommand, PostQuery, PostRepository};
use crate::domain::{
    Error, GateTarget, Guarded, LikeOutcome, NewPost, PasswordCheck, PlainSecret, Post,
    PostChanges, PostId, PostListQuery, ResourceKind, SecretGate, Visibility,
};

/// Post service implementing [`PostCommand`] and [`PostQuery`].
pub struct PostService<P, G, H> {
    posts: Arc<P>,
    groups: Arc<G>,
    gate: SecretGate<H>,
}

impl<P, G, H> PostService<P, G, H>
where
    H: CredentialHasher,
{
    /// Create a service over the post and group repositories.
    pub fn new(posts: Arc<P>, groups: Arc<G>, hasher: Arc<H>) -> Self {
        Self {
            posts,
            groups,
            gate: SecretGate::new(hasher),
        }
    }
}

fn target(id: PostId) -> GateTarget {
    GateTarget::new(ResourceKind::Post, id)
}

#[async_trait]
impl<P, G, H> PostCommand for PostService<P, G, H>
where
    P: PostRepository,
    G: GroupRepository,
    H: CredentialHasher,
{
    async fn create(
        &self,
        post: NewPost,
        post_secret: PlainSecret,
        group_secret: PlainSecret,
    ) -> Result<Guarded<Post>, Error> {
        let group_digest = self
            .groups
            .find_digest(post.group_id)
            .await
            .map_err(map_store_error)?;
        let group_target = GateTarget::new(ResourceKind::Group, post.group_id);
        let posts = &self.posts;
        let gate = &self.gate;
        self.gate
            .guard(group_target, group_digest, &group_secret, |_| async move {
                let digest = gate.digest(&post_secret).await?;
                posts
                    .create(&post, &digest)
                    .await
                    .map_err(map_store_error)
            })
            .await
    }

    async fn update(
        &self,
        id: PostId,
        secret: PlainSecret,
        changes: PostChanges,
    ) -> Result<Guarded<Post>, Error> {
        let stored = self.posts.find_digest(id).await.map_err(map_store_error)?;
        let posts = &self.posts;
        let changes = &changes;
        self.gate
            .guard(target(id), stored, &secret, |digest| async move {
                posts
                    .update(id, &digest, changes)
                    .await
                    .map_err(map_store_error)
            })
            .await
    }

    async fn delete(&self, id: PostId, secret: PlainSecret) -> Result<Guarded<()>, Error> {
        let stored = self.posts.find_digest(id).await.map_err(map_store_error)?;
        let posts = &self.posts;
        self.gate
            .guard(target(id), stored, &secret, |digest| async move {
                let removed = posts.delete(id, &digest).await.map_err(map_store_error)?;
                Ok(removed.then_some(()))
            })
            .await
    }

    async fn like(&self, id: PostId) -> Result<LikeOutcome, Error> {
        let affected = self
            .posts
            .increment_likes(id)
            .await
            .map_err(map_store_error)?;
        Ok(if affected {
            LikeOutcome::Affected
        } else {
            LikeOutcome::NotFound
        })
    }
}

#[async_trait]
impl<P, G, H> PostQuery for PostService<P, G, H>
where
    P: PostRepository,
    G: GroupRepository,
    H: CredentialHasher,
{
    async fn get(&self, id: PostId) -> Result<Option<Post>, Error> {
        self.posts.find_by_id(id).await.map_err(map_store_error)
    }

    async fn list(&self, query: PostListQuery) -> Result<Page<Post>, Error> {
        self.posts.list(&query).await.map_err(map_store_error)
    }

    async fn visibility(&self, id: PostId) -> Result<Option<Visibility<PostId>>, Error> {
        self.posts.visibility(id).await.map_err(map_store_error)
    }

    async fn verify_password(
        &self,
        id: PostId,
        secret: PlainSecret,
    ) -> Result<PasswordCheck, Error> {
        let stored = self.posts.find_digest(id).await.map_err(map_store_error)?;
        self.gate.check(target(id), stored, &secret).await
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
