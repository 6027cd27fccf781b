//! In-process implementation of the group, post and comment repositories.
//!
//! All state sits behind one async mutex, so each operation is atomic with
//! respect to every other: likes never lose increments, counter adjustments
//! happen together with their row change and group deletion cascades to posts
//! and comments in one step. Used for local development without a database and
//! by HTTP tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pagination::{Page, PageRequest};
use tokio::sync::Mutex;

use crate::domain::ports::{
    CommentRepository, GroupRepository, PostRepository, ResourceStoreError,
};
use crate::domain::{
    Comment, CommentChanges, CommentId, Group, GroupId, GroupUpdate, NewComment, NewGroup,
    NewPost, PasswordDigest, Post, PostChanges, PostId, PostListQuery, PostSort, ResourceIdError,
    Visibility,
};

struct Stored<T> {
    value: T,
    digest: PasswordDigest,
}

#[derive(Default)]
struct BoardState {
    last_id: i64,
    groups: BTreeMap<GroupId, Stored<Group>>,
    posts: BTreeMap<PostId, Stored<Post>>,
    comments: BTreeMap<CommentId, Stored<Comment>>,
}

impl BoardState {
    fn next_id<I>(&mut self) -> Result<I, ResourceStoreError>
    where
        I: TryFrom<i64, Error = ResourceIdError>,
    {
        self.last_id += 1;
        I::try_from(self.last_id).map_err(|err| ResourceStoreError::query(err.to_string()))
    }
}

/// Shared in-memory store. Clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<Mutex<BoardState>>,
}

impl InMemoryBoardStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn page_of<T: Clone>(items: &[&T], request: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    let slice = items
        .iter()
        .skip(offset)
        .take(limit)
        .map(|item| (*item).clone())
        .collect();
    Page::new(slice, total, request)
}

#[async_trait]
impl GroupRepository for InMemoryBoardStore {
    async fn create(
        &self,
        group: &NewGroup,
        digest: &PasswordDigest,
    ) -> Result<Group, ResourceStoreError> {
        let mut state = self.state.lock().await;
        let id = state.next_id::<GroupId>()?;
        let created = Group {
            id,
            name: group.name.clone(),
            image_url: group.image_url.clone(),
            is_public: group.is_public,
            introduction: group.introduction.clone(),
            like_count: 0,
            badges: Vec::new(),
            post_count: 0,
            created_at: Utc::now(),
        };
        state.groups.insert(
            id,
            Stored {
                value: created.clone(),
                digest: digest.clone(),
            },
        );
        Ok(created)
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, ResourceStoreError> {
        let state = self.state.lock().await;
        Ok(state.groups.get(&id).map(|stored| stored.value.clone()))
    }

    async fn find_digest(
        &self,
        id: GroupId,
    ) -> Result<Option<PasswordDigest>, ResourceStoreError> {
        let state = self.state.lock().await;
        Ok(state.groups.get(&id).map(|stored| stored.digest.clone()))
    }

    async fn update(
        &self,
        id: GroupId,
        digest: &PasswordDigest,
        update: &GroupUpdate,
    ) -> Result<Option<Group>, ResourceStoreError> {
        let mut state = self.state.lock().await;
        let Some(stored) = state
            .groups
            .get_mut(&id)
            .filter(|stored| &stored.digest == digest)
        else {
            return Ok(None);
        };
        update.apply_to(&mut stored.value);
        Ok(Some(stored.value.clone()))
    }

    async fn delete(
        &self,
        id: GroupId,
        digest: &PasswordDigest,
    ) -> Result<bool, ResourceStoreError> {
        let mut state = self.state.lock().await;
        if !state
            .groups
            .get(&id)
            .is_some_and(|stored| &stored.digest == digest)
        {
            return Ok(false);
        }
        state.groups.remove(&id);
        let BoardState {
            posts, comments, ..
        } = &mut *state;
        posts.retain(|_, post| post.value.group_id != id);
        comments.retain(|_, comment| posts.contains_key(&comment.value.post_id));
        Ok(true)
    }

    async fn increment_likes(&self, id: GroupId) -> Result<bool, ResourceStoreError> {
        let mut state = self.state.lock().await;
        Ok(state
            .groups
            .get_mut(&id)
            .map(|stored| stored.value.like_count += 1)
            .is_some())
    }

    async fn visibility(
        &self,
        id: GroupId,
    ) -> Result<Option<Visibility<GroupId>>, ResourceStoreError> {
        let state = self.state.lock().await;
        Ok(state.groups.get(&id).map(|stored| Visibility {
            id,
            is_public: stored.value.is_public,
        }))
    }
}

#[async_trait]
impl PostRepository for InMemoryBoardStore {
    async fn create(
        &self,
        post: &NewPost,
        digest: &PasswordDigest,
    ) -> Result<Option<Post>, ResourceStoreError> {
        let mut state = self.state.lock().await;
        if !state.groups.contains_key(&post.group_id) {
            return Ok(None);
        }
        let id = state.next_id::<PostId>()?;
        let created = Post {
            id,
            group_id: post.group_id,
            nickname: post.nickname.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            tags: post.tags.clone(),
            location: post.location.clone(),
            moment: post.moment,
            is_public: post.is_public,
            like_count: 0,
            comment_count: 0,
            created_at: Utc::now(),
        };
        state.posts.insert(
            id,
            Stored {
                value: created.clone(),
                digest: digest.clone(),
            },
        );
        if let Some(group) = state.groups.get_mut(&post.group_id) {
            group.value.post_count += 1;
        }
        Ok(Some(created))
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, ResourceStoreError> {
        let state = self.state.lock().await;
        Ok(state.posts.get(&id).map(|stored| stored.value.clone()))
    }

    async fn find_digest(&self, id: PostId) -> Result<Option<PasswordDigest>, ResourceStoreError> {
        let state = self.state.lock().await;
        Ok(state.posts.get(&id).map(|stored| stored.digest.clone()))
    }

    async fn update(
        &self,
        id: PostId,
        digest: &PasswordDigest,
        changes: &PostChanges,
    ) -> Result<Option<Post>, ResourceStoreError> {
        let mut state = self.state.lock().await;
        let Some(stored) = state
            .posts
            .get_mut(&id)
            .filter(|stored| &stored.digest == digest)
        else {
            return Ok(None);
        };
        changes.apply_to(&mut stored.value);
        Ok(Some(stored.value.clone()))
    }

    async fn delete(&self, id: PostId, digest: &PasswordDigest) -> Result<bool, ResourceStoreError> {
        let mut state = self.state.lock().await;
        let group_id = match state.posts.get(&id) {
            Some(stored) if &stored.digest == digest => stored.value.group_id,
            _ => return Ok(false),
        };
        state.posts.remove(&id);
        state.comments.retain(|_, comment| comment.value.post_id != id);
        if let Some(group) = state.groups.get_mut(&group_id) {
            group.value.post_count = group.value.post_count.saturating_sub(1);
        }
        Ok(true)
    }

    async fn increment_likes(&self, id: PostId) -> Result<bool, ResourceStoreError> {
        let mut state = self.state.lock().await;
        Ok(state
            .posts
            .get_mut(&id)
            .map(|stored| stored.value.like_count += 1)
            .is_some())
    }

    async fn visibility(
        &self,
        id: PostId,
    ) -> Result<Option<Visibility<PostId>>, ResourceStoreError> {
        let state = self.state.lock().await;
        Ok(state.posts.get(&id).map(|stored| Visibility {
            id,
            is_public: stored.value.is_public,
        }))
    }

    async fn list(&self, query: &PostListQuery) -> Result<Page<Post>, ResourceStoreError> {
        let state = self.state.lock().await;
        let mut matching: Vec<&Post> = state
            .posts
            .values()
            .map(|stored| &stored.value)
            .filter(|post| query.matches(post))
            .collect();
        matching.sort_by(|left, right| {
            let primary = match query.sort {
                PostSort::Latest => right.created_at.cmp(&left.created_at),
                PostSort::MostCommented => right.comment_count.cmp(&left.comment_count),
                PostSort::MostLiked => right.like_count.cmp(&left.like_count),
            };
            primary.then_with(|| right.id.cmp(&left.id))
        });
        Ok(page_of(&matching, query.page))
    }
}

#[async_trait]
impl CommentRepository for InMemoryBoardStore {
    async fn create(
        &self,
        comment: &NewComment,
        digest: &PasswordDigest,
    ) -> Result<Option<Comment>, ResourceStoreError> {
        let mut state = self.state.lock().await;
        if !state.posts.contains_key(&comment.post_id) {
            return Ok(None);
        }
        let id = state.next_id::<CommentId>()?;
        let created = Comment {
            id,
            post_id: comment.post_id,
            nickname: comment.nickname.clone(),
            content: comment.content.clone(),
            created_at: Utc::now(),
        };
        state.comments.insert(
            id,
            Stored {
                value: created.clone(),
                digest: digest.clone(),
            },
        );
        if let Some(post) = state.posts.get_mut(&comment.post_id) {
            post.value.comment_count += 1;
        }
        Ok(Some(created))
    }

    async fn list(
        &self,
        post_id: PostId,
        page: PageRequest,
    ) -> Result<Page<Comment>, ResourceStoreError> {
        let state = self.state.lock().await;
        let mut matching: Vec<&Comment> = state
            .comments
            .values()
            .map(|stored| &stored.value)
            .filter(|comment| comment.post_id == post_id)
            .collect();
        matching.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.id.cmp(&left.id))
        });
        Ok(page_of(&matching, page))
    }

    async fn find_digest(
        &self,
        id: CommentId,
    ) -> Result<Option<PasswordDigest>, ResourceStoreError> {
        let state = self.state.lock().await;
        Ok(state.comments.get(&id).map(|stored| stored.digest.clone()))
    }

    async fn update(
        &self,
        id: CommentId,
        digest: &PasswordDigest,
        changes: &CommentChanges,
    ) -> Result<Option<Comment>, ResourceStoreError> {
        let mut state = self.state.lock().await;
        let Some(stored) = state
            .comments
            .get_mut(&id)
            .filter(|stored| &stored.digest == digest)
        else {
            return Ok(None);
        };
        changes.apply_to(&mut stored.value);
        Ok(Some(stored.value.clone()))
    }

    async fn delete(
        &self,
        id: CommentId,
        digest: &PasswordDigest,
    ) -> Result<bool, ResourceStoreError> {
        let mut state = self.state.lock().await;
        let post_id = match state.comments.get(&id) {
            Some(stored) if &stored.digest == digest => stored.value.post_id,
            _ => return Ok(false),
        };
        state.comments.remove(&id);
        if let Some(post) = state.posts.get_mut(&post_id) {
            post.value.comment_count = post.value.comment_count.saturating_sub(1);
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "in_memory_store_tests.rs"]
mod tests;
