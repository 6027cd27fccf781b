//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ports::{CommentRepository, ResourceStoreError};
use crate::domain::{Comment, CommentChanges, CommentId, NewComment, PasswordDigest, PostId};

use super::models::{CommentChangeset, CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::row_mapping::{row_to_comment, to_digest};
use super::schema::{comments, posts};
use super::store_error_mapping::{map_diesel_error, map_pool_error, to_count, to_sql_bound};

/// Diesel-backed implementation of the [`CommentRepository`] port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(
        &self,
        comment: &NewComment,
        digest: &PasswordDigest,
    ) -> Result<Option<Comment>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let post_id = comment.post_id.get();
        let new_row = NewCommentRow {
            post_id,
            nickname: &comment.nickname,
            content: &comment.content,
            password_digest: digest.as_str(),
        };

        let row = conn
            .transaction(|conn| {
                async move {
                    let bumped = diesel::update(posts::table.find(post_id))
                        .set(posts::comment_count.eq(posts::comment_count + 1))
                        .execute(conn)
                        .await?;
                    if bumped == 0 {
                        return Ok(None);
                    }
                    diesel::insert_into(comments::table)
                        .values(&new_row)
                        .returning(CommentRow::as_returning())
                        .get_result(conn)
                        .await
                        .map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row.map(row_to_comment).transpose()
    }

    async fn list(
        &self,
        post_id: PostId,
        page: PageRequest,
    ) -> Result<Page<Comment>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total = comments::table
            .filter(comments::post_id.eq(post_id.get()))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows = comments::table
            .filter(comments::post_id.eq(post_id.get()))
            .order_by((comments::created_at.desc(), comments::id.desc()))
            .select(CommentRow::as_select())
            .limit(to_sql_bound(page.limit())?)
            .offset(to_sql_bound(page.offset())?)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(row_to_comment)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, to_count(total)?, page))
    }

    async fn find_digest(
        &self,
        id: CommentId,
    ) -> Result<Option<PasswordDigest>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw = comments::table
            .find(id.get())
            .select(comments::password_digest)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        raw.map(to_digest).transpose()
    }

    async fn update(
        &self,
        id: CommentId,
        digest: &PasswordDigest,
        changes: &CommentChanges,
    ) -> Result<Option<Comment>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = CommentChangeset {
            nickname: changes.nickname.as_deref(),
            content: changes.content.as_deref(),
        };
        let row = diesel::update(
            comments::table.filter(
                comments::id
                    .eq(id.get())
                    .and(comments::password_digest.eq(digest.as_str())),
            ),
        )
        .set(&changeset)
        .returning(CommentRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_comment).transpose()
    }

    async fn delete(
        &self,
        id: CommentId,
        digest: &PasswordDigest,
    ) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let comment_id = id.get();
        let digest = digest.as_str();

        conn.transaction(|conn| {
            async move {
                let post_id = diesel::delete(
                    comments::table.filter(
                        comments::id
                            .eq(comment_id)
                            .and(comments::password_digest.eq(digest)),
                    ),
                )
                .returning(comments::post_id)
                .get_result::<i64>(conn)
                .await
                .optional()?;
                let Some(post_id) = post_id else {
                    return Ok(false);
                };
                diesel::update(posts::table.find(post_id))
                    .set(posts::comment_count.eq(posts::comment_count - 1))
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
