//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Post creation and deletion adjust the owning group's `post_count` in the
//! same transaction as the row change.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::Page;

use crate::domain::ports::{PostRepository, ResourceStoreError};
use crate::domain::{
    NewPost, PasswordDigest, Post, PostChanges, PostId, PostListQuery, PostSort, Visibility,
};

use super::models::{NewPostRow, PostChangeset, PostRow};
use super::pool::DbPool;
use super::row_mapping::{row_to_post, to_digest};
use super::schema::{board_groups, posts};
use super::store_error_mapping::{map_diesel_error, map_pool_error, to_count, to_sql_bound};

/// Diesel-backed implementation of the [`PostRepository`] port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Escape `LIKE` metacharacters and wrap the keyword for substring matching.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Group, visibility and keyword filters shared by the count and page queries.
fn filtered(query: &PostListQuery) -> posts::BoxedQuery<'static, Pg> {
    let mut statement = posts::table
        .filter(posts::group_id.eq(query.group_id.get()))
        .filter(posts::is_public.eq(query.is_public))
        .into_boxed();
    if let Some(keyword) = query.keyword() {
        let pattern = like_pattern(keyword);
        statement = statement.filter(
            posts::title
                .ilike(pattern.clone())
                .or(posts::content.ilike(pattern)),
        );
    }
    statement
}

fn changeset(changes: &PostChanges) -> PostChangeset<'_> {
    PostChangeset {
        nickname: changes.nickname.as_deref(),
        title: changes.title.as_deref(),
        content: changes.content.as_deref(),
        image_url: changes.image_url.as_deref(),
        tags: changes.tags.as_deref(),
        location: changes.location.as_deref(),
        moment: changes.moment,
        is_public: changes.is_public,
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(
        &self,
        post: &NewPost,
        digest: &PasswordDigest,
    ) -> Result<Option<Post>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let group_id = post.group_id.get();
        let new_row = NewPostRow {
            group_id,
            nickname: &post.nickname,
            title: &post.title,
            content: &post.content,
            password_digest: digest.as_str(),
            image_url: post.image_url.as_deref(),
            tags: &post.tags,
            location: post.location.as_deref(),
            moment: post.moment,
            is_public: post.is_public,
        };

        let row = conn
            .transaction(|conn| {
                async move {
                    // Bumping the counter first locks the group row against a
                    // concurrent delete.
                    let bumped = diesel::update(board_groups::table.find(group_id))
                        .set(board_groups::post_count.eq(board_groups::post_count + 1))
                        .execute(conn)
                        .await?;
                    if bumped == 0 {
                        return Ok(None);
                    }
                    diesel::insert_into(posts::table)
                        .values(&new_row)
                        .returning(PostRow::as_returning())
                        .get_result(conn)
                        .await
                        .map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = posts::table
            .find(id.get())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn find_digest(&self, id: PostId) -> Result<Option<PasswordDigest>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw = posts::table
            .find(id.get())
            .select(posts::password_digest)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        raw.map(to_digest).transpose()
    }

    async fn update(
        &self,
        id: PostId,
        digest: &PasswordDigest,
        changes: &PostChanges,
    ) -> Result<Option<Post>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            posts::table.filter(
                posts::id
                    .eq(id.get())
                    .and(posts::password_digest.eq(digest.as_str())),
            ),
        )
        .set(&changeset(changes))
        .returning(PostRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn delete(&self, id: PostId, digest: &PasswordDigest) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let post_id = id.get();
        let digest = digest.as_str();

        conn.transaction(|conn| {
            async move {
                let group_id = diesel::delete(
                    posts::table.filter(
                        posts::id
                            .eq(post_id)
                            .and(posts::password_digest.eq(digest)),
                    ),
                )
                .returning(posts::group_id)
                .get_result::<i64>(conn)
                .await
                .optional()?;
                let Some(group_id) = group_id else {
                    return Ok(false);
                };
                diesel::update(board_groups::table.find(group_id))
                    .set(board_groups::post_count.eq(board_groups::post_count - 1))
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn increment_likes(&self, id: PostId) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(posts::table.find(id.get()))
            .set(posts::like_count.eq(posts::like_count + 1))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn visibility(
        &self,
        id: PostId,
    ) -> Result<Option<Visibility<PostId>>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let flag = posts::table
            .find(id.get())
            .select(posts::is_public)
            .first::<bool>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(flag.map(|is_public| Visibility { id, is_public }))
    }

    async fn list(&self, query: &PostListQuery) -> Result<Page<Post>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total = filtered(query)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let ordered = match query.sort {
            PostSort::Latest => filtered(query).order_by((posts::created_at.desc(), posts::id.desc())),
            PostSort::MostCommented => {
                filtered(query).order_by((posts::comment_count.desc(), posts::id.desc()))
            }
            PostSort::MostLiked => {
                filtered(query).order_by((posts::like_count.desc(), posts::id.desc()))
            }
        };
        let rows = ordered
            .select(PostRow::as_select())
            .limit(to_sql_bound(query.page.limit())?)
            .offset(to_sql_bound(query.page.offset())?)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(row_to_post)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, to_count(total)?, query.page))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for keyword pattern escaping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dune", "%dune%")]
    #[case("100%", "%100\\%%")]
    #[case("a_b", "%a\\_b%")]
    fn like_pattern_escapes_metacharacters(#[case] keyword: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(keyword), expected);
    }
}
