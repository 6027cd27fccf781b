//! PostgreSQL-backed `GroupRepository` implementation using Diesel ORM.
//!
//! Guarded writes filter on both `id` and the verified `password_digest`, so a
//! row removed or re-keyed after verification affects zero rows and reads as
//! absent.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GroupRepository, ResourceStoreError};
use crate::domain::{Group, GroupId, GroupUpdate, NewGroup, PasswordDigest, Visibility};

use super::models::{GroupChangeset, GroupRow, NewGroupRow};
use super::pool::DbPool;
use super::row_mapping::{row_to_group, to_digest};
use super::schema::board_groups;
use super::store_error_mapping::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the [`GroupRepository`] port.
#[derive(Clone)]
pub struct DieselGroupRepository {
    pool: DbPool,
}

impl DieselGroupRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for DieselGroupRepository {
    async fn create(
        &self,
        group: &NewGroup,
        digest: &PasswordDigest,
    ) -> Result<Group, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewGroupRow {
            name: &group.name,
            password_digest: digest.as_str(),
            image_url: group.image_url.as_deref(),
            is_public: group.is_public,
            introduction: &group.introduction,
        };

        let row = diesel::insert_into(board_groups::table)
            .values(&new_row)
            .returning(GroupRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_group(row)
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = board_groups::table
            .find(id.get())
            .select(GroupRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_group).transpose()
    }

    async fn find_digest(
        &self,
        id: GroupId,
    ) -> Result<Option<PasswordDigest>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw = board_groups::table
            .find(id.get())
            .select(board_groups::password_digest)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        raw.map(to_digest).transpose()
    }

    async fn update(
        &self,
        id: GroupId,
        digest: &PasswordDigest,
        update: &GroupUpdate,
    ) -> Result<Option<Group>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = GroupChangeset {
            name: &update.name,
            is_public: update.is_public,
            introduction: &update.introduction,
            image_url: update.image_url.as_deref(),
        };

        let row = diesel::update(
            board_groups::table.filter(
                board_groups::id
                    .eq(id.get())
                    .and(board_groups::password_digest.eq(digest.as_str())),
            ),
        )
        .set(&changeset)
        .returning(GroupRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_group).transpose()
    }

    async fn delete(
        &self,
        id: GroupId,
        digest: &PasswordDigest,
    ) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            board_groups::table.filter(
                board_groups::id
                    .eq(id.get())
                    .and(board_groups::password_digest.eq(digest.as_str())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn increment_likes(&self, id: GroupId) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(board_groups::table.find(id.get()))
            .set(board_groups::like_count.eq(board_groups::like_count + 1))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn visibility(
        &self,
        id: GroupId,
    ) -> Result<Option<Visibility<GroupId>>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let flag = board_groups::table
            .find(id.get())
            .select(board_groups::is_public)
            .first::<bool>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(flag.map(|is_public| Visibility { id, is_public }))
    }
}
