//! Port for group persistence.

use async_trait::async_trait;

use crate::domain::{Group, GroupId, GroupUpdate, NewGroup, PasswordDigest, Visibility};

use super::ResourceStoreError;

/// Port for storing groups and their digests.
///
/// `update` and `delete` only touch a row whose id and digest both match, so a
/// row removed or re-keyed after verification reports as absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Insert a group with its secret digest.
    async fn create(
        &self,
        group: &NewGroup,
        digest: &PasswordDigest,
    ) -> Result<Group, ResourceStoreError>;

    /// Find a group by id.
    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, ResourceStoreError>;

    /// Read the stored secret digest of a group.
    async fn find_digest(&self, id: GroupId)
    -> Result<Option<PasswordDigest>, ResourceStoreError>;

    /// Apply an update when the row still holds `digest`.
    async fn update(
        &self,
        id: GroupId,
        digest: &PasswordDigest,
        update: &GroupUpdate,
    ) -> Result<Option<Group>, ResourceStoreError>;

    /// Delete the row when it still holds `digest`, cascading to posts and
    /// comments. Returns whether a row was removed.
    async fn delete(&self, id: GroupId, digest: &PasswordDigest)
    -> Result<bool, ResourceStoreError>;

    /// Atomically add one like. Returns whether the group exists.
    async fn increment_likes(&self, id: GroupId) -> Result<bool, ResourceStoreError>;

    /// Read only the visibility flag.
    async fn visibility(
        &self,
        id: GroupId,
    ) -> Result<Option<Visibility<GroupId>>, ResourceStoreError>;
}
