//! Driving port for group mutations.

use async_trait::async_trait;

use crate::domain::{
    Error, Group, GroupId, GroupUpdate, Guarded, LikeOutcome, NewGroup, PlainSecret,
};

/// Driving port for group write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupCommand: Send + Sync {
    /// Create a group protected by `secret`.
    async fn create(&self, group: NewGroup, secret: PlainSecret) -> Result<Group, Error>;

    /// Replace a group's editable fields when `secret` verifies.
    async fn update(
        &self,
        id: GroupId,
        secret: PlainSecret,
        update: GroupUpdate,
    ) -> Result<Guarded<Group>, Error>;

    /// Delete a group and everything under it when `secret` verifies.
    async fn delete(&self, id: GroupId, secret: PlainSecret) -> Result<Guarded<()>, Error>;

    /// Add one like.
    async fn like(&self, id: GroupId) -> Result<LikeOutcome, Error>;
}
