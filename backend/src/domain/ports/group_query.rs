//! Driving port for group reads.

use async_trait::async_trait;

use crate::domain::{Error, Group, GroupId, PasswordCheck, PlainSecret, Visibility};

/// Driving port for group read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupQuery: Send + Sync {
    /// Fetch a group by id.
    async fn get(&self, id: GroupId) -> Result<Option<Group>, Error>;

    /// Read a group's visibility flag.
    async fn visibility(&self, id: GroupId) -> Result<Option<Visibility<GroupId>>, Error>;

    /// Check `secret` without changing anything.
    async fn verify_password(
        &self,
        id: GroupId,
        secret: PlainSecret,
    ) -> Result<PasswordCheck, Error>;
}
