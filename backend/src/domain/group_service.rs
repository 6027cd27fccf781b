//! Group domain service.
//!
//! Implements the group driving ports on top of [`GroupRepository`] and the
//! shared [`SecretGate`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::guarded_mutation::map_store_error;
use crate::domain::ports::{CredentialHasher, GroupCommand, GroupQuery, GroupRepository};
use crate::domain::{
    Error, GateTarget, Group, GroupId, GroupUpdate, Guarded, LikeOutcome, NewGroup,
    PasswordCheck, PlainSecret, ResourceKind, SecretGate, Visibility,
};

/// Group service implementing [`GroupCommand`] and [`GroupQuery`].
pub struct GroupService<R, H> {
    groups: Arc<R>,
    gate: SecretGate<H>,
}

impl<R, H> GroupService<R, H>
where
    H: CredentialHasher,
{
    /// Create a service over the group repository and credential hasher.
    pub fn new(groups: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            groups,
            gate: SecretGate::new(hasher),
        }
    }
}

fn target(id: GroupId) -> GateTarget {
    GateTarget::new(ResourceKind::Group, id)
}

#[async_trait]
impl<R, H> GroupCommand for GroupService<R, H>
where
    R: GroupRepository,
    H: CredentialHasher,
{
    async fn create(&self, group: NewGroup, secret: PlainSecret) -> Result<Group, Error> {
        let digest = self.gate.digest(&secret).await?;
        let created = self
            .groups
            .create(&group, &digest)
            .await
            .map_err(map_store_error)?;
        info!(resource = "group", id = created.id.get(), "group created");
        Ok(created)
    }

    async fn update(
        &self,
        id: GroupId,
        secret: PlainSecret,
        update: GroupUpdate,
    ) -> Result<Guarded<Group>, Error> {
        let stored = self
            .groups
            .find_digest(id)
            .await
            .map_err(map_store_error)?;
        let groups = &self.groups;
        let changes = &update;
        self.gate
            .guard(target(id), stored, &secret, |digest| async move {
                groups
                    .update(id, &digest, changes)
                    .await
                    .map_err(map_store_error)
            })
            .await
    }

    async fn delete(&self, id: GroupId, secret: PlainSecret) -> Result<Guarded<()>, Error> {
        let stored = self
            .groups
            .find_digest(id)
            .await
            .map_err(map_store_error)?;
        let groups = &self.groups;
        self.gate
            .guard(target(id), stored, &secret, |digest| async move {
                let removed = groups
                    .delete(id, &digest)
                    .await
                    .map_err(map_store_error)?;
                Ok(removed.then_some(()))
            })
            .await
    }

    async fn like(&self, id: GroupId) -> Result<LikeOutcome, Error> {
        let affected = self
            .groups
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
impl<R, H> GroupQuery for GroupService<R, H>
where
    R: GroupRepository,
    H: CredentialHasher,
{
    async fn get(&self, id: GroupId) -> Result<Option<Group>, Error> {
        self.groups.find_by_id(id).await.map_err(map_store_error)
    }

    async fn visibility(&self, id: GroupId) -> Result<Option<Visibility<GroupId>>, Error> {
        self.groups.visibility(id).await.map_err(map_store_error)
    }

    async fn verify_password(
        &self,
        id: GroupId,
        secret: PlainSecret,
    ) -> Result<PasswordCheck, Error> {
        let stored = self
            .groups
            .find_digest(id)
            .await
            .map_err(map_store_error)?;
        self.gate.check(target(id), stored, &secret).await
    }
}

#[cfg(test)]
#[path = "group_service_tests.rs"]
mod tests;
