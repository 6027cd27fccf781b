//! The load, verify, mutate sequence shared by every password-gated change.
//!
//! Services fetch the stored digest (LOADING), hand it to [`SecretGate`] with
//! the submitted secret (VERIFYING) and a closure performing the store write
//! (MUTATING). The closure receives the verified digest so the store can make
//! the write conditional on the row still holding it. A closure returning
//! `None` means the row vanished after verification and is reported as
//! [`Guarded::NotFound`].

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use super::ports::{CredentialHashError, CredentialHasher, ResourceStoreError};
use super::{Error, Guarded, PasswordCheck, PasswordDigest, PlainSecret, ResourceKind};

/// Map store port failures onto domain errors.
pub(crate) fn map_store_error(error: ResourceStoreError) -> Error {
    match error {
        ResourceStoreError::Connection { message } => {
            Error::service_unavailable(format!("resource store unavailable: {message}"))
        }
        ResourceStoreError::Query { message } => {
            Error::internal(format!("resource store error: {message}"))
        }
    }
}

/// Map hasher failures onto domain errors.
pub(crate) fn map_hash_error(error: CredentialHashError) -> Error {
    match error {
        CredentialHashError::InternalHashFailure { message } => {
            Error::internal(format!("credential hashing failed: {message}"))
        }
    }
}

/// Identifies the resource a gate decision concerns, for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTarget {
    /// Resource kind.
    pub kind: ResourceKind,
    /// Raw identifier.
    pub id: i64,
}

impl GateTarget {
    /// Target for `kind` and `id`.
    pub fn new(kind: ResourceKind, id: impl Into<i64>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Verifies secrets against stored digests and runs guarded writes.
pub struct SecretGate<H> {
    hasher: Arc<H>,
}

impl<H> Clone for SecretGate<H> {
    fn clone(&self) -> Self {
        Self {
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<H> SecretGate<H>
where
    H: CredentialHasher,
{
    /// Build a gate over `hasher`.
    pub fn new(hasher: Arc<H>) -> Self {
        Self { hasher }
    }

    /// Digest a secret for a newly created resource.
    pub async fn digest(&self, secret: &PlainSecret) -> Result<PasswordDigest, Error> {
        self.hasher.digest(secret).await.map_err(map_hash_error)
    }

    /// Run LOADING and VERIFYING without mutating anything.
    pub async fn check(
        &self,
        target: GateTarget,
        stored: Option<PasswordDigest>,
        secret: &PlainSecret,
    ) -> Result<PasswordCheck, Error> {
        let Some(digest) = stored else {
            debug!(resource = %target.kind, id = target.id, "secret check on missing resource");
            return Ok(PasswordCheck::NotFound);
        };
        let matched = self
            .hasher
            .verify(secret, &digest)
            .await
            .map_err(map_hash_error)?;
        let check = if matched {
            PasswordCheck::Match
        } else {
            PasswordCheck::Mismatch
        };
        debug!(resource = %target.kind, id = target.id, ?check, "secret checked");
        Ok(check)
    }

    /// Verify `secret` against `stored` and, on a match, run `mutate`.
    ///
    /// `mutate` is never called when the resource is missing or the secret is
    /// wrong. It receives the verified digest for the store's compare-and-set.
    pub async fn guard<T, F, Fut>(
        &self,
        target: GateTarget,
        stored: Option<PasswordDigest>,
        secret: &PlainSecret,
        mutate: F,
    ) -> Result<Guarded<T>, Error>
    where
        F: FnOnce(PasswordDigest) -> Fut + Send,
        Fut: Future<Output = Result<Option<T>, Error>> + Send,
        T: Send,
    {
        let Some(digest) = stored else {
            return Ok(Self::settle(target, Guarded::NotFound));
        };
        let matched = self
            .hasher
            .verify(secret, &digest)
            .await
            .map_err(map_hash_error)?;
        if !matched {
            return Ok(Self::settle(target, Guarded::Forbidden));
        }
        let outcome = match mutate(digest).await? {
            Some(value) => Guarded::Applied(value),
            None => Guarded::NotFound,
        };
        Ok(Self::settle(target, outcome))
    }

    fn settle<T>(target: GateTarget, outcome: Guarded<T>) -> Guarded<T> {
        match outcome {
            Guarded::Applied(_) => {
                info!(resource = %target.kind, id = target.id, outcome = outcome.label(), "guarded mutation");
            }
            _ => {
                debug!(resource = %target.kind, id = target.id, outcome = outcome.label(), "guarded mutation");
            }
        }
        outcome
    }
}

#[cfg(test)]
#[path = "guarded_mutation_tests.rs"]
mod tests;
