//! Argon2id implementation of the [`CredentialHasher`] port.
//!
//! Digests are PHC strings carrying their own salt and parameters, so a digest
//! produced under one [`HashCost`] still verifies after the cost is retuned.
//! Hashing is CPU bound and runs on Tokio's blocking pool with the caller's
//! trace identifier in scope.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;

use crate::domain::ports::{CredentialHashError, CredentialHasher};
use crate::domain::{PasswordDigest, PlainSecret, TraceId};

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub lanes: u32,
}

impl HashCost {
    /// OWASP baseline for Argon2id: 19 MiB, two passes, one lane.
    pub const RECOMMENDED: Self = Self {
        memory_kib: 19_456,
        iterations: 2,
        lanes: 1,
    };

    /// Smallest valid cost. Only suitable for tests.
    pub const MINIMAL: Self = Self {
        memory_kib: 8,
        iterations: 1,
        lanes: 1,
    };
}

impl Default for HashCost {
    fn default() -> Self {
        Self::RECOMMENDED
    }
}

/// Argon2id credential hasher.
#[derive(Debug, Clone)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    /// Build a hasher with `cost`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialHashError::InternalHashFailure`] when Argon2 rejects
    /// the parameters.
    pub fn new(cost: HashCost) -> Result<Self, CredentialHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.lanes, None)
            .map_err(|err| {
                CredentialHashError::internal_hash_failure(format!("invalid cost: {err}"))
            })?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

/// Run `work` on the blocking pool, keeping the caller's trace id in scope.
async fn run_blocking<F, R>(work: F) -> Result<R, CredentialHashError>
where
    F: FnOnce() -> Result<R, CredentialHashError> + Send + 'static,
    R: Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || TraceId::sync_scope(trace_id, work))
        .await
        .map_err(|err| CredentialHashError::internal_hash_failure(err.to_string()))?
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn digest(&self, secret: &PlainSecret) -> Result<PasswordDigest, CredentialHashError> {
        let argon2 = self.argon2();
        let secret = secret.clone();
        run_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            let encoded = argon2
                .hash_password(secret.expose().as_bytes(), &salt)
                .map_err(|err| CredentialHashError::internal_hash_failure(err.to_string()))?
                .to_string();
            PasswordDigest::new(encoded)
                .map_err(|err| CredentialHashError::internal_hash_failure(err.to_string()))
        })
        .await
    }

    async fn verify(
        &self,
        secret: &PlainSecret,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialHashError> {
        let argon2 = self.argon2();
        let secret = secret.clone();
        let digest = digest.clone();
        run_blocking(move || {
            let parsed = PasswordHash::new(digest.as_str()).map_err(|err| {
                CredentialHashError::internal_hash_failure(format!("malformed digest: {err}"))
            })?;
            match argon2.verify_password(secret.expose().as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(err) => Err(CredentialHashError::internal_hash_failure(err.to_string())),
            }
        })
        .await
    }
}
