//! Port for one-way secret hashing and verification.

use async_trait::async_trait;

use crate::domain::{PasswordDigest, PlainSecret};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashing adapters.
    pub enum CredentialHashError {
        /// The hashing primitive failed or a stored digest was malformed.
        InternalHashFailure { message: String } =>
            "credential hashing failed: {message}",
    }
}

/// Salted, cost-tunable digest of client secrets.
///
/// A wrong secret is `Ok(false)` from [`CredentialHasher::verify`]; `Err` is
/// reserved for failures of the primitive itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a fresh salted digest of `secret`.
    async fn digest(&self, secret: &PlainSecret) -> Result<PasswordDigest, CredentialHashError>;

    /// Check `secret` against a stored digest.
    async fn verify(
        &self,
        secret: &PlainSecret,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialHashError>;
}
