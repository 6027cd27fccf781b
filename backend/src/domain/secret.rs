//! Plaintext secrets and their stored digests.
//!
//! Plaintext never outlives the request that carried it: [`PlainSecret`]
//! zeroizes its buffer on drop and redacts itself in `Debug` output. Neither
//! type implements `Serialize`, so a secret or digest cannot end up in a
//! response body by accident.

use std::fmt;

use zeroize::Zeroizing;

/// Validation failures for secrets and digests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretValidationError {
    /// The submitted secret was empty.
    #[error("password must not be empty")]
    EmptySecret,
    /// A stored digest was empty.
    #[error("stored password digest must not be empty")]
    EmptyDigest,
}

/// A plaintext secret submitted by a client.
///
/// Whitespace is preserved so the secret verifies exactly as typed.
///
/// # Examples
/// ```
/// use board::domain::PlainSecret;
///
/// let secret = PlainSecret::new("abc123").expect("non-empty secret");
/// assert_eq!(secret.expose(), "abc123");
/// assert_eq!(format!("{secret:?}"), "PlainSecret(<redacted>)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PlainSecret(Zeroizing<String>);

impl PlainSecret {
    /// Wrap a non-empty plaintext secret.
    pub fn new(value: impl Into<String>) -> Result<Self, SecretValidationError> {
        let value = Zeroizing::new(value.into());
        if value.is_empty() {
            return Err(SecretValidationError::EmptySecret);
        }
        Ok(Self(value))
    }

    /// Borrow the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PlainSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainSecret(<redacted>)")
    }
}

/// A salted one-way digest of a secret, in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest read from storage or produced by a hasher.
    pub fn new(value: impl Into<String>) -> Result<Self, SecretValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SecretValidationError::EmptyDigest);
        }
        Ok(Self(value))
    }

    /// Borrow the encoded digest.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}
