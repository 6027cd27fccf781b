//! Tagged outcomes returned by protocol and counter operations.
//!
//! Expected results such as a missing row or a wrong secret are values, not
//! errors. Only infrastructure faults travel through `Err`. The HTTP adapter
//! is the single place where these tags become status codes.

/// Result of a password-gated mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The secret verified and the change was persisted.
    Applied(T),
    /// No resource with the requested id exists (or it vanished mid-flight).
    NotFound,
    /// The resource exists but the secret did not verify.
    Forbidden,
}

impl<T> Guarded<T> {
    /// Transform the applied value, keeping the other tags.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Guarded<U> {
        match self {
            Self::Applied(value) => Guarded::Applied(f(value)),
            Self::NotFound => Guarded::NotFound,
            Self::Forbidden => Guarded::Forbidden,
        }
    }

    /// Short label used in log fields.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Applied(_) => "applied",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
        }
    }
}

/// Result of verifying a secret without mutating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    /// The secret matches the stored digest.
    Match,
    /// The secret does not match.
    Mismatch,
    /// No resource with the requested id exists.
    NotFound,
}

/// Result of a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The like counter was incremented.
    Affected,
    /// No resource with the requested id exists.
    NotFound,
}

/// Visibility read: the id and its flag, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility<I> {
    /// Resource identifier.
    pub id: I,
    /// Whether the resource is public.
    pub is_public: bool,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Guarded::Applied(2), Guarded::Applied(4))]
    #[case(Guarded::NotFound, Guarded::NotFound)]
    #[case(Guarded::Forbidden, Guarded::Forbidden)]
    fn map_only_touches_applied(#[case] input: Guarded<u8>, #[case] expected: Guarded<u8>) {
        assert_eq!(input.map(|value| value * 2), expected);
    }
}
