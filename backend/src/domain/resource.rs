//! Identifiers and draft validation shared by groups, posts and comments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three kinds of board resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A group owning posts.
    Group,
    /// A post inside a group.
    Post,
    /// A comment on a post.
    Comment,
}

impl ResourceKind {
    /// Lower-case name used in log fields and messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an identifier is not a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("resource identifiers must be positive integers, got {value}")]
pub struct ResourceIdError {
    /// The rejected raw value.
    pub value: i64,
}

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a store-generated identifier.
            pub fn new(value: i64) -> Result<Self, ResourceIdError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(ResourceIdError { value })
                }
            }

            /// Raw integer value as stored.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ResourceIdError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

resource_id! {
    /// Server-generated group identifier.
    GroupId
}

resource_id! {
    /// Server-generated post identifier.
    PostId
}

resource_id! {
    /// Server-generated comment identifier.
    CommentId
}

/// Validation failures raised while building drafts and change sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftValidationError {
    /// A required text field was empty once trimmed.
    #[error("{field} must not be blank")]
    Blank {
        /// Wire name of the offending field.
        field: &'static str,
    },
    /// A change set carried no fields at all.
    #[error("at least one field must be supplied")]
    NoChanges,
}

/// Reject blank text, returning the trimmed value.
pub(crate) fn require_text(
    value: String,
    field: &'static str,
) -> Result<String, DraftValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DraftValidationError::Blank { field });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Like [`require_text`] but for optional patch fields.
pub(crate) fn require_optional_text(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, DraftValidationError> {
    value.map(|raw| require_text(raw, field)).transpose()
}
