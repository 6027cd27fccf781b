//! Group aggregate and its drafts.
//!
//! A group owns posts. Its secret digest is held by the store and never
//! appears on [`Group`], so nothing built from a `Group` can leak it.

use chrono::{DateTime, Utc};

use super::resource::{DraftValidationError, GroupId, require_text};

/// A group as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Server-generated identifier.
    pub id: GroupId,
    /// Display name.
    pub name: String,
    /// Optional cover image location.
    pub image_url: Option<String>,
    /// Whether the group is publicly listable.
    pub is_public: bool,
    /// Free-form introduction text.
    pub introduction: String,
    /// Number of likes; only ever incremented.
    pub like_count: u64,
    /// Ordered badge names, empty until awarded.
    pub badges: Vec<String>,
    /// Number of posts currently in the group.
    pub post_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// Optional cover image location.
    pub image_url: Option<String>,
    /// Visibility flag, public unless stated otherwise.
    pub is_public: bool,
    /// Introduction text, empty when omitted.
    pub introduction: String,
}

impl NewGroup {
    /// Validate the fields of a new group.
    ///
    /// # Examples
    /// ```
    /// use board::domain::NewGroup;
    ///
    /// let group = NewGroup::try_new(" book club ".into(), None, None, None).expect("valid");
    /// assert_eq!(group.name, "book club");
    /// assert!(group.is_public);
    /// assert!(group.introduction.is_empty());
    /// ```
    pub fn try_new(
        name: String,
        image_url: Option<String>,
        is_public: Option<bool>,
        introduction: Option<String>,
    ) -> Result<Self, DraftValidationError> {
        Ok(Self {
            name: require_text(name, "name")?,
            image_url,
            is_public: is_public.unwrap_or(true),
            introduction: introduction.unwrap_or_default(),
        })
    }
}

/// Replacement values for a group's editable fields.
///
/// `image_url` of `None` leaves the stored image untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupUpdate {
    /// New display name.
    pub name: String,
    /// New visibility flag.
    pub is_public: bool,
    /// New introduction text.
    pub introduction: String,
    /// New image location, if one was supplied.
    pub image_url: Option<String>,
}

impl GroupUpdate {
    /// Validate a group update.
    pub fn try_new(
        name: String,
        is_public: bool,
        introduction: String,
        image_url: Option<String>,
    ) -> Result<Self, DraftValidationError> {
        Ok(Self {
            name: require_text(name, "name")?,
            is_public,
            introduction: require_text(introduction, "introduction")?,
            image_url,
        })
    }

    /// Apply the update to an in-memory group.
    pub fn apply_to(&self, group: &mut Group) {
        group.name.clone_from(&self.name);
        group.is_public = self.is_public;
        group.introduction.clone_from(&self.introduction);
        if let Some(url) = &self.image_url {
            group.image_url = Some(url.clone());
        }
    }
}
