//! Post aggregate, drafts, change sets and listing criteria.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use pagination::PageRequest;

use super::resource::{
    DraftValidationError, GroupId, PostId, require_optional_text, require_text,
};

/// A post as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Server-generated identifier.
    pub id: PostId,
    /// Owning group.
    pub group_id: GroupId,
    /// Author nickname.
    pub nickname: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Optional image location.
    pub image_url: Option<String>,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Optional free-form location.
    pub location: Option<String>,
    /// User-supplied moment the post is about.
    pub moment: DateTime<Utc>,
    /// Whether the post is publicly readable.
    pub is_public: bool,
    /// Number of likes; only ever incremented.
    pub like_count: u64,
    /// Number of comments currently attached.
    pub comment_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new post. Secrets travel separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Owning group.
    pub group_id: GroupId,
    /// Author nickname.
    pub nickname: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Optional image location.
    pub image_url: Option<String>,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Optional free-form location.
    pub location: Option<String>,
    /// User-supplied moment.
    pub moment: DateTime<Utc>,
    /// Visibility flag.
    pub is_public: bool,
}

/// Raw inputs for [`NewPost::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPostFields {
    /// Author nickname.
    pub nickname: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Optional image location.
    pub image_url: Option<String>,
    /// Tags, empty when omitted.
    pub tags: Vec<String>,
    /// Optional location.
    pub location: Option<String>,
    /// User-supplied moment.
    pub moment: DateTime<Utc>,
    /// Visibility flag.
    pub is_public: bool,
}

impl NewPost {
    /// Validate a new post for `group_id`.
    pub fn try_new(group_id: GroupId, fields: NewPostFields) -> Result<Self, DraftValidationError> {
        Ok(Self {
            group_id,
            nickname: require_text(fields.nickname, "nickname")?,
            title: require_text(fields.title, "title")?,
            content: require_text(fields.content, "content")?,
            image_url: fields.image_url,
            tags: fields.tags,
            location: fields.location,
            moment: fields.moment,
            is_public: fields.is_public,
        })
    }
}

/// Partial update of a post; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    /// New nickname.
    pub nickname: Option<String>,
    /// New title.
    pub title: Option<String>,
    /// New body text.
    pub content: Option<String>,
    /// New image location.
    pub image_url: Option<String>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
    /// New location.
    pub location: Option<String>,
    /// New moment.
    pub moment: Option<DateTime<Utc>>,
    /// New visibility flag.
    pub is_public: Option<bool>,
}

impl PostChanges {
    /// Validate a change set, rejecting blank text and empty updates.
    pub fn validate(self) -> Result<Self, DraftValidationError> {
        let changes = Self {
            nickname: require_optional_text(self.nickname, "nickname")?,
            title: require_optional_text(self.title, "title")?,
            content: require_optional_text(self.content, "content")?,
            ..self
        };
        if changes.is_empty() {
            return Err(DraftValidationError::NoChanges);
        }
        Ok(changes)
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the change set to an in-memory post.
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(value) = &self.nickname {
            post.nickname.clone_from(value);
        }
        if let Some(value) = &self.title {
            post.title.clone_from(value);
        }
        if let Some(value) = &self.content {
            post.content.clone_from(value);
        }
        if let Some(value) = &self.image_url {
            post.image_url = Some(value.clone());
        }
        if let Some(value) = &self.tags {
            post.tags.clone_from(value);
        }
        if let Some(value) = &self.location {
            post.location = Some(value.clone());
        }
        if let Some(value) = self.moment {
            post.moment = value;
        }
        if let Some(value) = self.is_public {
            post.is_public = value;
        }
    }
}

/// Ordering applied to post listings. Ties always break on id, newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostSort {
    /// Newest posts first.
    #[default]
    Latest,
    /// Posts with the most comments first.
    MostCommented,
    /// Posts with the most likes first.
    MostLiked,
}

/// Error returned for an unknown `sortBy` value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sortBy must be one of latest, mostCommented, mostLiked (got {value})")]
pub struct PostSortParseError {
    /// The rejected value.
    pub value: String,
}

impl FromStr for PostSort {
    type Err = PostSortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            "mostCommented" => Ok(Self::MostCommented),
            "mostLiked" => Ok(Self::MostLiked),
            other => Err(PostSortParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Criteria for listing a group's posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListQuery {
    /// Group whose posts are listed.
    pub group_id: GroupId,
    /// Requested page.
    pub page: PageRequest,
    /// Ordering.
    pub sort: PostSort,
    /// Case-insensitive substring matched against title or content.
    pub keyword: Option<String>,
    /// Visibility filter.
    pub is_public: bool,
}

impl PostListQuery {
    /// Listing with default paging, ordering and a public-only filter.
    pub fn new(group_id: GroupId) -> Self {
        Self {
            group_id,
            page: PageRequest::default(),
            sort: PostSort::default(),
            keyword: None,
            is_public: true,
        }
    }

    /// Normalised keyword: trimmed, with blank treated as absent.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Whether `post` satisfies the group, visibility and keyword filters.
    pub fn matches(&self, post: &Post) -> bool {
        if post.group_id != self.group_id || post.is_public != self.is_public {
            return false;
        }
        match self.keyword() {
            None => true,
            Some(keyword) => {
                let needle = keyword.to_lowercase();
                post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn sample_post(title: &str, content: &str, is_public: bool) -> Post {
        Post {
            id: PostId::new(1).expect("id"),
            group_id: GroupId::new(7).expect("id"),
            nickname: "reader".to_owned(),
            title: title.to_owned(),
            content: content.to_owned(),
            image_url: None,
            tags: vec!["books".to_owned()],
            location: None,
            moment: Utc::now(),
            is_public,
            like_count: 0,
            comment_count: 0,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("latest", PostSort::Latest)]
    #[case("mostCommented", PostSort::MostCommented)]
    #[case("mostLiked", PostSort::MostLiked)]
    fn sort_parses_wire_names(#[case] raw: &str, #[case] expected: PostSort) {
        assert_eq!(raw.parse::<PostSort>(), Ok(expected));
    }

    #[rstest]
    fn sort_rejects_unknown_names() {
        let err = "oldest".parse::<PostSort>().expect_err("unknown sort");
        assert_eq!(err.value, "oldest");
    }

    #[rstest]
    #[case(Some("DUNE"), true)]
    #[case(Some("spice"), true)]
    #[case(Some("   "), true)]
    #[case(Some("hobbit"), false)]
    #[case(None, true)]
    fn keyword_matches_title_or_content_case_insensitively(
        #[case] keyword: Option<&str>,
        #[case] expected: bool,
    ) {
        let post = sample_post("Reading Dune", "All about the Spice", true);
        let mut query = PostListQuery::new(post.group_id);
        query.keyword = keyword.map(str::to_owned);
        assert_eq!(query.matches(&post), expected);
    }

    #[rstest]
    fn visibility_filter_excludes_private_posts_by_default() {
        let post = sample_post("secret", "diary", false);
        let query = PostListQuery::new(post.group_id);
        assert!(!query.matches(&post));
    }

    #[rstest]
    fn empty_changes_are_rejected() {
        assert_eq!(
            PostChanges::default().validate(),
            Err(DraftValidationError::NoChanges)
        );
    }

    #[rstest]
    fn blank_title_change_is_rejected() {
        let changes = PostChanges {
            title: Some("  ".to_owned()),
            ..PostChanges::default()
        };
        assert_eq!(
            changes.validate(),
            Err(DraftValidationError::Blank { field: "title" })
        );
    }

    #[rstest]
    fn changes_apply_only_supplied_fields() {
        let mut post = sample_post("old", "body", true);
        let changes = PostChanges {
            title: Some("new".to_owned()),
            tags: Some(Vec::new()),
            is_public: Some(false),
            ..PostChanges::default()
        }
        .validate()
        .expect("valid changes");
        changes.apply_to(&mut post);

        assert_eq!(post.title, "new");
        assert_eq!(post.content, "body");
        assert!(post.tags.is_empty());
        assert!(!post.is_public);
    }
}
