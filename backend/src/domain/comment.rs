//! Comment entity and its drafts.

use chrono::{DateTime, Utc};

use super::resource::{
    CommentId, DraftValidationError, PostId, require_optional_text, require_text,
};

/// A comment as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Server-generated identifier.
    pub id: CommentId,
    /// Post the comment belongs to.
    pub post_id: PostId,
    /// Author nickname.
    pub nickname: String,
    /// Body text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Post being commented on.
    pub post_id: PostId,
    /// Author nickname.
    pub nickname: String,
    /// Body text.
    pub content: String,
}

impl NewComment {
    /// Validate a new comment.
    pub fn try_new(
        post_id: PostId,
        nickname: String,
        content: String,
    ) -> Result<Self, DraftValidationError> {
        Ok(Self {
            post_id,
            nickname: require_text(nickname, "nickname")?,
            content: require_text(content, "content")?,
        })
    }
}

/// Partial update of a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentChanges {
    /// New nickname.
    pub nickname: Option<String>,
    /// New body text.
    pub content: Option<String>,
}

impl CommentChanges {
    /// Validate a change set, rejecting blank text and empty updates.
    pub fn validate(self) -> Result<Self, DraftValidationError> {
        let changes = Self {
            nickname: require_optional_text(self.nickname, "nickname")?,
            content: require_optional_text(self.content, "content")?,
        };
        if changes.is_empty() {
            return Err(DraftValidationError::NoChanges);
        }
        Ok(changes)
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.content.is_none()
    }

    /// Apply the change set to an in-memory comment.
    pub fn apply_to(&self, comment: &mut Comment) {
        if let Some(value) = &self.nickname {
            comment.nickname.clone_from(value);
        }
        if let Some(value) = &self.content {
            comment.content.clone_from(value);
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "hello", "nickname")]
    #[case("reader", " ", "content")]
    fn new_comment_requires_text(
        #[case] nickname: &str,
        #[case] content: &str,
        #[case] field: &'static str,
    ) {
        let post_id = PostId::new(3).expect("id");
        let err = NewComment::try_new(post_id, nickname.to_owned(), content.to_owned())
            .expect_err("blank field");
        assert_eq!(err, DraftValidationError::Blank { field });
    }

    #[rstest]
    fn content_only_change_keeps_nickname() {
        let mut comment = Comment {
            id: CommentId::new(1).expect("id"),
            post_id: PostId::new(1).expect("id"),
            nickname: "reader".to_owned(),
            content: "first".to_owned(),
            created_at: Utc::now(),
        };
        CommentChanges {
            nickname: None,
            content: Some("edited".to_owned()),
        }
        .validate()
        .expect("valid change")
        .apply_to(&mut comment);

        assert_eq!(comment.nickname, "reader");
        assert_eq!(comment.content, "edited");
    }

    #[rstest]
    fn empty_change_set_is_rejected() {
        assert_eq!(
            CommentChanges::default().validate(),
            Err(DraftValidationError::NoChanges)
        );
    }
}
