//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Read rows deliberately omit
//! `password_digest`; digests are read through a dedicated column select.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{board_groups, comments, posts};

// ---------------------------------------------------------------------------
// Group models
// ---------------------------------------------------------------------------

/// Row struct for reading from the board_groups table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupRow {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub is_public: bool,
    pub introduction: String,
    pub like_count: i64,
    pub badges: Vec<String>,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating group records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_groups)]
pub(crate) struct NewGroupRow<'a> {
    pub name: &'a str,
    pub password_digest: &'a str,
    pub image_url: Option<&'a str>,
    pub is_public: bool,
    pub introduction: &'a str,
}

/// Changeset for group updates. A `None` image keeps the stored value.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = board_groups)]
pub(crate) struct GroupChangeset<'a> {
    pub name: &'a str,
    pub is_public: bool,
    pub introduction: &'a str,
    pub image_url: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Post models
// ---------------------------------------------------------------------------

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub group_id: i64,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub moment: DateTime<Utc>,
    pub is_public: bool,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub group_id: i64,
    pub nickname: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub password_digest: &'a str,
    pub image_url: Option<&'a str>,
    pub tags: &'a [String],
    pub location: Option<&'a str>,
    pub moment: DateTime<Utc>,
    pub is_public: bool,
}

/// Partial changeset for post updates; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostChangeset<'a> {
    pub nickname: Option<&'a str>,
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub tags: Option<&'a [String]>,
    pub location: Option<&'a str>,
    pub moment: Option<DateTime<Utc>>,
    pub is_public: Option<bool>,
}

// ---------------------------------------------------------------------------
// Comment models
// ---------------------------------------------------------------------------

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub post_id: i64,
    pub nickname: &'a str,
    pub content: &'a str,
    pub password_digest: &'a str,
}

/// Partial changeset for comment updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = comments)]
pub(crate) struct CommentChangeset<'a> {
    pub nickname: Option<&'a str>,
    pub content: Option<&'a str>,
}
