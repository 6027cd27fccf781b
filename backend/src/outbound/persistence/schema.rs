//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Groups owning posts.
    ///
    /// `password_digest` holds an Argon2id PHC string and is never selected
    /// by read models.
    board_groups (id) {
        /// Primary key, server generated.
        id -> Int8,
        /// Display name.
        name -> Text,
        /// Salted digest of the group secret.
        password_digest -> Text,
        /// Optional cover image location.
        image_url -> Nullable<Text>,
        /// Visibility flag.
        is_public -> Bool,
        /// Introduction text.
        introduction -> Text,
        /// Like counter, only incremented.
        like_count -> Int8,
        /// Ordered badge names.
        badges -> Array<Text>,
        /// Number of posts in the group.
        post_count -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts inside a group. Rows cascade when their group is deleted.
    posts (id) {
        /// Primary key, server generated.
        id -> Int8,
        /// Owning group.
        group_id -> Int8,
        /// Author nickname.
        nickname -> Text,
        /// Title.
        title -> Text,
        /// Body text.
        content -> Text,
        /// Salted digest of the post secret.
        password_digest -> Text,
        /// Optional image location.
        image_url -> Nullable<Text>,
        /// Ordered tags.
        tags -> Array<Text>,
        /// Optional location.
        location -> Nullable<Text>,
        /// User-supplied moment.
        moment -> Timestamptz,
        /// Visibility flag.
        is_public -> Bool,
        /// Like counter, only incremented.
        like_count -> Int8,
        /// Number of comments on the post.
        comment_count -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on posts. Rows cascade when their post is deleted.
    comments (id) {
        /// Primary key, server generated.
        id -> Int8,
        /// Post the comment belongs to.
        post_id -> Int8,
        /// Author nickname.
        nickname -> Text,
        /// Body text.
        content -> Text,
        /// Salted digest of the comment secret.
        password_digest -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> board_groups (group_id));
diesel::joinable!(comments -> posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(board_groups, posts, comments);
