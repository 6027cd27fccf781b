//! Conversions from Diesel rows to domain entities.

use crate::domain::ports::ResourceStoreError;
use crate::domain::{
    Comment, CommentId, Group, GroupId, PasswordDigest, Post, PostId, ResourceIdError,
};

use super::models::{CommentRow, GroupRow, PostRow};
use super::store_error_mapping::to_count;

fn invalid_id(error: ResourceIdError) -> ResourceStoreError {
    ResourceStoreError::query(error.to_string())
}

pub(super) fn row_to_group(row: GroupRow) -> Result<Group, ResourceStoreError> {
    Ok(Group {
        id: GroupId::new(row.id).map_err(invalid_id)?,
        name: row.name,
        image_url: row.image_url,
        is_public: row.is_public,
        introduction: row.introduction,
        like_count: to_count(row.like_count)?,
        badges: row.badges,
        post_count: to_count(row.post_count)?,
        created_at: row.created_at,
    })
}

pub(super) fn row_to_post(row: PostRow) -> Result<Post, ResourceStoreError> {
    Ok(Post {
        id: PostId::new(row.id).map_err(invalid_id)?,
        group_id: GroupId::new(row.group_id).map_err(invalid_id)?,
        nickname: row.nickname,
        title: row.title,
        content: row.content,
        image_url: row.image_url,
        tags: row.tags,
        location: row.location,
        moment: row.moment,
        is_public: row.is_public,
        like_count: to_count(row.like_count)?,
        comment_count: to_count(row.comment_count)?,
        created_at: row.created_at,
    })
}

pub(super) fn row_to_comment(row: CommentRow) -> Result<Comment, ResourceStoreError> {
    Ok(Comment {
        id: CommentId::new(row.id).map_err(invalid_id)?,
        post_id: PostId::new(row.post_id).map_err(invalid_id)?,
        nickname: row.nickname,
        content: row.content,
        created_at: row.created_at,
    })
}

pub(super) fn to_digest(raw: String) -> Result<PasswordDigest, ResourceStoreError> {
    PasswordDigest::new(raw).map_err(|err| ResourceStoreError::query(err.to_string()))
}
