//! Post HTTP handlers.
//!
//! ```text
//! POST   /groups/{groupId}/posts
//! GET    /groups/{groupId}/posts
//! GET    /posts/{postId}
//! PUT    /posts/{postId}
//! DELETE /post/{postId}          (alias: DELETE /posts/{postId})
//! POST   /posts/{postId}/verify-password
//! POST   /posts/{postId}/like
//! GET    /posts/{postId}/visibility
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, GroupId, NewPost, NewPostFields, Post, PostChanges, PostId, PostListQuery,
    ResourceKind,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{self, MessageBody, VisibilityBody, created, deleted};
use crate::inbound::http::schemas::{ErrorSchema, PostSortSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, draft_error, parse_id, parse_optional_rfc3339_timestamp, parse_page_request,
    parse_rfc3339_timestamp, parse_secret, parse_sort,
};

/// Request payload for creating a post.
///
/// `groupPassword` must match the owning group before anything is written.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequestBody {
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub post_password: String,
    pub group_password: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: Option<String>,
    #[schema(format = "date-time", example = "2026-03-01T09:30:00Z")]
    pub moment: String,
    pub is_public: bool,
}

/// Request payload for editing a post. Omitted fields stay unchanged.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequestBody {
    pub post_password: String,
    pub nickname: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    #[schema(format = "date-time")]
    pub moment: Option<String>,
    pub is_public: Option<bool>,
}

/// Request payload for deleting a post.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostRequestBody {
    pub post_password: String,
}

/// Request payload for checking a post password.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PostPasswordRequestBody {
    pub password: String,
}

/// Post resource as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    pub id: i64,
    pub group_id: i64,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    #[schema(format = "date-time")]
    pub moment: String,
    pub is_public: bool,
    pub like_count: u64,
    pub comment_count: u64,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Post> for PostBody {
    fn from(value: Post) -> Self {
        Self {
            id: value.id.get(),
            group_id: value.group_id.get(),
            nickname: value.nickname,
            title: value.title,
            content: value.content,
            image_url: value.image_url,
            tags: value.tags,
            location: value.location,
            moment: value.moment.to_rfc3339(),
            is_public: value.is_public,
            like_count: value.like_count,
            comment_count: value.comment_count,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// One page of a group's posts.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostPageBody {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_item_count: u64,
    pub data: Vec<PostBody>,
}

impl From<Page<Post>> for PostPageBody {
    fn from(page: Page<Post>) -> Self {
        Self {
            current_page: page.current_page(),
            total_pages: page.total_pages(),
            total_item_count: page.total_items(),
            data: page.into_items().into_iter().map(PostBody::from).collect(),
        }
    }
}

/// Query string accepted by the post listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub keyword: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupPostsPath {
    group_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostPath {
    post_id: String,
}

fn post_id(path: web::Path<PostPath>) -> Result<PostId, Error> {
    parse_id(&path.into_inner().post_id, FieldName::new("postId"))
}

fn group_id(path: web::Path<GroupPostsPath>) -> Result<GroupId, Error> {
    parse_id(&path.into_inner().group_id, FieldName::new("groupId"))
}

fn parse_new_post(group_id: GroupId, body: CreatePostRequestBody) -> Result<NewPost, Error> {
    let fields = NewPostFields {
        nickname: body.nickname,
        title: body.title,
        content: body.content,
        image_url: body.image_url,
        tags: body.tags,
        location: body.location,
        moment: parse_rfc3339_timestamp(body.moment, FieldName::new("moment"))?,
        is_public: body.is_public,
    };
    NewPost::try_new(group_id, fields).map_err(draft_error)
}

fn parse_changes(body: UpdatePostRequestBody) -> Result<PostChanges, Error> {
    PostChanges {
        nickname: body.nickname,
        title: body.title,
        content: body.content,
        image_url: body.image_url,
        tags: body.tags,
        location: body.location,
        moment: parse_optional_rfc3339_timestamp(body.moment, FieldName::new("moment"))?,
        is_public: body.is_public,
    }
    .validate()
    .map_err(draft_error)
}

fn parse_list_query(group_id: GroupId, query: ListPostsQuery) -> Result<PostListQuery, Error> {
    let mut criteria = PostListQuery::new(group_id);
    criteria.page = parse_page_request(query.page, query.page_size)?;
    criteria.sort = parse_sort(query.sort_by)?;
    criteria.keyword = query.keyword;
    if let Some(is_public) = query.is_public {
        criteria.is_public = is_public;
    }
    Ok(criteria)
}

/// Create a post under a group.
///
/// The group password is checked before the post password is digested.
#[utoipa::path(
    post,
    path = "/groups/{groupId}/posts",
    params(("groupId" = i64, Path, description = "Owning group identifier")),
    request_body = CreatePostRequestBody,
    responses(
        (status = 201, description = "Post created", body = PostBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Group password does not match", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/groups/{groupId}/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    path: web::Path<GroupPostsPath>,
    payload: web::Json<CreatePostRequestBody>,
) -> ApiResult<HttpResponse> {
    let group_id = group_id(path)?;
    let mut body = payload.into_inner();
    let post_secret = parse_secret(
        std::mem::take(&mut body.post_password),
        FieldName::new("postPassword"),
    )?;
    let group_secret = parse_secret(
        std::mem::take(&mut body.group_password),
        FieldName::new("groupPassword"),
    )?;
    let draft = parse_new_post(group_id, body)?;
    let outcome = state.posts.create(draft, post_secret, group_secret).await?;
    let post = responses::guarded(outcome, ResourceKind::Group)?;
    Ok(created(PostBody::from(post)))
}

/// List a page of a group's posts.
#[utoipa::path(
    get,
    path = "/groups/{groupId}/posts",
    params(
        ("groupId" = i64, Path, description = "Owning group identifier"),
        ("page" = Option<i64>, Query, description = "One-based page number, default 1"),
        ("pageSize" = Option<i64>, Query, description = "Items per page, default 10, max 100"),
        ("sortBy" = Option<PostSortSchema>, Query, description = "Sort order, default latest"),
        ("keyword" = Option<String>, Query, description = "Case-insensitive match on title or content"),
        ("isPublic" = Option<bool>, Query, description = "Visibility filter, default true")
    ),
    responses(
        (status = 200, description = "Posts", body = PostPageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/groups/{groupId}/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    path: web::Path<GroupPostsPath>,
    query: web::Query<ListPostsQuery>,
) -> ApiResult<web::Json<PostPageBody>> {
    let criteria = parse_list_query(group_id(path)?, query.into_inner())?;
    let page = state.posts_query.list(criteria).await?;
    Ok(web::Json(PostPageBody::from(page)))
}

/// Fetch a post.
#[utoipa::path(
    get,
    path = "/posts/{postId}",
    params(("postId" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostBody),
        (status = 400, description = "Invalid post id", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{postId}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
) -> ApiResult<web::Json<PostBody>> {
    let id = post_id(path)?;
    let post = responses::found(state.posts_query.get(id).await?, ResourceKind::Post)?;
    Ok(web::Json(PostBody::from(post)))
}

/// Edit a post.
#[utoipa::path(
    put,
    path = "/posts/{postId}",
    params(("postId" = i64, Path, description = "Post identifier")),
    request_body = UpdatePostRequestBody,
    responses(
        (status = 200, description = "Post updated", body = PostBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Password does not match", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/posts/{postId}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
    payload: web::Json<UpdatePostRequestBody>,
) -> ApiResult<web::Json<PostBody>> {
    let id = post_id(path)?;
    let mut body = payload.into_inner();
    let secret = parse_secret(
        std::mem::take(&mut body.post_password),
        FieldName::new("postPassword"),
    )?;
    let changes = parse_changes(body)?;
    let outcome = state.posts.update(id, secret, changes).await?;
    let post = responses::guarded(outcome, ResourceKind::Post)?;
    Ok(web::Json(PostBody::from(post)))
}

async fn remove_post(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
    payload: web::Json<DeletePostRequestBody>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = post_id(path)?;
    let secret = parse_secret(
        payload.into_inner().post_password,
        FieldName::new("postPassword"),
    )?;
    let outcome = state.posts.delete(id, secret).await?;
    responses::guarded(outcome, ResourceKind::Post)?;
    Ok(web::Json(deleted(ResourceKind::Post)))
}

/// Delete a post and its comments.
#[utoipa::path(
    delete,
    path = "/post/{postId}",
    params(("postId" = i64, Path, description = "Post identifier")),
    request_body = DeletePostRequestBody,
    responses(
        (status = 200, description = "Post deleted", body = MessageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Password does not match", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/post/{postId}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
    payload: web::Json<DeletePostRequestBody>,
) -> ApiResult<web::Json<MessageBody>> {
    remove_post(state, path, payload).await
}

/// Plural alias of [`delete_post`].
#[utoipa::path(
    delete,
    path = "/posts/{postId}",
    params(("postId" = i64, Path, description = "Post identifier")),
    request_body = DeletePostRequestBody,
    responses(
        (status = 200, description = "Post deleted", body = MessageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Password does not match", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePostAlias"
)]
#[delete("/posts/{postId}")]
pub async fn delete_post_alias(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
    payload: web::Json<DeletePostRequestBody>,
) -> ApiResult<web::Json<MessageBody>> {
    remove_post(state, path, payload).await
}

/// Check a post password without changing anything.
#[utoipa::path(
    post,
    path = "/posts/{postId}/verify-password",
    params(("postId" = i64, Path, description = "Post identifier")),
    request_body = PostPasswordRequestBody,
    responses(
        (status = 200, description = "Password verified", body = MessageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Password does not match", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "verifyPostPassword"
)]
#[post("/posts/{postId}/verify-password")]
pub async fn verify_post_password(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
    payload: web::Json<PostPasswordRequestBody>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = post_id(path)?;
    let secret = parse_secret(payload.into_inner().password, FieldName::new("password"))?;
    let check = state.posts_query.verify_password(id, secret).await?;
    responses::password_check(check, ResourceKind::Post).map(web::Json)
}

/// Add one like to a post.
#[utoipa::path(
    post,
    path = "/posts/{postId}/like",
    params(("postId" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post liked", body = MessageBody),
        (status = 400, description = "Invalid post id", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "likePost"
)]
#[post("/posts/{postId}/like")]
pub async fn like_post(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = post_id(path)?;
    let outcome = state.posts.like(id).await?;
    responses::liked(outcome, ResourceKind::Post).map(web::Json)
}

/// Read whether a post is public.
#[utoipa::path(
    get,
    path = "/posts/{postId}/visibility",
    params(("postId" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post visibility", body = VisibilityBody),
        (status = 400, description = "Invalid post id", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPostVisibility"
)]
#[get("/posts/{postId}/visibility")]
pub async fn post_visibility(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
) -> ApiResult<web::Json<VisibilityBody>> {
    let id = post_id(path)?;
    let visibility = responses::found(state.posts_query.visibility(id).await?, ResourceKind::Post)?;
    Ok(web::Json(VisibilityBody::from(visibility)))
}

/// Register every post route on an Actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_post)
        .service(list_posts)
        .service(get_post)
        .service(update_post)
        .service(delete_post)
        .service(delete_post_alias)
        .service(verify_post_password)
        .service(like_post)
        .service(post_visibility);
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
