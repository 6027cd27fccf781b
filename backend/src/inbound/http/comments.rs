//! Comment HTTP handlers.
//!
//! ```text
//! POST   /posts/{postId}/comments
//! GET    /posts/{postId}/comments
//! PUT    /comments/{commentId}
//! DELETE /comments/{commentId}
//! ```

use actix_web::{delete, get, post, put, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Comment, CommentChanges, CommentId, Error, NewComment, PostId, ResourceKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{self, MessageBody, deleted};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, draft_error, parse_id, parse_page_request, parse_secret,
};

/// Request payload for commenting on a post.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCommentRequestBody {
    pub nickname: String,
    pub content: String,
    pub password: String,
}

/// Request payload for editing a comment. Omitted fields stay unchanged.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCommentRequestBody {
    pub password: String,
    pub nickname: Option<String>,
    pub content: Option<String>,
}

/// Request payload carrying only the comment password.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CommentPasswordRequestBody {
    pub password: String,
}

/// Comment resource as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub id: i64,
    pub nickname: String,
    pub content: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Comment> for CommentBody {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id.get(),
            nickname: value.nickname,
            content: value.content,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// One page of a post's comments, newest first.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentPageBody {
    pub current_page: u32,
    pub total_pages: u64,
    pub comment_count: u64,
    pub data: Vec<CommentBody>,
}

impl From<Page<Comment>> for CommentPageBody {
    fn from(page: Page<Comment>) -> Self {
        Self {
            current_page: page.current_page(),
            total_pages: page.total_pages(),
            comment_count: page.total_items(),
            data: page
                .into_items()
                .into_iter()
                .map(CommentBody::from)
                .collect(),
        }
    }
}

/// Query string accepted by the comment listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostCommentsPath {
    post_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentPath {
    comment_id: String,
}

fn post_id(path: web::Path<PostCommentsPath>) -> Result<PostId, Error> {
    parse_id(&path.into_inner().post_id, FieldName::new("postId"))
}

fn comment_id(path: web::Path<CommentPath>) -> Result<CommentId, Error> {
    parse_id(&path.into_inner().comment_id, FieldName::new("commentId"))
}

/// Comment on a post.
#[utoipa::path(
    post,
    path = "/posts/{postId}/comments",
    params(("postId" = i64, Path, description = "Post identifier")),
    request_body = CreateCommentRequestBody,
    responses(
        (status = 200, description = "Comment created", body = CommentBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/posts/{postId}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    path: web::Path<PostCommentsPath>,
    payload: web::Json<CreateCommentRequestBody>,
) -> ApiResult<web::Json<CommentBody>> {
    let post_id = post_id(path)?;
    let CreateCommentRequestBody {
        nickname,
        content,
        password,
    } = payload.into_inner();
    let secret = parse_secret(password, FieldName::new("password"))?;
    let draft = NewComment::try_new(post_id, nickname, content).map_err(draft_error)?;
    let comment = state.comments.create(draft, secret).await?;
    let comment = responses::found(comment, ResourceKind::Post)?;
    Ok(web::Json(CommentBody::from(comment)))
}

/// List a page of a post's comments.
#[utoipa::path(
    get,
    path = "/posts/{postId}/comments",
    params(
        ("postId" = i64, Path, description = "Post identifier"),
        ("page" = Option<i64>, Query, description = "One-based page number, default 1"),
        ("pageSize" = Option<i64>, Query, description = "Items per page, default 10, max 100")
    ),
    responses(
        (status = 200, description = "Comments", body = CommentPageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/posts/{postId}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<PostCommentsPath>,
    query: web::Query<ListCommentsQuery>,
) -> ApiResult<web::Json<CommentPageBody>> {
    let post_id = post_id(path)?;
    let query = query.into_inner();
    let page = parse_page_request(query.page, query.page_size)?;
    let comments = state.comments_query.list(post_id, page).await?;
    Ok(web::Json(CommentPageBody::from(comments)))
}

/// Edit a comment.
#[utoipa::path(
    put,
    path = "/comments/{commentId}",
    params(("commentId" = i64, Path, description = "Comment identifier")),
    request_body = UpdateCommentRequestBody,
    responses(
        (status = 200, description = "Comment updated", body = CommentBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Password does not match", body = ErrorSchema),
        (status = 404, description = "Comment not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[put("/comments/{commentId}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    path: web::Path<CommentPath>,
    payload: web::Json<UpdateCommentRequestBody>,
) -> ApiResult<web::Json<CommentBody>> {
    let id = comment_id(path)?;
    let UpdateCommentRequestBody {
        password,
        nickname,
        content,
    } = payload.into_inner();
    let secret = parse_secret(password, FieldName::new("password"))?;
    let changes = CommentChanges { nickname, content }
        .validate()
        .map_err(draft_error)?;
    let outcome = state.comments.update(id, secret, changes).await?;
    let comment = responses::guarded(outcome, ResourceKind::Comment)?;
    Ok(web::Json(CommentBody::from(comment)))
}

/// Delete a comment.
#[utoipa::path(
    delete,
    path = "/comments/{commentId}",
    params(("commentId" = i64, Path, description = "Comment identifier")),
    request_body = CommentPasswordRequestBody,
    responses(
        (status = 200, description = "Comment deleted", body = MessageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Password does not match", body = ErrorSchema),
        (status = 404, description = "Comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{commentId}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    path: web::Path<CommentPath>,
    payload: web::Json<CommentPasswordRequestBody>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = comment_id(path)?;
    let secret = parse_secret(payload.into_inner().password, FieldName::new("password"))?;
    let outcome = state.comments.delete(id, secret).await?;
    responses::guarded(outcome, ResourceKind::Comment)?;
    Ok(web::Json(deleted(ResourceKind::Comment)))
}

/// Register every comment route on an Actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_comment)
        .service(list_comments)
        .service(update_comment)
        .service(delete_comment);
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
