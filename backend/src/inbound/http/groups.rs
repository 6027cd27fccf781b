//! Group HTTP handlers.
//!
//! ```text
//! POST   /groups
//! GET    /groups/{id}
//! PUT    /groups/{id}
//! DELETE /groups/{id}
//! POST   /groups/{id}/vertify-password
//! POST   /groups/{id}/like
//! GET    /groups/{id}/is-public
//! ```
//!
//! `vertify-password` is the path existing clients call; it is kept as is.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Group, GroupId, GroupUpdate, NewGroup, ResourceKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{
    self, MessageBody, VisibilityBody, created, deleted, password_check,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, draft_error, parse_id, parse_secret};

/// Request payload for creating a group.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequestBody {
    #[schema(example = "book club")]
    pub name: String,
    pub password: String,
    pub image_url: Option<String>,
    /// Defaults to `true`.
    pub is_public: Option<bool>,
    pub introduction: Option<String>,
}

/// Request payload replacing a group's editable fields.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequestBody {
    pub name: String,
    pub password: String,
    pub is_public: bool,
    pub introduction: String,
    /// Omit to keep the current image.
    pub image_url: Option<String>,
}

/// Request payload carrying only the group password.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GroupPasswordRequestBody {
    pub password: String,
}

/// Group resource as returned to clients. The password digest is never
/// part of it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupBody {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub is_public: bool,
    pub like_count: u64,
    pub badges: Vec<String>,
    pub post_count: u64,
    #[schema(format = "date-time")]
    pub created_at: String,
    pub introduction: String,
}

impl From<Group> for GroupBody {
    fn from(value: Group) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            image_url: value.image_url,
            is_public: value.is_public,
            like_count: value.like_count,
            badges: value.badges,
            post_count: value.post_count,
            created_at: value.created_at.to_rfc3339(),
            introduction: value.introduction,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroupPath {
    id: String,
}

fn group_id(path: web::Path<GroupPath>) -> Result<GroupId, Error> {
    parse_id(&path.into_inner().id, FieldName::new("id"))
}

/// Create a group protected by a password.
#[utoipa::path(
    post,
    path = "/groups",
    request_body = CreateGroupRequestBody,
    responses(
        (status = 201, description = "Group created", body = GroupBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "createGroup"
)]
#[post("/groups")]
pub async fn create_group(
    state: web::Data<HttpState>,
    payload: web::Json<CreateGroupRequestBody>,
) -> ApiResult<HttpResponse> {
    let CreateGroupRequestBody {
        name,
        password,
        image_url,
        is_public,
        introduction,
    } = payload.into_inner();
    let secret = parse_secret(password, FieldName::new("password"))?;
    let draft = NewGroup::try_new(name, image_url, is_public, introduction).map_err(draft_error)?;
    let group = state.groups.create(draft, secret).await?;
    Ok(created(GroupBody::from(group)))
}

/// Fetch a group.
///
/// An unknown id is reported as 400, matching the contract existing clients
/// rely on.
#[utoipa::path(
    get,
    path = "/groups/{id}",
    params(("id" = i64, Path, description = "Group identifier")),
    responses(
        (status = 200, description = "Group", body = GroupBody),
        (status = 400, description = "Invalid or unknown group id", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "getGroup"
)]
#[get("/groups/{id}")]
pub async fn get_group(
    state: web::Data<HttpState>,
    path: web::Path<GroupPath>,
) -> ApiResult<web::Json<GroupBody>> {
    let id = group_id(path)?;
    let group = state.groups_query.get(id).await?;
    let group = responses::found_or_invalid(group, ResourceKind::Group)?;
    Ok(web::Json(GroupBody::from(group)))
}

/// Replace a group's editable fields.
#[utoipa::path(
    put,
    path = "/groups/{id}",
    params(("id" = i64, Path, description = "Group identifier")),
    request_body = UpdateGroupRequestBody,
    responses(
        (status = 200, description = "Group updated", body = GroupBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Password does not match", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "updateGroup"
)]
#[put("/groups/{id}")]
pub async fn update_group(
    state: web::Data<HttpState>,
    path: web::Path<GroupPath>,
    payload: web::Json<UpdateGroupRequestBody>,
) -> ApiResult<web::Json<GroupBody>> {
    let id = group_id(path)?;
    let UpdateGroupRequestBody {
        name,
        password,
        is_public,
        introduction,
        image_url,
    } = payload.into_inner();
    let secret = parse_secret(password, FieldName::new("password"))?;
    let update =
        GroupUpdate::try_new(name, is_public, introduction, image_url).map_err(draft_error)?;
    let outcome = state.groups.update(id, secret, update).await?;
    let group = responses::guarded(outcome, ResourceKind::Group)?;
    Ok(web::Json(GroupBody::from(group)))
}

/// Delete a group together with its posts and comments.
#[utoipa::path(
    delete,
    path = "/groups/{id}",
    params(("id" = i64, Path, description = "Group identifier")),
    request_body = GroupPasswordRequestBody,
    responses(
        (status = 200, description = "Group deleted", body = MessageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Password does not match", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "deleteGroup"
)]
#[delete("/groups/{id}")]
pub async fn delete_group(
    state: web::Data<HttpState>,
    path: web::Path<GroupPath>,
    payload: web::Json<GroupPasswordRequestBody>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = group_id(path)?;
    let secret = parse_secret(payload.into_inner().password, FieldName::new("password"))?;
    let outcome = state.groups.delete(id, secret).await?;
    responses::guarded(outcome, ResourceKind::Group)?;
    Ok(web::Json(deleted(ResourceKind::Group)))
}

/// Check a group password without changing anything.
#[utoipa::path(
    post,
    path = "/groups/{id}/vertify-password",
    params(("id" = i64, Path, description = "Group identifier")),
    request_body = GroupPasswordRequestBody,
    responses(
        (status = 200, description = "Password verified", body = MessageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Password does not match", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "verifyGroupPassword"
)]
#[post("/groups/{id}/vertify-password")]
pub async fn verify_group_password(
    state: web::Data<HttpState>,
    path: web::Path<GroupPath>,
    payload: web::Json<GroupPasswordRequestBody>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = group_id(path)?;
    let secret = parse_secret(payload.into_inner().password, FieldName::new("password"))?;
    let check = state.groups_query.verify_password(id, secret).await?;
    password_check(check, ResourceKind::Group).map(web::Json)
}

/// Add one like to a group.
#[utoipa::path(
    post,
    path = "/groups/{id}/like",
    params(("id" = i64, Path, description = "Group identifier")),
    responses(
        (status = 200, description = "Group liked", body = MessageBody),
        (status = 400, description = "Invalid group id", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "likeGroup"
)]
#[post("/groups/{id}/like")]
pub async fn like_group(
    state: web::Data<HttpState>,
    path: web::Path<GroupPath>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = group_id(path)?;
    let outcome = state.groups.like(id).await?;
    responses::liked(outcome, ResourceKind::Group).map(web::Json)
}

/// Read whether a group is public.
#[utoipa::path(
    get,
    path = "/groups/{id}/is-public",
    params(("id" = i64, Path, description = "Group identifier")),
    responses(
        (status = 200, description = "Group visibility", body = VisibilityBody),
        (status = 400, description = "Invalid group id", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "getGroupVisibility"
)]
#[get("/groups/{id}/is-public")]
pub async fn group_visibility(
    state: web::Data<HttpState>,
    path: web::Path<GroupPath>,
) -> ApiResult<web::Json<VisibilityBody>> {
    let id = group_id(path)?;
    let visibility = state.groups_query.visibility(id).await?;
    let visibility = responses::found(visibility, ResourceKind::Group)?;
    Ok(web::Json(VisibilityBody::from(visibility)))
}

/// Register every group route on an Actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_group)
        .service(get_group)
        .service(update_group)
        .service(delete_group)
        .service(verify_group_password)
        .service(like_group)
        .service(group_visibility);
}

#[cfg(test)]
#[path = "groups_tests.rs"]
mod tests;
