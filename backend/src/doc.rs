//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates the annotated handlers of the inbound HTTP layer
//! (groups, posts, comments, health) together with the schema wrappers for
//! domain types. Swagger UI serves it in debug builds and the `openapi-dump`
//! binary prints it for external tooling.

use crate::inbound::http::comments::{
    CommentBody, CommentPageBody, CommentPasswordRequestBody, CreateCommentRequestBody,
    UpdateCommentRequestBody,
};
use crate::inbound::http::groups::{
    CreateGroupRequestBody, GroupBody, GroupPasswordRequestBody, UpdateGroupRequestBody,
};
use crate::inbound::http::posts::{
    CreatePostRequestBody, DeletePostRequestBody, PostBody, PostPageBody,
    PostPasswordRequestBody, UpdatePostRequestBody,
};
use crate::inbound::http::responses::{MessageBody, VisibilityBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, PostSortSchema};
use utoipa::OpenApi;

/// OpenAPI document for the board API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Board API",
        description = "Password-gated groups, posts and comments with likes and visibility flags."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::groups::create_group,
        crate::inbound::http::groups::get_group,
        crate::inbound::http::groups::update_group,
        crate::inbound::http::groups::delete_group,
        crate::inbound::http::groups::verify_group_password,
        crate::inbound::http::groups::like_group,
        crate::inbound::http::groups::group_visibility,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::posts::delete_post_alias,
        crate::inbound::http::posts::verify_post_password,
        crate::inbound::http::posts::like_post,
        crate::inbound::http::posts::post_visibility,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PostSortSchema,
        MessageBody,
        VisibilityBody,
        CreateGroupRequestBody,
        UpdateGroupRequestBody,
        GroupPasswordRequestBody,
        GroupBody,
        CreatePostRequestBody,
        UpdatePostRequestBody,
        DeletePostRequestBody,
        PostPasswordRequestBody,
        PostBody,
        PostPageBody,
        CreateCommentRequestBody,
        UpdateCommentRequestBody,
        CommentPasswordRequestBody,
        CommentBody,
        CommentPageBody,
    )),
    tags(
        (name = "groups", description = "Group lifecycle, likes and visibility"),
        (name = "posts", description = "Posts inside a group"),
        (name = "comments", description = "Comments on a post"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
