//! Domain primitives, aggregates and services.
//!
//! Purpose: define the board's entities (groups, posts, comments), the
//! password-gated mutation sequence and the services implementing the driving
//! ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Group, Post, Comment and their drafts and change sets.
//! - Guarded, PasswordCheck, LikeOutcome, Visibility: tagged outcomes.
//! - GroupService, PostService, CommentService: driving port implementations.

pub mod comment;
pub mod comment_service;
pub mod error;
pub mod group;
pub mod group_service;
pub mod guarded_mutation;
pub mod outcome;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod resource;
pub mod secret;
pub mod trace_id;

pub use self::comment::{Comment, CommentChanges, NewComment};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::group::{Group, GroupUpdate, NewGroup};
pub use self::group_service::GroupService;
pub use self::guarded_mutation::{GateTarget, SecretGate};
pub use self::outcome::{Guarded, LikeOutcome, PasswordCheck, Visibility};
pub use self::post::{
    NewPost, NewPostFields, Post, PostChanges, PostListQuery, PostSort, PostSortParseError,
};
pub use self::post_service::PostService;
pub use self::resource::{
    CommentId, DraftValidationError, GroupId, PostId, ResourceIdError, ResourceKind,
};
pub use self::secret::{PasswordDigest, PlainSecret, SecretValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

