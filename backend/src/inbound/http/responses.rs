//! Outcome to response mapping.
//!
//! Services report expected results as tagged values. This module is the one
//! place those tags become status codes and JSON bodies, so handlers never
//! inspect error messages.

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Guarded, LikeOutcome, PasswordCheck, ResourceKind, Visibility};

/// Acknowledgement body for deletes, likes and password checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "group deleted")]
    pub message: String,
}

impl MessageBody {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Visibility read: the identifier and its flag only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityBody {
    pub id: i64,
    pub is_public: bool,
}

impl<I: Into<i64>> From<Visibility<I>> for VisibilityBody {
    fn from(value: Visibility<I>) -> Self {
        Self {
            id: value.id.into(),
            is_public: value.is_public,
        }
    }
}

pub(crate) fn not_found(kind: ResourceKind) -> Error {
    Error::not_found(format!("{kind} not found"))
}

/// Mutation endpoints: missing is 404, a wrong password is 403.
pub(crate) fn guarded<T>(outcome: Guarded<T>, kind: ResourceKind) -> Result<T, Error> {
    match outcome {
        Guarded::Applied(value) => Ok(value),
        Guarded::NotFound => Err(not_found(kind)),
        Guarded::Forbidden => Err(Error::forbidden("password does not match")),
    }
}

/// Verification endpoints: missing is 404, a wrong password is 401.
pub(crate) fn password_check(check: PasswordCheck, kind: ResourceKind) -> Result<MessageBody, Error> {
    match check {
        PasswordCheck::Match => Ok(MessageBody::new("password verified")),
        PasswordCheck::Mismatch => Err(Error::unauthorized("password does not match")),
        PasswordCheck::NotFound => Err(not_found(kind)),
    }
}

pub(crate) fn liked(outcome: LikeOutcome, kind: ResourceKind) -> Result<MessageBody, Error> {
    match outcome {
        LikeOutcome::Affected => Ok(MessageBody::new(format!("{kind} liked"))),
        LikeOutcome::NotFound => Err(not_found(kind)),
    }
}

pub(crate) fn found<T>(value: Option<T>, kind: ResourceKind) -> Result<T, Error> {
    value.ok_or_else(|| not_found(kind))
}

/// Group reads answer a missing id with 400, as existing clients expect.
pub(crate) fn found_or_invalid<T>(value: Option<T>, kind: ResourceKind) -> Result<T, Error> {
    value.ok_or_else(|| Error::invalid_request(format!("no {kind} with that id")))
}

pub(crate) fn deleted(kind: ResourceKind) -> MessageBody {
    MessageBody::new(format!("{kind} deleted"))
}

pub(crate) fn created<T: Serialize>(body: T) -> HttpResponse {
    HttpResponse::Created().json(body)
}
