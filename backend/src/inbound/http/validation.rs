//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected request carries `details: {field, code}` so clients can
//! point at the offending input. Extractor configs route malformed bodies,
//! query strings and path segments into the same envelope.

use actix_web::web;
use chrono::{DateTime, Utc};
use pagination::{PageRequest, PageRequestError};
use serde_json::json;

use crate::domain::{
    DraftValidationError, Error, PlainSecret, PostSort, ResourceIdError, SecretValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    BlankField,
    NoChanges,
    InvalidId,
    InvalidTimestamp,
    InvalidPage,
    InvalidSort,
    InvalidJson,
    InvalidQuery,
    InvalidPath,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BlankField => "blank_field",
            ErrorCode::NoChanges => "no_changes",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidPage => "invalid_page",
            ErrorCode::InvalidSort => "invalid_sort",
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidPath => "invalid_path",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn blank_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must not be blank"))
        .with_code(ErrorCode::BlankField)
}

/// Translate draft validation failures; draft field names are already the
/// camelCase names clients send.
pub(crate) fn draft_error(error: DraftValidationError) -> Error {
    match error {
        DraftValidationError::Blank { field } => blank_field_error(FieldName::new(field)),
        DraftValidationError::NoChanges => Error::invalid_request(error.to_string())
            .with_details(json!({ "code": ErrorCode::NoChanges.as_str() })),
    }
}

pub(crate) fn parse_secret(value: String, field: FieldName) -> Result<PlainSecret, Error> {
    PlainSecret::new(value).map_err(|err| match err {
        SecretValidationError::EmptySecret | SecretValidationError::EmptyDigest => {
            blank_field_error(field)
        }
    })
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a positive integer"))
        .with_value(ErrorCode::InvalidId, value)
}

/// Parse a path identifier, rejecting anything but a positive integer.
pub(crate) fn parse_id<I>(value: &str, field: FieldName) -> Result<I, Error>
where
    I: TryFrom<i64, Error = ResourceIdError>,
{
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|raw| I::try_from(raw).ok())
        .ok_or_else(|| invalid_id_error(field, value))
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an RFC 3339 timestamp"))
        .with_value(ErrorCode::InvalidTimestamp, value)
}

pub(crate) fn parse_rfc3339_timestamp(
    value: String,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, &value))
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

/// Positive values above `u32::MAX` saturate; the page size is clamped later.
fn page_number(value: Option<i64>, field: FieldName) -> Result<Option<u32>, Error> {
    value
        .map(|raw| {
            if raw <= 0 {
                let name = field.as_str();
                return Err(ValidationError::new(
                    name,
                    format!("{name} must be a positive integer"),
                )
                .with_value(ErrorCode::InvalidPage, raw.to_string()));
            }
            Ok(u32::try_from(raw).unwrap_or(u32::MAX))
        })
        .transpose()
}

/// Validate `page` and `pageSize`, applying the defaults when absent and
/// clamping `pageSize` to the cap.
pub(crate) fn parse_page_request(
    page: Option<i64>,
    page_size: Option<i64>,
) -> Result<PageRequest, Error> {
    let page = page_number(page, FieldName::new("page"))?;
    let page_size = page_number(page_size, FieldName::new("pageSize"))?;
    PageRequest::from_optional(page, page_size).map_err(|err| {
        let field = match err {
            PageRequestError::ZeroPage => "page",
            PageRequestError::ZeroPageSize => "pageSize",
        };
        ValidationError::new(field, err.to_string()).with_code(ErrorCode::InvalidPage)
    })
}

pub(crate) fn parse_sort(value: Option<String>) -> Result<PostSort, Error> {
    match value {
        None => Ok(PostSort::default()),
        Some(raw) => raw.parse::<PostSort>().map_err(|err| {
            ValidationError::new("sortBy", err.to_string()).with_value(ErrorCode::InvalidSort, raw)
        }),
    }
}

fn envelope(code: ErrorCode, message: String) -> actix_web::Error {
    Error::invalid_request(message)
        .with_details(json!({ "code": code.as_str() }))
        .into()
}

/// JSON body extractor config rendering failures as `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        envelope(ErrorCode::InvalidJson, format!("invalid JSON body: {err}"))
    })
}

/// Query string extractor config rendering failures as `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        envelope(ErrorCode::InvalidQuery, format!("invalid query string: {err}"))
    })
}

/// Path extractor config rendering failures as `invalid_request`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        envelope(ErrorCode::InvalidPath, format!("invalid path: {err}"))
    })
}
