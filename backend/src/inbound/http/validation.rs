//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected input becomes `invalid_request` with
//! `details: {field, code[, value]}`.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::web;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{AccountValidationError, AuthInputError, ComplaintValidationError, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    EmptyPassword,
    EmptyName,
    NameTooLong,
    InvalidEmail,
    EmailTooLong,
    UnknownRole,
    EmptyTitle,
    TitleTooLong,
    EmptyDescription,
    DescriptionTooLong,
    ImageUrlTooLong,
    UnknownCategory,
    UnknownPriority,
    UnknownStatus,
    MissingField,
    MalformedBody,
    UnsupportedContentType,
    BodyTooLarge,
    MalformedQuery,
    MalformedPath,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::EmptyPassword => "empty_password",
            ErrorCode::EmptyName => "empty_name",
            ErrorCode::NameTooLong => "name_too_long",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::EmailTooLong => "email_too_long",
            ErrorCode::UnknownRole => "unknown_role",
            ErrorCode::EmptyTitle => "empty_title",
            ErrorCode::TitleTooLong => "title_too_long",
            ErrorCode::EmptyDescription => "empty_description",
            ErrorCode::DescriptionTooLong => "description_too_long",
            ErrorCode::ImageUrlTooLong => "image_url_too_long",
            ErrorCode::UnknownCategory => "unknown_category",
            ErrorCode::UnknownPriority => "unknown_priority",
            ErrorCode::UnknownStatus => "unknown_status",
            ErrorCode::MissingField => "missing_field",
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::UnsupportedContentType => "unsupported_content_type",
            ErrorCode::BodyTooLarge => "body_too_large",
            ErrorCode::MalformedQuery => "malformed_query",
            ErrorCode::MalformedPath => "malformed_path",
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

fn field_error(field: &str, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn field_value_error(
    field: &str,
    message: impl Into<String>,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
        "value": value,
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    field_value_error(
        field,
        format!("{field} must be a valid UUID"),
        ErrorCode::InvalidUuid,
        value,
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

fn account_code(err: &AccountValidationError) -> ErrorCode {
    match err {
        AccountValidationError::EmptyDisplayName => ErrorCode::EmptyName,
        AccountValidationError::DisplayNameTooLong { .. } => ErrorCode::NameTooLong,
        AccountValidationError::InvalidEmail => ErrorCode::InvalidEmail,
        AccountValidationError::EmailTooLong { .. } => ErrorCode::EmailTooLong,
        AccountValidationError::UnknownRole => ErrorCode::UnknownRole,
    }
}

pub(crate) fn map_auth_input_error(err: AuthInputError) -> Error {
    let code = match &err {
        AuthInputError::EmptyPassword => ErrorCode::EmptyPassword,
        AuthInputError::Account(inner) => account_code(inner),
    };
    field_error(err.field(), err.to_string(), code)
}

pub(crate) fn map_complaint_validation_error(err: ComplaintValidationError) -> Error {
    let code = match &err {
        ComplaintValidationError::EmptyTitle => ErrorCode::EmptyTitle,
        ComplaintValidationError::TitleTooLong { .. } => ErrorCode::TitleTooLong,
        ComplaintValidationError::EmptyDescription => ErrorCode::EmptyDescription,
        ComplaintValidationError::DescriptionTooLong { .. } => ErrorCode::DescriptionTooLong,
        ComplaintValidationError::ImageUrlTooLong { .. } => ErrorCode::ImageUrlTooLong,
        ComplaintValidationError::UnknownCategory { .. } => ErrorCode::UnknownCategory,
        ComplaintValidationError::UnknownPriority { .. } => ErrorCode::UnknownPriority,
        ComplaintValidationError::UnknownStatus { .. } => ErrorCode::UnknownStatus,
    };
    match err.rejected_value() {
        Some(value) => field_value_error(err.field(), err.to_string(), code, value),
        None => field_error(err.field(), err.to_string(), code),
    }
}

/// Field named by a serde "missing field `x`" message.
fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
        .filter(|field| !field.is_empty())
}

fn deserialize_error(message: &str, fallback_field: &str, fallback_code: ErrorCode) -> Error {
    match missing_field(message) {
        Some(field) => field_error(field, format!("{field} is required"), ErrorCode::MissingField),
        None => field_error(
            fallback_field,
            format!("invalid {fallback_field}: {message}"),
            fallback_code,
        ),
    }
}

pub(crate) fn map_json_payload_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::Deserialize(inner) => {
            deserialize_error(&inner.to_string(), "body", ErrorCode::MalformedBody)
        }
        JsonPayloadError::ContentType => field_error(
            "body",
            "request body must be application/json",
            ErrorCode::UnsupportedContentType,
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            field_error("body", "request body is too large", ErrorCode::BodyTooLarge)
        }
        other => field_error(
            "body",
            format!("invalid body: {other}"),
            ErrorCode::MalformedBody,
        ),
    }
}

pub(crate) fn map_query_payload_error(err: &QueryPayloadError) -> Error {
    match err {
        QueryPayloadError::Deserialize(inner) => {
            deserialize_error(&inner.to_string(), "query", ErrorCode::MalformedQuery)
        }
        other => field_error(
            "query",
            format!("invalid query: {other}"),
            ErrorCode::MalformedQuery,
        ),
    }
}

pub(crate) fn map_path_error(err: &PathError) -> Error {
    field_error(
        "path",
        format!("invalid path: {err}"),
        ErrorCode::MalformedPath,
    )
}

/// Extractor configuration that reports body, query and path failures in
/// the shared error envelope.
pub(crate) fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| actix_web::Error::from(map_json_payload_error(&err))),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| actix_web::Error::from(map_query_payload_error(&err))),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| actix_web::Error::from(map_path_error(&err))),
    );
}
