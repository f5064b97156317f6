//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` [`Error`] whose `details` name
//! the offending field, the rejected value and a machine-readable code.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{Error, RecordIdError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidChoice,
    OutOfRange,
    EmptyField,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidChoice => "invalid_choice",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::EmptyField => "empty_field",
            ErrorCode::MalformedBody => "malformed_body",
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
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: serde_json::Value) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, json!(value))
}

/// Parse a record identifier, reporting failures against `field`.
pub(crate) fn parse_record_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = RecordIdError>,
{
    value
        .parse::<T>()
        .map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn invalid_choice_error(field: FieldName, value: &str, allowed: &[&str]) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be one of {}", allowed.join(", ")))
        .with_value(ErrorCode::InvalidChoice, json!(value))
}

pub(crate) fn out_of_range_error(field: FieldName, value: i64, min: i64, max: i64) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be between {min} and {max}"))
        .with_value(ErrorCode::OutOfRange, json!(value))
}

pub(crate) fn empty_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must not be empty")).with_code(ErrorCode::EmptyField)
}

/// Error for a body that failed JSON decoding before reaching a handler.
pub(crate) fn malformed_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request("request body is not valid JSON for this endpoint").with_details(
        json!({
            "reason": reason.to_string(),
            "code": ErrorCode::MalformedBody.as_str(),
        }),
    )
}
