//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path identifiers arrive as raw strings so a malformed value surfaces as a
//! `400` with field details instead of a generic routing failure.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{Error, IdValidationError, IncompleteValues, PetValidationError};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidDate => "invalid_date",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const USER_ID: FieldName = FieldName::new("uid");
pub(crate) const PET_ID: FieldName = FieldName::new("pid");
pub(crate) const ADOPTION_ID: FieldName = FieldName::new("aid");

/// Parse a path identifier, rejecting malformed values with `400`.
pub(crate) fn parse_id<T>(raw: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdValidationError>,
{
    raw.parse().map_err(|error: IdValidationError| {
        let field = field.as_str();
        Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
            "field": field,
            "value": raw,
            "reason": error.to_string(),
            "code": ValidationCode::InvalidUuid.as_str(),
        }))
    })
}

/// Map missing login or registration fields to `400 Incomplete values`.
pub(crate) fn incomplete_values(error: &IncompleteValues) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "fields": error.missing(),
        "code": ValidationCode::MissingField.as_str(),
    }))
}

/// Map an invalid pet draft to `400 Incomplete values`.
pub(crate) fn incomplete_pet(error: &PetValidationError) -> Error {
    let PetValidationError::MissingField(field) = error;
    Error::invalid_request("Incomplete values").with_details(json!({
        "fields": [field],
        "code": ValidationCode::MissingField.as_str(),
    }))
}

/// Reject a birth date that is not `YYYY-MM-DD` or RFC 3339.
pub(crate) fn invalid_date(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a date")).with_details(json!({
        "field": field,
        "value": value,
        "code": ValidationCode::InvalidDate.as_str(),
    }))
}
