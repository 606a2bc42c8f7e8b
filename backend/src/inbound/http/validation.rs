//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose details carry the
//! offending `field`, a machine-readable `code` and, where useful, the
//! rejected `value`.

use serde_json::json;

use crate::domain::Error;
use crate::domain::catalog::EntityId;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;
const EMAIL_MAX_CHARS: usize = 254;
const EMAIL_LOCAL_MAX_CHARS: usize = 64;
const PHONE_MIN_CHARS: usize = 8;
const PHONE_MAX_CHARS: usize = 20;
const ADDRESS_MAX_CHARS: usize = 255;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidLength,
    InvalidInteger,
    InvalidEmail,
    InvalidPhone,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidLength => "invalid_length",
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidPhone => "invalid_phone",
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

    fn as_str(&self) -> &str {
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

    fn with_value(self, code: ErrorCode, value: impl Into<serde_json::Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Unwrap a required body field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a numeric path segment before any catalog call is made.
///
/// # Examples
/// ```ignore
/// let id = parse_id("12", FieldName::new("id"))?;
/// assert_eq!(id, 12);
/// ```
pub(crate) fn parse_id(raw: &str, field: FieldName) -> Result<EntityId, Error> {
    raw.parse::<EntityId>().map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be an integer"))
            .with_value(ErrorCode::InvalidId, raw)
    })
}

/// Narrow a JSON integer to a storage id.
pub(crate) fn parse_reference(value: i64, field: FieldName) -> Result<EntityId, Error> {
    EntityId::try_from(value).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} is out of range"))
            .with_value(ErrorCode::InvalidInteger, value)
    })
}

fn check_length(
    value: String,
    field: FieldName,
    min: usize,
    max: usize,
) -> Result<String, Error> {
    let trimmed = value.trim();
    let chars = trimmed.chars().count();
    if (min..=max).contains(&chars) {
        return Ok(trimmed.to_owned());
    }
    let name = field.as_str();
    let message = if min == 0 {
        format!("{name} must be at most {max} characters")
    } else {
        format!("{name} must be between {min} and {max} characters")
    };
    Err(ValidationError::new(name, message).with_value(ErrorCode::InvalidLength, trimmed))
}

/// Trim a display name and require 2 to 100 characters.
pub(crate) fn validate_name(value: String, field: FieldName) -> Result<String, Error> {
    check_length(value, field, NAME_MIN_CHARS, NAME_MAX_CHARS)
}

/// Trim an email address and check its shape.
pub(crate) fn validate_email(value: String, field: FieldName) -> Result<String, Error> {
    let email = check_length(value, field, 1, EMAIL_MAX_CHARS)?;
    if is_plausible_email(&email) {
        return Ok(email);
    }
    let name = field.as_str();
    Err(
        ValidationError::new(name, format!("{name} must be a valid email address"))
            .with_value(ErrorCode::InvalidEmail, email),
    )
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || local.chars().count() > EMAIL_LOCAL_MAX_CHARS
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
        || local
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '@' | '"' | ',' | ';'))
    {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    labels_ok && tld_ok
}

/// Trim a phone number; 8 to 20 characters of digits, spaces or dashes with
/// an optional leading `+`.
pub(crate) fn validate_phone(value: String, field: FieldName) -> Result<String, Error> {
    let phone = check_length(value, field, PHONE_MIN_CHARS, PHONE_MAX_CHARS)?;
    let digits = phone.strip_prefix('+').unwrap_or(&phone);
    let shape_ok = digits
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
        && digits.chars().any(|c| c.is_ascii_digit());
    if shape_ok {
        return Ok(phone);
    }
    let name = field.as_str();
    Err(ValidationError::new(
        name,
        format!("{name} may only contain digits, spaces, dashes and a leading +"),
    )
    .with_value(ErrorCode::InvalidPhone, phone))
}

/// Trim a postal address to at most 255 characters; blank means none.
pub(crate) fn validate_address(value: String, field: FieldName) -> Result<Option<String>, Error> {
    let address = check_length(value, field, 0, ADDRESS_MAX_CHARS)?;
    Ok(if address.is_empty() { None } else { Some(address) })
}
