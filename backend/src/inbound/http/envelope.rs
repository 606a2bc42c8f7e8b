//! Success envelope shared by every catalog endpoint.
//!
//! ```text
//! {"success": true, "data": [...]}
//! {"success": true, "message": "role created successfully", "data": {...}}
//! {"success": true, "message": "role deleted successfully"}
//! ```
//!
//! Failures use the domain [`crate::domain::Error`] payload instead.

use actix_web::HttpResponse;
use serde::Serialize;

/// `{success: true, message?, data?}` response body.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Envelope carrying only `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Envelope carrying a confirmation message and the affected entity.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Envelope carrying only a confirmation message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// `200 OK` with `{success: true, data}`.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::data(data))
}

/// `201 Created` with `{success: true, message, data}`.
pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    HttpResponse::Created().json(Envelope::with_message(message, data))
}

/// `200 OK` with `{success: true, message, data}`.
pub fn updated<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::with_message(message, data))
}

/// `200 OK` with `{success: true, message}`.
pub fn deleted(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::message(message))
}
