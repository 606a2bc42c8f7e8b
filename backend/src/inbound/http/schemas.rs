//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the wire shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested entity does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The unique field is already held by another active row.
    #[schema(rename = "conflict")]
    Conflict,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Failure envelope with machine-readable code and human-readable message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "role 7 not found")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details such as the offending field.
    details: Option<serde_json::Value>,
}

/// Success envelope returned by every catalog endpoint.
#[derive(ToSchema)]
#[schema(as = crate::inbound::http::envelope::Envelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnvelopeSchema {
    /// Always `true`.
    #[schema(example = true)]
    success: bool,
    /// Confirmation for writes.
    #[schema(example = "role created successfully")]
    message: Option<String>,
    /// One entity or a list of entities; absent on delete.
    data: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::catalog::Client`].
#[derive(ToSchema)]
#[schema(as = crate::domain::catalog::Client)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ClientSchema {
    #[schema(example = 3)]
    id: i32,
    #[schema(example = "Ana Mora")]
    nombre: String,
    #[schema(example = "ana@example.com")]
    email: String,
    #[schema(example = "8888-8888")]
    telefono: String,
    direccion: Option<String>,
    #[schema(rename = "fechaCreacion", value_type = String, format = DateTime)]
    fecha_creacion: String,
    #[schema(rename = "fechaActualizacion", value_type = String, format = DateTime)]
    fecha_actualizacion: String,
}

/// OpenAPI schema for [`crate::domain::catalog::Canton`].
#[derive(ToSchema)]
#[schema(as = crate::domain::catalog::Canton)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CantonSchema {
    #[schema(example = 5)]
    id: i32,
    #[schema(example = "Grecia")]
    name: String,
    #[schema(example = 2)]
    id_province: i32,
    #[schema(example = 1)]
    id_state: i32,
    #[schema(example = "Activo")]
    state_name: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::catalog::Role`].
#[derive(ToSchema)]
#[schema(as = crate::domain::catalog::Role)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RoleSchema {
    id: i32,
    #[schema(example = "Administrador")]
    name: String,
    id_state: i32,
    #[schema(example = "Activo")]
    state_name: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::catalog::Province`].
#[derive(ToSchema)]
#[schema(as = crate::domain::catalog::Province)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProvinceSchema {
    id: i32,
    #[schema(example = "Alajuela")]
    name: String,
    id_state: i32,
    state_name: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::catalog::PaymentMethod`].
///
/// Reads expose the status id only, without the joined label.
#[derive(ToSchema)]
#[schema(as = crate::domain::catalog::PaymentMethod)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PaymentMethodSchema {
    id: i32,
    #[schema(example = "Tarjeta")]
    name: String,
    id_state: i32,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::catalog::AppointmentStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::catalog::AppointmentStatus)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AppointmentStatusSchema {
    id: i32,
    #[schema(example = "Confirmada")]
    name: String,
    id_state: i32,
    state_name: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}
