//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the health probes
//! - **Schemas**: domain type wrappers from `inbound::http::schemas` plus the
//!   catalog request bodies, so the success and failure envelopes, every
//!   entity and every accepted body are described without coupling domain
//!   types to utoipa
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::payloads::{
    CantonRequest, ClientCreateRequest, ClientUpdateRequest, NamedRequest,
};
use crate::inbound::http::schemas::{
    AppointmentStatusSchema, CantonSchema, ClientSchema, EnvelopeSchema, ErrorCodeSchema,
    ErrorSchema, PaymentMethodSchema, ProvinceSchema, RoleSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reference data API",
        description = "CRUD access to clients, roles, provinces, cantons, payment methods and \
                       appointment statuses under /api/v1, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        EnvelopeSchema,
        ClientSchema,
        RoleSchema,
        ProvinceSchema,
        CantonSchema,
        PaymentMethodSchema,
        AppointmentStatusSchema,
        NamedRequest,
        CantonRequest,
        ClientCreateRequest,
        ClientUpdateRequest,
    )),
    tags(
        (name = "catalog", description = "Reference-data CRUD endpoints"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
