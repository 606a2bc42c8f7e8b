//! Catalog CRUD endpoints.
//!
//! ```text
//! GET    /api/v1/{resource}
//! GET    /api/v1/{resource}/{id}
//! POST   /api/v1/{resource}
//! PUT    /api/v1/{resource}/{id}
//! DELETE /api/v1/{resource}/{id}
//! GET    /api/v1/cantons/province/{id_province}
//! ```
//!
//! One set of generic handlers serves every entity; [`CatalogResource`]
//! supplies the path, the request bodies and the ports to call.

use actix_web::{HttpResponse, Scope, web};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::Error;
use crate::domain::catalog::{
    AppointmentStatus, Canton, CantonDraft, CantonPatch, CatalogEntity, Client, ClientDraft,
    ClientPatch, NamedDraft, NamedPatch, PaymentMethod, Province, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::payloads::{
    CantonRequest, ClientCreateRequest, ClientUpdateRequest, NamedRequest,
};
use crate::inbound::http::state::{CatalogPorts, HttpState};
use crate::inbound::http::validation::{FieldName, parse_id};

const ID: FieldName = FieldName::new("id");
const ID_PROVINCE: FieldName = FieldName::new("id_province");

/// HTTP binding for a catalog entity.
pub trait CatalogResource: CatalogEntity + Serialize {
    /// Body accepted by `POST`.
    type CreateBody: DeserializeOwned + 'static;
    /// Body accepted by `PUT`.
    type UpdateBody: DeserializeOwned + 'static;

    /// Scope path below `/api/v1`.
    const PATH: &'static str;

    /// Ports serving this entity.
    fn ports(state: &HttpState) -> &CatalogPorts<Self>;

    /// Validate a create body.
    fn parse_create(body: Self::CreateBody) -> Result<Self::Draft, Error>;

    /// Validate an update body.
    fn parse_update(body: Self::UpdateBody) -> Result<Self::Patch, Error>;
}

macro_rules! named_resource {
    ($entity:ty, $path:literal, $field:ident) => {
        impl CatalogResource for $entity {
            type CreateBody = NamedRequest;
            type UpdateBody = NamedRequest;

            const PATH: &'static str = $path;

            fn ports(state: &HttpState) -> &CatalogPorts<Self> {
                &state.$field
            }

            fn parse_create(body: NamedRequest) -> Result<NamedDraft, Error> {
                NamedDraft::try_from(body)
            }

            fn parse_update(body: NamedRequest) -> Result<NamedPatch, Error> {
                NamedPatch::try_from(body)
            }
        }
    };
}

named_resource!(Role, "/roles", roles);
named_resource!(Province, "/provinces", provinces);
named_resource!(PaymentMethod, "/payment-methods", payment_methods);
named_resource!(AppointmentStatus, "/appointment-status", appointment_statuses);

impl CatalogResource for Canton {
    type CreateBody = CantonRequest;
    type UpdateBody = CantonRequest;

    const PATH: &'static str = "/cantons";

    fn ports(state: &HttpState) -> &CatalogPorts<Self> {
        &state.cantons
    }

    fn parse_create(body: CantonRequest) -> Result<CantonDraft, Error> {
        CantonDraft::try_from(body)
    }

    fn parse_update(body: CantonRequest) -> Result<CantonPatch, Error> {
        CantonPatch::try_from(body)
    }
}

impl CatalogResource for Client {
    type CreateBody = ClientCreateRequest;
    type UpdateBody = ClientUpdateRequest;

    const PATH: &'static str = "/clientes";

    fn ports(state: &HttpState) -> &CatalogPorts<Self> {
        &state.clients
    }

    fn parse_create(body: ClientCreateRequest) -> Result<ClientDraft, Error> {
        ClientDraft::try_from(body)
    }

    fn parse_update(body: ClientUpdateRequest) -> Result<ClientPatch, Error> {
        ClientPatch::try_from(body)
    }
}

/// List every active entity.
pub async fn list<E: CatalogResource>(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let rows = E::ports(&state).query.get_all().await?;
    Ok(envelope::ok(rows))
}

/// Fetch one entity by id.
pub async fn fetch<E: CatalogResource>(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path, ID)?;
    let row = E::ports(&state).query.get_by_id(id).await?;
    Ok(envelope::ok(row))
}

/// Create an entity from a validated body.
pub async fn create<E: CatalogResource>(
    state: web::Data<HttpState>,
    payload: web::Json<E::CreateBody>,
) -> ApiResult<HttpResponse> {
    let draft = E::parse_create(payload.into_inner())?;
    let row = E::ports(&state).command.create(draft).await?;
    Ok(envelope::created(format!("{} created successfully", E::KIND), row))
}

/// Apply a partial update.
pub async fn update<E: CatalogResource>(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<E::UpdateBody>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path, ID)?;
    let patch = E::parse_update(payload.into_inner())?;
    let row = E::ports(&state).command.update(id, patch).await?;
    Ok(envelope::updated(format!("{} updated successfully", E::KIND), row))
}

/// Delete an entity; soft or hard depending on the entity.
pub async fn remove<E: CatalogResource>(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path, ID)?;
    E::ports(&state).command.delete(id).await?;
    Ok(envelope::deleted(format!("{} deleted successfully", E::KIND)))
}

/// List the active cantons of a province.
pub async fn list_cantons_by_province(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let province_id = parse_id(&path, ID_PROVINCE)?;
    let rows = state.cantons_by_province.get_by_province(province_id).await?;
    Ok(envelope::ok(rows))
}

/// CRUD routes for `E` mounted at [`CatalogResource::PATH`].
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use refdata::domain::catalog::Role;
/// use refdata::inbound::http::catalog::catalog_scope;
///
/// let app = App::new().service(web::scope("/api/v1").service(catalog_scope::<Role>()));
/// ```
pub fn catalog_scope<E: CatalogResource>() -> Scope {
    web::scope(E::PATH)
        .route("", web::get().to(list::<E>))
        .route("", web::post().to(create::<E>))
        .route("/{id}", web::get().to(fetch::<E>))
        .route("/{id}", web::put().to(update::<E>))
        .route("/{id}", web::delete().to(remove::<E>))
}

/// Every catalog scope, ready to mount under `/api/v1`.
///
/// Also installs the JSON extractor configuration so malformed bodies become
/// `400` envelopes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            catalog_scope::<Canton>()
                .route("/province/{id_province}", web::get().to(list_cantons_by_province)),
        )
        .service(catalog_scope::<Client>())
        .service(catalog_scope::<Role>())
        .service(catalog_scope::<Province>())
        .service(catalog_scope::<PaymentMethod>())
        .service(catalog_scope::<AppointmentStatus>());
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
