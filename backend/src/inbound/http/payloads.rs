//! Request bodies for the catalog endpoints.
//!
//! Bodies are deserialised leniently (every field optional) so that a missing
//! field surfaces as a `missing_field` validation error rather than a generic
//! JSON failure. Each body converts into the domain draft or patch through
//! `TryFrom`, which applies the trimming and length rules.
//!
//! ```text
//! POST /api/v1/roles      {"name":"Admin","id_state":1}
//! POST /api/v1/cantons    {"name":"Grecia","id_province":2,"id_state":1}
//! POST /api/v1/clientes   {"nombre":"Ana","email":"ana@example.com","telefono":"8888-8888"}
//! PUT  /api/v1/clientes/3 {"direccion":null}
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::catalog::{
    CantonDraft, CantonPatch, ClientDraft, ClientPatch, NamedDraft, NamedPatch,
};
use crate::inbound::http::validation::{
    FieldName, parse_reference, require, validate_address, validate_email, validate_name,
    validate_phone,
};

const NAME: FieldName = FieldName::new("name");
const ID_STATE: FieldName = FieldName::new("id_state");
const ID_PROVINCE: FieldName = FieldName::new("id_province");
const NOMBRE: FieldName = FieldName::new("nombre");
const EMAIL: FieldName = FieldName::new("email");
const TELEFONO: FieldName = FieldName::new("telefono");
const DIRECCION: FieldName = FieldName::new("direccion");

/// Keep `null` distinct from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body for roles, provinces, payment methods and appointment statuses.
///
/// Both fields are required on create and optional on update.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct NamedRequest {
    /// Display name, unique among active rows.
    #[schema(example = "Administrador")]
    pub name: Option<String>,
    /// Reference into `general_status`.
    #[schema(example = 1)]
    pub id_state: Option<i64>,
}

impl TryFrom<NamedRequest> for NamedDraft {
    type Error = Error;

    fn try_from(body: NamedRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: validate_name(require(body.name, NAME)?, NAME)?,
            state_id: parse_reference(require(body.id_state, ID_STATE)?, ID_STATE)?,
        })
    }
}

impl TryFrom<NamedRequest> for NamedPatch {
    type Error = Error;

    fn try_from(body: NamedRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: body.name.map(|name| validate_name(name, NAME)).transpose()?,
            state_id: body
                .id_state
                .map(|id| parse_reference(id, ID_STATE))
                .transpose()?,
        })
    }
}

/// Body for cantons.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CantonRequest {
    /// Display name, unique among active cantons.
    #[schema(example = "Grecia")]
    pub name: Option<String>,
    /// Parent province.
    #[schema(example = 2)]
    pub id_province: Option<i64>,
    /// Reference into `general_status`.
    #[schema(example = 1)]
    pub id_state: Option<i64>,
}

impl TryFrom<CantonRequest> for CantonDraft {
    type Error = Error;

    fn try_from(body: CantonRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: validate_name(require(body.name, NAME)?, NAME)?,
            province_id: parse_reference(require(body.id_province, ID_PROVINCE)?, ID_PROVINCE)?,
            state_id: parse_reference(require(body.id_state, ID_STATE)?, ID_STATE)?,
        })
    }
}

impl TryFrom<CantonRequest> for CantonPatch {
    type Error = Error;

    fn try_from(body: CantonRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: body.name.map(|name| validate_name(name, NAME)).transpose()?,
            province_id: body
                .id_province
                .map(|id| parse_reference(id, ID_PROVINCE))
                .transpose()?,
            state_id: body
                .id_state
                .map(|id| parse_reference(id, ID_STATE))
                .transpose()?,
        })
    }
}

/// Body for registering a client.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ClientCreateRequest {
    #[schema(example = "Ana Mora")]
    pub nombre: Option<String>,
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    #[schema(example = "8888-8888")]
    pub telefono: Option<String>,
    #[schema(example = "San José, Costa Rica")]
    pub direccion: Option<String>,
}

impl TryFrom<ClientCreateRequest> for ClientDraft {
    type Error = Error;

    fn try_from(body: ClientCreateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: validate_name(require(body.nombre, NOMBRE)?, NOMBRE)?,
            email: validate_email(require(body.email, EMAIL)?, EMAIL)?,
            phone: validate_phone(require(body.telefono, TELEFONO)?, TELEFONO)?,
            address: match body.direccion {
                Some(address) => validate_address(address, DIRECCION)?,
                None => None,
            },
        })
    }
}

/// Partial client update; `"direccion": null` clears the address.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ClientUpdateRequest {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub direccion: Option<Option<String>>,
}

impl TryFrom<ClientUpdateRequest> for ClientPatch {
    type Error = Error;

    fn try_from(body: ClientUpdateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: body
                .nombre
                .map(|name| validate_name(name, NOMBRE))
                .transpose()?,
            email: body
                .email
                .map(|email| validate_email(email, EMAIL))
                .transpose()?,
            phone: body
                .telefono
                .map(|phone| validate_phone(phone, TELEFONO))
                .transpose()?,
            address: match body.direccion {
                Some(Some(address)) => Some(validate_address(address, DIRECCION)?),
                Some(None) => Some(None),
                None => None,
            },
        })
    }
}
