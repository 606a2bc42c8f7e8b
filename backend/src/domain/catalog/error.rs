//! Failures raised by catalog use cases.

use serde_json::json;

use super::{EntityId, EntityKind};
use crate::domain::Error;

/// Closed error taxonomy for catalog operations.
///
/// Inbound adapters dispatch on the variant, never on the message text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No active row has the requested id.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: EntityId },
    /// Another active row already holds the unique value.
    #[error("{entity} with {field} '{value}' already exists")]
    DuplicateName {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },
    /// Storage rejected a reference to a missing parent or status row.
    #[error("invalid {entity} reference: {message}")]
    InvalidArgument { entity: EntityKind, message: String },
    /// Storage fault or a row vanishing between check and write.
    #[error("{entity} storage failure: {message}")]
    Internal { entity: EntityKind, message: String },
}

impl CatalogError {
    /// Build a [`CatalogError::NotFound`].
    #[must_use]
    pub fn not_found(entity: EntityKind, id: EntityId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Build a [`CatalogError::DuplicateName`] for the entity's unique field.
    pub fn duplicate(entity: EntityKind, value: impl Into<String>) -> Self {
        Self::DuplicateName {
            entity,
            field: entity.unique_field(),
            value: value.into(),
        }
    }

    /// Build a [`CatalogError::InvalidArgument`].
    pub fn invalid_argument(entity: EntityKind, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            entity,
            message: message.into(),
        }
    }

    /// Build a [`CatalogError::Internal`].
    pub fn internal(entity: EntityKind, message: impl Into<String>) -> Self {
        Self::Internal {
            entity,
            message: message.into(),
        }
    }

    /// Entity the failure relates to.
    #[must_use]
    pub fn entity(&self) -> EntityKind {
        match self {
            Self::NotFound { entity, .. }
            | Self::DuplicateName { entity, .. }
            | Self::InvalidArgument { entity, .. }
            | Self::Internal { entity, .. } => *entity,
        }
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        match &err {
            CatalogError::NotFound { entity, id } => Self::not_found(err.to_string())
                .with_details(json!({ "entity": entity.label(), "id": id, "code": "not_found" })),
            CatalogError::DuplicateName {
                entity,
                field,
                value,
            } => Self::conflict(err.to_string()).with_details(json!({
                "entity": entity.label(),
                "field": field,
                "value": value,
                "code": "duplicate_name",
            })),
            CatalogError::InvalidArgument { entity, .. } => Self::invalid_request(err.to_string())
                .with_details(json!({ "entity": entity.label(), "code": "invalid_reference" })),
            CatalogError::Internal { .. } => Self::internal(err.to_string()),
        }
    }
}
