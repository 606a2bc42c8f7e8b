//! Handler tests for the catalog endpoints.
//!
//! Role ports are replaced by mocks so each test can assert exactly which
//! use case the handler reached; the remaining entities run against the
//! in-memory adapter.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::{mock, predicate::eq};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::catalog::{CatalogError, EntityId, EntityKind};
use crate::domain::ports::{CantonProvinceQuery, CatalogCommand, CatalogQuery};
use crate::inbound::http::state::CatalogRepositories;
use crate::test_support::{fixture_timestamp, in_memory_catalog};

mock! {
    RoleQuery {}

    #[async_trait]
    impl CatalogQuery<Role> for RoleQuery {
        async fn get_all(&self) -> Result<Vec<Role>, CatalogError>;
        async fn get_by_id(&self, id: EntityId) -> Result<Role, CatalogError>;
    }
}

mock! {
    RoleCommand {}

    #[async_trait]
    impl CatalogCommand<Role> for RoleCommand {
        async fn create(&self, draft: NamedDraft) -> Result<Role, CatalogError>;
        async fn update(&self, id: EntityId, patch: NamedPatch) -> Result<Role, CatalogError>;
        async fn delete(&self, id: EntityId) -> Result<(), CatalogError>;
    }
}

mock! {
    ProvinceCantons {}

    #[async_trait]
    impl CantonProvinceQuery for ProvinceCantons {
        async fn get_by_province(&self, province_id: EntityId) -> Result<Vec<Canton>, CatalogError>;
    }
}

fn admin(stamp: DateTime<Utc>) -> Role {
    Role {
        id: 1,
        name: "Admin".into(),
        state_id: 1,
        state_name: Some("Activo".into()),
        created_at: stamp,
        updated_at: stamp,
        deleted_at: None,
    }
}

fn in_memory_state() -> HttpState {
    let (catalog, _clock) = in_memory_catalog();
    HttpState::from_repositories(CatalogRepositories {
        clients: Arc::new(catalog.repository::<Client>()),
        roles: Arc::new(catalog.repository::<Role>()),
        provinces: Arc::new(catalog.repository::<Province>()),
        cantons: Arc::new(catalog.repository::<Canton>()),
        payment_methods: Arc::new(catalog.repository::<PaymentMethod>()),
        appointment_statuses: Arc::new(catalog.repository::<AppointmentStatus>()),
    })
}

fn with_roles(query: MockRoleQuery, command: MockRoleCommand) -> HttpState {
    let mut state = in_memory_state();
    state.roles = CatalogPorts {
        query: Arc::new(query),
        command: Arc::new(command),
    };
    state
}

async fn send(state: HttpState, req: test::TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn lists_roles_in_success_envelope() {
    let mut query = MockRoleQuery::new();
    query
        .expect_get_all()
        .times(1)
        .returning(|| Ok(vec![admin(fixture_timestamp())]));

    let (status, body) = send(
        with_roles(query, MockRoleCommand::new()),
        test::TestRequest::get().uri("/api/v1/roles"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"][0]["name"], json!("Admin"));
    assert_eq!(body["data"][0]["state_name"], json!("Activo"));
    assert!(body.get("message").is_none());
}

#[rstest]
#[case::get(test::TestRequest::get())]
#[case::put(test::TestRequest::put().set_json(json!({"name": "Admin"})))]
#[case::delete(test::TestRequest::delete())]
#[actix_web::test]
async fn non_numeric_id_is_rejected_before_the_service(#[case] req: test::TestRequest) {
    let mut query = MockRoleQuery::new();
    query.expect_get_by_id().never();
    let mut command = MockRoleCommand::new();
    command.expect_update().never();
    command.expect_delete().never();

    let (status, body) = send(with_roles(query, command), req.uri("/api/v1/roles/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["code"], json!("invalid_id"));
    assert_eq!(body["details"]["value"], json!("abc"));
}

#[rstest]
#[actix_web::test]
async fn missing_role_maps_to_404() {
    let mut query = MockRoleQuery::new();
    query
        .expect_get_by_id()
        .with(eq(7))
        .returning(|id| Err(CatalogError::not_found(EntityKind::Role, id)));

    let (status, body) = send(
        with_roles(query, MockRoleCommand::new()),
        test::TestRequest::get().uri("/api/v1/roles/7"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("role 7 not found"));
    assert_eq!(body["details"], json!({"entity": "role", "id": 7, "code": "not_found"}));
}

#[rstest]
#[actix_web::test]
async fn duplicate_name_maps_to_409() {
    let mut command = MockRoleCommand::new();
    command
        .expect_create()
        .withf(|draft| draft.name == "Admin" && draft.state_id == 1)
        .returning(|draft| Err(CatalogError::duplicate(EntityKind::Role, draft.name)));

    let (status, body) = send(
        with_roles(MockRoleQuery::new(), command),
        test::TestRequest::post()
            .uri("/api/v1/roles")
            .set_json(json!({"name": " Admin ", "id_state": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("conflict"));
    assert_eq!(body["details"]["field"], json!("name"));
}

#[rstest]
#[actix_web::test]
async fn storage_failures_are_redacted() {
    let mut query = MockRoleQuery::new();
    query.expect_get_all().returning(|| {
        Err(CatalogError::internal(
            EntityKind::Role,
            "connection refused by 10.0.0.5",
        ))
    });

    let (status, body) = send(
        with_roles(query, MockRoleCommand::new()),
        test::TestRequest::get().uri("/api/v1/roles"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], json!("Internal server error"));
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn invalid_body_never_reaches_the_service() {
    let mut command = MockRoleCommand::new();
    command.expect_create().never();

    let (status, body) = send(
        with_roles(MockRoleQuery::new(), command),
        test::TestRequest::post()
            .uri("/api/v1/roles")
            .set_json(json!({"name": "A", "id_state": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!("name"));
    assert_eq!(body["details"]["code"], json!("invalid_length"));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let mut command = MockRoleCommand::new();
    command.expect_create().never();

    let (status, body) = send(
        with_roles(MockRoleQuery::new(), command),
        test::TestRequest::post()
            .uri("/api/v1/roles")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\": "),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["details"]["code"], json!("malformed_body"));
}

#[rstest]
#[actix_web::test]
async fn update_passes_partial_patch() {
    let mut command = MockRoleCommand::new();
    command
        .expect_update()
        .withf(|id, patch| *id == 1 && patch.name.is_none() && patch.state_id == Some(2))
        .returning(|_, _| {
            let mut role = admin(fixture_timestamp());
            role.state_id = 2;
            role.state_name = Some("Inactivo".into());
            Ok(role)
        });

    let (status, body) = send(
        with_roles(MockRoleQuery::new(), command),
        test::TestRequest::put()
            .uri("/api/v1/roles/1")
            .set_json(json!({"id_state": 2})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("role updated successfully"));
    assert_eq!(body["data"]["state_name"], json!("Inactivo"));
}

#[rstest]
#[actix_web::test]
async fn province_filter_validates_and_forwards_the_id() {
    let mut by_province = MockProvinceCantons::new();
    by_province
        .expect_get_by_province()
        .with(eq(2))
        .times(1)
        .returning(|_| Ok(Vec::new()));
    let mut state = in_memory_state();
    state.cantons_by_province = Arc::new(by_province);

    let (status, body) = send(
        state.clone(),
        test::TestRequest::get().uri("/api/v1/cantons/province/2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": []}));

    let (status, body) = send(
        state,
        test::TestRequest::get().uri("/api/v1/cantons/province/dos"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!("id_province"));
}

#[rstest]
#[case("/api/v1/payment-methods", "payment method")]
#[case("/api/v1/appointment-status", "appointment status")]
#[case("/api/v1/provinces", "province")]
#[actix_web::test]
async fn create_and_delete_messages_name_the_entity(#[case] uri: &str, #[case] label: &str) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(in_memory_state()))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(uri)
            .set_json(json!({"name": "Efectivo", "id_state": 1}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(created).await;
    assert_eq!(created["message"], json!(format!("{label} created successfully")));
    let id = created["data"]["id"].as_i64().expect("numeric id");

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("{uri}/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let deleted: Value = test::read_body_json(deleted).await;
    assert_eq!(
        deleted,
        json!({"success": true, "message": format!("{label} deleted successfully")})
    );
}
