//! Tests for the catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mockall::mock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::catalog::{
    CantonDraft, CantonPatch, Client, ClientDraft, ClientPatch, EntityKind, NamedDraft, NamedPatch,
    Role,
};

mock! {
    RoleRepository {}

    #[async_trait]
    impl CatalogRepository<Role> for RoleRepository {
        async fn find_all(&self) -> Result<Vec<Role>, CatalogRepositoryError>;
        async fn find_by_id(&self, id: EntityId) -> Result<Option<Role>, CatalogRepositoryError>;
        async fn find_by_unique(&self, value: &str) -> Result<Option<Role>, CatalogRepositoryError>;
        async fn create(&self, draft: &NamedDraft) -> Result<Role, CatalogRepositoryError>;
        async fn update(
            &self,
            id: EntityId,
            patch: &NamedPatch,
        ) -> Result<Option<Role>, CatalogRepositoryError>;
        async fn delete(&self, id: EntityId) -> Result<bool, CatalogRepositoryError>;
    }
}

mock! {
    ClientRepository {}

    #[async_trait]
    impl CatalogRepository<Client> for ClientRepository {
        async fn find_all(&self) -> Result<Vec<Client>, CatalogRepositoryError>;
        async fn find_by_id(&self, id: EntityId) -> Result<Option<Client>, CatalogRepositoryError>;
        async fn find_by_unique(&self, value: &str) -> Result<Option<Client>, CatalogRepositoryError>;
        async fn create(&self, draft: &ClientDraft) -> Result<Client, CatalogRepositoryError>;
        async fn update(
            &self,
            id: EntityId,
            patch: &ClientPatch,
        ) -> Result<Option<Client>, CatalogRepositoryError>;
        async fn delete(&self, id: EntityId) -> Result<bool, CatalogRepositoryError>;
    }
}

mock! {
    CantonRepo {}

    #[async_trait]
    impl CatalogRepository<Canton> for CantonRepo {
        async fn find_all(&self) -> Result<Vec<Canton>, CatalogRepositoryError>;
        async fn find_by_id(&self, id: EntityId) -> Result<Option<Canton>, CatalogRepositoryError>;
        async fn find_by_unique(&self, value: &str) -> Result<Option<Canton>, CatalogRepositoryError>;
        async fn create(&self, draft: &CantonDraft) -> Result<Canton, CatalogRepositoryError>;
        async fn update(
            &self,
            id: EntityId,
            patch: &CantonPatch,
        ) -> Result<Option<Canton>, CatalogRepositoryError>;
        async fn delete(&self, id: EntityId) -> Result<bool, CatalogRepositoryError>;
    }

    #[async_trait]
    impl CantonRepository for CantonRepo {
        async fn find_by_province(
            &self,
            province_id: EntityId,
        ) -> Result<Vec<Canton>, CatalogRepositoryError>;
    }
}

fn stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn role(id: EntityId, name: &str) -> Role {
    Role {
        id,
        name: name.to_owned(),
        state_id: 1,
        state_name: Some("Activo".to_owned()),
        created_at: stamp(),
        updated_at: stamp(),
        deleted_at: None,
    }
}

fn client(id: EntityId, email: &str) -> Client {
    Client {
        id,
        name: "Ana".to_owned(),
        email: email.to_owned(),
        phone: "88889999".to_owned(),
        address: None,
        created_at: stamp(),
        updated_at: stamp(),
    }
}

fn canton(id: EntityId, name: &str, province_id: EntityId) -> Canton {
    Canton {
        id,
        name: name.to_owned(),
        province_id,
        state_id: 1,
        state_name: Some("Activo".to_owned()),
        created_at: stamp(),
        updated_at: stamp(),
        deleted_at: None,
    }
}

#[fixture]
fn repo() -> MockRoleRepository {
    MockRoleRepository::new()
}

fn role_service(repo: MockRoleRepository) -> CatalogService<Role, MockRoleRepository> {
    CatalogService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn get_all_passes_rows_through(mut repo: MockRoleRepository) {
    repo.expect_find_all()
        .times(1)
        .return_once(|| Ok(vec![role(1, "Admin"), role(2, "Recepción")]));

    let roles = role_service(repo).get_all().await.expect("listing succeeds");

    assert_eq!(roles.len(), 2);
}

#[rstest]
#[tokio::test]
async fn get_by_id_reports_missing_rows(mut repo: MockRoleRepository) {
    repo.expect_find_by_id()
        .withf(|id| *id == 9)
        .times(1)
        .return_once(|_| Ok(None));

    let err = role_service(repo).get_by_id(9).await.expect_err("missing row");

    assert_eq!(err, CatalogError::not_found(EntityKind::Role, 9));
}

#[rstest]
#[tokio::test]
async fn create_rejects_taken_name_without_writing(mut repo: MockRoleRepository) {
    repo.expect_find_by_unique()
        .withf(|value| value == "Admin")
        .times(1)
        .return_once(|_| Ok(Some(role(1, "Admin"))));

    let draft = NamedDraft {
        name: "Admin".to_owned(),
        state_id: 1,
    };
    let err = role_service(repo).create(draft).await.expect_err("duplicate");

    assert_eq!(err, CatalogError::duplicate(EntityKind::Role, "Admin"));
}

#[rstest]
#[tokio::test]
async fn create_delegates_when_name_is_free(mut repo: MockRoleRepository) {
    repo.expect_find_by_unique().times(1).return_once(|_| Ok(None));
    repo.expect_create()
        .withf(|draft| draft.name == "Admin" && draft.state_id == 1)
        .times(1)
        .return_once(|_| Ok(role(3, "Admin")));

    let draft = NamedDraft {
        name: "Admin".to_owned(),
        state_id: 1,
    };
    let created = role_service(repo).create(draft).await.expect("create succeeds");

    assert_eq!(created.id, 3);
}

#[rstest]
#[tokio::test]
async fn create_surfaces_missing_read_back_as_internal(mut repo: MockRoleRepository) {
    repo.expect_find_by_unique().times(1).return_once(|_| Ok(None));
    repo.expect_create()
        .times(1)
        .return_once(|_| Err(CatalogRepositoryError::missing_after_write(5)));

    let draft = NamedDraft {
        name: "Admin".to_owned(),
        state_id: 1,
    };
    let err = role_service(repo).create(draft).await.expect_err("read-back miss");

    assert!(matches!(err, CatalogError::Internal { entity: EntityKind::Role, .. }));
}

#[rstest]
#[tokio::test]
async fn create_maps_dangling_reference_to_invalid_argument(mut repo: MockRoleRepository) {
    repo.expect_find_by_unique().times(1).return_once(|_| Ok(None));
    repo.expect_create()
        .times(1)
        .return_once(|_| Err(CatalogRepositoryError::invalid_reference("id_state 99")));

    let draft = NamedDraft {
        name: "Admin".to_owned(),
        state_id: 99,
    };
    let err = role_service(repo).create(draft).await.expect_err("bad state");

    assert!(matches!(err, CatalogError::InvalidArgument { .. }));
}

#[rstest]
#[tokio::test]
async fn lookup_failures_propagate_as_internal(mut repo: MockRoleRepository) {
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Err(CatalogRepositoryError::connection("pool closed")));

    let err = role_service(repo).get_by_id(1).await.expect_err("storage fault");

    assert!(matches!(err, CatalogError::Internal { .. }));
}

#[rstest]
#[tokio::test]
async fn update_reports_missing_rows(mut repo: MockRoleRepository) {
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let patch = NamedPatch {
        name: Some("Admin".to_owned()),
        state_id: None,
    };
    let err = role_service(repo).update(4, patch).await.expect_err("missing");

    assert_eq!(err, CatalogError::not_found(EntityKind::Role, 4));
}

#[rstest]
#[tokio::test]
async fn update_with_current_name_skips_uniqueness_check(mut repo: MockRoleRepository) {
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(role(4, "Admin"))));
    repo.expect_update()
        .times(1)
        .return_once(|_, _| Ok(Some(role(4, "Admin"))));

    let patch = NamedPatch {
        name: Some("Admin".to_owned()),
        state_id: None,
    };
    let updated = role_service(repo).update(4, patch).await.expect("update succeeds");

    assert_eq!(updated.name, "Admin");
}

#[rstest]
#[tokio::test]
async fn update_rejects_rename_to_taken_name(mut repo: MockRoleRepository) {
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(role(4, "Cajero"))));
    repo.expect_find_by_unique()
        .withf(|value| value == "Admin")
        .times(1)
        .return_once(|_| Ok(Some(role(1, "Admin"))));

    let patch = NamedPatch {
        name: Some("Admin".to_owned()),
        state_id: None,
    };
    let err = role_service(repo).update(4, patch).await.expect_err("duplicate");

    assert_eq!(err, CatalogError::duplicate(EntityKind::Role, "Admin"));
}

#[rstest]
#[tokio::test]
async fn update_surfaces_vanished_row_as_internal(mut repo: MockRoleRepository) {
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(role(4, "Cajero"))));
    repo.expect_update().times(1).return_once(|_, _| Ok(None));

    let patch = NamedPatch {
        name: None,
        state_id: Some(2),
    };
    let err = role_service(repo).update(4, patch).await.expect_err("race");

    assert!(matches!(err, CatalogError::Internal { .. }));
}

#[rstest]
#[tokio::test]
async fn delete_reports_missing_rows(mut repo: MockRoleRepository) {
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let err = role_service(repo).delete(8).await.expect_err("missing");

    assert_eq!(err, CatalogError::not_found(EntityKind::Role, 8));
}

#[rstest]
#[tokio::test]
async fn soft_delete_race_is_tolerated(mut repo: MockRoleRepository) {
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(role(8, "Admin"))));
    repo.expect_delete().times(1).return_once(|_| Ok(false));

    role_service(repo).delete(8).await.expect("soft delete race is benign");
}

#[rstest]
#[case(true, true)]
#[case(false, false)]
#[tokio::test]
async fn hard_delete_requires_an_affected_row(#[case] affected: bool, #[case] succeeds: bool) {
    let mut repo = MockClientRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(client(1, "ana@x.com"))));
    repo.expect_delete().times(1).return_once(move |_| Ok(affected));

    let service: CatalogService<Client, MockClientRepository> = CatalogService::new(Arc::new(repo));
    let result = service.delete(1).await;

    assert_eq!(result.is_ok(), succeeds);
    if let Err(err) = result {
        assert!(matches!(err, CatalogError::Internal { entity: EntityKind::Client, .. }));
    }
}

#[rstest]
#[tokio::test]
async fn client_uniqueness_is_checked_on_email() {
    let mut repo = MockClientRepository::new();
    repo.expect_find_by_unique()
        .withf(|value| value == "ana@x.com")
        .times(1)
        .return_once(|_| Ok(Some(client(1, "ana@x.com"))));

    let service: CatalogService<Client, MockClientRepository> = CatalogService::new(Arc::new(repo));
    let draft = ClientDraft {
        name: "Ana Duplicada".to_owned(),
        email: "ana@x.com".to_owned(),
        phone: "88887777".to_owned(),
        address: None,
    };
    let err = service.create(draft).await.expect_err("duplicate email");

    assert_eq!(
        err,
        CatalogError::DuplicateName {
            entity: EntityKind::Client,
            field: "email",
            value: "ana@x.com".to_owned(),
        }
    );
}

#[rstest]
#[tokio::test]
async fn cantons_by_province_pass_through_dyn_repository() {
    let mut repo = MockCantonRepo::new();
    repo.expect_find_by_province()
        .withf(|province_id| *province_id == 7)
        .times(1)
        .return_once(|_| Ok(vec![canton(1, "Grecia", 7)]));

    let repo: Arc<dyn CantonRepository> = Arc::new(repo);
    let service: CatalogService<Canton, dyn CantonRepository> = CatalogService::new(repo);
    let cantons = service.get_by_province(7).await.expect("lookup succeeds");

    assert_eq!(cantons, vec![canton(1, "Grecia", 7)]);
}
