//! Integration tests for the name-keyed Diesel repositories against embedded
//! PostgreSQL.

use std::sync::Arc;

use refdata::domain::catalog::{NamedDraft, NamedPatch, PaymentMethod, Role};
use refdata::domain::ports::{CatalogRepository, CatalogRepositoryError, ConnectivityProbe};
use refdata::outbound::persistence::{
    DieselConnectivityProbe, DieselPaymentMethodRepository, DieselRoleRepository,
};
use rstest::{fixture, rstest};

mod support;

use support::{EmbeddedCatalog, embedded_catalog, handle_cluster_setup_failure};

#[fixture]
fn catalog() -> Option<EmbeddedCatalog> {
    match embedded_catalog() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn roles(ctx: &EmbeddedCatalog) -> DieselRoleRepository {
    DieselRoleRepository::new(ctx.pool.clone(), ctx.clock.clone())
}

fn draft(name: &str) -> NamedDraft {
    NamedDraft {
        name: name.to_owned(),
        state_id: 1,
    }
}

#[rstest]
fn soft_deleted_roles_disappear_from_every_read(catalog: Option<EmbeddedCatalog>) {
    let Some(ctx) = catalog else {
        eprintln!("SKIP-TEST-CLUSTER: soft_deleted_roles_disappear_from_every_read skipped");
        return;
    };
    let repo = roles(&ctx);

    let (kept, removed) = ctx.runtime.block_on(async {
        let kept = repo.create(&draft("Barbero")).await.expect("create kept");
        let removed = repo.create(&draft("Admin")).await.expect("create removed");
        assert!(repo.delete(removed.id).await.expect("soft delete"));
        (kept, removed)
    });
    assert_eq!(kept.state_name.as_deref(), Some("Activo"));

    ctx.runtime.block_on(async {
        let listed = repo.find_all().await.expect("list roles");
        assert_eq!(listed, vec![kept.clone()]);
        assert!(repo.find_by_id(removed.id).await.expect("find").is_none());
        assert!(repo.find_by_unique("Admin").await.expect("lookup").is_none());
        assert!(!repo.delete(removed.id).await.expect("second delete"));
        let patched = repo
            .update(
                removed.id,
                &NamedPatch {
                    name: Some("Revived".to_owned()),
                    state_id: None,
                },
            )
            .await
            .expect("update deleted row");
        assert!(patched.is_none());
    });
}

#[rstest]
fn empty_patch_leaves_updated_at_alone(catalog: Option<EmbeddedCatalog>) {
    let Some(ctx) = catalog else {
        eprintln!("SKIP-TEST-CLUSTER: empty_patch_leaves_updated_at_alone skipped");
        return;
    };
    let repo = roles(&ctx);

    let created = ctx
        .runtime
        .block_on(repo.create(&draft("Barbero")))
        .expect("create role");
    ctx.clock.advance_seconds(60);

    let untouched = ctx
        .runtime
        .block_on(repo.update(created.id, &NamedPatch::default()))
        .expect("empty update")
        .expect("row still active");
    assert_eq!(untouched, created);

    let changed = ctx
        .runtime
        .block_on(repo.update(
            created.id,
            &NamedPatch {
                name: None,
                state_id: Some(2),
            },
        ))
        .expect("update state")
        .expect("row still active");
    assert_eq!(changed.state_name.as_deref(), Some("Inactivo"));
    assert_eq!(changed.created_at, created.created_at);
    assert!(changed.updated_at > created.updated_at);
}

#[rstest]
fn payment_methods_are_read_without_a_state_label(catalog: Option<EmbeddedCatalog>) {
    let Some(ctx) = catalog else {
        eprintln!("SKIP-TEST-CLUSTER: payment_methods_are_read_without_a_state_label skipped");
        return;
    };
    let repo = DieselPaymentMethodRepository::new(ctx.pool.clone(), ctx.clock.clone());

    let created: PaymentMethod = ctx
        .runtime
        .block_on(repo.create(&draft("Efectivo")))
        .expect("create payment method");
    assert_eq!(created.state_id, 1);
    assert!(created.state_name.is_none());

    let listed = ctx.runtime.block_on(repo.find_all()).expect("list");
    assert!(listed.iter().all(|method| method.state_name.is_none()));
}

#[rstest]
#[case::lowercase("barbero")]
#[case::uppercase("BARBERO")]
fn name_lookup_ignores_case(catalog: Option<EmbeddedCatalog>, #[case] lookup: &str) {
    let Some(ctx) = catalog else {
        eprintln!("SKIP-TEST-CLUSTER: name_lookup_ignores_case skipped");
        return;
    };
    let repo = roles(&ctx);

    let created = ctx
        .runtime
        .block_on(repo.create(&draft("Barbero")))
        .expect("create role");
    let found: Option<Role> = ctx
        .runtime
        .block_on(repo.find_by_unique(lookup))
        .expect("lookup");
    assert_eq!(found.map(|role| role.id), Some(created.id));
}

#[rstest]
fn unknown_state_is_an_invalid_reference(catalog: Option<EmbeddedCatalog>) {
    let Some(ctx) = catalog else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_state_is_an_invalid_reference skipped");
        return;
    };
    let repo = roles(&ctx);

    let error = ctx
        .runtime
        .block_on(repo.create(&NamedDraft {
            name: "Barbero".to_owned(),
            state_id: 99,
        }))
        .expect_err("dangling state id");
    assert!(matches!(
        error,
        CatalogRepositoryError::InvalidReference { .. }
    ));
}

#[rstest]
fn database_ping_succeeds(catalog: Option<EmbeddedCatalog>) {
    let Some(ctx) = catalog else {
        eprintln!("SKIP-TEST-CLUSTER: database_ping_succeeds skipped");
        return;
    };
    let connectivity: Arc<dyn ConnectivityProbe> =
        Arc::new(DieselConnectivityProbe::new(ctx.pool.clone()));

    ctx.runtime
        .block_on(connectivity.ping())
        .expect("embedded postgres answers");
}
