//! Integration tests for `DieselCantonRepository` against embedded PostgreSQL.

use refdata::domain::catalog::{CantonDraft, NamedDraft, Province};
use refdata::domain::ports::{CantonRepository, CatalogRepository, CatalogRepositoryError};
use refdata::outbound::persistence::{DieselCantonRepository, DieselProvinceRepository};
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

fn seed_province(ctx: &EmbeddedCatalog, name: &str) -> Province {
    let provinces = DieselProvinceRepository::new(ctx.pool.clone(), ctx.clock.clone());
    ctx.runtime
        .block_on(provinces.create(&NamedDraft {
            name: name.to_owned(),
            state_id: 1,
        }))
        .expect("seed province")
}

fn canton(name: &str, province_id: i32) -> CantonDraft {
    CantonDraft {
        name: name.to_owned(),
        province_id,
        state_id: 1,
    }
}

#[rstest]
fn unknown_province_is_an_invalid_reference(catalog: Option<EmbeddedCatalog>) {
    let Some(ctx) = catalog else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_province_is_an_invalid_reference skipped");
        return;
    };
    let repo = DieselCantonRepository::new(ctx.pool.clone(), ctx.clock.clone());

    let error = ctx
        .runtime
        .block_on(repo.create(&canton("Grecia", 404)))
        .expect_err("dangling province id");
    assert!(matches!(
        error,
        CatalogRepositoryError::InvalidReference { .. }
    ));
}

#[rstest]
fn province_listing_skips_deleted_cantons_and_outlives_the_province(
    catalog: Option<EmbeddedCatalog>,
) {
    let Some(ctx) = catalog else {
        eprintln!(
            "SKIP-TEST-CLUSTER: province_listing_skips_deleted_cantons_and_outlives_the_province skipped"
        );
        return;
    };
    let alajuela = seed_province(&ctx, "Alajuela");
    let heredia = seed_province(&ctx, "Heredia");
    let repo = DieselCantonRepository::new(ctx.pool.clone(), ctx.clock.clone());
    let provinces = DieselProvinceRepository::new(ctx.pool.clone(), ctx.clock.clone());

    ctx.runtime.block_on(async {
        let grecia = repo
            .create(&canton("Grecia", alajuela.id))
            .await
            .expect("create Grecia");
        let naranjo = repo
            .create(&canton("Naranjo", alajuela.id))
            .await
            .expect("create Naranjo");
        repo.create(&canton("Barva", heredia.id))
            .await
            .expect("create Barva");
        assert_eq!(grecia.state_name.as_deref(), Some("Activo"));

        assert!(repo.delete(naranjo.id).await.expect("soft delete"));
        assert!(provinces.delete(alajuela.id).await.expect("delete province"));

        let listed = repo
            .find_by_province(alajuela.id)
            .await
            .expect("list by province");
        assert_eq!(listed, vec![grecia.clone()]);

        let found = repo
            .find_by_unique("GRECIA")
            .await
            .expect("lookup")
            .expect("name matches without case");
        assert_eq!(found.id, grecia.id);
    });
}
