//! PostgreSQL plant repository tests.
//!
//! Require a migrated database reachable via `DATABASE_URL`; run with
//! `cargo test -p garden-db -- --ignored`.

use garden_db::test_fixtures::{new_plant, test_database_url};
use garden_db::{create_pool, Error, PgPlantRepository, PlantRepository, UpdatePlantRequest};
use sqlx::PgPool;

async fn setup() -> (PgPool, PgPlantRepository) {
    let _ = dotenvy::dotenv();
    let pool = create_pool(&test_database_url())
        .await
        .expect("Failed to create test pool");
    sqlx::query("DELETE FROM plant")
        .execute(&pool)
        .await
        .expect("Failed to clear plant table");
    (pool.clone(), PgPlantRepository::new(pool))
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_insert_get_roundtrip() {
    let (_pool, repo) = setup().await;

    let plant = repo.insert(new_plant("Tomate", 1, 0)).await.unwrap();
    let fetched = repo.get(&plant.id).await.unwrap();

    assert_eq!(fetched.name, "Tomate");
    assert_eq!(fetched.floor, 1);
    assert_eq!(fetched.target_humidity_pct, 70);
    assert!(fetched.updated_at.is_none());
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_unique_slot_violation_maps_to_conflict() {
    let (_pool, repo) = setup().await;

    repo.insert(new_plant("Tomate", 2, 4)).await.unwrap();
    let err = repo.insert(new_plant("Pepino", 2, 4)).await.unwrap_err();

    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_update_partial_and_conflict() {
    let (_pool, repo) = setup().await;

    let a = repo.insert(new_plant("Tomate", 1, 0)).await.unwrap();
    repo.insert(new_plant("Alface", 1, 1)).await.unwrap();

    let updated = repo
        .update(
            &a.id,
            UpdatePlantRequest {
                cycle_adjustment_days: Some(7),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.cycle_adjustment_days, 7);
    assert!(updated.updated_at.is_some());

    let err = repo
        .update(
            &a.id,
            UpdatePlantRequest {
                slot_index: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(repo.get(&a.id).await.unwrap().slot_index, 0);
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_delete_unknown_is_not_found() {
    let (_pool, repo) = setup().await;

    let err = repo.delete("does-not-exist").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
