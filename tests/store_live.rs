//! Live-database tests for the store lifecycle and the conditional update.
//! Ignored by default; run against a disposable database with:
//!   TEST_DATABASE_URL=postgres://... cargo test --test store_live -- --ignored

use scales_api::{ensure_scales_table, AppError, ScaleCandidate, ScaleStore};
use sqlx::postgres::PgPoolOptions;

async fn live_store() -> ScaleStore {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .unwrap();
    ensure_scales_table(&pool).await.unwrap();
    ScaleStore::new(pool)
}

fn candidate(model: &str) -> ScaleCandidate {
    ScaleCandidate {
        model: model.into(),
        price: 25.0,
        year: 2021,
        dimensions: Some(vec![10.0, 7.0, 2.0]),
        runtime: 90,
    }
}

#[tokio::test]
#[ignore]
async fn insert_assigns_version_one_and_get_round_trips() {
    let store = live_store().await;
    let created = store.insert(&candidate("Ozeri Touch")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.version, 1);
    let fetched = store.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore]
async fn concurrent_updates_with_same_version_conflict() {
    let store = live_store().await;
    let created = store.insert(&candidate("Greater Goods")).await.unwrap();

    let mut first = created.clone();
    first.runtime = 120;
    let mut second = created.clone();
    second.runtime = 150;

    let (a, b) = tokio::join!(store.update(&first), store.update(&second));
    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one writer must win");
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(AppError::EditConflict))));
    let current = store.get(created.id).await.unwrap();
    assert_eq!(current.version, created.version + 1);
}

#[tokio::test]
#[ignore]
async fn stale_version_conflicts_after_a_successful_write() {
    let store = live_store().await;
    let created = store.insert(&candidate("Nicewell")).await.unwrap();

    let mut fresh = created.clone();
    fresh.year = 2023;
    let new_version = store.update(&fresh).await.unwrap();
    assert_eq!(new_version, created.version + 1);

    // still holding the version observed at insert time
    assert!(matches!(
        store.update(&created).await,
        Err(AppError::EditConflict)
    ));
}

#[tokio::test]
#[ignore]
async fn delete_twice_reports_not_found_the_second_time() {
    let store = live_store().await;
    let created = store.insert(&candidate("Etekcity")).await.unwrap();
    store.delete(created.id).await.unwrap();
    assert!(matches!(store.delete(created.id).await, Err(AppError::NotFound)));
    assert!(matches!(store.get(created.id).await, Err(AppError::NotFound)));
}
