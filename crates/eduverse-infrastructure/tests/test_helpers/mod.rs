#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

use eduverse_domain::progress::{LearnerProfile, LearnerRepository};
use eduverse_domain::shared::UserId;
use eduverse_infrastructure::config::StoreTimeouts;
use eduverse_infrastructure::persistence::repositories::SqliteLearnerRepository;
use eduverse_infrastructure::persistence::Database;

/// Migrated single-connection in-memory database
pub async fn setup_in_memory_db() -> SqlitePool {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    db.pool().clone()
}

/// Migrated file database with a real connection pool. Keep the `TempDir`
/// alive for the duration of the test.
pub async fn setup_file_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = Database::new(&dir.path().join("eduverse-test.db"), StoreTimeouts::default())
        .await
        .expect("open file db");
    db.run_migrations().await.expect("run migrations");
    (db.pool().clone(), dir)
}

pub fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap() + Duration::days(offset)
}

pub async fn register(pool: &SqlitePool, name: &str) -> UserId {
    let repo = SqliteLearnerRepository::new(Arc::new(pool.clone()));
    let profile = LearnerProfile::new(UserId::new(), name.to_string(), None).expect("profile");
    repo.save(&profile).await.expect("save learner");
    profile.user_id().clone()
}
