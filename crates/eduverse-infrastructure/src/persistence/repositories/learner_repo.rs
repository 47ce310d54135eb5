use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::StoreResultExt;
use eduverse_domain::progress::{LearnerProfile, LearnerRepository};
use eduverse_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct LearnerRow {
    user_id: String,
    display_name: String,
    avatar: String,
    created_at: DateTime<Utc>,
}

impl LearnerRow {
    fn into_profile(self) -> LearnerProfile {
        LearnerProfile::restore(
            UserId::from_string(&self.user_id),
            self.display_name,
            self.avatar,
            self.created_at,
        )
    }
}

pub struct SqliteLearnerRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLearnerRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LearnerRepository for SqliteLearnerRepository {
    async fn save(&self, profile: &LearnerProfile) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO learners (user_id, display_name, avatar, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id) DO UPDATE SET
                display_name = excluded.display_name,
                avatar = excluded.avatar
        "#;

        sqlx::query(query)
            .bind(profile.user_id().as_str())
            .bind(profile.display_name())
            .bind(profile.avatar())
            .bind(profile.created_at())
            .execute(&*self.pool)
            .await
            .map_store_error("Save learner")?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<LearnerProfile>, DomainError> {
        let query = r#"
            SELECT user_id, display_name, avatar, created_at
            FROM learners
            WHERE user_id = ?1
        "#;

        let row: Option<LearnerRow> = sqlx::query_as(query)
            .bind(user_id.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_store_error("Find learner by id")?;

        Ok(row.map(LearnerRow::into_profile))
    }
}
