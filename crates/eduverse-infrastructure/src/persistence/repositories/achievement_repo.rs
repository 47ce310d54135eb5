use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use sqlx::{FromRow, SqlitePool};
use std::collections::HashSet;
use std::sync::Arc;

use crate::persistence::StoreResultExt;
use eduverse_domain::achievement::{AchievementRepository, UnlockedBadge};
use eduverse_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct UnlockedRow {
    badge_id: String,
    unlocked_at: DateTime<Utc>,
}

pub struct SqliteAchievementRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAchievementRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AchievementRepository for SqliteAchievementRepository {
    async fn unlocked_ids(&self, user_id: &UserId) -> Result<HashSet<String>, DomainError> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT badge_id FROM achievements WHERE user_id = ?1")
                .bind(user_id.as_str())
                .fetch_all(&*self.pool)
                .await
                .map_store_error("List unlocked badge ids")?;

        Ok(ids.into_iter().collect())
    }

    async fn unlocked(&self, user_id: &UserId) -> Result<Vec<UnlockedBadge>, DomainError> {
        let query = r#"
            SELECT badge_id, unlocked_at
            FROM achievements
            WHERE user_id = ?1
            ORDER BY unlocked_at ASC, badge_id ASC
        "#;

        let rows: Vec<UnlockedRow> = sqlx::query_as(query)
            .bind(user_id.as_str())
            .fetch_all(&*self.pool)
            .await
            .map_store_error("List unlocked badges")?;

        Ok(rows
            .into_iter()
            .map(|r| UnlockedBadge {
                badge_id: r.badge_id,
                unlocked_at: r.unlocked_at,
            })
            .collect())
    }

    async fn unlock(
        &self,
        user_id: &UserId,
        badge_ids: &[&str],
        unlocked_at: DateTime<Utc>,
    ) -> Result<Vec<String>, DomainError> {
        if badge_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_store_error("Begin unlock transaction")?;

        let mut newly_unlocked = Vec::with_capacity(badge_ids.len());
        for badge_id in badge_ids {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO achievements (user_id, badge_id, unlocked_at) VALUES (?1, ?2, ?3)",
            )
            .bind(user_id.as_str())
            .bind(*badge_id)
            .bind(unlocked_at)
            .execute(&mut *tx)
            .await
            .map_store_error("Insert achievement")?;

            // Ignored rows were unlocked by an earlier or concurrent evaluation
            if result.rows_affected() == 1 {
                newly_unlocked.push(badge_id.to_string());
            }
        }

        tx.commit().await.map_store_error("Commit unlocks")?;

        if !newly_unlocked.is_empty() {
            info!(
                "[achievements] unlocked user_id={} badges={:?}",
                user_id, newly_unlocked
            );
        }

        Ok(newly_unlocked)
    }
}
