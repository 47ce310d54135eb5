use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use super::streak_repo::{apply_activity, read_streak};
use super::{format_day, parse_day};
use crate::persistence::StoreResultExt;
use eduverse_domain::progress::{GameCompletion, GameHistoryRepository, GameResult, LearnerStats};
use eduverse_domain::shared::{DomainError, GameResultId, UserId};
use eduverse_domain::streak::{StreakKind, StreakTransition, StreakUpdate};

#[derive(FromRow)]
struct GameResultRow {
    id: String,
    user_id: String,
    game_id: String,
    subject: String,
    score: i64,
    max_score: i64,
    played_on: String,
    recorded_at: DateTime<Utc>,
}

impl GameResultRow {
    fn try_into_result(self) -> Option<GameResult> {
        let played_on = parse_day(&self.played_on)?;
        let score = u32::try_from(self.score).ok()?;
        let max_score = u32::try_from(self.max_score).ok()?;

        Some(GameResult::restore(
            GameResultId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            self.game_id,
            self.subject,
            score,
            max_score,
            played_on,
            self.recorded_at,
        ))
    }
}

pub struct SqliteGameHistoryRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteGameHistoryRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameHistoryRepository for SqliteGameHistoryRepository {
    async fn record_completion(&self, result: &GameResult) -> Result<GameCompletion, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_store_error("Begin game transaction")?;

        // First write of the transaction; also takes the write lock
        let query = r#"
            INSERT INTO game_results (
                id, user_id, game_id, subject, score, max_score, played_on, recorded_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO NOTHING
        "#;

        let inserted = sqlx::query(query)
            .bind(result.id().as_str())
            .bind(result.user_id().as_str())
            .bind(result.game_id())
            .bind(result.subject())
            .bind(i64::from(result.score()))
            .bind(i64::from(result.max_score()))
            .bind(format_day(result.played_on()))
            .bind(result.recorded_at())
            .execute(&mut *tx)
            .await
            .map_store_error("Save game result")?
            .rows_affected()
            == 1;

        let kind = StreakKind::learning();
        let stored = if inserted {
            None
        } else {
            read_streak(&mut *tx, result.user_id(), &kind).await?
        };

        let streak = match stored {
            Some(streak) => StreakUpdate {
                streak,
                transition: StreakTransition::Unchanged,
            },
            None => {
                apply_activity(&mut *tx, result.user_id(), &kind, result.played_on()).await?
            }
        };

        tx.commit().await.map_store_error("Commit game result")?;

        if !inserted {
            debug!(
                "[games] result id={} already stored, not counted again",
                result.id()
            );
        }

        Ok(GameCompletion {
            streak,
            newly_recorded: inserted,
        })
    }

    async fn stats_for(&self, user_id: &UserId) -> Result<LearnerStats, DomainError> {
        let query = r#"
            SELECT COUNT(*) AS games_played, COALESCE(SUM(score), 0) AS total_score
            FROM game_results
            WHERE user_id = ?1
        "#;

        let (games_played, total_score): (i64, i64) = sqlx::query_as(query)
            .bind(user_id.as_str())
            .fetch_one(&*self.pool)
            .await
            .map_store_error("Aggregate game stats")?;

        Ok(LearnerStats::new(games_played, total_score, 0))
    }

    async fn recent(&self, user_id: &UserId, limit: u32) -> Result<Vec<GameResult>, DomainError> {
        let query = r#"
            SELECT id, user_id, game_id, subject, score, max_score, played_on, recorded_at
            FROM game_results
            WHERE user_id = ?1
            ORDER BY recorded_at DESC, rowid DESC
            LIMIT ?2
        "#;

        let rows: Vec<GameResultRow> = sqlx::query_as(query)
            .bind(user_id.as_str())
            .bind(i64::from(limit))
            .fetch_all(&*self.pool)
            .await
            .map_store_error("List recent game results")?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                let result = row.try_into_result();
                if result.is_none() {
                    warn!("[games] skipping malformed game result id={}", id);
                }
                result
            })
            .collect())
    }
}
