use async_trait::async_trait;
use chrono::NaiveDate;
use log::warn;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use super::{format_day, parse_day};
use crate::persistence::StoreResultExt;
use eduverse_domain::leaderboard::{
    LeaderboardEntry, LeaderboardRepository, BADGE_WEIGHT, STREAK_DAY_WEIGHT,
};
use eduverse_domain::shared::{DomainError, UserId};
use eduverse_domain::streak::{Streak, StreakKind};

#[derive(FromRow)]
struct SnapshotRow {
    user_id: String,
    display_name: String,
    avatar: String,
    total_points: i64,
    games_played: i64,
    current_streak: Option<i64>,
    last_active: Option<String>,
    badges_unlocked: i64,
}

impl SnapshotRow {
    fn into_entry(self, today: NaiveDate) -> LeaderboardEntry {
        let streak_days = match (self.current_streak, self.last_active.as_deref()) {
            (Some(current), Some(last_active)) => match parse_day(last_active) {
                Some(last_active) => {
                    let current = clamp_count(current);
                    Streak::restore(StreakKind::learning(), current, current, last_active)
                        .effective_current_on(today)
                }
                None => {
                    warn!(
                        "[leaderboard] unreadable last_active user_id={} value={:?}",
                        self.user_id, last_active
                    );
                    0
                }
            },
            _ => 0,
        };

        LeaderboardEntry {
            user_id: UserId::from_string(&self.user_id),
            display_name: self.display_name,
            avatar: self.avatar,
            total_points: self.total_points.max(0) as u64,
            games_played: clamp_count(self.games_played),
            streak_days,
            badges_unlocked: clamp_count(self.badges_unlocked),
        }
    }
}

fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

pub struct SqliteLeaderboardRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLeaderboardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaderboardRepository for SqliteLeaderboardRepository {
    async fn snapshot(
        &self,
        limit: u32,
        today: NaiveDate,
    ) -> Result<Vec<LeaderboardEntry>, DomainError> {
        // Same weights as `LeaderboardEntry::rank_score`; a streak counts only
        // while its last activity is today or yesterday. Ties keep the points
        // order so the ranker's stable sort sees the same sequence.
        let query = r#"
            SELECT
                l.user_id AS user_id,
                l.display_name AS display_name,
                l.avatar AS avatar,
                COALESCE(g.total_points, 0) AS total_points,
                COALESCE(g.games_played, 0) AS games_played,
                s.current_streak AS current_streak,
                s.last_active AS last_active,
                COALESCE(a.badges_unlocked, 0) AS badges_unlocked
            FROM learners l
            LEFT JOIN (
                SELECT user_id, SUM(score) AS total_points, COUNT(*) AS games_played
                FROM game_results
                GROUP BY user_id
            ) g ON g.user_id = l.user_id
            LEFT JOIN streaks s ON s.user_id = l.user_id AND s.kind = ?2
            LEFT JOIN (
                SELECT user_id, COUNT(*) AS badges_unlocked
                FROM achievements
                GROUP BY user_id
            ) a ON a.user_id = l.user_id
            ORDER BY
                COALESCE(g.total_points, 0)
                    + COALESCE(a.badges_unlocked, 0) * ?5
                    + CASE
                        WHEN s.last_active IN (?3, ?4) THEN MAX(s.current_streak, 0) * ?6
                        ELSE 0
                    END DESC,
                total_points DESC,
                l.created_at ASC,
                l.user_id ASC
            LIMIT ?1
        "#;

        let yesterday = today.pred_opt().unwrap_or(today);

        let rows: Vec<SnapshotRow> = sqlx::query_as(query)
            .bind(i64::from(limit))
            .bind(StreakKind::LEARNING)
            .bind(format_day(today))
            .bind(format_day(yesterday))
            .bind(BADGE_WEIGHT as i64)
            .bind(STREAK_DAY_WEIGHT as i64)
            .fetch_all(&*self.pool)
            .await
            .map_store_error("Leaderboard snapshot")?;

        Ok(rows.into_iter().map(|r| r.into_entry(today)).collect())
    }
}
