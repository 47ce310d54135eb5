use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, warn};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use std::sync::Arc;

use super::{format_day, parse_day};
use crate::persistence::StoreResultExt;
use eduverse_domain::shared::{DomainError, UserId};
use eduverse_domain::streak::{Streak, StreakKind, StreakRepository, StreakUpdate};

#[derive(FromRow)]
struct StreakRow {
    kind: String,
    current_streak: i64,
    longest_streak: i64,
    last_active: String,
}

impl StreakRow {
    /// Malformed rows read as "no history"
    fn into_streak(self, user_id: &UserId) -> Option<Streak> {
        let Some(last_active) = parse_day(&self.last_active) else {
            warn!(
                "[streak] ignoring unreadable last_active user_id={} kind={} value={:?}",
                user_id, self.kind, self.last_active
            );
            return None;
        };
        let kind = match StreakKind::new(&self.kind) {
            Ok(kind) => kind,
            Err(e) => {
                warn!("[streak] ignoring row with bad kind user_id={} err={}", user_id, e);
                return None;
            }
        };
        let (Ok(current), Ok(longest)) = (
            u32::try_from(self.current_streak),
            u32::try_from(self.longest_streak),
        ) else {
            warn!(
                "[streak] ignoring out-of-range counters user_id={} current={} longest={}",
                user_id, self.current_streak, self.longest_streak
            );
            return None;
        };

        Some(Streak::restore(kind, current, longest, last_active))
    }
}

pub struct SqliteStreakRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteStreakRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

const SELECT_STREAK: &str = r#"
    SELECT kind, current_streak, longest_streak, last_active
    FROM streaks
    WHERE user_id = ?1 AND kind = ?2
"#;

#[async_trait]
impl StreakRepository for SqliteStreakRepository {
    async fn find(
        &self,
        user_id: &UserId,
        kind: &StreakKind,
    ) -> Result<Option<Streak>, DomainError> {
        let row: Option<StreakRow> = sqlx::query_as(SELECT_STREAK)
            .bind(user_id.as_str())
            .bind(kind.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_store_error("Find streak")?;

        Ok(row.and_then(|r| r.into_streak(user_id)))
    }

    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Streak>, DomainError> {
        let query = r#"
            SELECT kind, current_streak, longest_streak, last_active
            FROM streaks
            WHERE user_id = ?1
            ORDER BY kind ASC
        "#;

        let rows: Vec<StreakRow> = sqlx::query_as(query)
            .bind(user_id.as_str())
            .fetch_all(&*self.pool)
            .await
            .map_store_error("List streaks for user")?;

        Ok(rows
            .into_iter()
            .filter_map(|r| r.into_streak(user_id))
            .collect())
    }

    async fn record_activity(
        &self,
        user_id: &UserId,
        kind: &StreakKind,
        today: NaiveDate,
    ) -> Result<StreakUpdate, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_store_error("Begin streak transaction")?;

        let update = apply_activity(&mut *tx, user_id, kind, today).await?;

        tx.commit().await.map_store_error("Commit streak")?;

        debug!(
            "[streak] record_activity user_id={} kind={} transition={} current={} longest={}",
            user_id,
            kind,
            update.transition.as_str(),
            update.streak.current_streak(),
            update.streak.longest_streak()
        );

        Ok(update)
    }
}

/// Read the stored streak on an open connection or transaction
pub(crate) async fn read_streak(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    kind: &StreakKind,
) -> Result<Option<Streak>, DomainError> {
    let row: Option<StreakRow> = sqlx::query_as(SELECT_STREAK)
        .bind(user_id.as_str())
        .bind(kind.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_store_error("Read streak")?;

    Ok(row.and_then(|r| r.into_streak(user_id)))
}

/// Read-modify-write of one streak inside the caller's transaction.
///
/// Must be the first write of a deferred transaction or follow another write,
/// so the write lock is held before the read.
pub(crate) async fn apply_activity(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    kind: &StreakKind,
    today: NaiveDate,
) -> Result<StreakUpdate, DomainError> {
    // Take the write lock before reading; concurrent updates for this row
    // wait here instead of reading the same base.
    sqlx::query("UPDATE streaks SET updated_at = updated_at WHERE user_id = ?1 AND kind = ?2")
        .bind(user_id.as_str())
        .bind(kind.as_str())
        .execute(&mut *conn)
        .await
        .map_store_error("Lock streak")?;

    let previous = read_streak(conn, user_id, kind).await?;
    let (streak, transition) = Streak::record_daily_activity(previous.as_ref(), kind, today);

    if transition.is_mutation() {
        let upsert = r#"
            INSERT INTO streaks (user_id, kind, current_streak, longest_streak, last_active, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(user_id, kind) DO UPDATE SET
                current_streak = excluded.current_streak,
                longest_streak = excluded.longest_streak,
                last_active = excluded.last_active,
                updated_at = excluded.updated_at
        "#;

        sqlx::query(upsert)
            .bind(user_id.as_str())
            .bind(streak.kind().as_str())
            .bind(i64::from(streak.current_streak()))
            .bind(i64::from(streak.longest_streak()))
            .bind(format_day(streak.last_active()))
            .bind(Utc::now())
            .execute(&mut *conn)
            .await
            .map_store_error("Write streak")?;
    }

    Ok(StreakUpdate { streak, transition })
}
