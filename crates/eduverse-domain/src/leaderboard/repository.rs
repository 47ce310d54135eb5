use async_trait::async_trait;
use chrono::NaiveDate;

use super::LeaderboardEntry;
use crate::shared::DomainError;

#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// The `limit` learners with the highest
    /// [`LeaderboardEntry::rank_score`], highest first; equal scores are
    /// ordered by total points. `streak_days` counts only streaks still
    /// alive on `today`.
    async fn snapshot(
        &self,
        limit: u32,
        today: NaiveDate,
    ) -> Result<Vec<LeaderboardEntry>, DomainError>;
}
