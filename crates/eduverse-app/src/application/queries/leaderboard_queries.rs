use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

use crate::application::dtos::LeaderboardRowDto;
use eduverse_domain::leaderboard::{LeaderboardRanker, LeaderboardRepository};
use eduverse_domain::shared::DomainError;

pub struct LeaderboardQueries {
    leaderboard_repo: Arc<dyn LeaderboardRepository>,
}

impl LeaderboardQueries {
    pub fn new(leaderboard_repo: Arc<dyn LeaderboardRepository>) -> Self {
        Self { leaderboard_repo }
    }

    /// Snapshot the top `limit` learners by points, then rank them by
    /// composite score
    pub async fn top(
        &self,
        limit: u32,
        today: NaiveDate,
    ) -> Result<Vec<LeaderboardRowDto>, DomainError> {
        let entries = self.leaderboard_repo.snapshot(limit, today).await?;
        debug!("Leaderboard snapshot: {} entries (limit {})", entries.len(), limit);

        Ok(LeaderboardRanker::rank(entries)
            .into_iter()
            .map(LeaderboardRowDto::from)
            .collect())
    }
}
