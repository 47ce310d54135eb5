use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::dtos::StreakDto;
use eduverse_domain::shared::{DomainError, UserId};
use eduverse_domain::streak::{StreakKind, StreakRepository};

/// Read side of the streak tracker. Never writes.
pub struct StreakQueries {
    streak_repo: Arc<dyn StreakRepository>,
}

impl StreakQueries {
    pub fn new(streak_repo: Arc<dyn StreakRepository>) -> Self {
        Self { streak_repo }
    }

    /// Streak of one kind (default `learning`) as seen on `today`
    pub async fn get_streak(
        &self,
        user_id: &str,
        kind: Option<&str>,
        today: NaiveDate,
    ) -> Result<Option<StreakDto>, DomainError> {
        let kind = match kind {
            Some(kind) => StreakKind::new(kind)?,
            None => StreakKind::learning(),
        };
        let streak = self
            .streak_repo
            .find(&UserId::from_string(user_id), &kind)
            .await?;

        Ok(streak.map(|s| StreakDto::from_streak(&s, today)))
    }

    pub async fn list_streaks(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<StreakDto>, DomainError> {
        let mut streaks = self
            .streak_repo
            .find_all_for_user(&UserId::from_string(user_id))
            .await?;
        streaks.sort_by(|a, b| a.kind().as_str().cmp(b.kind().as_str()));

        Ok(streaks
            .iter()
            .map(|s| StreakDto::from_streak(s, today))
            .collect())
    }

    /// "Played today" answered from the stored learning streak
    pub async fn has_activity_on(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<bool, DomainError> {
        let streak = self
            .streak_repo
            .find(&UserId::from_string(user_id), &StreakKind::learning())
            .await?;

        Ok(streak.is_some_and(|s| s.is_active_on(date)))
    }
}
