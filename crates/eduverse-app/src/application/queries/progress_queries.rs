use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;

use crate::application::dtos::{BadgeDto, GameResultDto, ProgressOverviewDto, StreakDto};
use eduverse_domain::achievement::{AchievementRepository, CATALOG};
use eduverse_domain::progress::{GameHistoryRepository, LearnerRepository};
use eduverse_domain::shared::{DomainError, UserId};
use eduverse_domain::streak::{StreakKind, StreakRepository};

/// Parent overview: everything about one learner in a single read
pub struct ProgressQueries {
    learner_repo: Arc<dyn LearnerRepository>,
    streak_repo: Arc<dyn StreakRepository>,
    game_history_repo: Arc<dyn GameHistoryRepository>,
    achievement_repo: Arc<dyn AchievementRepository>,
}

impl ProgressQueries {
    pub fn new(
        learner_repo: Arc<dyn LearnerRepository>,
        streak_repo: Arc<dyn StreakRepository>,
        game_history_repo: Arc<dyn GameHistoryRepository>,
        achievement_repo: Arc<dyn AchievementRepository>,
    ) -> Self {
        Self {
            learner_repo,
            streak_repo,
            game_history_repo,
            achievement_repo,
        }
    }

    pub async fn overview(
        &self,
        user_id: &str,
        today: NaiveDate,
        recent_limit: u32,
    ) -> Result<ProgressOverviewDto, DomainError> {
        let user_id = UserId::from_string(user_id);
        let profile = self
            .learner_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::LearnerNotFound(user_id.to_string()))?;

        let mut streaks = self.streak_repo.find_all_for_user(&user_id).await?;
        streaks.sort_by(|a, b| a.kind().as_str().cmp(b.kind().as_str()));
        let learning = StreakKind::learning();
        let learned_today = streaks
            .iter()
            .any(|s| s.kind() == &learning && s.is_active_on(today));

        let stats = self.game_history_repo.stats_for(&user_id).await?;
        let recent = self.game_history_repo.recent(&user_id, recent_limit).await?;
        let average_score_percent = if recent.is_empty() {
            None
        } else {
            let sum: f64 = recent.iter().map(|r| r.score_percent()).sum();
            Some(sum / recent.len() as f64)
        };

        let mut unlocked = self.achievement_repo.unlocked(&user_id).await?;
        unlocked.sort_by_key(|b| b.unlocked_at);
        let unlocked_ids: HashSet<&str> = unlocked.iter().map(|b| b.badge_id.as_str()).collect();

        let locked_badges = CATALOG
            .iter()
            .filter(|badge| !unlocked_ids.contains(badge.id))
            .map(|badge| BadgeDto::from_badge(badge, None))
            .collect();
        let unlocked_badges = unlocked
            .iter()
            .map(|b| BadgeDto::from_id(&b.badge_id, Some(b.unlocked_at)))
            .collect();

        Ok(ProgressOverviewDto {
            user_id: user_id.as_str().to_string(),
            display_name: profile.display_name().to_string(),
            avatar: profile.avatar().to_string(),
            streaks: streaks
                .iter()
                .map(|s| StreakDto::from_streak(s, today))
                .collect(),
            learned_today,
            games_played: stats.games_played,
            total_score: stats.total_score,
            average_score_percent,
            unlocked_badges,
            locked_badges,
            recent_games: recent.iter().map(GameResultDto::from).collect(),
        })
    }
}
