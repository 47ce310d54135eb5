use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::dtos::BadgeDto;
use eduverse_domain::achievement::{AchievementEvaluator, AchievementRepository, CATALOG_VERSION};
use eduverse_domain::events::progression_events::BadgesUnlocked;
use eduverse_domain::events::EventBus;
use eduverse_domain::progress::{GameHistoryRepository, LearnerStats};
use eduverse_domain::shared::{DomainError, UserId};

/// Evaluates the catalog after a progress update, stores the delta and
/// publishes it.
///
/// Callers run this only after the streak/game write it depends on has
/// committed.
pub struct BadgeAwarder {
    game_history_repo: Arc<dyn GameHistoryRepository>,
    achievement_repo: Arc<dyn AchievementRepository>,
    event_bus: Arc<dyn EventBus>,
    evaluator: AchievementEvaluator,
}

impl BadgeAwarder {
    pub fn new(
        game_history_repo: Arc<dyn GameHistoryRepository>,
        achievement_repo: Arc<dyn AchievementRepository>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            game_history_repo,
            achievement_repo,
            event_bus,
            evaluator: AchievementEvaluator::new(),
        }
    }

    pub async fn award(
        &self,
        user_id: &UserId,
        streak_count: u32,
        latest_game_score_percent: Option<f64>,
    ) -> Result<Vec<BadgeDto>, DomainError> {
        let stats: LearnerStats = self
            .game_history_repo
            .stats_for(user_id)
            .await?
            .with_streak(streak_count);
        let already_unlocked = self.achievement_repo.unlocked_ids(user_id).await?;

        let candidates =
            self.evaluator
                .evaluate(&stats, &already_unlocked, latest_game_score_percent);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let unlocked_at = Utc::now();
        let newly_unlocked = self
            .achievement_repo
            .unlock(user_id, &candidates, unlocked_at)
            .await?;
        if newly_unlocked.is_empty() {
            return Ok(Vec::new());
        }

        info!(
            "Badges unlocked for {}: {:?} (games={} score={} streak={})",
            user_id, newly_unlocked, stats.games_played, stats.total_score, stats.streak_count
        );

        let badges = newly_unlocked
            .iter()
            .map(|id| BadgeDto::from_id(id, Some(unlocked_at)))
            .collect();

        self.event_bus
            .publish(Box::new(BadgesUnlocked {
                user_id: user_id.clone(),
                badge_ids: newly_unlocked,
                catalog_version: CATALOG_VERSION,
                occurred_at: unlocked_at,
            }))
            .await?;

        Ok(badges)
    }
}
