use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use super::ensure_registered;
use crate::application::commands::progress_commands::*;
use crate::application::commands::CommandHandler;
use crate::application::dtos::StreakDto;
use crate::application::services::BadgeAwarder;
use eduverse_domain::events::progression_events::{GameCompleted, StreakUpdated};
use eduverse_domain::events::EventBus;
use eduverse_domain::progress::{GameHistoryRepository, GameResult, LearnerRepository};
use eduverse_domain::shared::{DomainError, GameResultId, UserId};
use eduverse_domain::streak::StreakKind;

pub struct CompleteGameCommandHandler {
    learner_repo: Arc<dyn LearnerRepository>,
    game_history_repo: Arc<dyn GameHistoryRepository>,
    badge_awarder: Arc<BadgeAwarder>,
    event_bus: Arc<dyn EventBus>,
}

impl CompleteGameCommandHandler {
    pub fn new(
        learner_repo: Arc<dyn LearnerRepository>,
        game_history_repo: Arc<dyn GameHistoryRepository>,
        badge_awarder: Arc<BadgeAwarder>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            learner_repo,
            game_history_repo,
            badge_awarder,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<CompleteGameCommand> for CompleteGameCommandHandler {
    type Result = CompleteGameResult;

    async fn handle(&self, cmd: CompleteGameCommand) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        ensure_registered(self.learner_repo.as_ref(), &user_id).await?;

        let mut result = GameResult::new(
            user_id.clone(),
            cmd.game_id,
            cmd.subject,
            cmd.score,
            cmd.max_score,
            cmd.played_on,
        )?;
        if let Some(id) = cmd.result_id {
            let id = id.trim();
            if id.is_empty() {
                return Err(DomainError::InvalidInput(
                    "Result id cannot be blank".to_string(),
                ));
            }
            result = result.with_id(GameResultId::from_string(id));
        }

        // 1. Store the result and bump the learning streak in one write
        let completion = self.game_history_repo.record_completion(&result).await?;
        let score_percent = result.score_percent();

        if completion.newly_recorded {
            info!(
                "Game {} completed by {}: {}/{} ({:.1}%)",
                result.game_id(),
                user_id,
                result.score(),
                result.max_score(),
                score_percent
            );

            self.event_bus
                .publish(Box::new(GameCompleted {
                    user_id: user_id.clone(),
                    game_id: result.game_id().to_string(),
                    subject: result.subject().to_string(),
                    score: result.score(),
                    max_score: result.max_score(),
                    occurred_at: Utc::now(),
                }))
                .await?;
        } else {
            info!(
                "Game result {} for {} was already stored",
                result.id(),
                user_id
            );
        }

        let update = completion.streak;
        if update.transition.is_mutation() {
            self.event_bus
                .publish(Box::new(StreakUpdated {
                    user_id: user_id.clone(),
                    kind: StreakKind::learning().to_string(),
                    transition: update.transition,
                    current_streak: update.streak.current_streak(),
                    longest_streak: update.streak.longest_streak(),
                    active_on: cmd.played_on,
                    occurred_at: Utc::now(),
                }))
                .await?;
        }

        // 2. Evaluate against the stats written above, plus this game's score
        let unlocked_badges = self
            .badge_awarder
            .award(&user_id, update.streak.current_streak(), Some(score_percent))
            .await?;

        Ok(CompleteGameResult {
            game_result_id: result.id().as_str().to_string(),
            newly_recorded: completion.newly_recorded,
            score_percent,
            streak: StreakDto::from_streak(&update.streak, cmd.played_on),
            unlocked_badges,
        })
    }
}
