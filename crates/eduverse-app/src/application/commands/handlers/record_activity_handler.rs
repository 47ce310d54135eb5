use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use super::ensure_registered;
use crate::application::commands::progress_commands::*;
use crate::application::commands::CommandHandler;
use crate::application::dtos::StreakDto;
use crate::application::services::BadgeAwarder;
use eduverse_domain::events::progression_events::StreakUpdated;
use eduverse_domain::events::EventBus;
use eduverse_domain::progress::LearnerRepository;
use eduverse_domain::shared::{DomainError, UserId};
use eduverse_domain::streak::{StreakKind, StreakRepository};

pub struct RecordActivityCommandHandler {
    learner_repo: Arc<dyn LearnerRepository>,
    streak_repo: Arc<dyn StreakRepository>,
    badge_awarder: Arc<BadgeAwarder>,
    event_bus: Arc<dyn EventBus>,
}

impl RecordActivityCommandHandler {
    pub fn new(
        learner_repo: Arc<dyn LearnerRepository>,
        streak_repo: Arc<dyn StreakRepository>,
        badge_awarder: Arc<BadgeAwarder>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            learner_repo,
            streak_repo,
            badge_awarder,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<RecordActivityCommand> for RecordActivityCommandHandler {
    type Result = RecordActivityResult;

    async fn handle(&self, cmd: RecordActivityCommand) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        let kind = match cmd.kind.as_deref() {
            Some(kind) => StreakKind::new(kind)?,
            None => StreakKind::learning(),
        };

        ensure_registered(self.learner_repo.as_ref(), &user_id).await?;

        // 1. Atomic streak update
        let update = self
            .streak_repo
            .record_activity(&user_id, &kind, cmd.occurred_on)
            .await?;

        info!(
            "Activity recorded for {} kind={} transition={} streak={}",
            user_id,
            kind,
            update.transition.as_str(),
            update.streak.current_streak()
        );

        if update.transition.is_mutation() {
            self.event_bus
                .publish(Box::new(StreakUpdated {
                    user_id: user_id.clone(),
                    kind: kind.to_string(),
                    transition: update.transition,
                    current_streak: update.streak.current_streak(),
                    longest_streak: update.streak.longest_streak(),
                    active_on: cmd.occurred_on,
                    occurred_at: Utc::now(),
                }))
                .await?;
        }

        // 2. Badges read the learning streak, whichever kind was recorded
        let learning_streak = if kind == StreakKind::learning() {
            update.streak.current_streak()
        } else {
            self.streak_repo
                .find(&user_id, &StreakKind::learning())
                .await?
                .map(|s| s.effective_current_on(cmd.occurred_on))
                .unwrap_or(0)
        };

        let unlocked_badges = self
            .badge_awarder
            .award(&user_id, learning_streak, None)
            .await?;

        Ok(RecordActivityResult {
            streak: StreakDto::from_streak(&update.streak, cmd.occurred_on),
            transition: update.transition.as_str().to_string(),
            unlocked_badges,
        })
    }
}
