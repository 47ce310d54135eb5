use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::progress_commands::*;
use crate::application::commands::CommandHandler;
use eduverse_domain::events::progression_events::LearnerRegistered;
use eduverse_domain::events::EventBus;
use eduverse_domain::progress::{LearnerProfile, LearnerRepository};
use eduverse_domain::shared::{DomainError, UserId};

pub struct RegisterLearnerCommandHandler {
    learner_repo: Arc<dyn LearnerRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl RegisterLearnerCommandHandler {
    pub fn new(learner_repo: Arc<dyn LearnerRepository>, event_bus: Arc<dyn EventBus>) -> Self {
        Self {
            learner_repo,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<RegisterLearnerCommand> for RegisterLearnerCommandHandler {
    type Result = RegisterLearnerResult;

    async fn handle(&self, cmd: RegisterLearnerCommand) -> Result<Self::Result, DomainError> {
        let user_id = match cmd.user_id.as_deref().map(str::trim) {
            Some("") => {
                return Err(DomainError::InvalidInput(
                    "User id cannot be blank".to_string(),
                ))
            }
            Some(id) => UserId::from_string(id),
            None => UserId::new(),
        };

        let existing = self.learner_repo.find_by_id(&user_id).await?;
        let mut profile = LearnerProfile::new(user_id.clone(), cmd.display_name, cmd.avatar)?;
        if let Some(existing) = &existing {
            // Renaming keeps the original registration time
            profile = LearnerProfile::restore(
                user_id.clone(),
                profile.display_name().to_string(),
                profile.avatar().to_string(),
                existing.created_at(),
            );
        }

        self.learner_repo.save(&profile).await?;

        let created = existing.is_none();
        info!(
            "Learner {} {} ({})",
            if created { "registered" } else { "updated" },
            profile.display_name(),
            user_id
        );

        if created {
            self.event_bus
                .publish(Box::new(LearnerRegistered {
                    user_id: user_id.clone(),
                    display_name: profile.display_name().to_string(),
                    occurred_at: Utc::now(),
                }))
                .await?;
        }

        Ok(RegisterLearnerResult {
            user_id: user_id.as_str().to_string(),
            created,
        })
    }
}
