use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::shared::UserId;
use crate::streak::StreakTransition;

macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Event fired when a learner profile is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerRegistered {
    pub user_id: UserId,
    pub display_name: String,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(LearnerRegistered);

/// Event fired after an activity changed a stored streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakUpdated {
    pub user_id: UserId,
    pub kind: String,
    pub transition: StreakTransition,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub active_on: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(StreakUpdated);

/// Event fired when a game result has been stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCompleted {
    pub user_id: UserId,
    pub game_id: String,
    pub subject: String,
    pub score: u32,
    pub max_score: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(GameCompleted);

/// Badge delta of one evaluation; drives celebration notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgesUnlocked {
    pub user_id: UserId,
    pub badge_ids: Vec<String>,
    pub catalog_version: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(BadgesUnlocked);
