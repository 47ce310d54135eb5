use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId};

/// Child profile shown on the leaderboard and the parent overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
    user_id: UserId,
    display_name: String,
    avatar: String,
    created_at: DateTime<Utc>,
}

impl LearnerProfile {
    pub const DEFAULT_AVATAR: &'static str = "🦉";
    pub const MAX_DISPLAY_NAME_LEN: usize = 40;

    pub fn new(
        user_id: UserId,
        display_name: String,
        avatar: Option<String>,
    ) -> Result<Self, DomainError> {
        let display_name = display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(DomainError::Validation(
                "Display name cannot be empty".to_string(),
            ));
        }
        if display_name.chars().count() > Self::MAX_DISPLAY_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "Display name cannot exceed {} characters",
                Self::MAX_DISPLAY_NAME_LEN
            )));
        }

        let avatar = avatar
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_AVATAR.to_string());

        Ok(Self {
            user_id,
            display_name,
            avatar,
            created_at: Utc::now(),
        })
    }

    pub fn restore(
        user_id: UserId,
        display_name: String,
        avatar: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            display_name,
            avatar,
            created_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
