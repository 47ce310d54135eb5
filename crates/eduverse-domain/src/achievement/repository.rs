use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::shared::{DomainError, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockedBadge {
    pub badge_id: String,
    pub unlocked_at: DateTime<Utc>,
}

#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Ids of every badge the user holds, including ones no longer in the
    /// catalog.
    async fn unlocked_ids(&self, user_id: &UserId) -> Result<HashSet<String>, DomainError>;

    async fn unlocked(&self, user_id: &UserId) -> Result<Vec<UnlockedBadge>, DomainError>;

    /// Persist unlocks and return only the ids that were not stored before.
    /// Unlocks are never removed.
    async fn unlock(
        &self,
        user_id: &UserId,
        badge_ids: &[&str],
        unlocked_at: DateTime<Utc>,
    ) -> Result<Vec<String>, DomainError>;
}
