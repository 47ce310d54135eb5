use async_trait::async_trait;
use chrono::NaiveDate;

use super::{Streak, StreakKind, StreakTransition};
use crate::shared::{DomainError, UserId};

/// Result of an atomic activity record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: Streak,
    pub transition: StreakTransition,
}

#[async_trait]
pub trait StreakRepository: Send + Sync {
    /// Load the stored streak. Unreadable records come back as `None`.
    async fn find(
        &self,
        user_id: &UserId,
        kind: &StreakKind,
    ) -> Result<Option<Streak>, DomainError>;

    /// Load every streak kind stored for a user.
    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Streak>, DomainError>;

    /// Read, apply [`Streak::record_daily_activity`] and write back inside a
    /// single store transaction. Concurrent calls for the same user and kind
    /// must serialize so that no two continuations start from the same base.
    async fn record_activity(
        &self,
        user_id: &UserId,
        kind: &StreakKind,
        today: NaiveDate,
    ) -> Result<StreakUpdate, DomainError>;
}
