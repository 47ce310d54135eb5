use async_trait::async_trait;

use super::{GameResult, LearnerProfile, LearnerStats};
use crate::shared::{DomainError, UserId};
use crate::streak::StreakUpdate;

#[async_trait]
pub trait LearnerRepository: Send + Sync {
    /// Insert or update a profile.
    async fn save(&self, profile: &LearnerProfile) -> Result<(), DomainError>;

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<LearnerProfile>, DomainError>;
}

/// What storing a finished game did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCompletion {
    /// Learning streak after the game's day was recorded
    pub streak: StreakUpdate,
    /// False when a result with the same id was already stored
    pub newly_recorded: bool,
}

#[async_trait]
pub trait GameHistoryRepository: Send + Sync {
    /// Store the result and record the learning activity on its `played_on`
    /// day in one store transaction; either both are written or neither.
    ///
    /// A result whose id is already stored is not counted again and leaves
    /// the streak untouched.
    async fn record_completion(&self, result: &GameResult) -> Result<GameCompletion, DomainError>;

    /// Games played and total score. `streak_count` is left at 0; callers
    /// fill it from the streak record.
    async fn stats_for(&self, user_id: &UserId) -> Result<LearnerStats, DomainError>;

    /// Most recent results first.
    async fn recent(&self, user_id: &UserId, limit: u32) -> Result<Vec<GameResult>, DomainError>;
}
