use serde::{Deserialize, Serialize};

use crate::shared::UserId;

pub const BADGE_WEIGHT: u64 = 50;
pub const STREAK_DAY_WEIGHT: u64 = 20;

/// Snapshot of one learner's standing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub display_name: String,
    pub avatar: String,
    pub total_points: u64,
    pub games_played: u32,
    pub streak_days: u32,
    pub badges_unlocked: u32,
}

impl LeaderboardEntry {
    /// `total_points + badges_unlocked * 50 + streak_days * 20`
    pub fn rank_score(&self) -> u64 {
        self.total_points
            .saturating_add(u64::from(self.badges_unlocked).saturating_mul(BADGE_WEIGHT))
            .saturating_add(u64::from(self.streak_days).saturating_mul(STREAK_DAY_WEIGHT))
    }
}
