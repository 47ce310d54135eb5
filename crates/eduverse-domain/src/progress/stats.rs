use serde::{Deserialize, Serialize};

/// Cumulative counters the badge rules read.
///
/// Built from raw store values; negative inputs clamp to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerStats {
    pub games_played: u32,
    pub total_score: u64,
    pub streak_count: u32,
}

impl LearnerStats {
    pub fn new(games_played: i64, total_score: i64, streak_count: i64) -> Self {
        Self {
            games_played: clamp_u32(games_played),
            total_score: total_score.max(0) as u64,
            streak_count: clamp_u32(streak_count),
        }
    }

    pub fn with_streak(mut self, streak_count: u32) -> Self {
        self.streak_count = streak_count;
        self
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}
