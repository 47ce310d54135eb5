use chrono::NaiveDate;
use serde::Serialize;

use eduverse_domain::streak::Streak;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakDto {
    pub kind: String,
    /// Stored count, as of `last_active`
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_active: String,
    /// Count still alive on the query date (0 once a day was missed)
    pub active_streak: u32,
    pub active_today: bool,
}

impl StreakDto {
    pub fn from_streak(streak: &Streak, today: NaiveDate) -> Self {
        Self {
            kind: streak.kind().to_string(),
            current_streak: streak.current_streak(),
            longest_streak: streak.longest_streak(),
            last_active: streak.last_active().to_string(),
            active_streak: streak.effective_current_on(today),
            active_today: streak.is_active_on(today),
        }
    }
}
