use chrono::NaiveDate;

pub mod achievement_repo;
pub mod game_history_repo;
pub mod leaderboard_repo;
pub mod learner_repo;
pub mod streak_repo;

pub use achievement_repo::SqliteAchievementRepository;
pub use game_history_repo::SqliteGameHistoryRepository;
pub use leaderboard_repo::SqliteLeaderboardRepository;
pub use learner_repo::SqliteLearnerRepository;
pub use streak_repo::SqliteStreakRepository;

pub(crate) const DAY_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

pub(crate) fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT).ok()
}
