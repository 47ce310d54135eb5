mod leaderboard_queries;
mod progress_queries;
mod streak_queries;

pub use leaderboard_queries::LeaderboardQueries;
pub use progress_queries::ProgressQueries;
pub use streak_queries::StreakQueries;
