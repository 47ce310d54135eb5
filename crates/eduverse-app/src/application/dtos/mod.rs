mod badge_dto;
mod leaderboard_dto;
mod progress_dto;
mod streak_dto;

pub use badge_dto::*;
pub use leaderboard_dto::*;
pub use progress_dto::*;
pub use streak_dto::*;
