use serde::Serialize;

use super::{BadgeDto, StreakDto};
use eduverse_domain::progress::GameResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResultDto {
    pub id: String,
    pub game_id: String,
    pub subject: String,
    pub score: u32,
    pub max_score: u32,
    pub score_percent: f64,
    pub played_on: String,
}

impl From<&GameResult> for GameResultDto {
    fn from(result: &GameResult) -> Self {
        Self {
            id: result.id().as_str().to_string(),
            game_id: result.game_id().to_string(),
            subject: result.subject().to_string(),
            score: result.score(),
            max_score: result.max_score(),
            score_percent: result.score_percent(),
            played_on: result.played_on().to_string(),
        }
    }
}

/// Parent dashboard view of one learner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressOverviewDto {
    pub user_id: String,
    pub display_name: String,
    pub avatar: String,
    pub streaks: Vec<StreakDto>,
    pub learned_today: bool,
    pub games_played: u32,
    pub total_score: u64,
    /// Mean of the recent games' score percent, if any
    pub average_score_percent: Option<f64>,
    pub unlocked_badges: Vec<BadgeDto>,
    pub locked_badges: Vec<BadgeDto>,
    pub recent_games: Vec<GameResultDto>,
}
