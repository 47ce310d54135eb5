use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Command;
use crate::application::dtos::{BadgeDto, StreakDto};

/// Create (or rename) a learner profile
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterLearnerCommand {
    /// Generated when absent
    pub user_id: Option<String>,
    pub display_name: String,
    pub avatar: Option<String>,
}

impl Command for RegisterLearnerCommand {}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterLearnerResult {
    pub user_id: String,
    pub created: bool,
}

/// A learning activity happened on `occurred_on`
#[derive(Debug, Clone, Deserialize)]
pub struct RecordActivityCommand {
    pub user_id: String,
    /// Defaults to `learning`
    pub kind: Option<String>,
    pub occurred_on: NaiveDate,
}

impl Command for RecordActivityCommand {}

#[derive(Debug, Clone, Serialize)]
pub struct RecordActivityResult {
    pub streak: StreakDto,
    pub transition: String,
    pub unlocked_badges: Vec<BadgeDto>,
}

/// A mini-game finished with `score` out of `max_score`
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteGameCommand {
    pub user_id: String,
    pub game_id: String,
    pub subject: String,
    pub score: u32,
    pub max_score: u32,
    pub played_on: NaiveDate,
    /// Caller-chosen id; resubmitting the same id stores nothing new
    pub result_id: Option<String>,
}

impl Command for CompleteGameCommand {}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteGameResult {
    pub game_result_id: String,
    pub newly_recorded: bool,
    pub score_percent: f64,
    pub streak: StreakDto,
    pub unlocked_badges: Vec<BadgeDto>,
}
