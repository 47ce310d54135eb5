use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, GameResultId, UserId};

/// One finished mini-game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    id: GameResultId,
    user_id: UserId,
    game_id: String,
    subject: String,
    score: u32,
    max_score: u32,
    played_on: NaiveDate,
    recorded_at: DateTime<Utc>,
}

impl GameResult {
    pub fn new(
        user_id: UserId,
        game_id: String,
        subject: String,
        score: u32,
        max_score: u32,
        played_on: NaiveDate,
    ) -> Result<Self, DomainError> {
        if game_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "Game id cannot be empty".to_string(),
            ));
        }
        if max_score == 0 {
            return Err(DomainError::Validation(
                "Max score must be greater than zero".to_string(),
            ));
        }
        if score > max_score {
            return Err(DomainError::Validation(format!(
                "Score {} exceeds max score {}",
                score, max_score
            )));
        }

        Ok(Self {
            id: GameResultId::new(),
            user_id,
            game_id: game_id.trim().to_string(),
            subject: subject.trim().to_lowercase(),
            score,
            max_score,
            played_on,
            recorded_at: Utc::now(),
        })
    }

    /// Use a caller-chosen id so a retried submission maps to the same row
    pub fn with_id(mut self, id: GameResultId) -> Self {
        self.id = id;
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: GameResultId,
        user_id: UserId,
        game_id: String,
        subject: String,
        score: u32,
        max_score: u32,
        played_on: NaiveDate,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            game_id,
            subject,
            score,
            max_score,
            played_on,
            recorded_at,
        }
    }

    /// Score as a percentage of the maximum, in `0.0..=100.0`
    pub fn score_percent(&self) -> f64 {
        if self.max_score == 0 {
            return 0.0;
        }
        (self.score as f64 / self.max_score as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn id(&self) -> &GameResultId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn played_on(&self) -> NaiveDate {
        self.played_on
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
