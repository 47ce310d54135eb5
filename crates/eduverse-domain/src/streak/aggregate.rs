use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::DomainError;

/// Category a streak counts, e.g. `learning`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreakKind(String);

impl StreakKind {
    pub const LEARNING: &'static str = "learning";

    pub fn new(kind: &str) -> Result<Self, DomainError> {
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(DomainError::Validation(
                "Streak kind cannot be empty".to_string(),
            ));
        }
        Ok(Self(kind.to_lowercase()))
    }

    pub fn learning() -> Self {
        Self(Self::LEARNING.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StreakKind {
    fn default() -> Self {
        Self::learning()
    }
}

impl fmt::Display for StreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a recorded activity did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    Started,
    Continued,
    Unchanged,
    Reset,
}

impl StreakTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakTransition::Started => "started",
            StreakTransition::Continued => "continued",
            StreakTransition::Unchanged => "unchanged",
            StreakTransition::Reset => "reset",
        }
    }

    /// True when the stored record has to be written back
    pub fn is_mutation(&self) -> bool {
        !matches!(self, StreakTransition::Unchanged)
    }
}

/// Consecutive-day activity counter for one user and one kind.
///
/// `longest_streak >= current_streak` holds for every value built through
/// [`Streak::start`], [`Streak::restore`] or [`Streak::record_daily_activity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    kind: StreakKind,
    current_streak: u32,
    longest_streak: u32,
    last_active: NaiveDate,
}

impl Streak {
    /// First recorded activity
    pub fn start(kind: StreakKind, today: NaiveDate) -> Self {
        Self {
            kind,
            current_streak: 1,
            longest_streak: 1,
            last_active: today,
        }
    }

    /// Rebuild from storage. A stored longest below current is lifted.
    pub fn restore(
        kind: StreakKind,
        current_streak: u32,
        longest_streak: u32,
        last_active: NaiveDate,
    ) -> Self {
        Self {
            kind,
            current_streak,
            longest_streak: longest_streak.max(current_streak),
            last_active,
        }
    }

    /// Apply one day's activity to `previous` and return the new record.
    ///
    /// Same day is a no-op, the following day continues the streak, any other
    /// date starts over at 1.
    pub fn record_daily_activity(
        previous: Option<&Streak>,
        kind: &StreakKind,
        today: NaiveDate,
    ) -> (Streak, StreakTransition) {
        let Some(previous) = previous else {
            return (Streak::start(kind.clone(), today), StreakTransition::Started);
        };

        if previous.last_active == today {
            return (previous.clone(), StreakTransition::Unchanged);
        }

        let (current_streak, transition) =
            if previous.last_active.succ_opt() == Some(today) {
                (
                    previous.current_streak.saturating_add(1),
                    StreakTransition::Continued,
                )
            } else {
                (1, StreakTransition::Reset)
            };

        let next = Streak {
            kind: previous.kind.clone(),
            current_streak,
            longest_streak: previous.longest_streak.max(current_streak),
            last_active: today,
        };

        (next, transition)
    }

    /// Whether an activity has already been recorded on `date`
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.last_active == date
    }

    /// Streak length still alive on `date`: the stored count when the last
    /// activity was `date` or the day before, otherwise 0.
    pub fn effective_current_on(&self, date: NaiveDate) -> u32 {
        if self.last_active == date || self.last_active + Duration::days(1) == date {
            self.current_streak
        } else {
            0
        }
    }

    pub fn kind(&self) -> &StreakKind {
        &self.kind
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn last_active(&self) -> NaiveDate {
        self.last_active
    }
}
