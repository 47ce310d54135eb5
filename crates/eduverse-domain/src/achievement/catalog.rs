use serde::Serialize;

use crate::progress::LearnerStats;

/// Bumped whenever a rule or badge changes. Stored unlocks survive any bump.
pub const CATALOG_VERSION: u32 = 1;

pub const BEGINNER_EXPLORER: &str = "beginner-explorer";
pub const GAME_STARTER: &str = "game-starter";
pub const DEDICATED_LEARNER: &str = "dedicated-learner";
pub const CONSISTENCY_STAR: &str = "consistency-star";
pub const WEEK_WARRIOR: &str = "week-warrior";
pub const POINT_COLLECTOR: &str = "point-collector";
pub const SCORE_MASTER: &str = "score-master";

pub const SCORE_MASTER_THRESHOLD_PERCENT: f64 = 80.0;

pub type BadgeId = &'static str;

/// Unlock condition of a badge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "threshold", rename_all = "snake_case")]
pub enum UnlockRule {
    GamesPlayedAtLeast(u32),
    StreakAtLeast(u32),
    TotalScoreAtLeast(u64),
    /// Only checked against the game that just finished, never against
    /// cumulative stats.
    GameScorePercentAtLeast(f64),
}

impl UnlockRule {
    /// Evaluate against cumulative stats and the optional score percent of
    /// the game just completed.
    pub fn is_met(&self, stats: &LearnerStats, latest_game_score_percent: Option<f64>) -> bool {
        match *self {
            UnlockRule::GamesPlayedAtLeast(n) => stats.games_played >= n,
            UnlockRule::StreakAtLeast(n) => stats.streak_count >= n,
            UnlockRule::TotalScoreAtLeast(n) => stats.total_score >= n,
            UnlockRule::GameScorePercentAtLeast(threshold) => latest_game_score_percent
                .filter(|p| p.is_finite())
                .is_some_and(|p| p >= threshold),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rule: UnlockRule,
}

pub static CATALOG: &[Badge] = &[
    Badge {
        id: BEGINNER_EXPLORER,
        name: "Beginner Explorer",
        description: "Played your very first game.",
        icon: "🧭",
        rule: UnlockRule::GamesPlayedAtLeast(1),
    },
    Badge {
        id: GAME_STARTER,
        name: "Game Starter",
        description: "Played 3 games.",
        icon: "🎮",
        rule: UnlockRule::GamesPlayedAtLeast(3),
    },
    Badge {
        id: DEDICATED_LEARNER,
        name: "Dedicated Learner",
        description: "Played 10 games.",
        icon: "📚",
        rule: UnlockRule::GamesPlayedAtLeast(10),
    },
    Badge {
        id: CONSISTENCY_STAR,
        name: "Consistency Star",
        description: "Learned 3 days in a row.",
        icon: "⭐",
        rule: UnlockRule::StreakAtLeast(3),
    },
    Badge {
        id: WEEK_WARRIOR,
        name: "Week Warrior",
        description: "Learned 7 days in a row.",
        icon: "🔥",
        rule: UnlockRule::StreakAtLeast(7),
    },
    Badge {
        id: POINT_COLLECTOR,
        name: "Point Collector",
        description: "Collected 500 points across all games.",
        icon: "💎",
        rule: UnlockRule::TotalScoreAtLeast(500),
    },
    Badge {
        id: SCORE_MASTER,
        name: "Score Master",
        description: "Scored 80% or more in a single game.",
        icon: "🏅",
        rule: UnlockRule::GameScorePercentAtLeast(SCORE_MASTER_THRESHOLD_PERCENT),
    },
];

/// Look up a badge by id
pub fn find_badge(id: &str) -> Option<&'static Badge> {
    CATALOG.iter().find(|b| b.id == id)
}
