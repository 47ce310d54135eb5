use serde::{Deserialize, Serialize};

use super::LeaderboardEntry;

/// Display tier derived from a 1-based rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankTitle {
    Champion,
    RunnerUp,
    BronzeStar,
    DailyHero,
    LearningChamp,
    RisingLearner,
}

impl RankTitle {
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => RankTitle::Champion,
            2 => RankTitle::RunnerUp,
            3 => RankTitle::BronzeStar,
            4..=5 => RankTitle::DailyHero,
            6..=10 => RankTitle::LearningChamp,
            _ => RankTitle::RisingLearner,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankTitle::Champion => "Champion",
            RankTitle::RunnerUp => "Runner-up",
            RankTitle::BronzeStar => "Bronze Star",
            RankTitle::DailyHero => "Daily Hero",
            RankTitle::LearningChamp => "Learning Champ",
            RankTitle::RisingLearner => "Rising Learner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub entry: LeaderboardEntry,
    pub rank_score: u64,
    pub rank: usize,
    pub title: RankTitle,
}

pub struct LeaderboardRanker;

impl LeaderboardRanker {
    /// Sort by rank score, highest first. Equal scores keep input order and
    /// still get distinct consecutive ranks.
    pub fn rank(entries: Vec<LeaderboardEntry>) -> Vec<RankedEntry> {
        let mut scored: Vec<(u64, LeaderboardEntry)> = entries
            .into_iter()
            .map(|entry| (entry.rank_score(), entry))
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .enumerate()
            .map(|(index, (rank_score, entry))| RankedEntry {
                entry,
                rank_score,
                rank: index + 1,
                title: RankTitle::for_rank(index + 1),
            })
            .collect()
    }
}
