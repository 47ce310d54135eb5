mod entry;
mod ranker;
mod repository;

#[cfg(test)]
mod ranker_test;

pub use entry::{LeaderboardEntry, BADGE_WEIGHT, STREAK_DAY_WEIGHT};
pub use ranker::{LeaderboardRanker, RankTitle, RankedEntry};
pub use repository::LeaderboardRepository;
