use serde::Serialize;

use eduverse_domain::leaderboard::RankedEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRowDto {
    pub rank: usize,
    pub title: String,
    pub user_id: String,
    pub display_name: String,
    pub avatar: String,
    pub rank_score: u64,
    pub total_points: u64,
    pub games_played: u32,
    pub streak_days: u32,
    pub badges_unlocked: u32,
}

impl From<RankedEntry> for LeaderboardRowDto {
    fn from(ranked: RankedEntry) -> Self {
        Self {
            rank: ranked.rank,
            title: ranked.title.label().to_string(),
            user_id: ranked.entry.user_id.as_str().to_string(),
            display_name: ranked.entry.display_name,
            avatar: ranked.entry.avatar,
            rank_score: ranked.rank_score,
            total_points: ranked.entry.total_points,
            games_played: ranked.entry.games_played,
            streak_days: ranked.entry.streak_days,
            badges_unlocked: ranked.entry.badges_unlocked,
        }
    }
}
