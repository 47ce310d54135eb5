#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::shared::UserId;

    fn entry(name: &str, points: u64, badges: u32, streak: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id: UserId::from_string(name),
            display_name: name.to_string(),
            avatar: "🐼".to_string(),
            total_points: points,
            games_played: 0,
            streak_days: streak,
            badges_unlocked: badges,
        }
    }

    #[test]
    fn test_rank_score_formula() {
        assert_eq!(entry("a", 1000, 2, 5).rank_score(), 1200);
        assert_eq!(entry("b", 0, 0, 0).rank_score(), 0);
        assert_eq!(entry("c", 10, 1, 1).rank_score(), 80);
    }

    #[test]
    fn test_tie_keeps_input_order() {
        let ranked = LeaderboardRanker::rank(vec![entry("A", 1000, 2, 5), entry("B", 1200, 0, 0)]);

        assert_eq!(ranked[0].entry.display_name, "A");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].rank_score, 1200);
        assert_eq!(ranked[1].entry.display_name, "B");
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[1].rank_score, 1200);

        let reversed =
            LeaderboardRanker::rank(vec![entry("B", 1200, 0, 0), entry("A", 1000, 2, 5)]);
        assert_eq!(reversed[0].entry.display_name, "B");
    }

    #[test]
    fn test_sorted_descending_with_dense_ranks() {
        let ranked = LeaderboardRanker::rank(vec![
            entry("low", 10, 0, 0),
            entry("high", 500, 1, 3),
            entry("mid", 200, 0, 1),
        ]);

        let names: Vec<&str> = ranked.iter().map(|r| r.entry.display_name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_titles_by_rank() {
        assert_eq!(RankTitle::for_rank(1), RankTitle::Champion);
        assert_eq!(RankTitle::for_rank(2), RankTitle::RunnerUp);
        assert_eq!(RankTitle::for_rank(3), RankTitle::BronzeStar);
        assert_eq!(RankTitle::for_rank(4), RankTitle::DailyHero);
        assert_eq!(RankTitle::for_rank(5), RankTitle::DailyHero);
        assert_eq!(RankTitle::for_rank(6), RankTitle::LearningChamp);
        assert_eq!(RankTitle::for_rank(7), RankTitle::LearningChamp);
        assert_eq!(RankTitle::for_rank(10), RankTitle::LearningChamp);
        assert_eq!(RankTitle::for_rank(11), RankTitle::RisingLearner);
        assert_eq!(RankTitle::for_rank(250), RankTitle::RisingLearner);
    }

    #[test]
    fn test_eleven_entries_get_titles_assigned() {
        let entries = (0..11)
            .map(|i| entry(&format!("kid-{i}"), 1000 - i as u64 * 10, 0, 0))
            .collect();

        let ranked = LeaderboardRanker::rank(entries);

        assert_eq!(ranked[0].title, RankTitle::Champion);
        assert_eq!(ranked[6].title, RankTitle::LearningChamp);
        assert_eq!(ranked[10].title, RankTitle::RisingLearner);
        assert_eq!(ranked[10].title.label(), "Rising Learner");
    }

    #[test]
    fn test_empty_input() {
        assert!(LeaderboardRanker::rank(Vec::new()).is_empty());
    }
}
