#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::super::aggregate::*;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + Duration::days(n)
    }

    fn record(previous: Option<&Streak>, today: NaiveDate) -> (Streak, StreakTransition) {
        Streak::record_daily_activity(previous, &StreakKind::learning(), today)
    }

    #[test]
    fn test_first_activity_starts_at_one() {
        let (streak, transition) = record(None, day(0));

        assert_eq!(transition, StreakTransition::Started);
        assert_eq!(streak.current_streak(), 1);
        assert_eq!(streak.longest_streak(), 1);
        assert_eq!(streak.last_active(), day(0));
        assert_eq!(streak.kind().as_str(), "learning");
    }

    #[test]
    fn test_consecutive_days_count_up() {
        let (mut streak, _) = record(None, day(0));
        for n in 1..10 {
            let (next, transition) = record(Some(&streak), day(n));
            assert_eq!(transition, StreakTransition::Continued);
            streak = next;
        }

        assert_eq!(streak.current_streak(), 10);
        assert_eq!(streak.longest_streak(), 10);
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let (streak, _) = record(None, day(0));
        let (streak, _) = record(Some(&streak), day(1));

        let (again, transition) = record(Some(&streak), day(1));

        assert_eq!(transition, StreakTransition::Unchanged);
        assert!(!transition.is_mutation());
        assert_eq!(again, streak);
        assert_eq!(again.current_streak(), 2);
    }

    #[test]
    fn test_one_missed_day_resets_to_one() {
        let (streak, _) = record(None, day(0));
        let (streak, _) = record(Some(&streak), day(1));
        let (streak, _) = record(Some(&streak), day(2));

        let (after_gap, transition) = record(Some(&streak), day(4));

        assert_eq!(transition, StreakTransition::Reset);
        assert_eq!(after_gap.current_streak(), 1);
        assert_eq!(after_gap.longest_streak(), 3);
        assert_eq!(after_gap.last_active(), day(4));
    }

    #[test]
    fn test_date_before_last_active_resets() {
        let streak = Streak::restore(StreakKind::learning(), 4, 6, day(10));

        let (next, transition) = record(Some(&streak), day(3));

        assert_eq!(transition, StreakTransition::Reset);
        assert_eq!(next.current_streak(), 1);
        assert_eq!(next.longest_streak(), 6);
    }

    #[test]
    fn test_longest_never_decreases() {
        let pattern = [0, 1, 2, 5, 6, 7, 8, 20, 21, 40];
        let (mut streak, _) = record(None, day(pattern[0]));
        let mut previous_longest = streak.longest_streak();

        for n in &pattern[1..] {
            let (next, _) = record(Some(&streak), day(*n));
            assert!(next.longest_streak() >= previous_longest);
            assert!(next.longest_streak() >= next.current_streak());
            previous_longest = next.longest_streak();
            streak = next;
        }

        assert_eq!(streak.longest_streak(), 4);
        assert_eq!(streak.current_streak(), 1);
    }

    #[test]
    fn test_restore_lifts_longest_to_current() {
        let streak = Streak::restore(StreakKind::learning(), 5, 2, day(0));
        assert_eq!(streak.longest_streak(), 5);
    }

    #[test]
    fn test_active_today_and_effective_current() {
        let streak = Streak::restore(StreakKind::learning(), 3, 3, day(5));

        assert!(streak.is_active_on(day(5)));
        assert!(!streak.is_active_on(day(6)));
        assert_eq!(streak.effective_current_on(day(5)), 3);
        assert_eq!(streak.effective_current_on(day(6)), 3);
        assert_eq!(streak.effective_current_on(day(7)), 0);
    }

    #[test]
    fn test_streak_kind_normalizes_and_rejects_empty() {
        assert_eq!(StreakKind::new(" Reading ").unwrap().as_str(), "reading");
        assert!(StreakKind::new("   ").is_err());
        assert_eq!(StreakKind::default(), StreakKind::learning());
    }
}
