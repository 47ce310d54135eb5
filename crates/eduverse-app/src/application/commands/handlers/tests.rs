use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::commands::progress_commands::*;
use crate::application::commands::CommandHandler;
use crate::application::commands::handlers::*;
use crate::application::services::BadgeAwarder;
use eduverse_domain::achievement::{
    AchievementRepository, UnlockedBadge, BEGINNER_EXPLORER, CONSISTENCY_STAR, GAME_STARTER,
    SCORE_MASTER,
};
use eduverse_domain::events::progression_events::{BadgesUnlocked, GameCompleted};
use eduverse_domain::events::{DomainEvent, EventBus};
use eduverse_domain::progress::{
    GameCompletion, GameHistoryRepository, GameResult, LearnerProfile, LearnerRepository,
    LearnerStats,
};
use eduverse_domain::shared::{DomainError, ErrorCode, UserId};
use eduverse_domain::streak::{
    Streak, StreakKind, StreakRepository, StreakTransition, StreakUpdate,
};

// Mock repositories and services for testing

struct MockLearnerRepository {
    learners: tokio::sync::RwLock<HashMap<String, LearnerProfile>>,
}

impl MockLearnerRepository {
    fn new() -> Self {
        Self {
            learners: tokio::sync::RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl LearnerRepository for MockLearnerRepository {
    async fn save(&self, profile: &LearnerProfile) -> Result<(), DomainError> {
        let mut learners = self.learners.write().await;
        learners.insert(profile.user_id().as_str().to_string(), profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<LearnerProfile>, DomainError> {
        let learners = self.learners.read().await;
        Ok(learners.get(user_id.as_str()).cloned())
    }
}

struct MockStreakRepository {
    streaks: tokio::sync::Mutex<HashMap<(String, String), Streak>>,
    fail_writes: AtomicBool,
}

impl MockStreakRepository {
    fn new() -> Self {
        Self {
            streaks: tokio::sync::Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl StreakRepository for MockStreakRepository {
    async fn find(
        &self,
        user_id: &UserId,
        kind: &StreakKind,
    ) -> Result<Option<Streak>, DomainError> {
        let streaks = self.streaks.lock().await;
        Ok(streaks
            .get(&(user_id.as_str().to_string(), kind.as_str().to_string()))
            .cloned())
    }

    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Streak>, DomainError> {
        let streaks = self.streaks.lock().await;
        Ok(streaks
            .iter()
            .filter(|((user, _), _)| user == user_id.as_str())
            .map(|(_, streak)| streak.clone())
            .collect())
    }

    async fn record_activity(
        &self,
        user_id: &UserId,
        kind: &StreakKind,
        today: NaiveDate,
    ) -> Result<StreakUpdate, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable(
                "streak store offline".to_string(),
            ));
        }
        let mut streaks = self.streaks.lock().await;
        let key = (user_id.as_str().to_string(), kind.as_str().to_string());
        let (streak, transition) = Streak::record_daily_activity(streaks.get(&key), kind, today);
        streaks.insert(key, streak.clone());
        Ok(StreakUpdate { streak, transition })
    }
}

/// Stores a result only once its streak write succeeded, like the sqlite transaction
struct MockGameHistoryRepository {
    results: tokio::sync::RwLock<Vec<GameResult>>,
    streaks: Arc<MockStreakRepository>,
}

impl MockGameHistoryRepository {
    fn new(streaks: Arc<MockStreakRepository>) -> Self {
        Self {
            results: tokio::sync::RwLock::new(Vec::new()),
            streaks,
        }
    }

    async fn count(&self) -> usize {
        self.results.read().await.len()
    }
}

#[async_trait::async_trait]
impl GameHistoryRepository for MockGameHistoryRepository {
    async fn record_completion(&self, result: &GameResult) -> Result<GameCompletion, DomainError> {
        let mut results = self.results.write().await;
        let kind = StreakKind::learning();

        if results.iter().any(|r| r.id() == result.id()) {
            if let Some(streak) = self.streaks.find(result.user_id(), &kind).await? {
                return Ok(GameCompletion {
                    streak: StreakUpdate {
                        streak,
                        transition: StreakTransition::Unchanged,
                    },
                    newly_recorded: false,
                });
            }
        }

        let streak = self
            .streaks
            .record_activity(result.user_id(), &kind, result.played_on())
            .await?;
        results.push(result.clone());
        Ok(GameCompletion {
            streak,
            newly_recorded: true,
        })
    }

    async fn stats_for(&self, user_id: &UserId) -> Result<LearnerStats, DomainError> {
        let results = self.results.read().await;
        let mine: Vec<_> = results.iter().filter(|r| r.user_id() == user_id).collect();
        let total: i64 = mine.iter().map(|r| i64::from(r.score())).sum();
        Ok(LearnerStats::new(mine.len() as i64, total, 0))
    }

    async fn recent(&self, user_id: &UserId, limit: u32) -> Result<Vec<GameResult>, DomainError> {
        let results = self.results.read().await;
        Ok(results
            .iter()
            .rev()
            .filter(|r| r.user_id() == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

struct MockAchievementRepository {
    unlocked: tokio::sync::RwLock<HashMap<String, Vec<UnlockedBadge>>>,
}

impl MockAchievementRepository {
    fn new() -> Self {
        Self {
            unlocked: tokio::sync::RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl AchievementRepository for MockAchievementRepository {
    async fn unlocked_ids(&self, user_id: &UserId) -> Result<HashSet<String>, DomainError> {
        let unlocked = self.unlocked.read().await;
        Ok(unlocked
            .get(user_id.as_str())
            .map(|badges| badges.iter().map(|b| b.badge_id.clone()).collect())
            .unwrap_or_default())
    }

    async fn unlocked(&self, user_id: &UserId) -> Result<Vec<UnlockedBadge>, DomainError> {
        let unlocked = self.unlocked.read().await;
        Ok(unlocked.get(user_id.as_str()).cloned().unwrap_or_default())
    }

    async fn unlock(
        &self,
        user_id: &UserId,
        badge_ids: &[&str],
        unlocked_at: DateTime<Utc>,
    ) -> Result<Vec<String>, DomainError> {
        let mut unlocked = self.unlocked.write().await;
        let badges = unlocked.entry(user_id.as_str().to_string()).or_default();
        let mut inserted = Vec::new();
        for id in badge_ids {
            if badges.iter().any(|b| b.badge_id == *id) {
                continue;
            }
            badges.push(UnlockedBadge {
                badge_id: id.to_string(),
                unlocked_at,
            });
            inserted.push(id.to_string());
        }
        Ok(inserted)
    }
}

struct MockEventBus {
    events: tokio::sync::RwLock<Vec<&'static str>>,
}

impl MockEventBus {
    fn new() -> Self {
        Self {
            events: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    async fn get_event_count(&self) -> usize {
        self.events.read().await.len()
    }

    async fn count_of<E: DomainEvent>(&self) -> usize {
        let name = std::any::type_name::<E>();
        self.events
            .read()
            .await
            .iter()
            .filter(|e| **e == name)
            .count()
    }
}

#[async_trait::async_trait]
impl EventBus for MockEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        self.events.write().await.push(event.event_type_name());
        Ok(())
    }
}

struct Fixture {
    learners: Arc<MockLearnerRepository>,
    streaks: Arc<MockStreakRepository>,
    history: Arc<MockGameHistoryRepository>,
    achievements: Arc<MockAchievementRepository>,
    event_bus: Arc<MockEventBus>,
    register: RegisterLearnerCommandHandler,
    record_activity: RecordActivityCommandHandler,
    complete_game: CompleteGameCommandHandler,
}

impl Fixture {
    fn new() -> Self {
        let learners = Arc::new(MockLearnerRepository::new());
        let streaks = Arc::new(MockStreakRepository::new());
        let history = Arc::new(MockGameHistoryRepository::new(streaks.clone()));
        let achievements = Arc::new(MockAchievementRepository::new());
        let event_bus = Arc::new(MockEventBus::new());
        let awarder = Arc::new(BadgeAwarder::new(
            history.clone(),
            achievements.clone(),
            event_bus.clone(),
        ));

        Self {
            register: RegisterLearnerCommandHandler::new(learners.clone(), event_bus.clone()),
            record_activity: RecordActivityCommandHandler::new(
                learners.clone(),
                streaks.clone(),
                awarder.clone(),
                event_bus.clone(),
            ),
            complete_game: CompleteGameCommandHandler::new(
                learners.clone(),
                history.clone(),
                awarder,
                event_bus.clone(),
            ),
            learners,
            streaks,
            history,
            achievements,
            event_bus,
        }
    }

    async fn enroll(&self, user_id: &str) {
        self.register
            .handle(RegisterLearnerCommand {
                user_id: Some(user_id.to_string()),
                display_name: "Mia".to_string(),
                avatar: None,
            })
            .await
            .unwrap();
    }

    async fn play(
        &self,
        user_id: &str,
        score: u32,
        max_score: u32,
        played_on: NaiveDate,
    ) -> CompleteGameResult {
        self.complete_game
            .handle(game(user_id, score, max_score, played_on))
            .await
            .unwrap()
    }
}

fn game(user_id: &str, score: u32, max_score: u32, played_on: NaiveDate) -> CompleteGameCommand {
    CompleteGameCommand {
        user_id: user_id.to_string(),
        game_id: "counting-stars".to_string(),
        subject: "Math".to_string(),
        score,
        max_score,
        played_on,
        result_id: None,
    }
}

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, n).unwrap()
}

fn ids(result: &[crate::application::dtos::BadgeDto]) -> Vec<&str> {
    result.iter().map(|b| b.id.as_str()).collect()
}

// Tests

#[tokio::test]
async fn test_register_learner_command_handler() {
    let fx = Fixture::new();

    let result = fx
        .register
        .handle(RegisterLearnerCommand {
            user_id: None,
            display_name: "  Leo ".to_string(),
            avatar: Some("🐯".to_string()),
        })
        .await
        .unwrap();
    assert!(result.created);

    let saved = fx
        .learners
        .find_by_id(&UserId::from_string(&result.user_id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.display_name(), "Leo");
    assert_eq!(saved.avatar(), "🐯");
    assert_eq!(fx.event_bus.get_event_count().await, 1);
}

#[tokio::test]
async fn test_register_existing_learner_renames_without_event() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;
    let first = fx
        .learners
        .find_by_id(&UserId::from_string("kid-1"))
        .await
        .unwrap()
        .unwrap();

    let result = fx
        .register
        .handle(RegisterLearnerCommand {
            user_id: Some("kid-1".to_string()),
            display_name: "Mia R.".to_string(),
            avatar: None,
        })
        .await
        .unwrap();
    assert!(!result.created);

    let renamed = fx
        .learners
        .find_by_id(&UserId::from_string("kid-1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.display_name(), "Mia R.");
    assert_eq!(renamed.created_at(), first.created_at());
    assert_eq!(fx.event_bus.get_event_count().await, 1);
}

#[tokio::test]
async fn test_register_with_empty_name_fails() {
    let fx = Fixture::new();

    let result = fx
        .register
        .handle(RegisterLearnerCommand {
            user_id: None,
            display_name: "   ".to_string(),
            avatar: None,
        })
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(fx.event_bus.get_event_count().await, 0);
}

#[tokio::test]
async fn test_record_activity_for_unknown_learner_fails() {
    let fx = Fixture::new();

    let err = fx
        .record_activity
        .handle(RecordActivityCommand {
            user_id: "ghost".to_string(),
            kind: None,
            occurred_on: day(1),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::LearnerNotFound);

    let streak = fx
        .streaks
        .find(&UserId::from_string("ghost"), &StreakKind::learning())
        .await
        .unwrap();
    assert!(streak.is_none());
}

#[tokio::test]
async fn test_three_day_streak_unlocks_consistency_star() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;

    let mut unlocked = Vec::new();
    for n in 1..=3 {
        let result = fx
            .record_activity
            .handle(RecordActivityCommand {
                user_id: "kid-1".to_string(),
                kind: None,
                occurred_on: day(n),
            })
            .await
            .unwrap();
        assert_eq!(result.streak.current_streak, n);
        unlocked.extend(result.unlocked_badges);
    }

    assert_eq!(ids(&unlocked), vec![CONSISTENCY_STAR]);
    assert_eq!(fx.event_bus.count_of::<BadgesUnlocked>().await, 1);
}

#[tokio::test]
async fn test_same_day_activity_is_unchanged() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;
    let cmd = RecordActivityCommand {
        user_id: "kid-1".to_string(),
        kind: Some("Reading".to_string()),
        occurred_on: day(4),
    };

    let first = fx.record_activity.handle(cmd.clone()).await.unwrap();
    let events_after_first = fx.event_bus.get_event_count().await;
    let second = fx.record_activity.handle(cmd).await.unwrap();

    assert_eq!(first.transition, "started");
    assert_eq!(second.transition, "unchanged");
    assert_eq!(second.streak, first.streak);
    assert_eq!(second.streak.kind, "reading");
    assert_eq!(fx.event_bus.get_event_count().await, events_after_first);
}

#[tokio::test]
async fn test_complete_game_unlocks_delta_once() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;

    let first = fx.play("kid-1", 5, 10, day(1)).await;
    assert_eq!(ids(&first.unlocked_badges), vec![BEGINNER_EXPLORER]);
    assert_eq!(first.streak.current_streak, 1);

    let second = fx.play("kid-1", 5, 10, day(1)).await;
    assert!(second.unlocked_badges.is_empty());

    let third = fx.play("kid-1", 5, 10, day(1)).await;
    assert_eq!(ids(&third.unlocked_badges), vec![GAME_STARTER]);

    let stored = fx
        .achievements
        .unlocked_ids(&UserId::from_string("kid-1"))
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(fx.event_bus.count_of::<BadgesUnlocked>().await, 2);
}

#[tokio::test]
async fn test_high_score_unlocks_score_master() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;

    let result = fx.play("kid-1", 9, 10, day(2)).await;

    assert!((result.score_percent - 90.0).abs() < 1e-9);
    assert_eq!(
        ids(&result.unlocked_badges),
        vec![BEGINNER_EXPLORER, SCORE_MASTER]
    );
}

#[tokio::test]
async fn test_score_master_needs_the_current_game() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;

    let result = fx.play("kid-1", 7, 10, day(2)).await;
    assert!(!ids(&result.unlocked_badges).contains(&SCORE_MASTER));

    let result = fx.play("kid-1", 8, 10, day(2)).await;
    assert_eq!(ids(&result.unlocked_badges), vec![SCORE_MASTER]);
}

#[tokio::test]
async fn test_complete_game_rejects_invalid_score() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;

    let result = fx.complete_game.handle(game("kid-1", 11, 10, day(1))).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    let streak = fx
        .streaks
        .find(&UserId::from_string("kid-1"), &StreakKind::learning())
        .await
        .unwrap();
    assert!(streak.is_none());
}

#[tokio::test]
async fn test_missed_day_resets_streak_on_next_game() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;

    fx.play("kid-1", 1, 10, day(1)).await;
    let continued = fx.play("kid-1", 1, 10, day(2)).await;
    assert_eq!(continued.streak.current_streak, 2);

    let reset = fx.play("kid-1", 1, 10, day(4)).await;
    assert_eq!(reset.streak.current_streak, 1);
    assert_eq!(reset.streak.longest_streak, 2);
}

#[tokio::test]
async fn test_failed_streak_write_stores_no_game_and_retry_counts_once() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;
    let events_before = fx.event_bus.get_event_count().await;

    fx.streaks.set_fail_writes(true);
    let err = fx
        .complete_game
        .handle(game("kid-1", 6, 10, day(3)))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    assert_eq!(fx.history.count().await, 0);
    assert_eq!(fx.event_bus.get_event_count().await, events_before);

    fx.streaks.set_fail_writes(false);
    let retried = fx.play("kid-1", 6, 10, day(3)).await;

    assert!(retried.newly_recorded);
    assert_eq!(retried.streak.current_streak, 1);
    assert_eq!(fx.history.count().await, 1);
    assert_eq!(fx.event_bus.count_of::<GameCompleted>().await, 1);
}

#[tokio::test]
async fn test_resubmitted_result_id_is_stored_once() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;
    let mut cmd = game("kid-1", 6, 10, day(3));
    cmd.result_id = Some("tablet-7-run-3".to_string());

    let first = fx.complete_game.handle(cmd.clone()).await.unwrap();
    let second = fx.complete_game.handle(cmd).await.unwrap();

    assert!(first.newly_recorded);
    assert!(!second.newly_recorded);
    assert_eq!(first.game_result_id, "tablet-7-run-3");
    assert_eq!(second.game_result_id, "tablet-7-run-3");
    assert_eq!(second.streak, first.streak);
    assert!(second.unlocked_badges.is_empty());
    assert_eq!(fx.history.count().await, 1);
    assert_eq!(fx.event_bus.count_of::<GameCompleted>().await, 1);
}

#[tokio::test]
async fn test_blank_result_id_is_rejected() {
    let fx = Fixture::new();
    fx.enroll("kid-1").await;
    let mut cmd = game("kid-1", 6, 10, day(3));
    cmd.result_id = Some("  ".to_string());

    let result = fx.complete_game.handle(cmd).await;

    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    assert_eq!(fx.history.count().await, 0);
}
