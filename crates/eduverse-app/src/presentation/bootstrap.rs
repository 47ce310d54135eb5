use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::event_handlers::CelebrationNotifier;
use crate::application::queries::{LeaderboardQueries, ProgressQueries, StreakQueries};
use crate::application::services::{BadgeAwarder, CelebrationFeed, ConfigService};
use crate::presentation::state::{AppState, CommandHandlers, Queries, Runtime, Services};
use eduverse_domain::achievement::AchievementRepository;
use eduverse_domain::events::progression_events::BadgesUnlocked;
use eduverse_domain::events::{EventBus, TypedEventHandlerWrapper};
use eduverse_domain::leaderboard::LeaderboardRepository;
use eduverse_domain::progress::{GameHistoryRepository, LearnerRepository};
use eduverse_domain::shared::DomainError;
use eduverse_domain::streak::StreakRepository;
use eduverse_infrastructure::config::StoreTimeouts;
use eduverse_infrastructure::events::InMemoryEventBus;
use eduverse_infrastructure::persistence::{
    repositories::{
        SqliteAchievementRepository, SqliteGameHistoryRepository, SqliteLeaderboardRepository,
        SqliteLearnerRepository, SqliteStreakRepository,
    },
    Database,
};

/// Open the database file and wire every handler and query around it
pub async fn build_app_state(
    config: Arc<ConfigService>,
    db_path: &Path,
) -> Result<AppState, DomainError> {
    let settings = config.snapshot();
    let timeouts = StoreTimeouts::new(
        Duration::from_secs(settings.store_busy_timeout_secs),
        StoreTimeouts::default().acquire,
    );

    info!("🔌 Connecting to database at {}...", db_path.display());
    let started_at = Instant::now();
    let database = Database::new(db_path, timeouts).await?;
    info!(
        "✓ Database connection established ({}ms)",
        started_at.elapsed().as_millis()
    );

    assemble(database, config).await
}

/// Same wiring over a private in-memory database
pub async fn build_in_memory_state(config: Arc<ConfigService>) -> Result<AppState, DomainError> {
    let database = Database::in_memory().await?;
    assemble(database, config).await
}

async fn assemble(database: Database, config: Arc<ConfigService>) -> Result<AppState, DomainError> {
    info!("🔄 Running migrations...");
    let started_at = Instant::now();
    database.run_migrations().await?;
    info!(
        "✓ Migrations completed ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(database.pool().clone());

    let learner_repo =
        Arc::new(SqliteLearnerRepository::new(pool.clone())) as Arc<dyn LearnerRepository>;
    let streak_repo =
        Arc::new(SqliteStreakRepository::new(pool.clone())) as Arc<dyn StreakRepository>;
    let game_history_repo = Arc::new(SqliteGameHistoryRepository::new(pool.clone()))
        as Arc<dyn GameHistoryRepository>;
    let achievement_repo = Arc::new(SqliteAchievementRepository::new(pool.clone()))
        as Arc<dyn AchievementRepository>;
    let leaderboard_repo =
        Arc::new(SqliteLeaderboardRepository::new(pool)) as Arc<dyn LeaderboardRepository>;

    let celebrations = Arc::new(CelebrationFeed::new());
    let event_bus = Arc::new(InMemoryEventBus::new());
    event_bus
        .subscribe::<BadgesUnlocked>(Arc::new(TypedEventHandlerWrapper::new(
            CelebrationNotifier::new(celebrations.clone()),
        )))
        .await;
    let bus = event_bus.clone() as Arc<dyn EventBus>;

    let badge_awarder = Arc::new(BadgeAwarder::new(
        game_history_repo.clone(),
        achievement_repo.clone(),
        bus.clone(),
    ));

    let command_handlers = CommandHandlers {
        register_learner: Arc::new(RegisterLearnerCommandHandler::new(
            learner_repo.clone(),
            bus.clone(),
        )),
        record_activity: Arc::new(RecordActivityCommandHandler::new(
            learner_repo.clone(),
            streak_repo.clone(),
            badge_awarder.clone(),
            bus.clone(),
        )),
        complete_game: Arc::new(CompleteGameCommandHandler::new(
            learner_repo.clone(),
            game_history_repo.clone(),
            badge_awarder,
            bus,
        )),
    };

    let queries = Queries {
        streak: Arc::new(StreakQueries::new(streak_repo.clone())),
        leaderboard: Arc::new(LeaderboardQueries::new(leaderboard_repo)),
        progress: Arc::new(ProgressQueries::new(
            learner_repo,
            streak_repo,
            game_history_repo,
            achievement_repo,
        )),
    };

    info!("✅ App state initialized");

    Ok(AppState {
        runtime: Runtime {
            db: Arc::new(database),
        },
        services: Services {
            config,
            celebrations,
        },
        queries,
        command_handlers,
    })
}
