use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::queries::{LeaderboardQueries, ProgressQueries, StreakQueries};
use crate::application::services::{CelebrationFeed, ConfigService};
use eduverse_infrastructure::persistence::Database;

/// Command handlers container
pub struct CommandHandlers {
    pub register_learner: Arc<RegisterLearnerCommandHandler>,
    pub record_activity: Arc<RecordActivityCommandHandler>,
    pub complete_game: Arc<CompleteGameCommandHandler>,
}

pub struct Runtime {
    pub db: Arc<Database>,
}

pub struct Services {
    pub config: Arc<ConfigService>,
    pub celebrations: Arc<CelebrationFeed>,
}

pub struct Queries {
    pub streak: Arc<StreakQueries>,
    pub leaderboard: Arc<LeaderboardQueries>,
    pub progress: Arc<ProgressQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub services: Services,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}
