mod catalog;
mod evaluator;
mod repository;


pub use catalog::{
    find_badge, Badge, BadgeId, UnlockRule, BEGINNER_EXPLORER, CATALOG, CATALOG_VERSION,
    CONSISTENCY_STAR, DEDICATED_LEARNER, GAME_STARTER, POINT_COLLECTOR, SCORE_MASTER,
    SCORE_MASTER_THRESHOLD_PERCENT, WEEK_WARRIOR,
};
pub use evaluator::AchievementEvaluator;
pub use repository::{AchievementRepository, UnlockedBadge};
