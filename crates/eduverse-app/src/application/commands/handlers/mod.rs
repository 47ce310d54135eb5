mod complete_game_handler;
mod record_activity_handler;
mod register_learner_handler;

#[cfg(test)]
mod tests;

pub use complete_game_handler::CompleteGameCommandHandler;
pub use record_activity_handler::RecordActivityCommandHandler;
pub use register_learner_handler::RegisterLearnerCommandHandler;

use eduverse_domain::progress::LearnerRepository;
use eduverse_domain::shared::{DomainError, UserId};

/// Progress is only recorded for registered learners
async fn ensure_registered(
    learner_repo: &dyn LearnerRepository,
    user_id: &UserId,
) -> Result<(), DomainError> {
    match learner_repo.find_by_id(user_id).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::LearnerNotFound(user_id.to_string())),
    }
}
