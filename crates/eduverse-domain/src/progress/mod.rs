mod game_result;
mod learner;
mod repository;
mod stats;


pub use game_result::GameResult;
pub use learner::LearnerProfile;
pub use repository::{GameCompletion, GameHistoryRepository, LearnerRepository};
pub use stats::LearnerStats;
