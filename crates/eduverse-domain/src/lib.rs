// Domain layer - Pure progression logic
// No dependencies on infrastructure or presentation layers

pub mod achievement;
pub mod events;
pub mod leaderboard;
pub mod progress;
pub mod shared;
pub mod streak;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{DomainError, GameResultId, UserId};
