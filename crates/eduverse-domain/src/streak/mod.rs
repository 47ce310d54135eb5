mod aggregate;
mod repository;

#[cfg(test)]
mod aggregate_test;

pub use aggregate::{Streak, StreakKind, StreakTransition};
pub use repository::{StreakRepository, StreakUpdate};
