use std::collections::HashSet;

use super::catalog::{Badge, BadgeId, CATALOG};
use crate::progress::LearnerStats;

/// Decides which catalog badges a learner has just earned
pub struct AchievementEvaluator {
    catalog: &'static [Badge],
}

impl AchievementEvaluator {
    pub fn new() -> Self {
        Self { catalog: CATALOG }
    }

    pub fn with_catalog(catalog: &'static [Badge]) -> Self {
        Self { catalog }
    }

    /// Badges whose rule holds and that are not in `already_unlocked`, in
    /// catalog order. Never fails and never returns an already held badge.
    pub fn evaluate(
        &self,
        stats: &LearnerStats,
        already_unlocked: &HashSet<String>,
        latest_game_score_percent: Option<f64>,
    ) -> Vec<BadgeId> {
        self.catalog
            .iter()
            .filter(|badge| !already_unlocked.contains(badge.id))
            .filter(|badge| badge.rule.is_met(stats, latest_game_score_percent))
            .map(|badge| badge.id)
            .collect()
    }

    pub fn catalog(&self) -> &'static [Badge] {
        self.catalog
    }
}

impl Default for AchievementEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
