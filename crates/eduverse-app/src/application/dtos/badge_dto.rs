use chrono::{DateTime, Utc};
use serde::Serialize;

use eduverse_domain::achievement::{find_badge, Badge};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl BadgeDto {
    pub fn from_badge(badge: &Badge, unlocked_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: badge.id.to_string(),
            name: badge.name.to_string(),
            description: badge.description.to_string(),
            icon: badge.icon.to_string(),
            unlocked_at,
        }
    }

    /// Badges removed from the catalog keep their id as name
    pub fn from_id(id: &str, unlocked_at: Option<DateTime<Utc>>) -> Self {
        match find_badge(id) {
            Some(badge) => Self::from_badge(badge, unlocked_at),
            None => Self {
                id: id.to_string(),
                name: id.to_string(),
                description: String::new(),
                icon: "🎖".to_string(),
                unlocked_at,
            },
        }
    }
}

/// One queued "badge unlocked" celebration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelebrationDto {
    pub user_id: String,
    pub badge: BadgeDto,
    pub message: String,
}
