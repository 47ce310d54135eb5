use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::application::dtos::{BadgeDto, CelebrationDto};
use crate::application::services::CelebrationFeed;
use eduverse_domain::achievement::find_badge;
use eduverse_domain::events::progression_events::BadgesUnlocked;
use eduverse_domain::events::EventHandler;
use eduverse_domain::shared::DomainError;

/// Turns unlock deltas into queued celebrations
pub struct CelebrationNotifier {
    feed: Arc<CelebrationFeed>,
}

impl CelebrationNotifier {
    pub fn new(feed: Arc<CelebrationFeed>) -> Self {
        Self { feed }
    }
}

#[async_trait]
impl EventHandler<BadgesUnlocked> for CelebrationNotifier {
    async fn handle(&self, event: &BadgesUnlocked) -> Result<(), DomainError> {
        for badge_id in &event.badge_ids {
            let Some(badge) = find_badge(badge_id) else {
                warn!(
                    "Unknown badge {} in unlock event (catalog v{})",
                    badge_id, event.catalog_version
                );
                continue;
            };

            info!("🎉 {} unlocked {} for {}", badge.icon, badge.name, event.user_id);

            self.feed
                .push(CelebrationDto {
                    user_id: event.user_id.as_str().to_string(),
                    badge: BadgeDto::from_badge(badge, Some(event.occurred_at)),
                    message: format!("{} You earned the {} badge!", badge.icon, badge.name),
                })
                .await;
        }

        Ok(())
    }
}
