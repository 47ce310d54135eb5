mod badge_awarder;
mod celebration_feed;
mod config_service;

pub use badge_awarder::BadgeAwarder;
pub use celebration_feed::CelebrationFeed;
pub use config_service::{AppConfig, ConfigService, LogLevel};
