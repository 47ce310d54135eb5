use std::collections::VecDeque;
use tokio::sync::Mutex;

use crate::application::dtos::CelebrationDto;

/// Pending "badge unlocked" notifications for the presentation layer.
/// Oldest entries are dropped once `capacity` is reached.
pub struct CelebrationFeed {
    pending: Mutex<VecDeque<CelebrationDto>>,
    capacity: usize,
}

impl CelebrationFeed {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    pub async fn push(&self, celebration: CelebrationDto) {
        let mut pending = self.pending.lock().await;
        if pending.len() == self.capacity {
            pending.pop_front();
        }
        pending.push_back(celebration);
    }

    /// Take every pending celebration, oldest first
    pub async fn drain(&self) -> Vec<CelebrationDto> {
        self.pending.lock().await.drain(..).collect()
    }
}

impl Default for CelebrationFeed {
    fn default() -> Self {
        Self::new()
    }
}
