use std::time::Duration;

/// Store-side waits. The progression logic itself never times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    /// How long a transaction waits for another writer's lock
    pub busy: Duration,

    /// How long to wait for a pooled connection
    pub acquire: Duration,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self {
            busy: Duration::from_secs(5),
            acquire: Duration::from_secs(10),
        }
    }
}

impl StoreTimeouts {
    pub fn new(busy: Duration, acquire: Duration) -> Self {
        Self { busy, acquire }
    }
}
