use async_trait::async_trait;
use log::{debug, error};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use eduverse_domain::events::{DomainEvent, DynamicEventHandler, EventBus};
use eduverse_domain::shared::DomainError;

/// Dispatches events to subscribed handlers in the publishing task.
/// A failing handler is logged and does not stop the others.
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<&'static str, Vec<Arc<dyn DynamicEventHandler>>>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe a handler to a specific event type
    pub async fn subscribe<E: DomainEvent + 'static>(&self, handler: Arc<dyn DynamicEventHandler>) {
        let event_type_name = std::any::type_name::<E>();
        let mut handlers = self.handlers.write().await;

        handlers.entry(event_type_name).or_default().push(handler);

        debug!("Subscribed handler for event type: {}", event_type_name);
    }

    pub async fn handler_count<E: DomainEvent + 'static>(&self) -> usize {
        let event_type_name = std::any::type_name::<E>();
        let handlers = self.handlers.read().await;
        handlers.get(event_type_name).map_or(0, |h| h.len())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let event_type_name = event.event_type_name();
        let handlers = self.handlers.read().await;

        let Some(event_handlers) = handlers.get(event_type_name) else {
            debug!("No handlers registered for event type: {}", event_type_name);
            return Ok(());
        };

        for handler in event_handlers {
            if let Err(e) = handler.handle_dynamic(event.as_any()).await {
                error!("Handler failed to process event {}: {}", event_type_name, e);
            }
        }

        Ok(())
    }
}
