use std::sync::Arc;

use dashmap::DashMap;

use pubwire_core::action::MessageAction;
use pubwire_core::error::Result;

use crate::router::{Event, EventKind};

/// Receives routed events of one kind.
pub trait EventListener: Send + Sync {
    fn kind(&self) -> EventKind;
    fn on_event(&self, event: &Event) -> Result<()>;
}

/// Registry of listeners keyed by event kind.
#[derive(Default)]
pub struct Dispatcher {
    listeners: DashMap<EventKind, Vec<Arc<dyn EventListener>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
        }
    }

    pub fn register(&self, listener: Arc<dyn EventListener>) {
        self.listeners
            .entry(listener.kind())
            .or_default()
            .push(listener);
    }

    pub fn registered_kinds(&self) -> Vec<EventKind> {
        self.listeners.iter().map(|e| *e.key()).collect()
    }

    /// Deliver `event` to every listener of its kind, in registration order.
    ///
    /// Returns how many listeners ran. The first listener error stops delivery
    /// and is returned.
    pub fn dispatch(&self, event: &Event) -> Result<usize> {
        // snapshot so listeners may register others without deadlocking the map
        let handlers: Vec<Arc<dyn EventListener>> = self
            .listeners
            .get(&event.kind())
            .map(|e| e.value().clone())
            .unwrap_or_default();

        for h in &handlers {
            h.on_event(event)?;
        }
        Ok(handlers.len())
    }
}

/// Listener that logs every event it receives.
pub struct LoggingListener {
    kind: EventKind,
}

impl LoggingListener {
    pub fn new(kind: EventKind) -> Self {
        Self { kind }
    }
}

impl EventListener for LoggingListener {
    fn kind(&self) -> EventKind {
        self.kind
    }

    fn on_event(&self, event: &Event) -> Result<()> {
        match event {
            Event::Presence { channel, event: presence, .. } => tracing::info!(
                %channel,
                action = %presence.action,
                occupancy = presence.occupancy,
                uuid = presence.uuid.as_deref().unwrap_or("-"),
                "presence"
            ),
            Event::MessageAction { event, action } => tracing::info!(
                channel = action.channel(),
                ?event,
                action_type = action.action_type(),
                action_value = action.action_value(),
                publisher = action.publisher(),
                "message action"
            ),
            Event::Message(env) | Event::Signal(env) | Event::Object(env) | Event::File(env) => tracing::info!(
                kind = %self.kind,
                channel = %env.channel,
                publisher = env.publisher().unwrap_or("-"),
                published = env.published(),
                "envelope"
            ),
        }
        Ok(())
    }
}
