//! Envelope routing.
//!
//! Decides what each subscribe envelope is and decodes it once:
//! - presence channels (suffix match) go to the presence decoder; a decode
//!   failure is an error for that envelope.
//! - message-action envelopes go to the action constructor; a payload that is
//!   not action-shaped is skipped, not failed.
//! - everything else is passed through with its raw payload.

use std::fmt;
use std::sync::Arc;

use pubwire_core::action::{ActionEvent, MessageActionBase};
use pubwire_core::error::{PubwireError, Result};
use pubwire_core::presence::{decode_presence, PresenceEvent};
use pubwire_core::protocol::subscribe::{decode_subscribe_response, MessageKind, SubscribeEnvelope};
use pubwire_core::timetoken::TimetokenRegion;

use crate::config::RoutingSection;
use crate::obs::RouterMetrics;

/// Listener-facing event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Message,
    Signal,
    Object,
    File,
    Presence,
    MessageAction,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Message,
        EventKind::Signal,
        EventKind::Object,
        EventKind::File,
        EventKind::Presence,
        EventKind::MessageAction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Message => "message",
            EventKind::Signal => "signal",
            EventKind::Object => "object",
            EventKind::File => "file",
            EventKind::Presence => "presence",
            EventKind::MessageAction => "message_action",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded envelope.
#[derive(Debug, Clone)]
pub enum Event {
    Message(SubscribeEnvelope),
    Signal(SubscribeEnvelope),
    Object(SubscribeEnvelope),
    File(SubscribeEnvelope),
    Presence {
        /// Channel the presence change happened on (suffix stripped).
        channel: String,
        subscription: Option<String>,
        event: PresenceEvent,
    },
    MessageAction {
        event: ActionEvent,
        action: MessageActionBase,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Message(_) => EventKind::Message,
            Event::Signal(_) => EventKind::Signal,
            Event::Object(_) => EventKind::Object,
            Event::File(_) => EventKind::File,
            Event::Presence { .. } => EventKind::Presence,
            Event::MessageAction { .. } => EventKind::MessageAction,
        }
    }
}

/// Envelope that failed to decode inside a batch.
#[derive(Debug)]
pub struct RouteFailure {
    /// Position in the response's message list.
    pub index: usize,
    pub channel: String,
    pub error: PubwireError,
}

/// Result of routing one subscribe response.
#[derive(Debug)]
pub struct RoutedBatch {
    /// Cursor to resume the long-poll from.
    pub cursor: TimetokenRegion,
    pub events: Vec<Event>,
    pub failures: Vec<RouteFailure>,
}

pub struct EnvelopeRouter {
    presence_suffix: String,
    strict_kinds: bool,
    metrics: Arc<RouterMetrics>,
}

impl EnvelopeRouter {
    pub fn new(cfg: &RoutingSection) -> Self {
        Self {
            presence_suffix: cfg.presence_suffix.clone(),
            strict_kinds: cfg.strict_kinds,
            metrics: Arc::new(RouterMetrics::default()),
        }
    }

    pub fn metrics(&self) -> Arc<RouterMetrics> {
        self.metrics.clone()
    }

    /// Route one envelope. `Ok(None)` means the envelope was filtered out.
    pub fn route(&self, env: &SubscribeEnvelope) -> Result<Option<Event>> {
        if let Some(channel) = env.channel.strip_suffix(self.presence_suffix.as_str()) {
            return match decode_presence(env.payload.get().as_bytes()) {
                Ok(event) => {
                    self.routed(EventKind::Presence);
                    Ok(Some(Event::Presence {
                        channel: channel.to_owned(),
                        subscription: env.subscription.clone(),
                        event,
                    }))
                }
                Err(e) => {
                    tracing::warn!(channel = %env.channel, error = %e, "presence decode failed");
                    self.metrics.failed.inc(&[("kind", EventKind::Presence.as_str())]);
                    Err(e)
                }
            };
        }

        let Some(kind) = env.kind() else {
            let e = env.message_type.unwrap_or_default();
            if self.strict_kinds {
                self.metrics.failed.inc(&[("kind", "unknown")]);
                return Err(PubwireError::Decode(format!("unknown message type {e}")));
            }
            tracing::debug!(channel = %env.channel, message_type = e, "skipping unknown message type");
            self.metrics.skipped.inc(&[("kind", "unknown")]);
            return Ok(None);
        };

        let event = match kind {
            MessageKind::Message => Event::Message(env.clone()),
            MessageKind::Signal => Event::Signal(env.clone()),
            MessageKind::Object => Event::Object(env.clone()),
            MessageKind::File => Event::File(env.clone()),
            MessageKind::MessageAction => match MessageActionBase::from_envelope_event(env) {
                Some((event, action)) => Event::MessageAction { event, action },
                None => {
                    tracing::debug!(channel = %env.channel, "skipping envelope that is not a message action");
                    self.metrics
                        .skipped
                        .inc(&[("kind", EventKind::MessageAction.as_str())]);
                    return Ok(None);
                }
            },
        };

        self.routed(event.kind());
        Ok(Some(event))
    }

    /// Decode a subscribe response body and route every envelope in it.
    ///
    /// A body that does not parse fails as a whole; individual envelopes that
    /// fail are reported in [`RoutedBatch::failures`] and do not stop the batch.
    pub fn route_response(&self, buf: &[u8]) -> Result<RoutedBatch> {
        let resp = decode_subscribe_response(buf)?;

        let mut events = Vec::with_capacity(resp.messages.len());
        let mut failures = Vec::new();
        for (index, env) in resp.messages.iter().enumerate() {
            match self.route(env) {
                Ok(Some(ev)) => events.push(ev),
                Ok(None) => {}
                Err(error) => failures.push(RouteFailure {
                    index,
                    channel: env.channel.clone(),
                    error,
                }),
            }
        }

        tracing::debug!(
            cursor = resp.cursor.timetoken,
            events = events.len(),
            failures = failures.len(),
            "routed subscribe response"
        );

        Ok(RoutedBatch {
            cursor: resp.cursor,
            events,
            failures,
        })
    }

    fn routed(&self, kind: EventKind) {
        self.metrics.routed.inc(&[("kind", kind.as_str())]);
    }
}
