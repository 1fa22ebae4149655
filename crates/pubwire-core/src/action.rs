//! Message actions (reactions, receipts, and other annotations on a message).
//!
//! [`MessageAction`] is the capability; [`MessageActionBase`] is the default
//! immutable implementation produced by the subscribe and history paths.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::capability::same_type;
use crate::error::ConversionError;
use crate::protocol::subscribe::SubscribeEnvelope;
use crate::timetoken::Timetoken;

/// A message action as seen by callers.
pub trait MessageAction {
    /// Type of action, e.g. `reaction`.
    fn action_type(&self) -> &str;
    /// Value for the type, e.g. an emoji.
    fn action_value(&self) -> &str;
    /// Timetoken of this specific action.
    fn action_timetoken(&self) -> Timetoken;
    /// Timetoken of the message this action relates to.
    fn message_timetoken(&self) -> Timetoken;
    fn publisher(&self) -> &str;
    /// Channel the action (and message) were sent on.
    fn channel(&self) -> &str;
    /// Subscription match string, when delivered through a wildcard or group.
    fn subscription(&self) -> Option<&str>;
    /// Timetoken at which the service received the action event.
    fn published(&self) -> Option<Timetoken>;

    /// Build this type from any other message action.
    fn from_action(other: &dyn MessageAction) -> Result<Self, ConversionError>
    where
        Self: Sized;

    /// Convert into `T`, returning a copy when `T` is already `Self`.
    fn transcode<T>(&self) -> Result<T, ConversionError>
    where
        Self: Sized + 'static,
        T: MessageAction + Clone + 'static,
    {
        if let Some(same) = same_type::<Self, T>(self) {
            return Ok(same);
        }
        T::from_action(self)
    }
}

/// Whether an action was attached to or removed from a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionEvent {
    Added,
    Removed,
}

/// Payload of a message-action envelope (`e: 3`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscribeActionPayload {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub event: ActionEvent,
    pub data: ActionData,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(rename = "value")]
    pub action_value: String,
    #[serde(with = "crate::timetoken")]
    pub action_timetoken: Timetoken,
    #[serde(with = "crate::timetoken")]
    pub message_timetoken: Timetoken,
}

/// One action as returned by the action history query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryActionPayload {
    pub uuid: String,
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(rename = "value")]
    pub action_value: String,
    #[serde(with = "crate::timetoken")]
    pub action_timetoken: Timetoken,
    #[serde(with = "crate::timetoken")]
    pub message_timetoken: Timetoken,
}

/// Leaf of the per-message action index attached to history messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryActionEntry {
    pub uuid: String,
    #[serde(with = "crate::timetoken")]
    pub action_timetoken: Timetoken,
}

/// `action type -> action value -> [{uuid, actionTimetoken}]`.
pub type RawActionIndex = BTreeMap<String, BTreeMap<String, Vec<HistoryActionEntry>>>;

/// Default [`MessageAction`] implementation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageActionBase {
    action_type: String,
    action_value: String,
    #[serde(with = "crate::timetoken")]
    action_timetoken: Timetoken,
    #[serde(with = "crate::timetoken")]
    message_timetoken: Timetoken,
    publisher: String,
    channel: String,
    #[serde(default)]
    subscription: Option<String>,
    #[serde(default, with = "crate::timetoken::option")]
    published: Option<Timetoken>,
}

impl MessageActionBase {
    pub fn new(
        action_type: impl Into<String>,
        action_value: impl Into<String>,
        action_timetoken: Timetoken,
        message_timetoken: Timetoken,
        publisher: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            action_value: action_value.into(),
            action_timetoken,
            message_timetoken,
            publisher: publisher.into(),
            channel: channel.into(),
            subscription: None,
            published: None,
        }
    }

    pub fn with_subscription(self, subscription: impl Into<String>) -> Self {
        Self {
            subscription: Some(subscription.into()),
            ..self
        }
    }

    pub fn with_published(self, published: Timetoken) -> Self {
        Self {
            published: Some(published),
            ..self
        }
    }

    /// Build from a subscribe envelope.
    ///
    /// Returns `None` when the payload is not action-shaped or the envelope
    /// has no publisher; callers use this to filter a mixed envelope stream.
    pub fn from_envelope(envelope: &SubscribeEnvelope) -> Option<Self> {
        Self::from_envelope_event(envelope).map(|(_, action)| action)
    }

    /// Like [`MessageActionBase::from_envelope`], keeping the added/removed flag.
    pub fn from_envelope_event(envelope: &SubscribeEnvelope) -> Option<(ActionEvent, Self)> {
        let payload: SubscribeActionPayload = match serde_json::from_str(envelope.payload.get()) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(channel = %envelope.channel, error = %e, "payload is not a message action");
                return None;
            }
        };
        let Some(publisher) = envelope.publisher() else {
            tracing::debug!(channel = %envelope.channel, "message action without publisher");
            return None;
        };

        let data = payload.data;
        let action = Self {
            action_type: data.action_type,
            action_value: data.action_value,
            action_timetoken: data.action_timetoken,
            message_timetoken: data.message_timetoken,
            publisher: publisher.to_owned(),
            channel: envelope.channel.clone(),
            subscription: envelope.subscription.clone(),
            published: Some(envelope.published()),
        };
        Some((payload.event, action))
    }

    /// Build from an action history result. History carries no subscription.
    pub fn from_history(payload: &HistoryActionPayload, channel: impl Into<String>) -> Self {
        Self::new(
            payload.action_type.clone(),
            payload.action_value.clone(),
            payload.action_timetoken,
            payload.message_timetoken,
            payload.uuid.clone(),
            channel,
        )
    }

    /// Flatten a message's action index into one action per leaf entry.
    ///
    /// Output is ordered by action type, then action value (the index is a
    /// `BTreeMap`), then the order entries appear in each leaf list.
    pub fn from_index(index: &RawActionIndex, message_timetoken: Timetoken, channel: &str) -> Vec<Self> {
        index
            .iter()
            .flat_map(|(action_type, values)| {
                values.iter().flat_map(move |(action_value, entries)| {
                    entries.iter().map(move |entry| {
                        Self::new(
                            action_type.as_str(),
                            action_value.as_str(),
                            entry.action_timetoken,
                            message_timetoken,
                            entry.uuid.as_str(),
                            channel,
                        )
                    })
                })
            })
            .collect()
    }
}

impl MessageAction for MessageActionBase {
    fn action_type(&self) -> &str {
        &self.action_type
    }

    fn action_value(&self) -> &str {
        &self.action_value
    }

    fn action_timetoken(&self) -> Timetoken {
        self.action_timetoken
    }

    fn message_timetoken(&self) -> Timetoken {
        self.message_timetoken
    }

    fn publisher(&self) -> &str {
        &self.publisher
    }

    fn channel(&self) -> &str {
        &self.channel
    }

    fn subscription(&self) -> Option<&str> {
        self.subscription.as_deref()
    }

    fn published(&self) -> Option<Timetoken> {
        self.published
    }

    fn from_action(other: &dyn MessageAction) -> Result<Self, ConversionError> {
        Ok(Self {
            action_type: other.action_type().to_owned(),
            action_value: other.action_value().to_owned(),
            action_timetoken: other.action_timetoken(),
            message_timetoken: other.message_timetoken(),
            publisher: other.publisher().to_owned(),
            channel: other.channel().to_owned(),
            subscription: other.subscription().map(str::to_owned),
            published: other.published(),
        })
    }
}
