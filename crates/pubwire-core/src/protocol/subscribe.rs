//! Subscribe envelope (JSON).
//!
//! The service uses single-letter keys. `d` is stored as `RawValue` so the
//! presence decoder and the action constructor can each parse it lazily.

use bytes::Bytes;
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;

use crate::error::Result;
use crate::timetoken::{Timetoken, TimetokenRegion};

/// Kind of payload an envelope carries (field `e`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Message,
    Signal,
    Object,
    MessageAction,
    File,
}

impl MessageKind {
    /// Map the wire discriminator; unknown values yield `None`.
    pub fn from_wire(e: Option<u8>) -> Option<Self> {
        match e {
            None | Some(0) => Some(MessageKind::Message),
            Some(1) => Some(MessageKind::Signal),
            Some(2) => Some(MessageKind::Object),
            Some(3) => Some(MessageKind::MessageAction),
            Some(4) => Some(MessageKind::File),
            Some(_) => None,
        }
    }
}

/// One envelope from a subscribe response.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeEnvelope {
    /// Shard identifier.
    #[serde(rename = "a", default)]
    pub shard: Option<String>,
    /// Subscription match (wildcard or channel group), when different from `c`.
    #[serde(rename = "b", default)]
    pub subscription: Option<String>,
    #[serde(rename = "c")]
    pub channel: String,
    /// Payload, stored as raw JSON (lazy parsing).
    #[serde(rename = "d")]
    pub payload: Box<RawValue>,
    /// Message type discriminator; see [`MessageKind`].
    #[serde(rename = "e", default)]
    pub message_type: Option<u8>,
    #[serde(rename = "f", default)]
    pub flags: u32,
    #[serde(rename = "i", default)]
    pub publisher: Option<String>,
    #[serde(rename = "k", default)]
    pub subscribe_key: Option<String>,
    #[serde(rename = "p")]
    pub publish_timetoken: TimetokenRegion,
    #[serde(rename = "u", default)]
    pub user_metadata: Option<Value>,
}

impl SubscribeEnvelope {
    pub fn kind(&self) -> Option<MessageKind> {
        MessageKind::from_wire(self.message_type)
    }

    /// Timetoken at which the service received the publish.
    pub fn published(&self) -> Timetoken {
        self.publish_timetoken.timetoken
    }

    /// Publisher id, treating an empty string as absent.
    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref().filter(|p| !p.is_empty())
    }
}

/// Body of a subscribe long-poll response.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeResponse {
    /// Cursor to resume the next long-poll from.
    #[serde(rename = "t")]
    pub cursor: TimetokenRegion,
    #[serde(rename = "m", default)]
    pub messages: Vec<SubscribeEnvelope>,
}

/// Decode a subscribe response from bytes.
pub fn decode_subscribe_response(buf: &[u8]) -> Result<SubscribeResponse> {
    Ok(serde_json::from_slice(buf)?)
}

/// Decode a single envelope, e.g. one replayed from a log.
pub fn decode_envelope(buf: Bytes) -> Result<SubscribeEnvelope> {
    Ok(serde_json::from_slice(&buf)?)
}
