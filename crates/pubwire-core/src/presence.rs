//! Presence events delivered on `<channel>-pnpres`.
//!
//! One wire schema covers five event kinds. Decoding is two-step: serde reads
//! every field as optional (type mismatches still fail), then
//! [`TryFrom<PresenceWire>`] rejects missing required fields and back-fills
//! the documented defaults. Keeping the defaulting explicit makes it testable
//! on its own.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PubwireError, Result};
use crate::timetoken::Timetoken;

/// Type of presence change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresenceAction {
    /// A user joined the channel.
    Join,
    /// A user explicitly left the channel.
    Leave,
    /// A user timed out and was removed.
    Timeout,
    /// A user updated their state.
    StateChange,
    /// Several changes batched into one event (see the delta lists).
    Interval,
}

impl PresenceAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PresenceAction::Join => "join",
            PresenceAction::Leave => "leave",
            PresenceAction::Timeout => "timeout",
            PresenceAction::StateChange => "state-change",
            PresenceAction::Interval => "interval",
        }
    }
}

impl fmt::Display for PresenceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presence envelope exactly as transmitted; nothing is required at this stage.
#[derive(Debug, Default, Deserialize)]
pub struct PresenceWire {
    #[serde(default)]
    pub action: Option<PresenceAction>,
    #[serde(default)]
    pub occupancy: Option<u32>,
    #[serde(default)]
    pub timestamp: Option<Timetoken>,
    #[serde(default)]
    pub here_now_refresh: Option<bool>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub join: Option<Vec<String>>,
    #[serde(default)]
    pub leave: Option<Vec<String>>,
    #[serde(default)]
    pub timeout: Option<Vec<String>>,
}

/// Decoded presence change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PresenceWire")]
pub struct PresenceEvent {
    pub action: PresenceAction,
    pub timestamp: Timetoken,
    pub occupancy: u32,
    /// Set when the occupancy list should be re-fetched with a here-now call.
    #[serde(rename = "here_now_refresh")]
    pub refresh_here_now: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Per-user state, meaningful for `state-change`.
    #[serde(rename = "data", skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    pub join: Vec<String>,
    pub leave: Vec<String>,
    pub timeout: Vec<String>,
}

impl TryFrom<PresenceWire> for PresenceEvent {
    type Error = PubwireError;

    fn try_from(wire: PresenceWire) -> Result<Self> {
        Ok(Self {
            action: wire.action.ok_or_else(|| missing("action"))?,
            timestamp: wire.timestamp.ok_or_else(|| missing("timestamp"))?,
            occupancy: wire.occupancy.ok_or_else(|| missing("occupancy"))?,
            refresh_here_now: wire.here_now_refresh.unwrap_or(false),
            uuid: wire.uuid,
            state: wire.data,
            join: wire.join.unwrap_or_default(),
            leave: wire.leave.unwrap_or_default(),
            timeout: wire.timeout.unwrap_or_default(),
        })
    }
}

fn missing(field: &str) -> PubwireError {
    PubwireError::Decode(format!("presence event missing field `{field}`"))
}

impl PresenceEvent {
    pub fn is_interval(&self) -> bool {
        self.action == PresenceAction::Interval
    }

    /// Membership changes as `(kind, uuid)`, joins first, then leaves, then timeouts.
    pub fn deltas(&self) -> impl Iterator<Item = (PresenceAction, &str)> + '_ {
        tagged(PresenceAction::Join, &self.join)
            .chain(tagged(PresenceAction::Leave, &self.leave))
            .chain(tagged(PresenceAction::Timeout, &self.timeout))
    }
}

fn tagged(action: PresenceAction, ids: &[String]) -> impl Iterator<Item = (PresenceAction, &str)> + '_ {
    ids.iter().map(move |id| (action, id.as_str()))
}

/// Decode a presence envelope payload from bytes.
pub fn decode_presence(buf: &[u8]) -> Result<PresenceEvent> {
    let wire: PresenceWire = serde_json::from_slice(buf)?;
    PresenceEvent::try_from(wire)
}

pub fn decode_presence_str(s: &str) -> Result<PresenceEvent> {
    decode_presence(s.as_bytes())
}

/// Encode back to the wire shape. Delta lists and the refresh flag are always present.
pub fn encode_presence(event: &PresenceEvent) -> Result<String> {
    serde_json::to_string(event).map_err(|e| PubwireError::Internal(format!("presence encode failed: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn defaults_are_back_filled() {
        let wire = PresenceWire {
            action: Some(PresenceAction::Join),
            occupancy: Some(1),
            timestamp: Some(1_700_000_000),
            ..Default::default()
        };
        let ev = PresenceEvent::try_from(wire).unwrap();
        assert!(!ev.refresh_here_now);
        assert!(ev.join.is_empty() && ev.leave.is_empty() && ev.timeout.is_empty());
        assert_eq!(ev.uuid, None);
        assert_eq!(ev.state, None);
    }

    #[test]
    fn deltas_walk_all_lists() {
        let ev = decode_presence_str(
            r#"{"action":"interval","occupancy":2,"timestamp":1,"join":["a","b"],"timeout":["c"]}"#,
        )
        .unwrap();
        let d: Vec<_> = ev.deltas().collect();
        assert_eq!(
            d,
            vec![
                (PresenceAction::Join, "a"),
                (PresenceAction::Join, "b"),
                (PresenceAction::Timeout, "c"),
            ]
        );
    }
}
