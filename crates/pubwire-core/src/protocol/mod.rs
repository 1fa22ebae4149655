//! Subscribe wire formats.
//!
//! The subscribe engine receives batches of envelopes from the long-poll
//! endpoint. Each envelope carries a channel, an optional subscription match
//! and a payload whose shape depends on the event kind. Payloads are kept as
//! `RawValue` so each consumer parses only the shape it understands.
//!
//! Decoders here never panic; malformed input surfaces as `PubwireError`.

pub mod subscribe;
