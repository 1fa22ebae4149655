//! pubwire core: data model, capability traits, and wire decoding.
//!
//! This crate defines the domain objects exchanged with the pub/sub service
//! (message actions, presence events, pagination cursors) and the decoding of
//! the subscribe envelope that carries them. It intentionally carries no
//! transport or runtime dependencies; the subscribe engine hands envelopes in
//! and gets typed values (or typed errors) back.
//!
//! # Capabilities
//! [`page::BoundedPage`], [`page::HashedPage`] and [`action::MessageAction`]
//! are implemented by the default `*Base` types and by any caller type. Any
//! conforming value can be rebuilt as another conforming type through
//! `transcode`, without a shared base type.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `PubwireError`/`ConversionError` so malformed envelopes never
//! crash the subscribe loop.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod action;
pub mod capability;
pub mod error;
pub mod page;
pub mod presence;
pub mod protocol;
pub mod response;
pub mod timetoken;

/// Shared result type.
pub use error::{ConversionError, ErrorCode, PubwireError, Result};
pub use timetoken::Timetoken;
