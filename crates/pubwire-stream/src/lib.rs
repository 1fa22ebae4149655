//! pubwire stream library entry.
//!
//! This crate sits at the boundary between the subscribe engine and the core
//! model: it classifies raw envelopes, decodes them into typed events, and
//! fans the events out to registered listeners. Config, paging defaults and
//! counters live here so the core stays free of policy.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod dispatch;
pub mod obs;
pub mod paging;
pub mod router;
