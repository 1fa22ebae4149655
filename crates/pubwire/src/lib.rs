//! Top-level facade crate for pubwire.
//!
//! Re-exports the core model and the stream layer so users can depend on a single crate.

pub mod core {
    pub use pubwire_core::*;
}

pub mod stream {
    pub use pubwire_stream::*;
}
