//! # formcheck-ports
//!
//! Port traits for the formcheck hexagonal architecture.
//!
//! This crate defines the boundaries between the form layer and its
//! infrastructure: where log events go and where "today" comes from. It
//! depends only on `shared`.

pub mod clock;
pub mod logger;

pub use clock::*;
pub use logger::*;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
