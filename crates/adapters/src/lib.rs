//! # formcheck-adapters
//!
//! Adapter implementations for ports (logging, clock).
//! This crate depends on `ports` and `shared`.

pub mod clock;
pub mod log_sink;
pub mod logger;
pub mod tracing_logger;

pub use clock::{FixedClock, SystemClock};
pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink};
pub use logger::JsonLogger;
pub use tracing_logger::TracingLogger;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
