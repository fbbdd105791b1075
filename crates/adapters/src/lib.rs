//! # stats-client-adapters
//!
//! Implementations of the metrics port: key-prefixing and tag decorators,
//! the grouped timer handle they rely on, a `tracing`-backed client, and an
//! inert client.
//! This crate depends on `ports` and `shared`.

pub mod multi_end;
pub mod noop;
pub mod prefix;
pub mod tagged;
pub mod tracing_stats;

pub use multi_end::MultiEnd;
pub use noop::NoopStats;
pub use prefix::PrefixClient;
pub use tagged::TaggedClient;
pub use tracing_stats::{EventLevel, TracingStats};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
