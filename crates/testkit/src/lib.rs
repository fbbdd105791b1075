//! # stats-client-testkit
//!
//! Test doubles for the metrics port.
//! This crate depends on `ports` only.

pub mod hook;
pub mod recording;

pub use hook::{BumpHook, BumpTimeHook, HookClient};
pub use recording::{CallKind, CountingEnd, RecordedCall, RecordingClient};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
