//! Stats backend that reports every bump as a `tracing` event.
//!
//! Events use target `stats` with fields `kind`, `key`, `value` (or
//! `elapsed_ms` for timers) and `tags`. Nothing is aggregated; the
//! subscriber installed by the application decides where events go.
//! Tag values whose name is a known credential name (`api_key:...`,
//! `token:...`) are redacted in the event only.

use stats_client_ports::{StatsClient, TimerEnd};
use stats_client_shared::{REDACTED, is_secret_tag_name};
use std::time::Instant;

/// Level at which [`TracingStats`] emits events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventLevel {
    /// `TRACE`.
    Trace,
    /// `DEBUG`.
    #[default]
    Debug,
    /// `INFO`.
    Info,
    /// `WARN`.
    Warn,
    /// `ERROR`.
    Error,
}

macro_rules! emit_at {
    ($level:expr, $($fields:tt)+) => {
        match $level {
            EventLevel::Trace => tracing::trace!(target: "stats", $($fields)+),
            EventLevel::Debug => tracing::debug!(target: "stats", $($fields)+),
            EventLevel::Info => tracing::info!(target: "stats", $($fields)+),
            EventLevel::Warn => tracing::warn!(target: "stats", $($fields)+),
            EventLevel::Error => tracing::error!(target: "stats", $($fields)+),
        }
    };
}

/// Stats client backed by the `tracing` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStats {
    level: EventLevel,
}

impl TracingStats {
    /// Create a backend emitting at `DEBUG`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: EventLevel::Debug,
        }
    }

    /// Set the event level.
    #[must_use]
    pub const fn with_level(mut self, level: EventLevel) -> Self {
        self.level = level;
        self
    }

    /// Level events are emitted at.
    #[must_use]
    pub const fn level(&self) -> EventLevel {
        self.level
    }

    fn bump(&self, kind: &'static str, key: &str, value: f64, tags: &[&str]) {
        let tags = display_tags(tags.iter().copied());
        emit_at!(self.level, kind, key, value, tags = ?tags, "stats bump");
    }
}

impl StatsClient for TracingStats {
    fn bump_avg(&self, key: &str, value: f64, tags: &[&str]) {
        self.bump("avg", key, value, tags);
    }

    fn bump_sum(&self, key: &str, value: f64, tags: &[&str]) {
        self.bump("sum", key, value, tags);
    }

    fn bump_histogram(&self, key: &str, value: f64, tags: &[&str]) {
        self.bump("histogram", key, value, tags);
    }

    fn bump_time(&self, key: &str, tags: &[&str]) -> Box<dyn TimerEnd> {
        Box::new(TracingTimer {
            level: self.level,
            key: key.into(),
            tags: display_tags(tags.iter().copied()),
            started_at: Instant::now(),
        })
    }
}

struct TracingTimer {
    level: EventLevel,
    key: Box<str>,
    tags: Vec<String>,
    started_at: Instant,
}

impl TimerEnd for TracingTimer {
    fn end(&self) {
        let elapsed_ms = self.started_at.elapsed().as_secs_f64() * 1_000.0;
        let key: &str = &self.key;
        emit_at!(
            self.level,
            kind = "time",
            key,
            elapsed_ms,
            tags = ?self.tags,
            "stats timer ended"
        );
    }
}

fn display_tags<'a>(tags: impl Iterator<Item = &'a str>) -> Vec<String> {
    tags.map(|tag| match tag.split_once(':') {
        Some((name, _)) if is_secret_tag_name(name) => format!("{name}:{REDACTED}"),
        _ => tag.to_string(),
    })
    .collect()
}
