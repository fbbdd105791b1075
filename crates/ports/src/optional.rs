//! Helpers for components whose stats client is optional.
//!
//! A component can keep an `Option<Arc<dyn StatsClient>>` field and call
//! these unconditionally with `field.as_deref()`. An absent client turns
//! every call into a silent no-op.

use crate::stats::{StatsClient, TimerEnd, no_op_end};

/// Calls [`StatsClient::bump_avg`] when a client is present.
pub fn bump_avg(client: Option<&dyn StatsClient>, key: &str, value: f64, tags: &[&str]) {
    if let Some(client) = client {
        client.bump_avg(key, value, tags);
    }
}

/// Calls [`StatsClient::bump_sum`] when a client is present.
pub fn bump_sum(client: Option<&dyn StatsClient>, key: &str, value: f64, tags: &[&str]) {
    if let Some(client) = client {
        client.bump_sum(key, value, tags);
    }
}

/// Calls [`StatsClient::bump_histogram`] when a client is present.
pub fn bump_histogram(client: Option<&dyn StatsClient>, key: &str, value: f64, tags: &[&str]) {
    if let Some(client) = client {
        client.bump_histogram(key, value, tags);
    }
}

/// Calls [`StatsClient::bump_time`] when a client is present.
///
/// Without a client this still returns a valid handle: the shared no-op
/// timer, so callers can end it unconditionally.
#[must_use]
pub fn bump_time(client: Option<&dyn StatsClient>, key: &str, tags: &[&str]) -> Box<dyn TimerEnd> {
    client.map_or_else(no_op_end, |client| client.bump_time(key, tags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn absent_client_is_inert() {
        bump_avg(None, "x", 1.0, &[]);
        bump_sum(None, "x", 1.0, &["a:b"]);
        bump_histogram(None, "x", 1.0, &[]);
        let timer = bump_time(None, "x", &[]);
        timer.end();
        timer.end();
    }

    #[test]
    fn optional_field_pattern_compiles_without_checks() {
        struct Component {
            stats: Option<Arc<dyn StatsClient>>,
        }

        let component = Component { stats: None };
        bump_sum(component.stats.as_deref(), "component.calls", 1.0, &[]);
        bump_time(component.stats.as_deref(), "component.duration", &[]).end();
    }
}
