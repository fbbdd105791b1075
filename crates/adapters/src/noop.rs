//! Stats client that accepts every call and records nothing.

use stats_client_ports::{StatsClient, TimerEnd, no_op_end};

/// Inert backend. Timers are the shared no-op handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStats;

impl StatsClient for NoopStats {
    fn bump_avg(&self, _key: &str, _value: f64, _tags: &[&str]) {}

    fn bump_sum(&self, _key: &str, _value: f64, _tags: &[&str]) {}

    fn bump_histogram(&self, _key: &str, _value: f64, _tags: &[&str]) {}

    fn bump_time(&self, _key: &str, _tags: &[&str]) -> Box<dyn TimerEnd> {
        no_op_end()
    }
}
