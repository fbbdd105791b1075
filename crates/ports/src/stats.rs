//! Metrics boundary contract (averages, sums, histograms, timers).

use std::sync::Arc;

/// Timer handle returned by [`StatsClient::bump_time`].
///
/// The caller that started the timer owns the handle and should call
/// [`TimerEnd::end`] once. Ending more than once is not forbidden; what a
/// second call records is up to the backend. Dropping the handle without
/// ending it records nothing.
pub trait TimerEnd: Send + Sync {
    /// Stop the timer and let the backend record the elapsed duration.
    fn end(&self);
}

/// Boundary contract for recording metrics.
///
/// Every operation is fire-and-forget: backends swallow (or separately log)
/// their own failures so that recording a metric never changes the control
/// flow of the instrumented code. Tags are passed through in caller order.
pub trait StatsClient: Send + Sync {
    /// Record an observation to be averaged under `key`.
    fn bump_avg(&self, key: &str, value: f64, tags: &[&str]);

    /// Record a value to be summed under `key`.
    fn bump_sum(&self, key: &str, value: f64, tags: &[&str]);

    /// Record a value into the distribution kept under `key`.
    fn bump_histogram(&self, key: &str, value: f64, tags: &[&str]);

    /// Start a timer for `key`.
    ///
    /// The time elapsed until the returned handle is ended is recorded as a
    /// histogram-style observation. A convenient pattern for timing a scope:
    ///
    /// ```
    /// use stats_client_ports::{StatsClient, TimerEnd};
    ///
    /// fn handle_request(stats: &dyn StatsClient) {
    ///     let timer = stats.bump_time("request.duration", &["route:/health"]);
    ///     // ... do the work ...
    ///     timer.end();
    /// }
    /// ```
    fn bump_time(&self, key: &str, tags: &[&str]) -> Box<dyn TimerEnd>;
}

impl<T: StatsClient + ?Sized> StatsClient for &T {
    fn bump_avg(&self, key: &str, value: f64, tags: &[&str]) {
        (**self).bump_avg(key, value, tags);
    }

    fn bump_sum(&self, key: &str, value: f64, tags: &[&str]) {
        (**self).bump_sum(key, value, tags);
    }

    fn bump_histogram(&self, key: &str, value: f64, tags: &[&str]) {
        (**self).bump_histogram(key, value, tags);
    }

    fn bump_time(&self, key: &str, tags: &[&str]) -> Box<dyn TimerEnd> {
        (**self).bump_time(key, tags)
    }
}

impl<T: StatsClient + ?Sized> StatsClient for Arc<T> {
    fn bump_avg(&self, key: &str, value: f64, tags: &[&str]) {
        (**self).bump_avg(key, value, tags);
    }

    fn bump_sum(&self, key: &str, value: f64, tags: &[&str]) {
        (**self).bump_sum(key, value, tags);
    }

    fn bump_histogram(&self, key: &str, value: f64, tags: &[&str]) {
        (**self).bump_histogram(key, value, tags);
    }

    fn bump_time(&self, key: &str, tags: &[&str]) -> Box<dyn TimerEnd> {
        (**self).bump_time(key, tags)
    }
}

impl<T: StatsClient + ?Sized> StatsClient for Box<T> {
    fn bump_avg(&self, key: &str, value: f64, tags: &[&str]) {
        (**self).bump_avg(key, value, tags);
    }

    fn bump_sum(&self, key: &str, value: f64, tags: &[&str]) {
        (**self).bump_sum(key, value, tags);
    }

    fn bump_histogram(&self, key: &str, value: f64, tags: &[&str]) {
        (**self).bump_histogram(key, value, tags);
    }

    fn bump_time(&self, key: &str, tags: &[&str]) -> Box<dyn TimerEnd> {
        (**self).bump_time(key, tags)
    }
}

impl<T: TimerEnd + ?Sized> TimerEnd for Box<T> {
    fn end(&self) {
        (**self).end();
    }
}

/// Timer handle that records nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoOpEnd;

impl TimerEnd for NoOpEnd {
    fn end(&self) {}
}

/// Shared inert timer handle, valid to end any number of times.
pub static NO_OP_END: NoOpEnd = NoOpEnd;

/// Box the shared inert handle. `NoOpEnd` is zero-sized, so this never allocates.
#[must_use]
pub fn no_op_end() -> Box<dyn TimerEnd> {
    Box::new(NO_OP_END)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct KeyLog {
        keys: Mutex<Vec<String>>,
    }

    impl KeyLog {
        fn push(&self, key: &str) {
            self.keys.lock().expect("keys lock").push(key.to_string());
        }
    }

    impl StatsClient for KeyLog {
        fn bump_avg(&self, key: &str, _value: f64, _tags: &[&str]) {
            self.push(key);
        }

        fn bump_sum(&self, key: &str, _value: f64, _tags: &[&str]) {
            self.push(key);
        }

        fn bump_histogram(&self, key: &str, _value: f64, _tags: &[&str]) {
            self.push(key);
        }

        fn bump_time(&self, key: &str, _tags: &[&str]) -> Box<dyn TimerEnd> {
            self.push(key);
            no_op_end()
        }
    }

    #[test]
    fn no_op_end_is_reusable() {
        for _ in 0..3 {
            NO_OP_END.end();
        }
        let boxed = no_op_end();
        boxed.end();
        boxed.end();
    }

    #[test]
    fn references_and_smart_pointers_forward_to_inner_client() {
        let log = Arc::new(KeyLog::default());
        let shared: Arc<dyn StatsClient> = log.clone();
        shared.bump_avg("a", 1.0, &[]);
        shared.bump_time("t", &[]).end();

        let boxed: Box<dyn StatsClient> = Box::new(Arc::clone(&log));
        boxed.bump_sum("b", 2.0, &[]);
        boxed.bump_histogram("c", 3.0, &[]);

        let borrowed: Box<dyn StatsClient + '_> = Box::new(&*log);
        borrowed.bump_avg("d", 4.0, &[]);

        let keys = log.keys.lock().expect("keys lock").clone();
        assert_eq!(keys, vec!["a", "t", "b", "c", "d"]);
    }
}
