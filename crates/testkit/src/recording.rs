//! Recording doubles: a client that keeps every call and a counting timer.

use stats_client_ports::{StatsClient, TimerEnd};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Which operation produced a [`RecordedCall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `bump_avg`.
    Avg,
    /// `bump_sum`.
    Sum,
    /// `bump_histogram`.
    Histogram,
    /// `bump_time`.
    Time,
}

/// One call observed by [`RecordingClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Operation that was called.
    pub kind: CallKind,
    /// Metric key as received.
    pub key: String,
    /// Value as received; `None` for `bump_time`.
    pub value: Option<f64>,
    /// Tags as received, in order.
    pub tags: Vec<String>,
}

impl RecordedCall {
    fn new(kind: CallKind, key: &str, value: Option<f64>, tags: &[&str]) -> Self {
        Self {
            kind,
            key: key.to_string(),
            value,
            tags: tags.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Stats client that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<RecordedCall>>,
    ended: CountingEnd,
}

impl RecordingClient {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }

    /// Drain the recorded calls.
    pub fn take(&self) -> Vec<RecordedCall> {
        std::mem::take(&mut *self.lock())
    }

    /// Keys of the recorded calls, in order.
    pub fn keys(&self) -> Vec<String> {
        self.lock().iter().map(|call| call.key.clone()).collect()
    }

    /// How many timers handed out by this recorder have been ended.
    pub fn ended(&self) -> usize {
        self.ended.count()
    }

    fn record(&self, call: RecordedCall) {
        self.lock().push(call);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StatsClient for RecordingClient {
    fn bump_avg(&self, key: &str, value: f64, tags: &[&str]) {
        self.record(RecordedCall::new(CallKind::Avg, key, Some(value), tags));
    }

    fn bump_sum(&self, key: &str, value: f64, tags: &[&str]) {
        self.record(RecordedCall::new(CallKind::Sum, key, Some(value), tags));
    }

    fn bump_histogram(&self, key: &str, value: f64, tags: &[&str]) {
        self.record(RecordedCall::new(
            CallKind::Histogram,
            key,
            Some(value),
            tags,
        ));
    }

    fn bump_time(&self, key: &str, tags: &[&str]) -> Box<dyn TimerEnd> {
        self.record(RecordedCall::new(CallKind::Time, key, None, tags));
        Box::new(self.ended.clone())
    }
}

/// Timer handle that counts how often it was ended.
///
/// Clones share the counter (and the order log, when one is attached), so a
/// test can keep one clone and hand the other out as a boxed handle.
#[derive(Debug, Clone, Default)]
pub struct CountingEnd {
    count: Arc<AtomicUsize>,
    label: Option<String>,
    log: Option<Arc<Mutex<Vec<String>>>>,
}

impl CountingEnd {
    /// Create a handle with a fresh counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle that also appends `label` to `log` every time it ends.
    pub fn with_log(label: impl Into<String>, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            label: Some(label.into()),
            log: Some(log),
        }
    }

    /// Number of times any clone of this handle was ended.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl TimerEnd for CountingEnd {
    fn end(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
        if let (Some(label), Some(log)) = (&self.label, &self.log) {
            log.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(label.clone());
        }
    }
}
