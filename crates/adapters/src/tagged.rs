//! Stats client that appends base tags to every call.

use stats_client_ports::{StatsClient, TimerEnd};
use std::fmt;
use std::sync::Arc;

/// Appends a fixed list of tags after the caller's tags.
///
/// Caller tags keep their order and come first. With no base tags the call
/// is forwarded untouched.
#[derive(Clone)]
pub struct TaggedClient {
    inner: Arc<dyn StatsClient>,
    tags: Arc<[String]>,
}

impl TaggedClient {
    /// Wrap a client with base tags.
    pub fn new<I, S>(inner: Arc<dyn StatsClient>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Base tags appended to every call.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    fn with_tags<R>(&self, tags: &[&str], op: impl FnOnce(&[&str]) -> R) -> R {
        if self.tags.is_empty() {
            return op(tags);
        }
        let mut merged = Vec::with_capacity(tags.len() + self.tags.len());
        merged.extend_from_slice(tags);
        merged.extend(self.tags.iter().map(String::as_str));
        op(&merged)
    }
}

impl fmt::Debug for TaggedClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TaggedClient")
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

impl StatsClient for TaggedClient {
    fn bump_avg(&self, key: &str, value: f64, tags: &[&str]) {
        self.with_tags(tags, |merged| self.inner.bump_avg(key, value, merged));
    }

    fn bump_sum(&self, key: &str, value: f64, tags: &[&str]) {
        self.with_tags(tags, |merged| self.inner.bump_sum(key, value, merged));
    }

    fn bump_histogram(&self, key: &str, value: f64, tags: &[&str]) {
        self.with_tags(tags, |merged| {
            self.inner.bump_histogram(key, value, merged);
        });
    }

    fn bump_time(&self, key: &str, tags: &[&str]) -> Box<dyn TimerEnd> {
        self.with_tags(tags, |merged| self.inner.bump_time(key, merged))
    }
}
