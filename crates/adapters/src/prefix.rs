//! Stats client that fans each call out across several key prefixes.

use crate::multi_end::MultiEnd;
use stats_client_ports::{StatsClient, TimerEnd};
use std::fmt;
use std::sync::Arc;

/// Replays every call once per prefix against an inner client.
///
/// For prefixes `["svc.", "env.prod."]`, `bump_sum("requests", 3.0, tags)`
/// becomes `bump_sum("svc.requests", 3.0, tags)` followed by
/// `bump_sum("env.prod.requests", 3.0, tags)`. Values and tags are passed
/// through unchanged. With no prefixes nothing reaches the inner client.
#[derive(Clone)]
pub struct PrefixClient {
    prefixes: Arc<[String]>,
    inner: Arc<dyn StatsClient>,
}

impl PrefixClient {
    /// Wrap `inner`, replaying each call once per prefix in the given order.
    pub fn new<I, S>(prefixes: I, inner: Arc<dyn StatsClient>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            inner,
        }
    }

    /// Prefixes in fan-out order.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    fn keys<'a>(&'a self, key: &'a str) -> impl Iterator<Item = String> + 'a {
        self.prefixes.iter().map(move |prefix| format!("{prefix}{key}"))
    }
}

impl fmt::Debug for PrefixClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PrefixClient")
            .field("prefixes", &self.prefixes)
            .finish_non_exhaustive()
    }
}

impl StatsClient for PrefixClient {
    fn bump_avg(&self, key: &str, value: f64, tags: &[&str]) {
        for prefixed in self.keys(key) {
            self.inner.bump_avg(&prefixed, value, tags);
        }
    }

    fn bump_sum(&self, key: &str, value: f64, tags: &[&str]) {
        for prefixed in self.keys(key) {
            self.inner.bump_sum(&prefixed, value, tags);
        }
    }

    fn bump_histogram(&self, key: &str, value: f64, tags: &[&str]) {
        for prefixed in self.keys(key) {
            self.inner.bump_histogram(&prefixed, value, tags);
        }
    }

    fn bump_time(&self, key: &str, tags: &[&str]) -> Box<dyn TimerEnd> {
        let mut ends = MultiEnd::with_capacity(self.prefixes.len());
        for prefixed in self.keys(key) {
            ends.push(self.inner.bump_time(&prefixed, tags));
        }
        Box::new(ends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stats_client_testkit::{CallKind, RecordingClient};

    #[test]
    fn scenario_two_prefixes_sum() {
        let recorder = Arc::new(RecordingClient::new());
        let client = PrefixClient::new(["svc.", "env.prod."], recorder.clone());

        client.bump_sum("requests", 3.0, &[]);

        let calls = recorder.take();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].key, "svc.requests");
        assert_eq!(calls[1].key, "env.prod.requests");
        assert!(calls.iter().all(|call| call.kind == CallKind::Sum));
        assert!(calls.iter().all(|call| call.value == Some(3.0)));
    }

    #[test]
    fn empty_prefix_list_reaches_nothing() {
        let recorder = Arc::new(RecordingClient::new());
        let client = PrefixClient::new(Vec::<String>::new(), recorder.clone());

        client.bump_avg("a", 1.0, &["t"]);
        client.bump_sum("b", 1.0, &[]);
        client.bump_histogram("c", 1.0, &[]);
        client.bump_time("d", &[]).end();

        assert!(recorder.calls().is_empty());
        assert_eq!(recorder.ended(), 0);
    }

    #[test]
    fn timer_ends_every_prefixed_timer() {
        let recorder = Arc::new(RecordingClient::new());
        let client = PrefixClient::new(["a.", "b.", "c."], recorder.clone());

        let timer = client.bump_time("job", &["queue:default"]);
        assert_eq!(recorder.ended(), 0);
        timer.end();

        assert_eq!(recorder.keys(), vec!["a.job", "b.job", "c.job"]);
        assert_eq!(recorder.ended(), 3);
        assert!(
            recorder
                .calls()
                .iter()
                .all(|call| call.tags == vec!["queue:default"])
        );
    }

    #[test]
    fn prefixes_are_exposed_in_order() {
        let client = PrefixClient::new(["x.", "y."], Arc::new(RecordingClient::new()));
        assert_eq!(client.prefixes(), ["x.", "y."]);
        assert!(format!("{client:?}").contains("x."));
    }

    proptest! {
        #[test]
        fn fan_out_matches_prefix_list(
            prefixes in proptest::collection::vec("[a-z]{0,6}\\.", 1..6),
            key in "[a-z_]{1,12}",
            value in -1.0e6f64..1.0e6,
            tags in proptest::collection::vec("[a-z]{1,4}:[a-z0-9]{1,4}", 0..4),
        ) {
            let recorder = Arc::new(RecordingClient::new());
            let client = PrefixClient::new(prefixes.clone(), recorder.clone());
            let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();

            client.bump_histogram(&key, value, &tag_refs);

            let calls = recorder.take();
            prop_assert_eq!(calls.len(), prefixes.len());
            for (call, prefix) in calls.iter().zip(&prefixes) {
                prop_assert_eq!(&call.key, &format!("{prefix}{key}"));
                prop_assert_eq!(call.value, Some(value));
                prop_assert_eq!(&call.tags, &tags);
            }
        }
    }
}
