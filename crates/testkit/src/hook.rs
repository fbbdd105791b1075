//! Hook-driven stats client for tests.
//!
//! Each operation has an optional hook. A set hook receives the exact call
//! arguments; an unset hook makes the call a no-op (or returns the shared
//! no-op timer for `bump_time`). Tests install only the hooks they assert on.

use stats_client_ports::{StatsClient, TimerEnd, no_op_end};
use std::fmt;

/// Hook for `bump_avg`, `bump_sum`, and `bump_histogram`.
pub type BumpHook = Box<dyn Fn(&str, f64, &[&str]) + Send + Sync>;

/// Hook for `bump_time`.
pub type BumpTimeHook = Box<dyn Fn(&str, &[&str]) -> Box<dyn TimerEnd> + Send + Sync>;

/// Stats client whose behavior is supplied per operation.
#[derive(Default)]
pub struct HookClient {
    /// Called by `bump_avg` when set.
    pub bump_avg_hook: Option<BumpHook>,
    /// Called by `bump_sum` when set.
    pub bump_sum_hook: Option<BumpHook>,
    /// Called by `bump_histogram` when set.
    pub bump_histogram_hook: Option<BumpHook>,
    /// Called by `bump_time` when set; its handle is returned to the caller.
    pub bump_time_hook: Option<BumpTimeHook>,
}

impl HookClient {
    /// Create a client with no hooks installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the `bump_avg` hook.
    #[must_use]
    pub fn with_bump_avg_hook(
        mut self,
        hook: impl Fn(&str, f64, &[&str]) + Send + Sync + 'static,
    ) -> Self {
        self.bump_avg_hook = Some(Box::new(hook));
        self
    }

    /// Install the `bump_sum` hook.
    #[must_use]
    pub fn with_bump_sum_hook(
        mut self,
        hook: impl Fn(&str, f64, &[&str]) + Send + Sync + 'static,
    ) -> Self {
        self.bump_sum_hook = Some(Box::new(hook));
        self
    }

    /// Install the `bump_histogram` hook.
    #[must_use]
    pub fn with_bump_histogram_hook(
        mut self,
        hook: impl Fn(&str, f64, &[&str]) + Send + Sync + 'static,
    ) -> Self {
        self.bump_histogram_hook = Some(Box::new(hook));
        self
    }

    /// Install the `bump_time` hook.
    #[must_use]
    pub fn with_bump_time_hook(
        mut self,
        hook: impl Fn(&str, &[&str]) -> Box<dyn TimerEnd> + Send + Sync + 'static,
    ) -> Self {
        self.bump_time_hook = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for HookClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HookClient")
            .field("bump_avg_hook", &self.bump_avg_hook.is_some())
            .field("bump_sum_hook", &self.bump_sum_hook.is_some())
            .field("bump_histogram_hook", &self.bump_histogram_hook.is_some())
            .field("bump_time_hook", &self.bump_time_hook.is_some())
            .finish()
    }
}

impl StatsClient for HookClient {
    fn bump_avg(&self, key: &str, value: f64, tags: &[&str]) {
        if let Some(hook) = &self.bump_avg_hook {
            hook(key, value, tags);
        }
    }

    fn bump_sum(&self, key: &str, value: f64, tags: &[&str]) {
        if let Some(hook) = &self.bump_sum_hook {
            hook(key, value, tags);
        }
    }

    fn bump_histogram(&self, key: &str, value: f64, tags: &[&str]) {
        if let Some(hook) = &self.bump_histogram_hook {
            hook(key, value, tags);
        }
    }

    fn bump_time(&self, key: &str, tags: &[&str]) -> Box<dyn TimerEnd> {
        match &self.bump_time_hook {
            Some(hook) => hook(key, tags),
            None => no_op_end(),
        }
    }
}
