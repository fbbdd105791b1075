//! Timer handle that ends a group of timers together.

use stats_client_ports::TimerEnd;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Ordered group of timer handles ended as one.
///
/// Ending the group ends every held handle once, in the order they were
/// collected. A handle that panics is logged and skipped over; the rest
/// still end.
#[derive(Default)]
pub struct MultiEnd {
    ends: Vec<Box<dyn TimerEnd>>,
}

impl MultiEnd {
    /// Create an empty group. Ending it does nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self { ends: Vec::new() }
    }

    /// Create an empty group with room for `capacity` handles.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ends: Vec::with_capacity(capacity),
        }
    }

    /// Append a handle; it will end after every handle pushed before it.
    pub fn push(&mut self, end: Box<dyn TimerEnd>) {
        self.ends.push(end);
    }

    /// Number of held handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Whether the group holds no handles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }
}

impl FromIterator<Box<dyn TimerEnd>> for MultiEnd {
    fn from_iter<I: IntoIterator<Item = Box<dyn TimerEnd>>>(iter: I) -> Self {
        Self {
            ends: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for MultiEnd {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MultiEnd")
            .field("len", &self.ends.len())
            .finish()
    }
}

impl TimerEnd for MultiEnd {
    fn end(&self) {
        let total = self.ends.len();
        for (index, end) in self.ends.iter().enumerate() {
            if catch_unwind(AssertUnwindSafe(|| end.end())).is_err() {
                tracing::warn!(
                    index,
                    total,
                    "timer end panicked; ending the remaining timers"
                );
            }
        }
    }
}
