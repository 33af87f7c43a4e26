//! Sliding window of request completion timestamps.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

/// Completion timestamps inside the trailing window, oldest first.
#[derive(Debug)]
pub(crate) struct CompletionWindow {
    completions: VecDeque<Instant>,
    window_duration: Duration,
}

impl CompletionWindow {
    pub(crate) fn new(capacity: usize, window_duration: Duration) -> Self {
        CompletionWindow {
            completions: VecDeque::with_capacity(capacity),
            window_duration,
        }
    }

    /// Drops every timestamp that has aged out of the window at `now`.
    pub(crate) fn purge(&mut self, now: Instant) {
        while let Some(front) = self.completions.front() {
            if now.duration_since(*front) >= self.window_duration {
                self.completions.pop_front();
            } else {
                break;
            }
        }
    }

    pub(crate) fn record(&mut self, at: Instant) {
        self.completions.push_back(at);
    }

    pub(crate) fn len(&self) -> usize {
        self.completions.len()
    }

    /// How long until the oldest entry leaves the window, measured from `now`.
    pub(crate) fn wait_for_oldest(&self, now: Instant) -> Duration {
        self.completions
            .front()
            .map(|oldest| (*oldest + self.window_duration).saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }
}
