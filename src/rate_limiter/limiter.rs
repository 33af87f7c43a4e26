//! Sliding-window rate limiter implementation.

use std::time::Duration;

use log::debug;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

use super::window::CompletionWindow;

/// Bounds how many throttled calls may complete inside any trailing window.
///
/// The window lives behind a `tokio::sync::Mutex`, which hands out the lock
/// in FIFO order. The lock is held across the wait, so callers are admitted
/// one at a time in arrival order.
pub struct RateLimiter {
    window: Mutex<CompletionWindow>,
    max_requests: usize,
    window_duration: Duration,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per `window_duration`.
    ///
    /// A `max_requests` of zero is treated as one.
    pub fn new(max_requests: usize, window_duration: Duration) -> Self {
        let max_requests = max_requests.max(1);
        RateLimiter {
            window: Mutex::new(CompletionWindow::new(max_requests, window_duration)),
            max_requests,
            window_duration,
        }
    }

    /// Waits until one more request fits in the window, then records it.
    ///
    /// Never fails.
    pub async fn throttle(&self) {
        let mut window = self.window.lock().await;
        window.purge(Instant::now());

        if window.len() >= self.max_requests {
            let wait = window.wait_for_oldest(Instant::now());
            debug!(
                "Rate limit reached ({} per {:?}), waiting {:?}",
                self.max_requests, self.window_duration, wait
            );
            sleep(wait).await;
            window.purge(Instant::now());
        }

        window.record(Instant::now());
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window_duration(&self) -> Duration {
        self.window_duration
    }
}
