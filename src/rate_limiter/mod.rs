//! Outbound DNS query throttling.
//!
//! A sliding-window limiter over completion timestamps: at most
//! `max_requests` calls complete inside any trailing `window`. Callers queue
//! in arrival order; the limiter never rejects, it only delays.

mod limiter;
mod window;

pub use limiter::RateLimiter;
