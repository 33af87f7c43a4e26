//! Analysis event fan-out.
//!
//! This module provides:
//! - The [`AnalysisObserver`] trait implemented by event consumers
//! - An [`EventBus`] delivering every event to every subscriber
//! - A [`ChannelObserver`] forwarding events into a bounded channel
//!
//! A subscriber that returns an error or panics is logged and skipped; the
//! remaining subscribers and the pipeline carry on.

mod bus;
mod observer;

// Re-export public API
pub use bus::EventBus;
pub use observer::{AnalysisEvent, AnalysisObserver, ApiStatus, ChannelObserver};
