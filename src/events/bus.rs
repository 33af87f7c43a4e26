//! Multi-subscriber event bus.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

use log::warn;

use crate::pipeline::Subdomain;

use super::observer::{AnalysisObserver, ApiStatus};

/// Delivers each event to every subscriber in subscription order.
///
/// Cloning yields a handle to the same subscriber list.
#[derive(Clone, Default)]
pub struct EventBus {
    observers: Arc<RwLock<Vec<Arc<dyn AnalysisObserver>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: Arc<dyn AnalysisObserver>) {
        match self.observers.write() {
            Ok(mut observers) => observers.push(observer),
            Err(poisoned) => poisoned.into_inner().push(observer),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.current().len()
    }

    pub fn emit_subdomain_discovered(&self, name: &str, source: &str) {
        self.dispatch("subdomain discovered", |o| o.on_subdomain_discovered(name, source));
    }

    pub fn emit_api_notification(&self, source: &str, status: ApiStatus, message: &str) {
        self.dispatch("API notification", |o| o.on_api_notification(source, status, message));
    }

    pub fn emit_analysis_complete(&self, subdomain: &Subdomain) {
        self.dispatch("analysis complete", |o| o.on_analysis_complete(subdomain));
    }

    fn current(&self) -> Vec<Arc<dyn AnalysisObserver>> {
        match self.observers.read() {
            Ok(observers) => observers.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    // Subscribers run outside the lock so one may subscribe another.
    fn dispatch<F>(&self, event: &str, deliver: F)
    where
        F: Fn(&dyn AnalysisObserver) -> anyhow::Result<()>,
    {
        for observer in self.current() {
            match catch_unwind(AssertUnwindSafe(|| deliver(observer.as_ref()))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Observer failed handling {event} event: {e:#}"),
                Err(_) => warn!("Observer panicked handling {event} event"),
            }
        }
    }
}
