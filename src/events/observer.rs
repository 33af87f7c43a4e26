//! Observer trait and the channel-backed observer.

use std::fmt;

use anyhow::anyhow;
use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::config::EVENT_CHANNEL_CAPACITY;
use crate::pipeline::Subdomain;

/// Outcome reported for one intelligence source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiStatus::Success => f.write_str("success"),
            ApiStatus::Error => f.write_str("error"),
        }
    }
}

/// Receives analysis events.
///
/// Every method defaults to a no-op so implementors only override what they
/// care about. Returned errors are logged by the bus and otherwise ignored.
pub trait AnalysisObserver: Send + Sync {
    /// A subdomain entered the pipeline for the first time in this run.
    fn on_subdomain_discovered(&self, _name: &str, _source: &str) -> anyhow::Result<()> {
        Ok(())
    }

    /// An intelligence source finished, successfully or not.
    fn on_api_notification(
        &self,
        _source: &str,
        _status: ApiStatus,
        _message: &str,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// A subdomain reached a terminal state.
    fn on_analysis_complete(&self, _subdomain: &Subdomain) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Owned form of an observer callback.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalysisEvent {
    SubdomainDiscovered {
        name: String,
        source: String,
    },
    ApiNotification {
        source: String,
        status: ApiStatus,
        message: String,
    },
    AnalysisComplete(Box<Subdomain>),
}

/// Forwards events into a bounded channel.
///
/// Sending never blocks the pipeline: when the channel is full or the
/// receiver is gone the event is dropped and reported as an error.
pub struct ChannelObserver {
    sender: mpsc::Sender<AnalysisEvent>,
}

impl ChannelObserver {
    /// Creates an observer and its receiving end with the default capacity.
    pub fn channel() -> (Self, mpsc::Receiver<AnalysisEvent>) {
        Self::with_capacity(EVENT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<AnalysisEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (ChannelObserver { sender }, receiver)
    }

    fn forward(&self, event: AnalysisEvent) -> anyhow::Result<()> {
        self.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => anyhow!("event channel is full, dropping event"),
            TrySendError::Closed(_) => anyhow!("event channel receiver was dropped"),
        })
    }
}

impl AnalysisObserver for ChannelObserver {
    fn on_subdomain_discovered(&self, name: &str, source: &str) -> anyhow::Result<()> {
        self.forward(AnalysisEvent::SubdomainDiscovered {
            name: name.to_string(),
            source: source.to_string(),
        })
    }

    fn on_api_notification(
        &self,
        source: &str,
        status: ApiStatus,
        message: &str,
    ) -> anyhow::Result<()> {
        self.forward(AnalysisEvent::ApiNotification {
            source: source.to_string(),
            status,
            message: message.to_string(),
        })
    }

    fn on_analysis_complete(&self, subdomain: &Subdomain) -> anyhow::Result<()> {
        self.forward(AnalysisEvent::AnalysisComplete(Box::new(subdomain.clone())))
    }
}
