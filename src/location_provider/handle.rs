use crate::app_config::Acquisition;
use crate::domain::{LocationState, LocationStatus};
use crate::location_provider::acquire;
use crate::platform::LocationPlatform;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span};

/// A running (or finished) acquisition. Dropping the handle cancels it.
#[derive(Debug)]
pub struct AcquisitionHandle {
    platform: Arc<dyn LocationPlatform>,
    settings: Acquisition,
    state_tx: Arc<watch::Sender<LocationState>>,
    state_rx: watch::Receiver<LocationState>,
    task: Option<JoinHandle<()>>,
}

#[derive(Error, Debug, PartialEq)]
pub enum RetryError {
    #[error("cannot retry an acquisition that is {0}")]
    NotRetryable(LocationStatus),
}

impl AcquisitionHandle {
    pub(super) fn spawn(platform: Arc<dyn LocationPlatform>, settings: Acquisition) -> Self {
        let (state_tx, state_rx) = watch::channel(LocationState::Pending);
        let mut handle = AcquisitionHandle {
            platform,
            settings,
            state_tx: Arc::new(state_tx),
            state_rx,
            task: None,
        };
        handle.run();
        handle
    }

    fn run(&mut self) {
        let platform = self.platform.clone();
        let settings = self.settings.clone();
        let state_tx = self.state_tx.clone();

        let task = tokio::spawn(
            async move {
                acquire(platform.as_ref(), &settings, &state_tx).await;
            }
            .instrument(info_span!("acquisition")),
        );
        self.task = Some(task);
    }

    pub fn state(&self) -> LocationState {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LocationState> {
        self.state_rx.clone()
    }

    /// Waits until the acquisition reached a terminal state or stopped running.
    pub async fn settled(&mut self) -> LocationState {
        let mut state_rx = self.subscribe();
        let finished = match self.task.as_mut() {
            Some(task) => tokio::select! {
                _ = state_rx.wait_for(LocationState::is_settled) => false,
                _ = task => true,
            },
            None => false,
        };

        if finished {
            self.task = None;
        }
        self.state()
    }

    /// Aborts the running step. The last published state is kept and late results are dropped.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!(status = %self.state_rx.borrow().status(), "🛑 Cancelled location acquisition");
        }
    }

    /// Starts over after the position could not be read.
    pub fn retry(&mut self) -> Result<(), RetryError> {
        let status = self.state_rx.borrow().status();
        if status != LocationStatus::FixUnavailable {
            return Err(RetryError::NotRetryable(status));
        }

        debug!("🔁 Retrying location acquisition");
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.state_tx.send_replace(LocationState::Pending);
        self.run();
        Ok(())
    }
}

impl Drop for AcquisitionHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
