//! Debounced snapshot persistence
//!
//! Listens to registry events and writes one snapshot once changes have been
//! quiet for the configured period.

use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use super::{save_snapshot, SnapshotStore};
use crate::state::{RoomEvent, RoomRegistry};
use crate::utils::errors::Result;

#[derive(Debug)]
pub struct PersistenceManager {
    store: SnapshotStore,
    registry: RoomRegistry,
    debounce: Duration,
    task_handle: Option<tokio::task::JoinHandle<()>>,
}

impl PersistenceManager {
    pub fn new(store: SnapshotStore, registry: RoomRegistry, debounce: Duration) -> Self {
        Self {
            store,
            registry,
            debounce,
            task_handle: None,
        }
    }

    /// Start the background save task
    pub fn start(&mut self) {
        if self.task_handle.is_some() {
            warn!("Persistence task is already running");
            return;
        }

        // Subscribe before spawning so no change made after `start` returns is missed
        let mut events = self.registry.subscribe();
        let store = self.store.clone();
        let registry = self.registry.clone();
        let debounce = self.debounce;

        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => trace_event(&event),
                    Err(RecvError::Lagged(skipped)) => debug!(skipped = skipped, "Persistence listener lagged"),
                    Err(RecvError::Closed) => break,
                }

                let closed = wait_for_quiet(&mut events, debounce).await;

                if let Err(e) = save_snapshot(&store, &registry).await {
                    error!(error = %e, "Snapshot save failed, will retry on next change");
                }

                if closed {
                    break;
                }
            }
        });

        self.task_handle = Some(handle);
        info!("Started persistence task with debounce {:?}", self.debounce);
    }

    /// Save immediately, independent of the background task
    pub async fn flush(&self) -> Result<usize> {
        save_snapshot(&self.store, &self.registry).await
    }

    /// Stop the background save task
    pub fn stop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
            info!("Stopped persistence task");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task_handle.is_some()
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }
}

impl Drop for PersistenceManager {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Wait until no event arrives for `debounce`. Returns true if the channel closed.
async fn wait_for_quiet(
    events: &mut tokio::sync::broadcast::Receiver<RoomEvent>,
    debounce: Duration,
) -> bool {
    loop {
        match tokio::time::timeout(debounce, events.recv()).await {
            Err(_elapsed) => return false,
            Ok(Ok(event)) => trace_event(&event),
            Ok(Err(RecvError::Lagged(_))) => {}
            Ok(Err(RecvError::Closed)) => return true,
        }
    }
}

fn trace_event(event: &RoomEvent) {
    debug!(event = event.name(), room_id = event.room_id(), revision = event.revision(), "Change pending save");
}
