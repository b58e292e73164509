//! Snapshot persistence
//!
//! The room collection is persisted as a whole, best effort, outside the
//! registry's contract: a failed save is logged and retried with the next
//! change, never reported back to whoever mutated the rooms.

pub mod file;
pub mod manager;
pub mod redis;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{Settings, StorageBackend};
use crate::rooms::RoomCollection;
use crate::state::RoomRegistry;
use crate::utils::errors::{DaloError, Result};
use crate::utils::logging;

pub use file::FileSnapshotStore;
pub use manager::PersistenceManager;
pub use self::redis::RedisSnapshotStore;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of the whole room collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub rooms: RoomCollection,
}

impl RoomSnapshot {
    pub fn new(rooms: RoomCollection) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            rooms,
        }
    }
}

/// In-process store, used when persistence is disabled and in tests
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<Option<String>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, snapshot: &RoomSnapshot) -> Result<()> {
        let serialized = serde_json::to_string(snapshot)?;
        *self.slot.lock().map_err(|_| poisoned())? = Some(serialized);
        *self.saves.lock().map_err(|_| poisoned())? += 1;
        Ok(())
    }

    pub fn load(&self) -> Result<Option<RoomSnapshot>> {
        let slot = self.slot.lock().map_err(|_| poisoned())?;
        match slot.as_deref() {
            Some(data) => Ok(Some(serde_json::from_str(data)?)),
            None => Ok(None),
        }
    }

    /// Number of snapshots written so far
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|saves| *saves).unwrap_or_default()
    }
}

fn poisoned() -> DaloError {
    DaloError::Persistence("Memory snapshot store lock poisoned".to_string())
}

#[derive(Debug, Clone)]
pub enum SnapshotStore {
    File(FileSnapshotStore),
    Redis(RedisSnapshotStore),
    Memory(MemorySnapshotStore),
}

impl SnapshotStore {
    /// Build the store selected in configuration
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let store = match settings.persistence.backend {
            StorageBackend::File => {
                SnapshotStore::File(FileSnapshotStore::new(&settings.persistence.file_path))
            }
            StorageBackend::Redis => {
                let store = RedisSnapshotStore::new(settings.redis.clone()).await?;
                store.test_connection().await?;
                SnapshotStore::Redis(store)
            }
            StorageBackend::Memory => SnapshotStore::Memory(MemorySnapshotStore::new()),
        };

        info!(backend = %store.backend(), "Snapshot store ready");
        Ok(store)
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            SnapshotStore::File(_) => StorageBackend::File,
            SnapshotStore::Redis(_) => StorageBackend::Redis,
            SnapshotStore::Memory(_) => StorageBackend::Memory,
        }
    }

    pub async fn save(&self, snapshot: &RoomSnapshot) -> Result<()> {
        match self {
            SnapshotStore::File(store) => store.save(snapshot).await,
            SnapshotStore::Redis(store) => store.save(snapshot).await,
            SnapshotStore::Memory(store) => store.save(snapshot),
        }
    }

    pub async fn load(&self) -> Result<Option<RoomSnapshot>> {
        let snapshot = match self {
            SnapshotStore::File(store) => store.load().await?,
            SnapshotStore::Redis(store) => store.load().await?,
            SnapshotStore::Memory(store) => store.load()?,
        };

        if let Some(snapshot) = &snapshot {
            if snapshot.version > SNAPSHOT_VERSION {
                return Err(DaloError::Persistence(format!(
                    "Snapshot version {} is newer than supported version {}",
                    snapshot.version, SNAPSHOT_VERSION
                )));
            }
        }

        Ok(snapshot)
    }
}

/// Save the registry's current collection, returning the number of rooms written
pub async fn save_snapshot(store: &SnapshotStore, registry: &RoomRegistry) -> Result<usize> {
    let snapshot = RoomSnapshot::new(registry.snapshot().await);
    let room_count = snapshot.rooms.len();
    let backend = store.backend().to_string();

    match store.save(&snapshot).await {
        Ok(()) => {
            logging::log_persistence(&backend, "save", room_count, true);
            Ok(room_count)
        }
        Err(e) => {
            logging::log_persistence(&backend, "save", room_count, false);
            Err(e)
        }
    }
}

/// Build a registry from the latest snapshot, or an empty one if none exists
pub async fn load_registry(store: &SnapshotStore) -> Result<RoomRegistry> {
    let backend = store.backend().to_string();
    let rooms = match store.load().await? {
        Some(snapshot) => {
            logging::log_persistence(&backend, "load", snapshot.rooms.len(), true);
            snapshot.rooms
        }
        None => {
            info!(backend = %backend, "No snapshot found, starting with an empty room list");
            RoomCollection::new()
        }
    };

    Ok(RoomRegistry::new(rooms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateClassroomRequest, User};
    use crate::rooms::factory;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = SnapshotStore::Memory(MemorySnapshotStore::new());
        assert!(store.load().await.unwrap().is_none());

        let registry = RoomRegistry::default();
        let request = CreateClassroomRequest { name: "Math".to_string(), capacity: 4, is_auto: true };
        registry
            .insert_room(factory::new_classroom(&request, &User::new("owner", "Owner")).unwrap())
            .await
            .unwrap();

        assert_eq!(save_snapshot(&store, &registry).await.unwrap(), 1);

        let restored = load_registry(&store).await.unwrap();
        assert_eq!(restored.snapshot().await, registry.snapshot().await);
    }

    #[tokio::test]
    async fn test_rejects_newer_snapshot_version() {
        let memory = MemorySnapshotStore::new();
        let mut snapshot = RoomSnapshot::new(RoomCollection::new());
        snapshot.version = SNAPSHOT_VERSION + 1;
        memory.save(&snapshot).unwrap();

        let store = SnapshotStore::Memory(memory);
        assert!(matches!(store.load().await, Err(DaloError::Persistence(_))));
    }
}
