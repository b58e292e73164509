//! Redis snapshot store
//!
//! Keeps the latest snapshot under a single key, `<prefix>rooms:snapshot`.

use redis::AsyncCommands;
use tracing::{debug, error};

use super::RoomSnapshot;
use crate::config::RedisConfig;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct RedisSnapshotStore {
    /// Redis connection manager
    connection_manager: redis::aio::ConnectionManager,
    /// Redis configuration
    config: RedisConfig,
}

impl RedisSnapshotStore {
    /// Create a new snapshot store instance
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    pub async fn save(&self, snapshot: &RoomSnapshot) -> Result<()> {
        let key = self.snapshot_key();
        let serialized = serde_json::to_string(snapshot)?;
        let mut conn = self.connection_manager.clone();

        let result = if self.config.ttl_seconds > 0 {
            conn.set_ex::<_, _, ()>(&key, serialized, self.config.ttl_seconds).await
        } else {
            conn.set::<_, _, ()>(&key, serialized).await
        };

        match result {
            Ok(()) => {
                debug!(key = %key, rooms = snapshot.rooms.len(), "Snapshot saved to Redis");
                Ok(())
            }
            Err(e) => {
                error!(key = %key, error = %e, "Failed to save snapshot to Redis");
                Err(e.into())
            }
        }
    }

    pub async fn load(&self) -> Result<Option<RoomSnapshot>> {
        let key = self.snapshot_key();
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;
        match serialized {
            Some(data) => {
                let snapshot: RoomSnapshot = serde_json::from_str(&data)?;
                debug!(key = %key, rooms = snapshot.rooms.len(), "Snapshot loaded from Redis");
                Ok(Some(snapshot))
            }
            None => {
                debug!(key = %key, "No snapshot found in Redis");
                Ok(None)
            }
        }
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn snapshot_key(&self) -> String {
        format!("{}rooms:snapshot", self.config.prefix)
    }
}

impl std::fmt::Debug for RedisSnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSnapshotStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
