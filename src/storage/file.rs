//! JSON file snapshot store

use std::path::{Path, PathBuf};

use tracing::debug;

use super::RoomSnapshot;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot to a sibling temp file, then rename it over the target
    pub async fn save(&self, snapshot: &RoomSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let serialized = serde_json::to_string_pretty(snapshot)?;
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, serialized.as_bytes()).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), bytes = serialized.len(), "Snapshot written");
        Ok(())
    }

    pub async fn load(&self) -> Result<Option<RoomSnapshot>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot file found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: RoomSnapshot = serde_json::from_str(&data)?;
        Ok(Some(snapshot))
    }
}
