//! Test context for unified test setup
//!
//! This module provides a test context that wires settings, registry, service
//! and an in-memory snapshot store the way the console binary does.

use tempfile::TempDir;

use DaloRooms::config::{Settings, StorageBackend};
use DaloRooms::handlers::CommandContext;
use DaloRooms::rooms::RoomCollection;
use DaloRooms::services::ClassroomService;
use DaloRooms::state::RoomRegistry;
use DaloRooms::storage::{MemorySnapshotStore, SnapshotStore};

/// Unified test context that manages all test components
pub struct TestContext {
    pub settings: Settings,
    pub registry: RoomRegistry,
    pub service: ClassroomService,
    pub memory: MemorySnapshotStore,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with an empty registry
    pub fn new() -> Self {
        Self::with_rooms(RoomCollection::new())
    }

    /// Create a new test context seeded with `rooms`
    pub fn with_rooms(rooms: RoomCollection) -> Self {
        // Initialize logging once
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut settings = Settings::default();
        settings.persistence.backend = StorageBackend::Memory;
        settings.persistence.file_path = temp_dir.path().join("rooms.json").display().to_string();
        settings.logging.directory = temp_dir.path().join("logs").display().to_string();

        let registry = RoomRegistry::new(rooms);
        let service = ClassroomService::new(registry.clone(), settings.rooms.clone());

        Self {
            settings,
            registry,
            service,
            memory: MemorySnapshotStore::new(),
            temp_dir,
        }
    }

    /// Console command context sharing this registry
    pub fn command_context(&self) -> CommandContext {
        CommandContext {
            service: self.service.clone(),
            store: SnapshotStore::Memory(self.memory.clone()),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
