//! Classroom service implementation
//!
//! This service handles classroom and group creation, join requests (real or
//! simulated), room messaging and the admin overview on top of the registry.

use chrono::Utc;
use tracing::{debug, info};

use crate::config::RoomsConfig;
use crate::models::{AccountType, CreateClassroomRequest, Message, Room, RoomSummary, User};
use crate::rooms::{factory, JoinOutcome, JointMeeting, RoomCluster, RoomStats};
use crate::state::RoomRegistry;
use crate::utils::errors::Result;
use crate::utils::helpers;

/// Classroom service for managing rooms
#[derive(Debug, Clone)]
pub struct ClassroomService {
    registry: RoomRegistry,
    config: RoomsConfig,
    owner: User,
}

impl ClassroomService {
    /// Create a new ClassroomService instance
    pub fn new(registry: RoomRegistry, config: RoomsConfig) -> Self {
        let owner = User::new(config.owner_id.clone(), config.owner_name.clone())
            .with_account_type(AccountType::Admin);

        Self {
            registry,
            config,
            owner,
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Representative placed in every classroom
    pub fn owner(&self) -> &User {
        &self.owner
    }

    /// Open a classroom owned by the configured representative
    pub async fn create_classroom(&self, name: &str, capacity: Option<usize>, is_auto: bool) -> Result<Room> {
        let request = CreateClassroomRequest {
            name: name.to_string(),
            capacity: capacity.unwrap_or(self.config.default_capacity),
            is_auto,
        };
        debug!(name = %request.name, capacity = request.capacity, is_auto = is_auto, "Creating classroom");

        let room = factory::new_classroom(&request, &self.owner)?;
        self.registry.insert_room(room.clone()).await?;
        info!(room_id = %room.id, qr_code = %room.qr_code(), "Classroom created");

        Ok(room)
    }

    /// Open a basic group owned by its creator
    pub async fn create_group(&self, name: &str, creator: &User) -> Result<Room> {
        let room = factory::new_group(name, creator, self.config.group_capacity)?;
        self.registry.insert_room(room.clone()).await?;
        info!(room_id = %room.id, creator_id = %creator.id, "Group created");

        Ok(room)
    }

    /// Place a participant presenting a join token
    pub async fn join(&self, token: &str, participant: User) -> JoinOutcome {
        self.registry.join(token.trim(), participant).await
    }

    /// Place a synthesized guest, as when a student scans a QR code
    pub async fn simulate_join(&self, token: &str) -> (User, JoinOutcome) {
        let guest = generate_guest();
        let outcome = self.join(token, guest.clone()).await;
        (guest, outcome)
    }

    pub async fn post_message(&self, room_id: &str, sender: &User, text: &str) -> Result<Message> {
        self.registry.post_message(room_id, sender, text).await
    }

    pub async fn find_room(&self, room_id: &str) -> Option<Room> {
        self.registry.find(room_id).await
    }

    pub async fn list_rooms(&self) -> Vec<RoomSummary> {
        self.registry.read(|rooms| rooms.summaries()).await
    }

    pub async fn clusters(&self) -> Vec<RoomCluster> {
        self.registry.read(|rooms| rooms.clusters()).await
    }

    pub async fn search(&self, query: &str) -> Vec<RoomSummary> {
        self.registry
            .read(|rooms| rooms.search(query).into_iter().map(RoomSummary::from).collect())
            .await
    }

    pub async fn stats(&self) -> RoomStats {
        self.registry.read(|rooms| rooms.stats()).await
    }

    /// Roster for a meeting across every room behind `token`, hosted by the owner
    pub async fn joint_meeting(&self, token: &str) -> Option<JointMeeting> {
        self.registry
            .read(|rooms| rooms.joint_meeting(token.trim(), &self.owner))
            .await
    }
}

/// Synthesize a guest participant with a random display number
pub fn generate_guest() -> User {
    let id = format!(
        "student_{}_{}",
        Utc::now().timestamp_millis(),
        helpers::random_in_range(0, 1000)
    );
    let name = format!("Student {}", helpers::random_in_range(100, 1000));

    User::new(id, name).with_account_type(AccountType::Guest)
}
