//! Room registry
//!
//! Owns the room collection for the life of the process. Every mutation runs
//! as one read-compute-write step under the write lock, so concurrent join
//! requests are applied one at a time.

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

use super::events::RoomEvent;
use crate::models::{Message, Room, User};
use crate::rooms::{check_consistency, resolve_join, JoinOutcome, RoomCollection};
use crate::utils::errors::{DaloError, Result};
use crate::utils::logging;

/// Buffered events per subscriber before it starts lagging
const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct RegistryState {
    rooms: RoomCollection,
    revision: u64,
}

impl RegistryState {
    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}

#[derive(Debug, Clone)]
pub struct RoomRegistry {
    state: Arc<RwLock<RegistryState>>,
    events: broadcast::Sender<RoomEvent>,
}

impl RoomRegistry {
    /// Take ownership of a collection, reporting any invariant violations it carries
    pub fn new(rooms: RoomCollection) -> Self {
        for fault in check_consistency(&rooms) {
            warn!(fault = %fault, "Room collection is inconsistent");
        }

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(RegistryState { rooms, revision: 0 })),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RoomEvent> {
        self.events.subscribe()
    }

    /// Add a freshly built room at the front of the collection
    pub async fn insert_room(&self, room: Room) -> Result<String> {
        let mut state = self.state.write().await;

        if let Some(token) = RoomCollection::claimed_tokens(&room)
            .into_iter()
            .find(|token| state.rooms.token_in_use(token))
        {
            return Err(DaloError::DuplicateToken { token });
        }

        let room_id = room.id.clone();
        state.rooms.insert_front(room);
        let revision = state.bump();
        drop(state);

        logging::log_room_event(&room_id, "created", None);
        self.publish(RoomEvent::Created { room_id: room_id.clone(), revision });
        Ok(room_id)
    }

    /// Apply one join request
    pub async fn join(&self, token: &str, participant: User) -> JoinOutcome {
        let participant_id = participant.id.clone();
        let mut state = self.state.write().await;

        let outcome = resolve_join(&mut state.rooms, token, participant);
        let event = match &outcome {
            JoinOutcome::Joined { room_id } => Some(RoomEvent::Joined {
                room_id: room_id.clone(),
                participant_id: participant_id.clone(),
                revision: state.bump(),
            }),
            JoinOutcome::Spawned { room_id, group_index } => Some(RoomEvent::Spawned {
                room_id: room_id.clone(),
                group_index: *group_index,
                participant_id: participant_id.clone(),
                revision: state.bump(),
            }),
            _ => None,
        };
        drop(state);

        logging::log_join_outcome(token, &participant_id, &outcome);
        if let Some(event) = event {
            self.publish(event);
        }
        outcome
    }

    /// Append a user message to a room
    pub async fn post_message(&self, room_id: &str, sender: &User, text: &str) -> Result<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DaloError::InvalidInput("Message text cannot be empty".to_string()));
        }

        let mut state = self.state.write().await;
        let room = state
            .rooms
            .find_mut(room_id)
            .ok_or_else(|| DaloError::RoomNotFound { room_id: room_id.to_string() })?;

        let message = Message::from_user(sender.id.clone(), text);
        room.push_message(message.clone());
        let revision = state.bump();
        drop(state);

        debug!(room_id = room_id, sender_id = %sender.id, "Message posted");
        self.publish(RoomEvent::MessagePosted {
            room_id: room_id.to_string(),
            message_id: message.id.clone(),
            revision,
        });
        Ok(message)
    }

    /// Run a read-only view over the current collection
    pub async fn read<R>(&self, view: impl FnOnce(&RoomCollection) -> R) -> R {
        let state = self.state.read().await;
        view(&state.rooms)
    }

    /// Copy of the current collection
    pub async fn snapshot(&self) -> RoomCollection {
        self.read(RoomCollection::clone).await
    }

    pub async fn find(&self, room_id: &str) -> Option<Room> {
        self.read(|rooms| rooms.find(room_id).cloned()).await
    }

    pub async fn revision(&self) -> u64 {
        self.state.read().await.revision
    }

    fn publish(&self, event: RoomEvent) {
        if self.events.send(event).is_err() {
            debug!("No event subscribers");
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RoomCollection::new())
    }
}
