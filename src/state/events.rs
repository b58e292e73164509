//! Room change events
//!
//! Emitted by the registry after each applied mutation. Observers such as the
//! persistence manager decide on their own what to do and when.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoomEvent {
    Created {
        room_id: String,
        revision: u64,
    },
    Joined {
        room_id: String,
        participant_id: String,
        revision: u64,
    },
    Spawned {
        room_id: String,
        group_index: u32,
        participant_id: String,
        revision: u64,
    },
    MessagePosted {
        room_id: String,
        message_id: String,
        revision: u64,
    },
}

impl RoomEvent {
    /// Registry revision the event was produced at
    pub fn revision(&self) -> u64 {
        match self {
            RoomEvent::Created { revision, .. }
            | RoomEvent::Joined { revision, .. }
            | RoomEvent::Spawned { revision, .. }
            | RoomEvent::MessagePosted { revision, .. } => *revision,
        }
    }

    pub fn room_id(&self) -> &str {
        match self {
            RoomEvent::Created { room_id, .. }
            | RoomEvent::Joined { room_id, .. }
            | RoomEvent::Spawned { room_id, .. }
            | RoomEvent::MessagePosted { room_id, .. } => room_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::Created { .. } => "created",
            RoomEvent::Joined { .. } => "joined",
            RoomEvent::Spawned { .. } => "spawned",
            RoomEvent::MessagePosted { .. } => "message_posted",
        }
    }
}
