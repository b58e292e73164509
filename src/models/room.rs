//! Room model
//!
//! A room is a bounded-capacity group conversation. Manual rooms stand alone
//! and are joined through their own QR code; auto rooms belong to a family
//! sharing one master code and are numbered from 1.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::{Message, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RoomKind {
    Manual {
        qr_code: String,
    },
    Auto {
        master_qr_code: String,
        base_name: String,
        group_index: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub kind: RoomKind,
    /// Representative present in every room of a family
    pub owner: User,
    pub(crate) participants: Vec<User>,
    pub max_capacity: usize,
    pub(crate) messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Token that identifies this single room.
    ///
    /// Auto rooms derive theirs as `<master>_<index>`.
    pub fn qr_code(&self) -> String {
        match &self.kind {
            RoomKind::Manual { qr_code } => qr_code.clone(),
            RoomKind::Auto { master_qr_code, group_index, .. } => {
                family_room_code(master_qr_code, *group_index)
            }
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self.kind, RoomKind::Auto { .. })
    }

    pub fn master_qr_code(&self) -> Option<&str> {
        match &self.kind {
            RoomKind::Auto { master_qr_code, .. } => Some(master_qr_code),
            RoomKind::Manual { .. } => None,
        }
    }

    pub fn base_name(&self) -> Option<&str> {
        match &self.kind {
            RoomKind::Auto { base_name, .. } => Some(base_name),
            RoomKind::Manual { .. } => None,
        }
    }

    pub fn group_index(&self) -> Option<u32> {
        match &self.kind {
            RoomKind::Auto { group_index, .. } => Some(*group_index),
            RoomKind::Manual { .. } => None,
        }
    }

    /// Whether this room belongs to the family with the given master code
    pub fn in_family(&self, master: &str) -> bool {
        self.master_qr_code() == Some(master)
    }

    /// Label shared by a family, or the room's own name
    pub fn display_base(&self) -> &str {
        self.base_name().unwrap_or(&self.name)
    }

    pub fn participants(&self) -> &[User] {
        &self.participants
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn has_capacity(&self) -> bool {
        self.participants.len() < self.max_capacity
    }

    pub fn is_full(&self) -> bool {
        !self.has_capacity()
    }

    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p.id == user_id)
    }

    /// Append a participant together with the system notice recording it.
    /// Callers check capacity first.
    pub(crate) fn admit(&mut self, participant: User, notice: String) {
        self.participants.push(participant);
        self.messages.push(Message::system(notice));
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }
}

/// QR code of the `index`-th room of a family
pub fn family_room_code(master: &str, index: u32) -> String {
    format!("{}_{}", master, index)
}

/// Display name of the `index`-th room of a family
pub fn family_room_name(base_name: &str, index: u32) -> String {
    format!("{} - {}", base_name, index)
}

/// Compact view of a room for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub qr_code: String,
    pub group_index: Option<u32>,
    pub participants: usize,
    pub max_capacity: usize,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            qr_code: room.qr_code(),
            group_index: room.group_index(),
            participants: room.participant_count(),
            max_capacity: room.max_capacity,
        }
    }
}

/// Admin request to open a classroom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassroomRequest {
    pub name: String,
    pub capacity: usize,
    pub is_auto: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto_room() -> Room {
        let owner = User::new("owner", "Owner");
        Room {
            id: "class_a_2".to_string(),
            name: "Math - 2".to_string(),
            avatar: String::new(),
            kind: RoomKind::Auto {
                master_qr_code: "class_a".to_string(),
                base_name: "Math".to_string(),
                group_index: 2,
            },
            participants: vec![owner.clone()],
            owner,
            max_capacity: 3,
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_auto_room_derives_qr_code() {
        let room = auto_room();
        assert_eq!(room.qr_code(), "class_a_2");
        assert!(room.in_family("class_a"));
        assert_eq!(room.display_base(), "Math");
        assert_eq!(room.group_index(), Some(2));
    }

    #[test]
    fn test_capacity_checks() {
        let mut room = auto_room();
        assert!(room.has_capacity());
        room.admit(User::new("p1", "P1"), "P1 joined the class.".to_string());
        room.admit(User::new("p2", "P2"), "P2 joined the class.".to_string());
        assert!(room.is_full());
        assert_eq!(room.messages().len(), 2);
        assert!(room.has_participant("p2"));
    }

    #[test]
    fn test_kind_is_tagged_on_the_wire() {
        let json = serde_json::to_value(auto_room()).unwrap();
        assert_eq!(json["kind"]["mode"], "auto");
        assert_eq!(json["kind"]["group_index"], 2);

        let back: Room = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind, auto_room().kind);
        assert_eq!(back.qr_code(), "class_a_2");
    }
}
