//! Test fixtures for integration tests
//!
//! This module provides room and user fixtures with fixed tokens, built the
//! same way a loaded snapshot would be, so scenarios can refer to rooms such
//! as `QR1_1` by name.

use chrono::Utc;
use serde_json::json;

use DaloRooms::models::{Room, User};
use DaloRooms::rooms::RoomCollection;

/// Test room data structure
#[derive(Debug, Clone)]
pub struct TestRoom {
    pub name: String,
    pub token: String,
    pub capacity: usize,
    pub group_index: Option<u32>,
    pub owner: User,
    pub extra_participants: Vec<User>,
}

impl TestRoom {
    /// Manual room joined through `token`
    pub fn manual(name: &str, token: &str, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            token: token.to_string(),
            capacity,
            group_index: None,
            owner: owner(),
            extra_participants: Vec::new(),
        }
    }

    /// Room `index` of the family with master code `master`
    pub fn family(base_name: &str, master: &str, index: u32, capacity: usize) -> Self {
        Self {
            name: base_name.to_string(),
            token: master.to_string(),
            capacity,
            group_index: Some(index),
            owner: owner(),
            extra_participants: Vec::new(),
        }
    }

    pub fn with_participants(mut self, participants: Vec<User>) -> Self {
        self.extra_participants = participants;
        self
    }

    pub fn build(&self) -> Room {
        let mut participants = vec![self.owner.clone()];
        participants.extend(self.extra_participants.iter().cloned());

        let (id, name, kind) = match self.group_index {
            Some(index) => (
                format!("{}_{}", self.token, index),
                format!("{} - {}", self.name, index),
                json!({
                    "mode": "auto",
                    "master_qr_code": self.token,
                    "base_name": self.name,
                    "group_index": index,
                }),
            ),
            None => (
                self.token.clone(),
                self.name.clone(),
                json!({ "mode": "manual", "qr_code": self.token }),
            ),
        };

        let value = json!({
            "id": id,
            "name": name,
            "avatar": "",
            "kind": kind,
            "owner": self.owner,
            "participants": participants,
            "max_capacity": self.capacity,
            "messages": [],
            "created_at": Utc::now(),
        });

        serde_json::from_value(value).expect("fixture room should deserialize")
    }
}

/// Family representative used by every fixture room
pub fn owner() -> User {
    User::new("owner", "Owner")
}

pub fn participant(n: usize) -> User {
    User::new(format!("p{}", n), format!("P{}", n))
}

/// Scenario collections
pub struct RoomFixtures;

impl RoomFixtures {
    /// Family `QR1` with one room `QR1_1`, capacity 2, holding only the owner
    pub fn single_family() -> RoomCollection {
        RoomCollection::from_rooms(vec![TestRoom::family("F", "QR1", 1, 2).build()])
    }

    /// Manual room `Q9`, capacity 1, holding only the owner
    pub fn full_manual() -> RoomCollection {
        RoomCollection::from_rooms(vec![TestRoom::manual("M", "Q9", 1).build()])
    }

    /// One family of two rooms and two manual rooms
    pub fn mixed() -> RoomCollection {
        RoomCollection::from_rooms(vec![
            TestRoom::family("Physics", "PHY", 2, 3).with_participants(vec![participant(3)]).build(),
            TestRoom::manual("Library", "LIB", 10).build(),
            TestRoom::family("Physics", "PHY", 1, 3)
                .with_participants(vec![participant(1), participant(2)])
                .build(),
            TestRoom::manual("Office", "OFF", 3).with_participants(vec![participant(9)]).build(),
        ])
    }
}
