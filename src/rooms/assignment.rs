//! Join resolution
//!
//! Places a newcomer presenting a join token. A token that is the master code
//! of an auto-scaling family goes to the family's highest-index room, or to a
//! freshly spawned room when that one is full. Any other token must be the QR
//! code of exactly one room, which admits the newcomer only while it has
//! spare capacity.
//!
//! Rejections are reported through [`JoinOutcome`]; a rejected join leaves the
//! collection untouched.

use std::collections::HashSet;

use tracing::{error, warn};

use super::consistency::ConsistencyFault;
use super::{factory, RoomCollection};
use crate::config::validation::MIN_AUTO_CAPACITY;
use crate::models::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Newcomer appended to an existing room
    Joined { room_id: String },
    /// Family was full; a new room was created holding the owner and the newcomer
    Spawned { room_id: String, group_index: u32 },
    /// Manual room at capacity, nothing changed
    RoomFull { room_id: String, room_name: String },
    /// Token matches no family and no room, nothing changed
    InvalidToken { token: String },
    /// State violates an invariant the decision depends on, nothing changed
    Fault(ConsistencyFault),
}

impl JoinOutcome {
    /// Whether the collection was modified
    pub fn is_placed(&self) -> bool {
        matches!(self, JoinOutcome::Joined { .. } | JoinOutcome::Spawned { .. })
    }

    /// Room that received the newcomer
    pub fn room_id(&self) -> Option<&str> {
        match self {
            JoinOutcome::Joined { room_id } | JoinOutcome::Spawned { room_id, .. } => Some(room_id),
            _ => None,
        }
    }
}

/// Resolve one join request against the collection
pub fn resolve_join(rooms: &mut RoomCollection, token: &str, participant: User) -> JoinOutcome {
    let family = rooms.family_members(token);

    if family.is_empty() {
        return join_room_by_code(rooms, token, participant);
    }

    if rooms.iter().any(|room| !room.is_auto() && room.qr_code() == token) {
        warn!(token = token, "Token is both a family master code and a manual room code, using the family");
    }
    join_family(rooms, token, &family, participant)
}

fn join_family(
    rooms: &mut RoomCollection,
    master: &str,
    family: &[(usize, u32)],
    participant: User,
) -> JoinOutcome {
    let mut seen = HashSet::new();
    let mut last = family[0];

    for &(position, index) in family {
        if !seen.insert(index) {
            error!(master = master, group_index = index, "Duplicate group index in family");
            return JoinOutcome::Fault(ConsistencyFault::DuplicateGroupIndex {
                master_qr_code: master.to_string(),
                group_index: index,
            });
        }
        if index > last.1 {
            last = (position, index);
        }
    }

    let (last_position, last_index) = last;
    let last_room = rooms.room_mut(last_position);
    if last_room.has_capacity() {
        let notice = format!("{} joined the class.", participant.name);
        last_room.admit(participant, notice);
        return JoinOutcome::Joined { room_id: last_room.id.clone() };
    }

    // An overflow room starts with two members, so smaller capacities cannot hold it.
    if last_room.max_capacity < MIN_AUTO_CAPACITY {
        error!(master = master, room_id = %last_room.id, capacity = last_room.max_capacity, "Family capacity too small to overflow");
        return JoinOutcome::Fault(ConsistencyFault::CapacityTooSmall {
            room_id: last_room.id.clone(),
            capacity: last_room.max_capacity,
            minimum: MIN_AUTO_CAPACITY,
        });
    }

    // The full room keeps no trace of the overflow; only the new room is announced.
    let Some(next) = factory::next_family_room(last_room, participant) else {
        error!(master = master, group_index = last_index, "Family has no group index left");
        return JoinOutcome::Fault(ConsistencyFault::GroupIndexExhausted {
            master_qr_code: master.to_string(),
            group_index: last_index,
        });
    };

    if rooms.token_in_use(&next.id) {
        error!(master = master, room_id = %next.id, "Overflow room id already taken");
        return JoinOutcome::Fault(ConsistencyFault::DuplicateRoomId { room_id: next.id });
    }

    let outcome = JoinOutcome::Spawned {
        room_id: next.id.clone(),
        group_index: last_index + 1,
    };
    rooms.insert_front(next);
    outcome
}

fn join_room_by_code(rooms: &mut RoomCollection, token: &str, participant: User) -> JoinOutcome {
    let matches = rooms.code_positions(token);

    let position = match matches.as_slice() {
        [] => return JoinOutcome::InvalidToken { token: token.to_string() },
        [position] => *position,
        _ => {
            error!(token = token, rooms = matches.len(), "QR code shared by several rooms");
            return JoinOutcome::Fault(ConsistencyFault::DuplicateQrCode { qr_code: token.to_string() });
        }
    };

    let room = rooms.room_mut(position);
    if room.is_full() {
        return JoinOutcome::RoomFull {
            room_id: room.id.clone(),
            room_name: room.name.clone(),
        };
    }

    let notice = format!("{} joined.", participant.name);
    room.admit(participant, notice);
    JoinOutcome::Joined { room_id: room.id.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, RoomKind};
    use assert_matches::assert_matches;

    fn owner() -> User {
        User::new("owner", "Owner")
    }

    fn room(kind: RoomKind, id: &str, capacity: usize) -> Room {
        Room {
            id: id.to_string(),
            name: id.to_string(),
            avatar: String::new(),
            kind,
            owner: owner(),
            participants: vec![owner()],
            max_capacity: capacity,
            messages: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    fn family_room(master: &str, index: u32, capacity: usize) -> Room {
        room(
            RoomKind::Auto {
                master_qr_code: master.to_string(),
                base_name: "F".to_string(),
                group_index: index,
            },
            &format!("{}_{}", master, index),
            capacity,
        )
    }

    fn manual_room(code: &str, capacity: usize) -> Room {
        room(RoomKind::Manual { qr_code: code.to_string() }, code, capacity)
    }

    #[test]
    fn test_family_fills_then_spawns() {
        let mut rooms = RoomCollection::from_rooms(vec![family_room("QR1", 1, 2)]);

        let outcome = resolve_join(&mut rooms, "QR1", User::new("p1", "P1"));
        assert_eq!(outcome, JoinOutcome::Joined { room_id: "QR1_1".to_string() });
        assert_eq!(rooms.find("QR1_1").unwrap().participants(), &[owner(), User::new("p1", "P1")]);

        let outcome = resolve_join(&mut rooms, "QR1", User::new("p2", "P2"));
        assert_eq!(outcome, JoinOutcome::Spawned { room_id: "QR1_2".to_string(), group_index: 2 });

        let second = rooms.find("QR1_2").unwrap();
        assert_eq!(second.name, "F - 2");
        assert_eq!(second.participants(), &[owner(), User::new("p2", "P2")]);
        assert_eq!(rooms.rooms()[0].id, "QR1_2");

        // the overflowing room is left as it was
        let first = rooms.find("QR1_1").unwrap();
        assert_eq!(first.participant_count(), 2);
        assert_eq!(first.messages().len(), 1);
    }

    #[test]
    fn test_family_uses_highest_index_regardless_of_order() {
        let mut rooms = RoomCollection::from_rooms(vec![
            family_room("QR1", 1, 3),
            family_room("QR1", 3, 3),
            family_room("QR1", 2, 3),
        ]);
        let outcome = resolve_join(&mut rooms, "QR1", User::new("p", "P"));
        assert_eq!(outcome.room_id(), Some("QR1_3"));
    }

    #[test]
    fn test_manual_room_full_is_not_mutated() {
        let mut rooms = RoomCollection::from_rooms(vec![manual_room("Q9", 1)]);
        let before = rooms.clone();

        let outcome = resolve_join(&mut rooms, "Q9", User::new("p1", "P1"));
        assert_matches!(outcome, JoinOutcome::RoomFull { ref room_id, .. } if room_id == "Q9");
        assert_eq!(rooms, before);
    }

    #[test]
    fn test_manual_room_join_appends_notice() {
        let mut rooms = RoomCollection::from_rooms(vec![manual_room("Q9", 2)]);
        let outcome = resolve_join(&mut rooms, "Q9", User::new("p1", "Nam"));
        assert!(outcome.is_placed());

        let room = rooms.find("Q9").unwrap();
        assert_eq!(room.messages().last().unwrap().text, "Nam joined.");
        assert!(room.messages().last().unwrap().is_system());
    }

    #[test]
    fn test_unknown_token_is_a_no_op() {
        let mut rooms = RoomCollection::from_rooms(vec![manual_room("Q9", 2), family_room("QR1", 1, 2)]);
        let before = rooms.clone();

        let outcome = resolve_join(&mut rooms, "ZZZ", User::new("p1", "P1"));
        assert_eq!(outcome, JoinOutcome::InvalidToken { token: "ZZZ".to_string() });
        assert_eq!(rooms, before);
    }

    #[test]
    fn test_individual_family_room_code_joins_that_room() {
        let mut rooms = RoomCollection::from_rooms(vec![family_room("QR1", 2, 3), family_room("QR1", 1, 3)]);
        let outcome = resolve_join(&mut rooms, "QR1_1", User::new("p", "P"));
        assert_eq!(outcome, JoinOutcome::Joined { room_id: "QR1_1".to_string() });
    }

    #[test]
    fn test_duplicate_group_index_is_a_fault() {
        let mut duplicate = family_room("QR1", 1, 2);
        duplicate.id = "other".to_string();
        let mut rooms = RoomCollection::from_rooms(vec![family_room("QR1", 1, 2), duplicate]);
        let before = rooms.clone();

        let outcome = resolve_join(&mut rooms, "QR1", User::new("p", "P"));
        assert_matches!(outcome, JoinOutcome::Fault(ConsistencyFault::DuplicateGroupIndex { group_index: 1, .. }));
        assert_eq!(rooms, before);
    }

    #[test]
    fn test_family_takes_precedence_over_manual_code() {
        let mut rooms = RoomCollection::from_rooms(vec![manual_room("QR1", 5), family_room("QR1", 1, 5)]);
        let outcome = resolve_join(&mut rooms, "QR1", User::new("p", "P"));
        assert_eq!(outcome.room_id(), Some("QR1_1"));
        assert_eq!(rooms.find("QR1").unwrap().participant_count(), 1);
    }

    #[test]
    fn test_family_below_minimum_capacity_does_not_overflow() {
        let mut rooms = RoomCollection::from_rooms(vec![family_room("QR1", 1, 1)]);
        let before = rooms.clone();

        let outcome = resolve_join(&mut rooms, "QR1", User::new("p", "P"));
        assert_matches!(
            outcome,
            JoinOutcome::Fault(ConsistencyFault::CapacityTooSmall { capacity: 1, minimum: 2, .. })
        );
        assert_eq!(rooms, before);
    }

    #[test]
    fn test_family_at_last_index_is_a_fault() {
        let mut full = family_room("QR1", u32::MAX, 2);
        full.participants.push(User::new("p1", "P1"));
        let mut rooms = RoomCollection::from_rooms(vec![full]);
        let before = rooms.clone();

        let outcome = resolve_join(&mut rooms, "QR1", User::new("p2", "P2"));
        assert_matches!(
            outcome,
            JoinOutcome::Fault(ConsistencyFault::GroupIndexExhausted { group_index: u32::MAX, .. })
        );
        assert_eq!(rooms, before);
    }
}
