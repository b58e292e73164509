//! Test data helpers
//!
//! Invariant checks shared by scenario, property and concurrency tests.

use std::collections::BTreeMap;

use DaloRooms::rooms::{check_consistency, RoomCollection};

/// Sorted group indices of the family behind `master`
pub fn family_indices(rooms: &RoomCollection, master: &str) -> Vec<u32> {
    rooms
        .family(master)
        .iter()
        .filter_map(|room| room.group_index())
        .collect()
}

/// Participant ids of a room, in join order
pub fn participant_ids(rooms: &RoomCollection, room_id: &str) -> Vec<String> {
    rooms
        .find(room_id)
        .map(|room| room.participants().iter().map(|user| user.id.clone()).collect())
        .unwrap_or_default()
}

/// Assert capacity and index contiguity for every room and family
pub fn assert_room_invariants(rooms: &RoomCollection) {
    for room in rooms {
        assert!(
            room.participant_count() <= room.max_capacity,
            "room {} holds {} over capacity {}",
            room.id,
            room.participant_count(),
            room.max_capacity
        );
    }

    let mut families: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for room in rooms {
        if let (Some(master), Some(index)) = (room.master_qr_code(), room.group_index()) {
            families.entry(master).or_default().push(index);
        }
    }
    for (master, mut indices) in families {
        indices.sort_unstable();
        let expected: Vec<u32> = (1..=indices.len() as u32).collect();
        assert_eq!(indices, expected, "family {} is not numbered 1..n", master);
    }

    assert_eq!(check_consistency(rooms), Vec::new());
}
