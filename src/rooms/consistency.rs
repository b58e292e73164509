//! Collection consistency checks
//!
//! The creation and join paths keep these invariants on their own; the checks
//! exist for state that arrives from outside, such as a loaded snapshot, and
//! for join requests that hit a state the invariants rule out.

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

use super::RoomCollection;
use crate::config::validation::MIN_AUTO_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyFault {
    #[error("family {master_qr_code} has more than one room with index {group_index}")]
    DuplicateGroupIndex { master_qr_code: String, group_index: u32 },

    #[error("family {master_qr_code} is missing the room with index {group_index}")]
    MissingGroupIndex { master_qr_code: String, group_index: u32 },

    #[error("room id {room_id} is used more than once")]
    DuplicateRoomId { room_id: String },

    #[error("QR code {qr_code} is used by more than one room")]
    DuplicateQrCode { qr_code: String },

    #[error("token {token} is both a family master code and a room QR code")]
    TokenConflict { token: String },

    #[error("room {room_id} holds {participants} participants over a capacity of {capacity}")]
    CapacityExceeded { room_id: String, participants: usize, capacity: usize },

    #[error("room {room_id} has no participants")]
    EmptyRoom { room_id: String },

    #[error("auto room {room_id} has capacity {capacity}, below the minimum of {minimum}")]
    CapacityTooSmall { room_id: String, capacity: usize, minimum: usize },

    #[error("family {master_qr_code} cannot number a room after index {group_index}")]
    GroupIndexExhausted { master_qr_code: String, group_index: u32 },
}

/// List every invariant violation in the collection
pub fn check_consistency(rooms: &RoomCollection) -> Vec<ConsistencyFault> {
    let mut faults = Vec::new();

    let mut ids = HashSet::new();
    let mut codes = HashSet::new();
    let mut families: BTreeMap<&str, Vec<u32>> = BTreeMap::new();

    for room in rooms {
        if !ids.insert(room.id.as_str()) {
            faults.push(ConsistencyFault::DuplicateRoomId { room_id: room.id.clone() });
        }

        let code = room.qr_code();
        if !codes.insert(code.clone()) {
            faults.push(ConsistencyFault::DuplicateQrCode { qr_code: code });
        }

        if room.participant_count() > room.max_capacity {
            faults.push(ConsistencyFault::CapacityExceeded {
                room_id: room.id.clone(),
                participants: room.participant_count(),
                capacity: room.max_capacity,
            });
        }

        if room.is_auto() && room.max_capacity < MIN_AUTO_CAPACITY {
            faults.push(ConsistencyFault::CapacityTooSmall {
                room_id: room.id.clone(),
                capacity: room.max_capacity,
                minimum: MIN_AUTO_CAPACITY,
            });
        }

        if room.participants().is_empty() {
            faults.push(ConsistencyFault::EmptyRoom { room_id: room.id.clone() });
        }

        if let (Some(master), Some(index)) = (room.master_qr_code(), room.group_index()) {
            families.entry(master).or_default().push(index);
        }
    }

    for (master, indices) in &families {
        faults.extend(check_family_indices(master, indices));

        if codes.contains(*master) {
            faults.push(ConsistencyFault::TokenConflict { token: master.to_string() });
        }
    }

    faults
}

/// Indices of one family must be exactly `1..=n`
pub(crate) fn check_family_indices(master: &str, indices: &[u32]) -> Vec<ConsistencyFault> {
    let mut faults = Vec::new();
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for index in indices {
        *counts.entry(*index).or_insert(0) += 1;
    }

    let mut duplicated: Vec<u32> = counts.iter().filter(|(_, n)| **n > 1).map(|(i, _)| *i).collect();
    duplicated.sort_unstable();
    for group_index in duplicated {
        faults.push(ConsistencyFault::DuplicateGroupIndex {
            master_qr_code: master.to_string(),
            group_index,
        });
    }

    let highest = indices.iter().copied().max().unwrap_or(0);
    for group_index in 1..=highest {
        if !counts.contains_key(&group_index) {
            faults.push(ConsistencyFault::MissingGroupIndex {
                master_qr_code: master.to_string(),
                group_index,
            });
        }
    }

    faults
}
