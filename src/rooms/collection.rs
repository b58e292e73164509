//! Room collection
//!
//! The collection is an ordered list of rooms, most recently created first.
//! Order matters only for display; lookups go through ids and tokens.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Room, RoomSummary};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCollection {
    rooms: Vec<Room>,
}

/// Aggregate numbers for the admin overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoomStats {
    pub room_count: usize,
    pub family_count: usize,
    pub manual_count: usize,
    pub full_rooms: usize,
    pub total_participants: usize,
}

impl RoomCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Room> {
        self.rooms.iter()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn into_rooms(self) -> Vec<Room> {
        self.rooms
    }

    pub fn find(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == room_id)
    }

    pub(crate) fn find_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| room.id == room_id)
    }

    /// Room at a position previously returned by this collection
    pub(crate) fn room_mut(&mut self, position: usize) -> &mut Room {
        &mut self.rooms[position]
    }

    /// Rooms of an auto-scaling family, ordered by group index
    pub fn family(&self, master: &str) -> Vec<&Room> {
        let mut family: Vec<&Room> = self.rooms.iter().filter(|room| room.in_family(master)).collect();
        family.sort_by_key(|room| room.group_index());
        family
    }

    /// Position and group index of every room in the family, unordered
    pub(crate) fn family_members(&self, master: &str) -> Vec<(usize, u32)> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.in_family(master))
            .filter_map(|(position, room)| room.group_index().map(|index| (position, index)))
            .collect()
    }

    /// Positions of rooms whose own QR code equals the token
    pub(crate) fn code_positions(&self, token: &str) -> Vec<usize> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.qr_code() == token)
            .map(|(position, _)| position)
            .collect()
    }

    /// Room a token points at directly, ignoring family master codes
    pub fn find_by_code(&self, token: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.qr_code() == token)
    }

    pub fn is_master_code(&self, token: &str) -> bool {
        self.rooms.iter().any(|room| room.in_family(token))
    }

    /// Whether an id or join token is already claimed by any room
    pub fn token_in_use(&self, token: &str) -> bool {
        self.rooms
            .iter()
            .any(|room| room.id == token || room.qr_code() == token || room.in_family(token))
    }

    /// Every id, QR code and master code claimed by the room
    pub(crate) fn claimed_tokens(room: &Room) -> HashSet<String> {
        let mut tokens = HashSet::new();
        tokens.insert(room.id.clone());
        tokens.insert(room.qr_code());
        if let Some(master) = room.master_qr_code() {
            tokens.insert(master.to_string());
        }
        tokens
    }

    pub(crate) fn insert_front(&mut self, room: Room) {
        self.rooms.insert(0, room);
    }

    /// Case-insensitive substring search on room names
    pub fn search(&self, query: &str) -> Vec<&Room> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.rooms.iter().collect();
        }
        self.rooms
            .iter()
            .filter(|room| room.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn summaries(&self) -> Vec<RoomSummary> {
        self.rooms.iter().map(RoomSummary::from).collect()
    }

    pub fn stats(&self) -> RoomStats {
        let masters: HashSet<&str> = self.rooms.iter().filter_map(|room| room.master_qr_code()).collect();

        RoomStats {
            room_count: self.rooms.len(),
            family_count: masters.len(),
            manual_count: self.rooms.iter().filter(|room| !room.is_auto()).count(),
            full_rooms: self.rooms.iter().filter(|room| room.is_full()).count(),
            total_participants: self.rooms.iter().map(Room::participant_count).sum(),
        }
    }
}

impl<'a> IntoIterator for &'a RoomCollection {
    type Item = &'a Room;
    type IntoIter = std::slice::Iter<'a, Room>;

    fn into_iter(self) -> Self::IntoIter {
        self.rooms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateClassroomRequest, User};
    use crate::rooms::factory;

    fn classroom(name: &str, capacity: usize, is_auto: bool) -> Room {
        let request = CreateClassroomRequest { name: name.to_string(), capacity, is_auto };
        factory::new_classroom(&request, &User::new("owner", "Owner")).unwrap()
    }

    #[test]
    fn test_lookup_by_token() {
        let auto = classroom("Graphics", 4, true);
        let manual = classroom("Office", 2, false);
        let master = auto.master_qr_code().unwrap().to_string();
        let manual_code = manual.qr_code();
        let collection = RoomCollection::from_rooms(vec![auto.clone(), manual]);

        assert!(collection.is_master_code(&master));
        assert!(!collection.is_master_code(&manual_code));
        assert_eq!(collection.find_by_code(&auto.qr_code()).map(|r| r.id.as_str()), Some(auto.id.as_str()));
        assert!(collection.token_in_use(&master));
        assert!(collection.token_in_use(&manual_code));
        assert!(!collection.token_in_use("ZZZ"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let collection = RoomCollection::from_rooms(vec![
            classroom("Graphics midterm", 4, true),
            classroom("Office hours", 2, false),
        ]);

        let hits = collection.search("GRAPHICS");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Graphics midterm - 1");
        assert_eq!(collection.search("  ").len(), 2);
        assert!(collection.search("physics").is_empty());
    }

    #[test]
    fn test_stats() {
        let collection = RoomCollection::from_rooms(vec![
            classroom("Graphics", 4, true),
            classroom("Office", 1, false),
        ]);
        let stats = collection.stats();
        assert_eq!(stats.room_count, 2);
        assert_eq!(stats.family_count, 1);
        assert_eq!(stats.manual_count, 1);
        assert_eq!(stats.full_rooms, 1);
        assert_eq!(stats.total_participants, 2);
    }
}
