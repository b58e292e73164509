//! Room construction
//!
//! Every room enters the collection through one of these constructors, which
//! establish the invariants join resolution relies on: auto families start at
//! index 1 with `<master>_1` as id and QR code, and the owner is always the
//! first participant.

use chrono::Utc;

use crate::config::validation::MIN_AUTO_CAPACITY;
use crate::models::{
    family_room_code, family_room_name, CreateClassroomRequest, Message, Room, RoomKind, User,
};
use crate::utils::errors::{DaloError, Result};
use crate::utils::helpers;

const CLASSROOM_AVATAR_BACKGROUND: &str = "0D8ABC";

/// Build a classroom requested by an admin
pub fn new_classroom(request: &CreateClassroomRequest, owner: &User) -> Result<Room> {
    let name = helpers::normalize_whitespace(&request.name);
    if name.is_empty() {
        return Err(DaloError::InvalidInput("Room name cannot be empty".to_string()));
    }

    let min_capacity = if request.is_auto { MIN_AUTO_CAPACITY } else { 1 };
    if request.capacity < min_capacity {
        return Err(DaloError::InvalidInput(format!(
            "Capacity of {} room must be at least {}",
            if request.is_auto { "an auto-scaling" } else { "a manual" },
            min_capacity
        )));
    }

    let base_token = format!("class_{}", helpers::generate_token_suffix());

    let (id, display_name, kind) = if request.is_auto {
        (
            family_room_code(&base_token, 1),
            family_room_name(&name, 1),
            RoomKind::Auto {
                master_qr_code: base_token,
                base_name: name.clone(),
                group_index: 1,
            },
        )
    } else {
        (
            base_token.clone(),
            name.clone(),
            RoomKind::Manual { qr_code: base_token },
        )
    };

    let notice = format!(
        "Room \"{}\" was created by {}. Capacity: {}.",
        display_name, owner.name, request.capacity
    );

    Ok(Room {
        id,
        name: display_name,
        avatar: helpers::avatar_url(&name, CLASSROOM_AVATAR_BACKGROUND),
        kind,
        owner: owner.clone(),
        participants: vec![owner.clone()],
        max_capacity: request.capacity,
        messages: vec![Message::system(notice)],
        created_at: Utc::now(),
    })
}

/// Build a basic group opened by a regular user
pub fn new_group(name: &str, creator: &User, capacity: usize) -> Result<Room> {
    let name = helpers::normalize_whitespace(name);
    if name.is_empty() {
        return Err(DaloError::InvalidInput("Group name cannot be empty".to_string()));
    }
    if capacity == 0 {
        return Err(DaloError::InvalidInput("Group capacity must be greater than 0".to_string()));
    }

    let id = format!("group_{}", helpers::generate_token_suffix());

    Ok(Room {
        kind: RoomKind::Manual { qr_code: format!("{}_manual", id) },
        id,
        avatar: helpers::avatar_url(&name, "random"),
        name,
        owner: creator.clone(),
        participants: vec![creator.clone()],
        max_capacity: capacity,
        messages: vec![Message::system("Group created.")],
        created_at: Utc::now(),
    })
}

/// Build the room that follows `last` in its family, seeded with the family
/// owner and the newcomer. Returns `None` for manual rooms and once the
/// family has used up the index range.
pub fn next_family_room(last: &Room, newcomer: User) -> Option<Room> {
    let RoomKind::Auto { master_qr_code, base_name, group_index } = &last.kind else {
        return None;
    };

    let next_index = group_index.checked_add(1)?;
    let name = family_room_name(base_name, next_index);
    let notice = format!(
        "Room \"{}\" was created automatically because the previous room is full.",
        name
    );

    Some(Room {
        id: family_room_code(master_qr_code, next_index),
        name,
        avatar: last.avatar.clone(),
        kind: RoomKind::Auto {
            master_qr_code: master_qr_code.clone(),
            base_name: base_name.clone(),
            group_index: next_index,
        },
        owner: last.owner.clone(),
        participants: vec![last.owner.clone(), newcomer],
        max_capacity: last.max_capacity,
        messages: vec![Message::system(notice)],
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> User {
        User::new("admin_founder", "Founder")
    }

    fn request(name: &str, capacity: usize, is_auto: bool) -> CreateClassroomRequest {
        CreateClassroomRequest { name: name.to_string(), capacity, is_auto }
    }

    #[test]
    fn test_auto_classroom_starts_family_at_index_one() {
        let room = new_classroom(&request("Graphics", 8, true), &owner()).unwrap();
        let master = room.master_qr_code().unwrap().to_string();

        assert!(master.starts_with("class_"));
        assert_eq!(room.id, format!("{}_1", master));
        assert_eq!(room.qr_code(), room.id);
        assert_eq!(room.name, "Graphics - 1");
        assert_eq!(room.group_index(), Some(1));
        assert_eq!(room.participants(), &[owner()]);
        assert_eq!(room.messages().len(), 1);
        assert!(room.messages()[0].text.contains("Capacity: 8"));
    }

    #[test]
    fn test_manual_classroom_uses_base_token() {
        let room = new_classroom(&request("  Office   hours ", 3, false), &owner()).unwrap();
        assert_eq!(room.name, "Office hours");
        assert_eq!(room.qr_code(), room.id);
        assert!(room.master_qr_code().is_none());
        assert!(room.group_index().is_none());
    }

    #[test]
    fn test_capacity_limits() {
        assert!(new_classroom(&request("A", 1, true), &owner()).is_err());
        assert!(new_classroom(&request("A", 1, false), &owner()).is_ok());
        assert!(new_classroom(&request("A", 0, false), &owner()).is_err());
        assert!(new_classroom(&request("   ", 5, false), &owner()).is_err());
    }

    #[test]
    fn test_group_qr_code_pattern() {
        let creator = User::new("me", "Me");
        let group = new_group("Friends", &creator, 50).unwrap();
        assert!(group.id.starts_with("group_"));
        assert_eq!(group.qr_code(), format!("{}_manual", group.id));
        assert_eq!(group.owner, creator);
        assert_eq!(group.messages()[0].text, "Group created.");
    }

    #[test]
    fn test_next_family_room_clones_shared_attributes() {
        let first = new_classroom(&request("Graphics", 2, true), &owner()).unwrap();
        let newcomer = User::new("p2", "P2");
        let next = next_family_room(&first, newcomer.clone()).unwrap();

        assert_eq!(next.group_index(), Some(2));
        assert_eq!(next.master_qr_code(), first.master_qr_code());
        assert_eq!(next.name, "Graphics - 2");
        assert_eq!(next.max_capacity, 2);
        assert_eq!(next.participants(), &[owner(), newcomer]);
        assert_eq!(next.messages().len(), 1);

        let manual = new_classroom(&request("Solo", 2, false), &owner()).unwrap();
        assert!(next_family_room(&manual, User::new("x", "X")).is_none());
    }

    #[test]
    fn test_next_family_room_stops_at_last_index() {
        let mut last = new_classroom(&request("Graphics", 2, true), &owner()).unwrap();
        if let RoomKind::Auto { group_index, .. } = &mut last.kind {
            *group_index = u32::MAX;
        }

        assert!(next_family_room(&last, User::new("p2", "P2")).is_none());
    }
}
