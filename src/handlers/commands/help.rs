//! Help command handler

use super::Reply;

pub const USAGE: &str = "DaloRooms console\n\n\
    create <capacity> <auto|manual> <name> - Open a classroom\n\
    group <name> - Open a basic group\n\
    join <token> - Join as a new guest student\n\
    say <room_id> <text> - Post a message as the owner\n\
    show <room_id> - Show a room with its participants and messages\n\
    list - List all rooms\n\
    clusters - Show rooms grouped by class\n\
    meet <token> - Roster for a joint meeting of a class\n\
    search <query> - Find rooms by name\n\
    stats - Show room statistics\n\
    save - Save a snapshot now\n\
    help - Show this help message\n\
    quit - Save and exit";

/// Handle `help`
pub fn handle_help() -> Reply {
    Reply::text(USAGE)
}
