//! Room command handlers

use super::{CommandContext, Reply};
use crate::models::MessageSender;
use crate::rooms::JoinOutcome;
use crate::utils::errors::{DaloError, Result};
use crate::utils::helpers::{format_timestamp, truncate_text};

/// Handle `create`
pub async fn handle_create(ctx: &CommandContext, name: &str, capacity: usize, is_auto: bool) -> Result<Reply> {
    let room = ctx.service.create_classroom(name, Some(capacity), is_auto).await?;

    let token = room.master_qr_code().map(str::to_string).unwrap_or_else(|| room.qr_code());
    Ok(Reply::text(format!(
        "Created \"{}\" ({}, capacity {}). Join token: {}",
        room.name,
        if is_auto { "auto-scaling" } else { "manual" },
        room.max_capacity,
        token
    )))
}

/// Handle `group`
pub async fn handle_group(ctx: &CommandContext, name: &str) -> Result<Reply> {
    let owner = ctx.service.owner().clone();
    let room = ctx.service.create_group(name, &owner).await?;
    Ok(Reply::text(format!("Created group \"{}\". Join token: {}", room.name, room.qr_code())))
}

/// Handle `join`: a synthesized guest presents the token
pub async fn handle_join(ctx: &CommandContext, token: &str) -> Result<Reply> {
    let (guest, outcome) = ctx.service.simulate_join(token).await;

    let text = match outcome {
        JoinOutcome::Joined { room_id } => format!("{} joined {}.", guest.name, room_id),
        JoinOutcome::Spawned { room_id, group_index } => format!(
            "All rooms were full. {} was placed in new room {} (#{}).",
            guest.name, room_id, group_index
        ),
        JoinOutcome::RoomFull { room_name, .. } => {
            format!("Room \"{}\" is full. Cannot join.", room_name)
        }
        JoinOutcome::InvalidToken { token } => format!("Token {} did not match any room.", token),
        JoinOutcome::Fault(fault) => format!("Join aborted: {}", fault),
    };

    Ok(Reply::text(text))
}

/// Handle `say`: post as the room owner
pub async fn handle_say(ctx: &CommandContext, room_id: &str, text: &str) -> Result<Reply> {
    let owner = ctx.service.owner().clone();
    let message = ctx.service.post_message(room_id, &owner, text).await?;
    Ok(Reply::text(format!("Posted \"{}\" to {}.", truncate_text(&message.text, 40), room_id)))
}

/// Handle `show`: room summary, participants and the message log
pub async fn handle_show(ctx: &CommandContext, room_id: &str) -> Result<Reply> {
    let room = ctx
        .service
        .find_room(room_id)
        .await
        .ok_or_else(|| DaloError::RoomNotFound { room_id: room_id.to_string() })?;

    let participants: Vec<&str> = room.participants().iter().map(|user| user.name.as_str()).collect();
    let mut lines = vec![
        format!(
            "{} ({}) | token {} | {}/{}",
            room.name,
            room.id,
            room.qr_code(),
            room.participant_count(),
            room.max_capacity
        ),
        format!("Participants: {}", participants.join(", ")),
        format!("Messages ({}):", room.messages().len()),
    ];

    for message in room.messages() {
        let sender = match &message.sender {
            MessageSender::System => "System".to_string(),
            MessageSender::User(user_id) => room
                .participants()
                .iter()
                .chain(std::iter::once(&room.owner))
                .find(|user| &user.id == user_id)
                .map(|user| user.name.clone())
                .unwrap_or_else(|| user_id.clone()),
        };
        lines.push(format!("  [{}] {}: {}", format_timestamp(message.timestamp), sender, message.text));
    }

    Ok(Reply::text(lines.join("\n")))
}

/// Handle `meet`
pub async fn handle_meet(ctx: &CommandContext, token: &str) -> Result<Reply> {
    let Some(meeting) = ctx.service.joint_meeting(token).await else {
        return Ok(Reply::text(format!("No room or family for token {}.", token)));
    };

    let names: Vec<&str> = meeting.participants.iter().map(|user| user.name.as_str()).collect();
    Ok(Reply::text(format!(
        "{} ({} participants): {}",
        meeting.title,
        meeting.participants.len(),
        names.join(", ")
    )))
}
