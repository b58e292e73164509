//! Admin overview command handlers

use super::{CommandContext, Reply};
use crate::models::RoomSummary;
use crate::storage::save_snapshot;
use crate::utils::errors::Result;

fn summary_line(room: &RoomSummary) -> String {
    format!(
        "  {} | {} | token {} | {}/{}",
        room.id, room.name, room.qr_code, room.participants, room.max_capacity
    )
}

/// Handle `list`
pub async fn handle_list(ctx: &CommandContext) -> Result<Reply> {
    let rooms = ctx.service.list_rooms().await;
    if rooms.is_empty() {
        return Ok(Reply::text("No rooms yet."));
    }

    let mut lines = vec![format!("{} rooms:", rooms.len())];
    lines.extend(rooms.iter().map(summary_line));
    Ok(Reply::text(lines.join("\n")))
}

/// Handle `clusters`
pub async fn handle_clusters(ctx: &CommandContext) -> Result<Reply> {
    let clusters = ctx.service.clusters().await;
    if clusters.is_empty() {
        return Ok(Reply::text("No rooms yet."));
    }

    let mut lines = Vec::new();
    for cluster in &clusters {
        lines.push(format!(
            "{} [{}] token {} - {} members in {} room(s)",
            cluster.label,
            if cluster.is_auto { "auto" } else { "manual" },
            cluster.join_token,
            cluster.total_members(),
            cluster.rooms.len()
        ));
        lines.extend(cluster.rooms.iter().map(summary_line));
    }
    Ok(Reply::text(lines.join("\n")))
}

/// Handle `search`
pub async fn handle_search(ctx: &CommandContext, query: &str) -> Result<Reply> {
    let rooms = ctx.service.search(query).await;
    if rooms.is_empty() {
        return Ok(Reply::text(format!("No rooms match \"{}\".", query)));
    }

    let mut lines = vec![format!("{} match(es):", rooms.len())];
    lines.extend(rooms.iter().map(summary_line));
    Ok(Reply::text(lines.join("\n")))
}

/// Handle `stats`
pub async fn handle_stats(ctx: &CommandContext) -> Result<Reply> {
    let stats = ctx.service.stats().await;
    Ok(Reply::text(format!(
        "Rooms: {} ({} auto families, {} manual)\nFull rooms: {}\nParticipants: {}",
        stats.room_count, stats.family_count, stats.manual_count, stats.full_rooms, stats.total_participants
    )))
}

/// Handle `save`
pub async fn handle_save(ctx: &CommandContext) -> Result<Reply> {
    let count = save_snapshot(&ctx.store, ctx.service.registry()).await?;
    Ok(Reply::text(format!("Saved {} rooms to {} storage.", count, ctx.store.backend())))
}
