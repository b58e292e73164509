//! Command handlers module
//!
//! This module parses console commands and dispatches them to their handlers.

pub mod admin;
pub mod help;
pub mod rooms;

use std::str::FromStr;

use crate::services::ClassroomService;
use crate::storage::SnapshotStore;
use crate::utils::errors::{DaloError, Result};

/// All available console commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { capacity: usize, is_auto: bool, name: String },
    Group { name: String },
    Join { token: String },
    Say { room_id: String, text: String },
    Show { room_id: String },
    List,
    Clusters,
    Meet { token: String },
    Search { query: String },
    Stats,
    Save,
    Help,
    Quit,
}

/// Dependencies shared by every handler
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub service: ClassroomService,
    pub store: SnapshotStore,
}

/// Handler output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), quit: false }
    }

    pub fn quit(text: impl Into<String>) -> Self {
        Self { text: text.into(), quit: true }
    }
}

impl FromStr for Command {
    type Err = DaloError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_lowercase().as_str() {
            "create" => parse_create(rest)?,
            "group" => Command::Group { name: required(rest, "group name")? },
            "join" => Command::Join { token: required(rest, "join token")? },
            "say" => {
                let (room_id, text) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| DaloError::InvalidInput("Usage: say <room_id> <text>".to_string()))?;
                Command::Say { room_id: room_id.to_string(), text: text.trim().to_string() }
            }
            "show" | "messages" => Command::Show { room_id: required(rest, "room id")? },
            "list" => Command::List,
            "clusters" => Command::Clusters,
            "meet" => Command::Meet { token: required(rest, "join token")? },
            "search" => Command::Search { query: rest.to_string() },
            "stats" => Command::Stats,
            "save" => Command::Save,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err(DaloError::InvalidInput("Empty command".to_string())),
            other => return Err(DaloError::InvalidInput(format!("Unknown command: {}", other))),
        };

        Ok(command)
    }
}

fn required(value: &str, what: &str) -> Result<String> {
    if value.is_empty() {
        return Err(DaloError::InvalidInput(format!("Missing {}", what)));
    }
    Ok(value.to_string())
}

fn parse_create(rest: &str) -> Result<Command> {
    let usage = || DaloError::InvalidInput("Usage: create <capacity> <auto|manual> <name>".to_string());

    let mut parts = rest.splitn(3, char::is_whitespace);
    let capacity = parts
        .next()
        .and_then(|value| value.parse::<usize>().ok())
        .ok_or_else(usage)?;
    let is_auto = match parts.next().map(str::to_lowercase).as_deref() {
        Some("auto") => true,
        Some("manual") => false,
        _ => return Err(usage()),
    };
    let name = parts.next().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(usage());
    }

    Ok(Command::Create { capacity, is_auto, name: name.to_string() })
}

/// Main command dispatcher
pub async fn handle_command(ctx: &CommandContext, cmd: Command) -> Result<Reply> {
    match cmd {
        Command::Create { capacity, is_auto, name } => rooms::handle_create(ctx, &name, capacity, is_auto).await,
        Command::Group { name } => rooms::handle_group(ctx, &name).await,
        Command::Join { token } => rooms::handle_join(ctx, &token).await,
        Command::Say { room_id, text } => rooms::handle_say(ctx, &room_id, &text).await,
        Command::Show { room_id } => rooms::handle_show(ctx, &room_id).await,
        Command::Meet { token } => rooms::handle_meet(ctx, &token).await,
        Command::List => admin::handle_list(ctx).await,
        Command::Clusters => admin::handle_clusters(ctx).await,
        Command::Search { query } => admin::handle_search(ctx, &query).await,
        Command::Stats => admin::handle_stats(ctx).await,
        Command::Save => admin::handle_save(ctx).await,
        Command::Help => Ok(help::handle_help()),
        Command::Quit => Ok(Reply::quit("Bye.")),
    }
}
