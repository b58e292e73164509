//! Line handler for console input

use tracing::{debug, warn};

use crate::handlers::commands::{handle_command, help::USAGE, Command, CommandContext, Reply};

/// Parse and run one input line. Errors become reply text, so the console loop keeps going.
pub async fn handle_line(ctx: &CommandContext, line: &str) -> Option<Reply> {
    if line.trim().is_empty() {
        return None;
    }

    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            debug!(input = %line, error = %e, "Could not parse command");
            return Some(Reply::text(format!("{}\n\n{}", e, USAGE)));
        }
    };

    match handle_command(ctx, command).await {
        Ok(reply) => Some(reply),
        Err(e) => {
            warn!(input = %line, error = %e, severity = %e.severity(), "Command failed");
            if e.is_recoverable() {
                Some(Reply::text(format!("Error: {}. Please try again.", e)))
            } else {
                Some(Reply::text(format!("Error: {}", e)))
            }
        }
    }
}
