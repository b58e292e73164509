//! DaloRooms console
//!
//! Main application entry point

use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use DaloRooms::{
    config::Settings,
    handlers::{handle_line, CommandContext},
    services::ClassroomService,
    storage::{load_registry, PersistenceManager, SnapshotStore},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging).context("Failed to initialize logging")?;

    info!("Starting {}...", DaloRooms::info());

    // Load rooms from the last snapshot
    let store = SnapshotStore::from_settings(&settings)
        .await
        .context("Failed to open snapshot store")?;
    let registry = load_registry(&store).await.context("Failed to load room snapshot")?;
    info!(rooms = registry.read(|rooms| rooms.len()).await, "Room registry ready");

    let mut persistence = PersistenceManager::new(
        store.clone(),
        registry.clone(),
        Duration::from_millis(settings.persistence.debounce_ms),
    );
    persistence.start();

    let ctx = CommandContext {
        service: ClassroomService::new(registry, settings.rooms.clone()),
        store,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Type `help` for commands.\n").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let Some(reply) = handle_line(&ctx, &line).await else {
            continue;
        };

        stdout.write_all(reply.text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;

        if reply.quit {
            break;
        }
    }

    persistence.stop();
    if let Err(e) = persistence.flush().await {
        error!(error = %e, "Final snapshot save failed");
    }

    info!("DaloRooms console has been shut down.");

    Ok(())
}
