// src/main.rs
//
// Runs the catalog core with filesystem media storage. Reads stdin one JSON
// message per line: catalog commands (create, upload, show, get, delete)
// are answered on stdout, everything else goes to the encoder listener.

use std::sync::Arc;

use anyhow::Context;
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use mediacatalog::application::{parse_line, render_reply, AppState, Gateways};
use mediacatalog::config::CatalogConfig;
use mediacatalog::events::{EventBus, VideoDeleted, VideoMediaCreated, VideoMediaStatusChanged};
use mediacatalog::infrastructure::LocalStorageService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. CONFIGURATION
    let config = CatalogConfig::from_env().context("invalid configuration")?;
    info!(
        "[CONFIG] {}",
        serde_json::to_string(&config).context("could not render configuration")?
    );

    // 2. INFRASTRUCTURE
    let storage = LocalStorageService::create(&config.storage_root).with_context(|| {
        format!(
            "could not open media storage at {}",
            config.storage_root.display()
        )
    })?;
    let event_bus = Arc::new(EventBus::new());
    register_event_logging(&event_bus);

    // 3. SERVICES
    let state = Arc::new(AppState::new(
        Gateways::in_memory(Arc::new(storage)),
        event_bus,
        config.listener_config(),
    ));

    // 4. ENCODER LISTENER
    let (tx, rx) = mpsc::channel::<String>(config.queue_capacity);
    state.encoder_listener.start(rx);

    // 5. INPUT ROUTING
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Some(command) => {
                let state = Arc::clone(&state);
                let reply = tokio::task::spawn_blocking(move || {
                    render_reply(command.and_then(|command| state.run_command(command)))
                })
                .await
                .context("command task failed")?;
                println!("{}", reply);
            }
            None => {
                if tx.send(line).await.is_err() {
                    break;
                }
            }
        }
    }
    drop(tx);

    let consumed = state.encoder_listener.join().await;
    info!("Consumed {} encoder messages", consumed);

    Ok(())
}

fn register_event_logging(bus: &EventBus) {
    bus.subscribe::<VideoMediaCreated, _>(|event| {
        info!(
            "[EVENT] Media {} of video {} ready for encoding at {}",
            event.resource_id, event.video_id, event.file_path
        );
    });
    bus.subscribe::<VideoMediaStatusChanged, _>(|event| {
        info!(
            "[EVENT] {} of video {} moved to {}",
            event.media_type, event.video_id, event.status
        );
    });
    bus.subscribe::<VideoDeleted, _>(|event| {
        info!("[EVENT] Video {} deleted", event.video_id);
    });
}
