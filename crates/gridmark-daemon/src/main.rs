//! Gridmark Daemon - Main entry point
//!
//! Wires the marker server, controller, and frame broadcaster together:
//! spawns the marker grid at startup and then broadcasts frame transforms
//! at a fixed rate until the process is stopped.

mod config;

use anyhow::Result;
use clap::Parser;
use gridmark_core::TransformRecord;
use gridmark_server::{FrameBroadcaster, MarkerController, MarkerServer};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "gridmark")]
#[command(about = "Interactive marker grid server and frame broadcaster")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "gridmark.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Skip spawning the marker grid at startup
    #[arg(long)]
    no_grid: bool,

    /// Publish one ad-hoc frame transform at startup: child frame name
    #[arg(long)]
    frame_id: Option<String>,

    /// Parent frame for --frame-id
    #[arg(long)]
    parent_frame_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Gridmark v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load_config(&args.config)?;

    let server = Arc::new(MarkerServer::new());
    let (transform_tx, _) = broadcast::channel::<TransformRecord>(256);
    let controller = MarkerController::with_server(server.clone(), transform_tx.clone());

    // Log committed marker batches; a rendering transport would subscribe
    // to the same channel.
    let mut updates = server.subscribe();
    tokio::spawn(async move {
        while let Ok(update) = updates.recv().await {
            info!(
                markers = update.markers.len(),
                erases = update.erases.len(),
                "Marker update committed"
            );
            if let Ok(json) = serde_json::to_string(&update) {
                tracing::debug!(update = %json, "Marker update payload");
            }
        }
    });

    if !args.no_grid {
        let grid = config.grid_settings();
        info!(
            rows = grid.rows,
            cols = grid.cols,
            spacing = grid.spacing,
            "Spawning marker grid"
        );
        if let Err(e) = controller.spawn_grid(&grid).await {
            warn!(error = %e, "Grid spawn failed");
        }
    }

    match (&args.frame_id, &args.parent_frame_id) {
        (Some(frame), Some(parent)) => {
            if let Err(e) = controller.publish_frame(frame, parent) {
                warn!(error = %e, "Frame publish rejected");
            }
        }
        (None, None) => {}
        _ => warn!("--frame-id and --parent-frame-id must be given together"),
    }

    // Steady state: the broadcaster ticks until the process is stopped
    FrameBroadcaster::with_publisher(transform_tx)
        .run(config.tick_period())
        .await;

    Ok(())
}
