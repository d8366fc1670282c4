mod api;
mod app;
mod app_data;
mod cli;
mod config;
mod controller;
mod state;
mod task;
mod ui;
mod view;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The window logs verbosely; the CLI keeps stderr quiet unless asked
    let default_filter = if cli.command.is_some() {
        "affairs=warn"
    } else {
        "affairs=debug,info"
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.command.is_some() {
        return cli::run(cli).await;
    }

    tracing::info!("Starting Current Affairs Hub");

    let config = Config::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    let client = config.client(cli.output.backend.as_deref())?;

    // Configure native options
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 820.0])
        .with_min_inner_size([640.0, 520.0])
        .with_title("Current Affairs Hub");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true, // Save/restore window size and position
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Affairs",
        native_options,
        Box::new(|cc| Ok(Box::new(app::AffairsApp::new(cc, config, client)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
