//! mnemo: capture notes, screenshots, and to-dos from the terminal.
//!
//! Each capture runs the content pipeline once, merges the resulting record
//! into a new item, saves it, and prints the item as JSON.

mod cli;
mod commands;
mod input;
mod logging;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use mnemo_inference::{ContentProcessor, RemoteConfig};
use mnemo_store::{JsonFileStore, Notebook};

use crate::cli::Cli;
use crate::commands::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = logging::init();

    let processor = if cli.offline {
        debug!("Offline mode, remote extraction disabled");
        ContentProcessor::offline()
    } else {
        let config = RemoteConfig::load().context("Failed to load remote configuration")?;
        ContentProcessor::from_config(&config)?
    };

    let store_dir = cli.store.clone().unwrap_or_else(JsonFileStore::default_dir);
    info!(store_dir = %store_dir.display(), "Using store");

    let app = App::new(processor, Notebook::new(JsonFileStore::new(store_dir)));
    let output = app.run(cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
