//! Command execution.

use anyhow::{Context, Result};
use serde_json::{json, Value as JsonValue};
use tracing::info;

use mnemo_core::{logging, ItemDraft, ItemStore};
use mnemo_inference::ContentProcessor;
use mnemo_store::Notebook;

use crate::cli::{CaptureArgs, CollectionAction, Command};
use crate::input;

/// Pipeline plus notebook; each command returns the JSON to print.
pub struct App<S> {
    processor: ContentProcessor,
    notebook: Notebook<S>,
}

impl<S: ItemStore> App<S> {
    pub fn new(processor: ContentProcessor, notebook: Notebook<S>) -> Self {
        Self {
            processor,
            notebook,
        }
    }

    pub async fn run(&self, command: Command) -> Result<JsonValue> {
        match command {
            Command::Note { capture, text } => {
                let text = input::read_note(&text, std::io::stdin())?;
                self.capture(ItemDraft::note(text), &capture).await
            }
            Command::Image { capture, path } => {
                let data_uri = input::load_image(&path)?;
                self.capture(ItemDraft::image(data_uri), &capture).await
            }
            Command::List { kind } => {
                let items = self.notebook.items(kind).await?;
                Ok(serde_json::to_value(items)?)
            }
            Command::Collections { action: None } => {
                let collections = self.notebook.collections().await?;
                Ok(serde_json::to_value(collections)?)
            }
            Command::Collections {
                action: Some(CollectionAction::Add { name }),
            } => {
                let collection = self.notebook.create_collection(&name).await?;
                Ok(serde_json::to_value(collection)?)
            }
            Command::Collections {
                action: Some(CollectionAction::Rm { id }),
            } => {
                let detached = self
                    .notebook
                    .delete_collection(id)
                    .await
                    .with_context(|| format!("Failed to delete collection {}", id))?;
                Ok(json!({ "deleted": id, "detached_items": detached }))
            }
        }
    }

    async fn capture(&self, draft: ItemDraft, args: &CaptureArgs) -> Result<JsonValue> {
        let draft = draft
            .with_kind(args.kind())
            .with_collection(args.collection)
            .with_deadline(args.deadline);

        let item = self
            .notebook
            .capture_with(&self.processor, draft)
            .await
            .context("Failed to save item")?;

        info!(
            { logging::ITEM_ID } = item.id,
            kind = %item.kind,
            remote = self.processor.is_remote_enabled(),
            "Captured"
        );
        Ok(serde_json::to_value(item)?)
    }
}
