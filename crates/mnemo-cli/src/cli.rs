//! Command-line definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use mnemo_core::ItemKind;

#[derive(Debug, Parser)]
#[command(name = "mnemo")]
#[command(author, version, about = "Capture notes, screenshots, and to-dos into mnemo")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (default: $MNEMO_STORE_DIR or the platform data dir)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Skip the remote model and use local fallbacks only
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Capture a typed note
    Note {
        #[command(flatten)]
        capture: CaptureArgs,

        /// Note text, or "-" to read from stdin
        text: String,
    },

    /// Capture a screenshot or other image file
    Image {
        #[command(flatten)]
        capture: CaptureArgs,

        /// Path to the image file
        path: PathBuf,
    },

    /// List stored items, newest first
    List {
        /// Only show one kind (memory or todo)
        #[arg(long)]
        kind: Option<ItemKind>,
    },

    /// List, add, or remove collections
    Collections {
        #[command(subcommand)]
        action: Option<CollectionAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CollectionAction {
    /// Create a collection
    Add {
        /// Collection name
        name: String,
    },

    /// Delete a collection; its items are kept but detached
    Rm {
        /// Collection id
        id: i64,
    },
}

/// Options shared by every capture command.
#[derive(Debug, Clone, Default, Args)]
pub struct CaptureArgs {
    /// Store as a to-do instead of a memory
    #[arg(long)]
    pub todo: bool,

    /// Collection id to file the item under
    #[arg(long)]
    pub collection: Option<i64>,

    /// Deadline date (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<NaiveDate>,
}

impl CaptureArgs {
    pub fn kind(&self) -> ItemKind {
        if self.todo {
            ItemKind::Todo
        } else {
            ItemKind::Memory
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_with_options() {
        let cli = Cli::try_parse_from([
            "mnemo",
            "--offline",
            "note",
            "--todo",
            "--collection",
            "12",
            "--deadline",
            "2026-10-30",
            "Renew passport.",
        ])
        .unwrap();

        assert!(cli.offline);
        match cli.command {
            Command::Note { capture, text } => {
                assert_eq!(capture.kind(), ItemKind::Todo);
                assert_eq!(capture.collection, Some(12));
                assert_eq!(capture.deadline, NaiveDate::from_ymd_opt(2026, 10, 30));
                assert_eq!(text, "Renew passport.");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_kind() {
        let cli = Cli::try_parse_from(["mnemo", "list", "--kind", "todo"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List {
                kind: Some(ItemKind::Todo)
            }
        ));
    }

    #[test]
    fn test_rejects_bad_deadline() {
        let result = Cli::try_parse_from(["mnemo", "note", "--deadline", "soon", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_collections_rm_with_global_store() {
        let cli = Cli::try_parse_from(["mnemo", "collections", "rm", "7", "--store", "/tmp/m"])
            .unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/m")));
        assert!(matches!(
            cli.command,
            Command::Collections {
                action: Some(CollectionAction::Rm { id: 7 })
            }
        ));
    }
}
