//! # mnemo-store
//!
//! Persistence for mnemo items and collections.
//!
//! This crate provides:
//! - [`MemoryStore`]: process-local storage
//! - [`JsonFileStore`]: `items.json` / `collections.json` in a data directory
//! - [`Notebook`]: capture, list, and collection management over any [`ItemStore`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use mnemo_store::{JsonFileStore, Notebook};
//! use mnemo_core::{ContentRecord, ItemDraft};
//!
//! let notebook = Notebook::new(JsonFileStore::new(JsonFileStore::default_dir()));
//! let item = notebook.capture(ItemDraft::note("Buy milk"), record).await?;
//! ```

pub mod json_file;
pub mod memory;
pub mod notebook;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use notebook::Notebook;

pub use mnemo_core::ItemStore;
