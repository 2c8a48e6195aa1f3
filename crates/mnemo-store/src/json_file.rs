//! JSON-file store.
//!
//! Layout: `{dir}/items.json` and `{dir}/collections.json`, each a JSON array.
//! Missing or empty files load as empty lists.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use mnemo_core::defaults::{COLLECTIONS_FILE, ENV_STORE_DIR, ITEMS_FILE};
use mnemo_core::{logging, Collection, Item, ItemStore, Result};

/// Store backed by two JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$MNEMO_STORE_DIR`, else the platform data directory plus `mnemo`.
    pub fn default_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(ENV_STORE_DIR).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from(".local/share"));
        path.push("mnemo");
        path
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_list<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        if !fs::try_exists(&path).await? {
            debug!(path = %path.display(), "json_file: no file yet, loading empty list");
            return Ok(Vec::new());
        }

        let bytes = fs::read(&path).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(
                path = %path.display(),
                { logging::ERROR_MSG } = %e,
                "json_file: parse failed"
            );
            e.into()
        })
    }

    async fn write_list<T: Serialize>(&self, file: &str, values: &[T]) -> Result<()> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            warn!(
                dir = %self.dir.display(),
                { logging::ERROR_MSG } = %e,
                "json_file: create_dir_all failed"
            );
            e
        })?;

        let path = self.dir.join(file);
        let data = serde_json::to_vec_pretty(values)?;

        // Temp file + rename, so readers never see a partial write
        let temp_path = path.with_extension("json.tmp");
        let mut handle = fs::File::create(&temp_path).await?;
        handle.write_all(&data).await?;
        handle.sync_all().await?;
        drop(handle);

        fs::rename(&temp_path, &path).await.map_err(|e| {
            warn!(
                from = %temp_path.display(),
                to = %path.display(),
                { logging::ERROR_MSG } = %e,
                "json_file: rename failed"
            );
            e
        })?;

        debug!(
            path = %path.display(),
            { logging::ITEM_COUNT } = values.len(),
            size = data.len(),
            "json_file: saved"
        );
        Ok(())
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Item>> {
        self.read_list(ITEMS_FILE).await
    }

    async fn save(&self, items: &[Item]) -> Result<()> {
        self.write_list(ITEMS_FILE, items).await
    }

    async fn load_collections(&self) -> Result<Vec<Collection>> {
        self.read_list(COLLECTIONS_FILE).await
    }

    async fn save_collections(&self, collections: &[Collection]) -> Result<()> {
        self.write_list(COLLECTIONS_FILE, collections).await
    }
}
