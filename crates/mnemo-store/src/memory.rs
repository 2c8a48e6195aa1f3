//! In-memory store, for tests and `--offline` dry runs.

use async_trait::async_trait;
use tokio::sync::RwLock;

use mnemo_core::{Collection, Item, ItemStore, Result};

/// Store that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Item>>,
    collections: RwLock<Vec<Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `items`.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
            collections: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Item>> {
        Ok(self.items.read().await.clone())
    }

    async fn save(&self, items: &[Item]) -> Result<()> {
        *self.items.write().await = items.to_vec();
        Ok(())
    }

    async fn load_collections(&self) -> Result<Vec<Collection>> {
        Ok(self.collections.read().await.clone())
    }

    async fn save_collections(&self, collections: &[Collection]) -> Result<()> {
        *self.collections.write().await = collections.to_vec();
        Ok(())
    }
}
