//! Item and collection operations over an [`ItemStore`].

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use mnemo_core::{
    logging, next_item_id, Collection, ContentExtractor, ContentRecord, Error, Item, ItemDraft,
    ItemKind, ItemStore, Result,
};

/// Load-modify-save operations on items and collections.
///
/// Mutations are serialized through an internal lock so concurrent callers
/// sharing one notebook never lose each other's writes.
pub struct Notebook<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: ItemStore> Notebook<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Merge `record` into a new item, append it and save.
    pub async fn capture(&self, draft: ItemDraft, record: ContentRecord) -> Result<Item> {
        self.capture_at(draft, record, Utc::now()).await
    }

    /// [`capture`](Self::capture) with an explicit creation time.
    ///
    /// A draft with a blank note and no image is `InvalidInput`.
    pub async fn capture_at(
        &self,
        draft: ItemDraft,
        record: ContentRecord,
        now: DateTime<Utc>,
    ) -> Result<Item> {
        draft.validate()?;

        let _guard = self.write_lock.lock().await;

        if let Some(collection_id) = draft.collection_id {
            let collections = self.store.load_collections().await?;
            if !collections.iter().any(|c| c.id == collection_id) {
                return Err(Error::CollectionNotFound(collection_id));
            }
        }

        let mut items = self.store.load().await?;
        let id = next_item_id(items.iter().map(|i| i.id), now);
        let item = Item::from_record(id, draft, record, now);
        items.push(item.clone());
        self.store.save(&items).await?;

        info!(
            { logging::SUBSYSTEM } = "store",
            { logging::OPERATION } = "capture",
            { logging::ITEM_ID } = item.id,
            kind = %item.kind,
            { logging::ITEM_COUNT } = items.len(),
            "Item captured"
        );
        Ok(item)
    }

    /// Run `extractor` on the draft's content, then capture the result.
    pub async fn capture_with(
        &self,
        extractor: &dyn ContentExtractor,
        draft: ItemDraft,
    ) -> Result<Item> {
        draft.validate()?;
        let record = extractor.extract(&draft.content_request()).await;
        self.capture(draft, record).await
    }

    /// Stored items, newest first, optionally restricted to one kind.
    pub async fn items(&self, kind: Option<ItemKind>) -> Result<Vec<Item>> {
        let mut items = self.store.load().await?;
        if let Some(kind) = kind {
            items.retain(|i| i.kind == kind);
        }
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(items)
    }

    pub async fn get_item(&self, id: i64) -> Result<Item> {
        self.store
            .load()
            .await?
            .into_iter()
            .find(|i| i.id == id)
            .ok_or(Error::ItemNotFound(id))
    }

    /// Delete one item, returning it.
    pub async fn remove_item(&self, id: i64) -> Result<Item> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.store.load().await?;
        let index = items
            .iter()
            .position(|i| i.id == id)
            .ok_or(Error::ItemNotFound(id))?;
        let removed = items.remove(index);
        self.store.save(&items).await?;

        info!(
            { logging::SUBSYSTEM } = "store",
            { logging::OPERATION } = "remove_item",
            { logging::ITEM_ID } = id,
            "Item removed"
        );
        Ok(removed)
    }

    /// Create a collection with a trimmed, non-empty name.
    pub async fn create_collection(&self, name: &str) -> Result<Collection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Collection name cannot be empty".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;

        let mut collections = self.store.load_collections().await?;
        let now = Utc::now();
        let collection = Collection {
            id: next_item_id(collections.iter().map(|c| c.id), now),
            name: name.to_string(),
            created_at: now,
        };
        collections.push(collection.clone());
        self.store.save_collections(&collections).await?;

        info!(
            { logging::SUBSYSTEM } = "store",
            { logging::OPERATION } = "create_collection",
            { logging::COLLECTION_ID } = collection.id,
            "Collection created"
        );
        Ok(collection)
    }

    pub async fn collections(&self) -> Result<Vec<Collection>> {
        self.store.load_collections().await
    }

    /// Delete a collection and clear it from every item that referenced it.
    ///
    /// Returns the number of items that were detached.
    pub async fn delete_collection(&self, id: i64) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let mut collections = self.store.load_collections().await?;
        let before = collections.len();
        collections.retain(|c| c.id != id);
        if collections.len() == before {
            return Err(Error::CollectionNotFound(id));
        }

        let mut items = self.store.load().await?;
        let mut detached = 0;
        for item in items.iter_mut().filter(|i| i.collection_id == Some(id)) {
            item.collection_id = None;
            detached += 1;
        }

        if detached > 0 {
            self.store.save(&items).await?;
        }
        self.store.save_collections(&collections).await?;

        debug!(
            { logging::COLLECTION_ID } = id,
            detached,
            "Detached items from deleted collection"
        );
        info!(
            { logging::SUBSYSTEM } = "store",
            { logging::OPERATION } = "delete_collection",
            { logging::COLLECTION_ID } = id,
            "Collection deleted"
        );
        Ok(detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use mnemo_core::ContentRequest;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn record(title: &str) -> ContentRecord {
        ContentRecord {
            title: title.to_string(),
            ..ContentRecord::default()
        }
    }

    #[tokio::test]
    async fn test_capture_assigns_timestamp_id() {
        let notebook = Notebook::new(MemoryStore::new());
        let item = notebook
            .capture_at(ItemDraft::note("hello"), record("Hello"), at(1_000))
            .await
            .unwrap();

        assert_eq!(item.id, 1_000);
        assert_eq!(item.title, "Hello");
        assert_eq!(item.note, "hello");
        assert_eq!(notebook.store().load().await.unwrap(), vec![item]);
    }

    #[tokio::test]
    async fn test_capture_same_millisecond_stays_unique() {
        let notebook = Notebook::new(MemoryStore::new());
        let first = notebook
            .capture_at(ItemDraft::note("a"), record("A"), at(5_000))
            .await
            .unwrap();
        let second = notebook
            .capture_at(ItemDraft::note("b"), record("B"), at(5_000))
            .await
            .unwrap();

        assert_eq!(first.id, 5_000);
        assert_eq!(second.id, 5_001);
    }

    #[tokio::test]
    async fn test_capture_rejects_unknown_collection() {
        let notebook = Notebook::new(MemoryStore::new());
        let draft = ItemDraft::note("x").with_collection(Some(99));
        let result = notebook.capture(draft, record("X")).await;
        assert!(matches!(result, Err(Error::CollectionNotFound(99))));
    }

    #[tokio::test]
    async fn test_items_filter_and_order() {
        let notebook = Notebook::new(MemoryStore::new());
        notebook
            .capture_at(ItemDraft::note("a"), record("A"), at(1))
            .await
            .unwrap();
        notebook
            .capture_at(
                ItemDraft::note("b").with_kind(ItemKind::Todo),
                record("B"),
                at(2),
            )
            .await
            .unwrap();
        notebook
            .capture_at(ItemDraft::note("c"), record("C"), at(3))
            .await
            .unwrap();

        let titles: Vec<String> = notebook
            .items(None)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["C", "B", "A"]);

        let todos = notebook.items(Some(ItemKind::Todo)).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert!(todos[0].is_todo());
    }

    #[tokio::test]
    async fn test_remove_item() {
        let notebook = Notebook::new(MemoryStore::new());
        let item = notebook
            .capture(ItemDraft::note("a"), record("A"))
            .await
            .unwrap();

        assert_eq!(notebook.remove_item(item.id).await.unwrap(), item);
        assert!(notebook.items(None).await.unwrap().is_empty());
        assert!(matches!(
            notebook.remove_item(item.id).await,
            Err(Error::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_collection_validates_name() {
        let notebook = Notebook::new(MemoryStore::new());
        assert!(matches!(
            notebook.create_collection("   ").await,
            Err(Error::InvalidInput(_))
        ));

        let created = notebook.create_collection("  Work ").await.unwrap();
        assert_eq!(created.name, "Work");
        assert_eq!(notebook.collections().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_delete_collection_detaches_items() {
        let notebook = Notebook::new(MemoryStore::new());
        let work = notebook.create_collection("Work").await.unwrap();
        notebook
            .capture(
                ItemDraft::note("a").with_collection(Some(work.id)),
                record("A"),
            )
            .await
            .unwrap();
        notebook
            .capture(ItemDraft::note("b"), record("B"))
            .await
            .unwrap();

        assert_eq!(notebook.delete_collection(work.id).await.unwrap(), 1);
        assert!(notebook.collections().await.unwrap().is_empty());
        assert!(notebook
            .items(None)
            .await
            .unwrap()
            .iter()
            .all(|i| i.collection_id.is_none()));
        assert!(matches!(
            notebook.delete_collection(work.id).await,
            Err(Error::CollectionNotFound(_))
        ));
    }

    struct FixedExtractor;

    #[async_trait]
    impl ContentExtractor for FixedExtractor {
        async fn extract(&self, request: &ContentRequest) -> ContentRecord {
            record(request.kind())
        }
    }

    #[tokio::test]
    async fn test_capture_rejects_blank_note() {
        let notebook = Notebook::new(MemoryStore::new());
        for note in ["", "   "] {
            let result = notebook.capture(ItemDraft::note(note), record("X")).await;
            assert!(matches!(result, Err(Error::InvalidInput(_))));

            let result = notebook
                .capture_with(&FixedExtractor, ItemDraft::note(note))
                .await;
            assert!(matches!(result, Err(Error::InvalidInput(_))));
        }
        assert!(notebook.store().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_capture_with_runs_extractor() {
        let notebook = Notebook::new(MemoryStore::new());
        let item = notebook
            .capture_with(&FixedExtractor, ItemDraft::image("data:image/png;base64,AAAA"))
            .await
            .unwrap();
        assert_eq!(item.title, "image");
        assert_eq!(item.image_data.as_deref(), Some("data:image/png;base64,AAAA"));
    }
}
