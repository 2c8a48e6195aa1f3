//! Core traits for mnemo abstractions.
//!
//! These traits define the seams between the content pipeline, its callers,
//! and the persistence layer.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Durable storage for items and collections.
///
/// Implementations must round-trip ids unchanged: a saved item loads back
/// with the same `id`.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Load every stored item, oldest first.
    async fn load(&self) -> Result<Vec<Item>>;

    /// Replace the stored items with `items`.
    async fn save(&self, items: &[Item]) -> Result<()>;

    /// Load every stored collection.
    async fn load_collections(&self) -> Result<Vec<Collection>>;

    /// Replace the stored collections with `collections`.
    async fn save_collections(&self, collections: &[Collection]) -> Result<()>;
}

// =============================================================================
// CONTENT PIPELINE
// =============================================================================

/// Turns raw captured input into a [`ContentRecord`].
///
/// Infallible by contract: remote or parse failures are absorbed by the
/// implementation and replaced with fallback records.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, request: &ContentRequest) -> ContentRecord;
}
