//! Centralized default constants for mnemo.
//!
//! **This module is the single source of truth** for shared default values
//! and the literal fallback strings the pipeline emits.

// =============================================================================
// REMOTE EXTRACTION
// =============================================================================

/// Default structured-generation endpoint.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model.
pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Timeout for a single remote attempt (seconds).
pub const REMOTE_TIMEOUT_SECS: u64 = 60;

/// Total attempts per remote call, including the first.
pub const REMOTE_MAX_ATTEMPTS: u32 = 3;

/// Base backoff delay; attempt `n` (0-based) waits `base * 2^n` before retrying.
pub const REMOTE_BASE_DELAY_MS: u64 = 1000;

/// MIME type assumed for image payloads without a `data:` prefix.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

// =============================================================================
// TAGS
// =============================================================================

/// Maximum tags kept on a content record.
pub const MAX_TAGS: usize = 3;

// =============================================================================
// OFFLINE SUMMARIZER
// =============================================================================

/// Maximum characters kept from the first line when deriving a title.
pub const TITLE_MAX_CHARS: usize = 40;

/// Title used when a note has no usable first line.
pub const NOTE_TITLE: &str = "New Note";

/// Summary used when a note has no content.
pub const EMPTY_NOTE_SUMMARY: &str = "No content to summarize.";

// =============================================================================
// IMAGE PATH
// =============================================================================

/// Title for image records when the model supplies none.
pub const IMAGE_TITLE: &str = "Screenshot";

/// Summary for image records when the model supplies none.
pub const IMAGE_SUMMARY: &str = "No summary available.";

/// Summary of the fixed record returned when image analysis fails.
pub const IMAGE_FAILED_SUMMARY: &str = "Could not analyze image content.";

/// Extracted text of the fixed record returned when image analysis fails.
pub const IMAGE_FAILED_TEXT: &str = "Analysis failed. No text could be extracted.";

// =============================================================================
// EMPTY REQUEST
// =============================================================================

/// Title for requests that carry neither a note nor an image.
pub const EMPTY_ITEM_TITLE: &str = "New Item";

// =============================================================================
// STORAGE
// =============================================================================

/// File holding serialized items inside a JSON store directory.
pub const ITEMS_FILE: &str = "items.json";

/// File holding serialized collections inside a JSON store directory.
pub const COLLECTIONS_FILE: &str = "collections.json";

/// Environment variable selecting the store directory.
pub const ENV_STORE_DIR: &str = "MNEMO_STORE_DIR";
