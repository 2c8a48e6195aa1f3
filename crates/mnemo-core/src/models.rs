//! Core data models for mnemo.
//!
//! A [`ContentRequest`] is built once per capture, turned into exactly one
//! [`ContentRecord`] by the pipeline, and merged into exactly one new [`Item`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::defaults;

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Raw input handed to the content-processing pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    /// Typed note text. May be blank; the pipeline still yields a record.
    Note { text: String },
    /// A pasted screenshot as a data URI (`data:image/png;base64,...`).
    Image { image_data: String },
    /// Neither a note nor an image was supplied.
    Empty,
}

impl ContentRequest {
    /// Select the request variant from optional raw fields.
    ///
    /// A non-empty image wins over a note; empty strings count as absent.
    pub fn from_parts(note: Option<&str>, image_data: Option<&str>) -> Self {
        match (note, image_data) {
            (_, Some(image)) if !image.is_empty() => Self::Image {
                image_data: image.to_string(),
            },
            (Some(text), _) if !text.is_empty() => Self::Note {
                text: text.to_string(),
            },
            _ => Self::Empty,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Note { .. } => "note",
            Self::Image { .. } => "image",
            Self::Empty => "empty",
        }
    }
}

// =============================================================================
// RECORD TYPES
// =============================================================================

/// A suggested action item, optionally tied to a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Normalized extraction result, independent of which path produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub title: String,
    pub summary: String,
    pub extracted_text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

impl ContentRecord {
    /// Record for a request that carried neither a note nor an image.
    pub fn empty_request() -> Self {
        Self {
            title: defaults::EMPTY_ITEM_TITLE.to_string(),
            ..Self::default()
        }
    }

    /// Fixed record returned when image analysis cannot complete.
    pub fn image_failure() -> Self {
        Self {
            title: defaults::IMAGE_TITLE.to_string(),
            summary: defaults::IMAGE_FAILED_SUMMARY.to_string(),
            extracted_text: defaults::IMAGE_FAILED_TEXT.to_string(),
            tags: Vec::new(),
            highlights: Vec::new(),
        }
    }
}

// =============================================================================
// ITEM TYPES
// =============================================================================

/// Whether an item is a plain memory or a to-do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Memory,
    Todo,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Todo => write!(f, "todo"),
        }
    }
}

impl FromStr for ItemKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "todo" => Ok(Self::Todo),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown item kind: {}",
                other
            ))),
        }
    }
}

/// Caller-side input for a new item, before extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub kind: ItemKind,
    pub note: String,
    pub image_data: Option<String>,
    pub collection_id: Option<i64>,
    pub deadline: Option<NaiveDate>,
}

impl ItemDraft {
    pub fn note(text: impl Into<String>) -> Self {
        Self {
            note: text.into(),
            ..Self::default()
        }
    }

    pub fn image(data_uri: impl Into<String>) -> Self {
        Self {
            image_data: Some(data_uri.into()),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_collection(mut self, collection_id: Option<i64>) -> Self {
        self.collection_id = collection_id;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<NaiveDate>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Reject a draft with nothing to capture: no image and a blank note.
    pub fn validate(&self) -> crate::Result<()> {
        let has_image = self.image_data.as_deref().is_some_and(|d| !d.is_empty());
        if !has_image && self.note.trim().is_empty() {
            return Err(crate::Error::InvalidInput(
                "Note text cannot be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the pipeline request for this draft.
    pub fn content_request(&self) -> ContentRequest {
        ContentRequest::from_parts(Some(&self.note), self.image_data.as_deref())
    }
}

/// A persisted memory or to-do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Creation timestamp in milliseconds, unique within a store.
    pub id: i64,
    pub kind: ItemKind,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    pub title: String,
    pub summary: String,
    pub extracted_text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl Item {
    /// Merge one extracted record into a new item.
    ///
    /// Content fields come only from `record`; they are never regenerated.
    pub fn from_record(
        id: i64,
        draft: ItemDraft,
        record: ContentRecord,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: draft.kind,
            note: draft.note,
            image_data: draft.image_data,
            title: record.title,
            summary: record.summary,
            extracted_text: record.extracted_text,
            tags: record.tags,
            highlights: record.highlights,
            created_at,
            collection_id: draft.collection_id,
            deadline: draft.deadline,
        }
    }

    pub fn is_todo(&self) -> bool {
        self.kind == ItemKind::Todo
    }
}

// =============================================================================
// COLLECTION TYPES
// =============================================================================

/// A user-defined grouping of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Next timestamp id: `now` in milliseconds, bumped past the largest existing id.
pub fn next_item_id(existing: impl IntoIterator<Item = i64>, now: DateTime<Utc>) -> i64 {
    let now_ms = now.timestamp_millis();
    match existing.into_iter().max() {
        Some(last) if last >= now_ms => last + 1,
        _ => now_ms,
    }
}
