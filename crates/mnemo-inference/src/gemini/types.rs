//! Gemini `generateContent` request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use mnemo_core::ImagePayload;

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for the `generateContent` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Text-only request constrained to `schema`.
    pub fn text(prompt: impl Into<String>, schema: JsonValue) -> Self {
        Self {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            generation_config: GenerationConfig::json(schema),
        }
    }

    /// Request carrying one inline image followed by the prompt.
    pub fn with_image(prompt: impl Into<String>, image: &ImagePayload, schema: JsonValue) -> Self {
        Self {
            contents: vec![Content::user(vec![
                Part::inline(image),
                Part::text(prompt),
            ])],
            generation_config: GenerationConfig::json(schema),
        }
    }

    /// Combined byte length of all text parts.
    pub fn prompt_len(&self) -> usize {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_ref())
            .map(String::len)
            .sum()
    }
}

/// One conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

/// A text or inline-binary part.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(image: &ImagePayload) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }),
        }
    }
}

/// Base64 payload tagged with its MIME type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Output constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: JsonValue,
}

impl GenerationConfig {
    pub fn json(schema: JsonValue) -> Self {
        Self {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        }
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// Response envelope from `generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first text part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

/// A single generated candidate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
