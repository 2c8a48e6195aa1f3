//! Validation of structured model output.
//!
//! The JSON text returned by the remote model is untrusted: it is parsed as a
//! generic value, required to be an object, and each field is read leniently.
//! Missing or mistyped fields take per-field defaults instead of failing.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use mnemo_core::defaults::{IMAGE_SUMMARY, IMAGE_TITLE, MAX_TAGS};
use mnemo_core::{ContentRecord, Error, Highlight, Result};

/// Fields read from a note-analysis response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteExtraction {
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
}

impl NoteExtraction {
    /// Parse the model's JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let obj = parse_object(text)?;
        Ok(Self {
            title: string_field(&obj, &["title"]).unwrap_or_default(),
            summary: string_field(&obj, &["summary"]).unwrap_or_default(),
            tags: tags_field(&obj),
        })
    }

    /// Merge into a record. The note text itself is the extracted text and
    /// plain notes never carry highlights.
    pub fn into_record(self, note_text: &str) -> ContentRecord {
        ContentRecord {
            title: self.title,
            summary: self.summary,
            extracted_text: note_text.to_string(),
            tags: self.tags,
            highlights: Vec::new(),
        }
    }
}

/// Fields read from an image-analysis response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageExtraction {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub extracted_text: Option<String>,
    pub tags: Vec<String>,
    pub highlights: Vec<Highlight>,
}

impl ImageExtraction {
    /// Parse the model's JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let obj = parse_object(text)?;
        Ok(Self {
            title: string_field(&obj, &["title"]),
            summary: string_field(&obj, &["summary"]),
            extracted_text: string_field(&obj, &["extractedText", "extracted_text"]),
            tags: tags_field(&obj),
            highlights: highlights_field(&obj),
        })
    }

    /// Convert to a record, applying the image-path default for every field.
    pub fn into_record(self) -> ContentRecord {
        ContentRecord {
            title: non_blank(self.title).unwrap_or_else(|| IMAGE_TITLE.to_string()),
            summary: non_blank(self.summary).unwrap_or_else(|| IMAGE_SUMMARY.to_string()),
            extracted_text: self.extracted_text.unwrap_or_default(),
            tags: self.tags,
            highlights: self.highlights,
        }
    }
}

/// Trim, drop blanks and duplicates (first occurrence wins), keep at most three.
pub fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || tags.iter().any(|t| t == tag) {
            continue;
        }
        tags.push(tag.to_string());
        if tags.len() == MAX_TAGS {
            break;
        }
    }
    tags
}

/// Accept `YYYY-MM-DD` or an RFC 3339 timestamp; anything else is no date.
pub fn parse_highlight_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn parse_object(text: &str) -> Result<Map<String, JsonValue>> {
    match serde_json::from_str::<JsonValue>(text.trim())? {
        JsonValue::Object(obj) => Ok(obj),
        other => Err(Error::Serialization(format!(
            "Expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn string_field(obj: &Map<String, JsonValue>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(JsonValue::as_str))
        .map(str::to_string)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn tags_field(obj: &Map<String, JsonValue>) -> Vec<String> {
    match obj.get("tags") {
        Some(JsonValue::Array(items)) => normalize_tags(items.iter().filter_map(JsonValue::as_str)),
        _ => Vec::new(),
    }
}

fn highlights_field(obj: &Map<String, JsonValue>) -> Vec<Highlight> {
    let Some(JsonValue::Array(items)) = obj.get("highlights") else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let description = item.get("description")?.as_str()?.trim();
            if description.is_empty() {
                return None;
            }
            let date = item
                .get("date")
                .and_then(JsonValue::as_str)
                .and_then(|raw| {
                    let parsed = parse_highlight_date(raw);
                    if parsed.is_none() && !raw.trim().is_empty() {
                        debug!(date = raw, "Discarding unparsable highlight date");
                    }
                    parsed
                });
            Some(Highlight {
                description: description.to_string(),
                date,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_parse_full() {
        let parsed = NoteExtraction::parse(r#"{"title":"T","summary":"S","tags":["a","b"]}"#).unwrap();
        assert_eq!(parsed.title, "T");
        assert_eq!(parsed.summary, "S");
        assert_eq!(parsed.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_note_record_ignores_model_text_and_highlights() {
        let parsed = NoteExtraction::parse(
            r#"{"title":"T","summary":"S","tags":["a"],"extractedText":"other","highlights":[{"description":"x"}]}"#,
        )
        .unwrap();
        let record = parsed.into_record("hello world");
        assert_eq!(record.extracted_text, "hello world");
        assert!(record.highlights.is_empty());
    }

    #[test]
    fn test_note_missing_fields_are_empty() {
        let record = NoteExtraction::parse("{}").unwrap().into_record("n");
        assert_eq!(record.title, "");
        assert_eq!(record.summary, "");
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            NoteExtraction::parse("[1,2]"),
            Err(Error::Serialization(_))
        ));
        assert!(ImageExtraction::parse("not json").is_err());
        assert!(ImageExtraction::parse("\"text\"").is_err());
    }

    #[test]
    fn test_image_defaults_applied() {
        let record = ImageExtraction::parse(r#"{"title":"  ","tags":"oops"}"#)
            .unwrap()
            .into_record();
        assert_eq!(record.title, "Screenshot");
        assert_eq!(record.summary, "No summary available.");
        assert_eq!(record.extracted_text, "");
        assert!(record.tags.is_empty());
        assert!(record.highlights.is_empty());
    }

    #[test]
    fn test_image_full_payload() {
        let record = ImageExtraction::parse(
            r#"{
                "title": "Team standup",
                "summary": "A calendar invite. It is for Monday.",
                "extractedText": "Standup 9am",
                "tags": ["work", "meeting"],
                "highlights": [
                    {"description": "Attend standup", "date": "2026-10-19"},
                    {"description": "Send notes"},
                    {"description": "   "},
                    {"date": "2026-10-20"}
                ]
            }"#,
        )
        .unwrap()
        .into_record();

        assert_eq!(record.title, "Team standup");
        assert_eq!(record.extracted_text, "Standup 9am");
        assert_eq!(record.tags, vec!["work", "meeting"]);
        assert_eq!(
            record.highlights,
            vec![
                Highlight {
                    description: "Attend standup".to_string(),
                    date: NaiveDate::from_ymd_opt(2026, 10, 19),
                },
                Highlight {
                    description: "Send notes".to_string(),
                    date: None,
                },
            ]
        );
    }

    #[test]
    fn test_image_snake_case_extracted_text() {
        let parsed = ImageExtraction::parse(r#"{"extracted_text":"ocr"}"#).unwrap();
        assert_eq!(parsed.extracted_text.as_deref(), Some("ocr"));
    }

    #[test]
    fn test_normalize_tags() {
        assert_eq!(
            normalize_tags([" work ", "", "work", "ideas", "home", "extra"]),
            vec!["work", "ideas", "home"]
        );
    }

    #[test]
    fn test_parse_highlight_date() {
        assert_eq!(
            parse_highlight_date("2026-01-31"),
            NaiveDate::from_ymd_opt(2026, 1, 31)
        );
        assert_eq!(
            parse_highlight_date("2026-01-31T09:30:00Z"),
            NaiveDate::from_ymd_opt(2026, 1, 31)
        );
        assert_eq!(parse_highlight_date("next Tuesday"), None);
        assert_eq!(parse_highlight_date(""), None);
    }
}
