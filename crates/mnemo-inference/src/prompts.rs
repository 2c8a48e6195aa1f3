//! Prompt and response-schema builders for note and image analysis.

use chrono::NaiveDate;
use serde_json::{json, Value as JsonValue};

/// Prompt asking for a title, a one-sentence summary and tags for a note.
pub fn note_prompt(text: &str) -> String {
    format!(
        "Analyze the following personal note.\n\
         Return a short descriptive title, a one-sentence summary, \
         and 2-3 relevant single-word tags.\n\n\
         Note:\n{}",
        text
    )
}

/// Prompt asking for OCR text, metadata and action items from a screenshot.
///
/// `today` lets the model resolve relative dates such as "tomorrow".
pub fn image_prompt(today: NaiveDate) -> String {
    format!(
        "Analyze this screenshot.\n\
         1. Extract all visible text exactly as written (OCR) into extractedText.\n\
         2. Give it a title of at most 5 words.\n\
         3. Write a two-sentence summary of what the screenshot shows.\n\
         4. Provide 2-3 relevant single-word tags.\n\
         5. List any action items, tasks, or events as highlights. When an item \
         implies a date, set date in YYYY-MM-DD format; otherwise omit it.\n\
         Today's date is {}.",
        today.format("%Y-%m-%d")
    )
}

/// Output schema for note analysis.
pub fn note_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {"type": "STRING"},
            "summary": {"type": "STRING"},
            "tags": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["title", "summary", "tags"]
    })
}

/// Output schema for image analysis.
pub fn image_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {"type": "STRING"},
            "summary": {"type": "STRING"},
            "extractedText": {"type": "STRING"},
            "tags": {"type": "ARRAY", "items": {"type": "STRING"}},
            "highlights": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "description": {"type": "STRING"},
                        "date": {"type": "STRING"}
                    },
                    "required": ["description"]
                }
            }
        },
        "required": ["title", "summary", "extractedText", "tags", "highlights"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_prompt_embeds_text() {
        let prompt = note_prompt("Buy milk");
        assert!(prompt.ends_with("Note:\nBuy milk"));
        assert!(prompt.contains("one-sentence summary"));
    }

    #[test]
    fn test_image_prompt_includes_today() {
        let prompt = image_prompt(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert!(prompt.contains("Today's date is 2026-03-14."));
        assert!(prompt.contains("at most 5 words"));
    }

    #[test]
    fn test_note_schema_has_no_highlights() {
        let schema = note_schema();
        assert!(schema["properties"].get("highlights").is_none());
        assert_eq!(schema["required"], json!(["title", "summary", "tags"]));
    }

    #[test]
    fn test_image_schema_highlight_items() {
        let schema = image_schema();
        let item = &schema["properties"]["highlights"]["items"];
        assert_eq!(item["required"], json!(["description"]));
        assert_eq!(item["properties"]["date"]["type"], "STRING");
    }
}
