//! Content processing controller.
//!
//! Routes each [`ContentRequest`] to the remote extraction client and absorbs
//! every failure into a fallback record, so callers always get a
//! [`ContentRecord`] back.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use mnemo_core::{logging, ContentExtractor, ContentRecord, ContentRequest, ImagePayload, Result};

use crate::client::RemoteExtractionClient;
use crate::config::RemoteConfig;
use crate::extraction::{ImageExtraction, NoteExtraction};
use crate::gemini::{GeminiBackend, GenerateContentRequest};
use crate::prompts;
use crate::summarizer::TextSummarizer;

/// Produces exactly one record per request.
///
/// | Request | Remote succeeds | Remote unavailable or fails |
/// |---------|-----------------|-----------------------------|
/// | Note    | model title, summary and tags | [`TextSummarizer`] output |
/// | Image   | model record with image defaults | [`ContentRecord::image_failure`] |
/// | Empty   | n/a | [`ContentRecord::empty_request`] |
#[derive(Clone)]
pub struct ContentProcessor {
    remote: Option<RemoteExtractionClient>,
    summarizer: TextSummarizer,
    today: Option<NaiveDate>,
}

impl ContentProcessor {
    /// Processor using `remote` when present and the offline path otherwise.
    pub fn new(remote: Option<RemoteExtractionClient>) -> Self {
        Self {
            remote,
            summarizer: TextSummarizer::new(),
            today: None,
        }
    }

    /// Processor that never contacts the remote service.
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Build from configuration. Without an API key the processor is offline.
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        if !config.is_enabled() {
            info!(
                { logging::SUBSYSTEM } = "pipeline",
                { logging::COMPONENT } = "processor",
                "No API key configured, remote extraction disabled"
            );
            return Ok(Self::offline());
        }

        let backend = GeminiBackend::new(config)?;
        let client =
            RemoteExtractionClient::new(Arc::new(backend)).with_policy(config.retry_policy());
        info!(
            { logging::SUBSYSTEM } = "pipeline",
            { logging::COMPONENT } = "processor",
            { logging::MODEL } = client.model_name(),
            { logging::MAX_ATTEMPTS } = config.max_attempts,
            "Remote extraction enabled"
        );
        Ok(Self::new(Some(client)))
    }

    /// Pin the date given to the image prompt instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn is_remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Turn `request` into a record. Never fails.
    pub async fn process(&self, request: &ContentRequest) -> ContentRecord {
        let start = Instant::now();
        let record = match request {
            ContentRequest::Image { image_data } => self.process_image(image_data).await,
            ContentRequest::Note { text } => self.process_note(text).await,
            ContentRequest::Empty => ContentRecord::empty_request(),
        };

        info!(
            { logging::SUBSYSTEM } = "pipeline",
            { logging::COMPONENT } = "processor",
            { logging::OPERATION } = "process",
            { logging::REQUEST_KIND } = request.kind(),
            { logging::DURATION_MS } = start.elapsed().as_millis() as u64,
            tag_count = record.tags.len(),
            highlight_count = record.highlights.len(),
            "Content processed"
        );
        record
    }

    async fn process_note(&self, text: &str) -> ContentRecord {
        if text.trim().is_empty() {
            debug!("Blank note, skipping remote extraction");
            return self.summarizer.summarize(text);
        }

        let Some(remote) = &self.remote else {
            debug!("Remote extraction disabled, summarizing locally");
            return self.summarizer.summarize(text);
        };

        let request =
            GenerateContentRequest::text(prompts::note_prompt(text), prompts::note_schema());
        let outcome = remote
            .request(&request)
            .await
            .and_then(|raw| NoteExtraction::parse(&raw));

        match outcome {
            Ok(extraction) => extraction.into_record(text),
            Err(e) => {
                warn!(
                    { logging::SUBSYSTEM } = "pipeline",
                    { logging::REQUEST_KIND } = "note",
                    { logging::FALLBACK } = "summarizer",
                    { logging::ERROR_MSG } = %e,
                    "Remote note analysis failed, using local summary"
                );
                self.summarizer.summarize(text)
            }
        }
    }

    async fn process_image(&self, image_data: &str) -> ContentRecord {
        let payload = ImagePayload::parse(image_data);
        if let Err(e) = payload.validate() {
            warn!(
                { logging::SUBSYSTEM } = "pipeline",
                { logging::REQUEST_KIND } = "image",
                { logging::FALLBACK } = "image_failure",
                { logging::ERROR_MSG } = %e,
                "Unusable image payload"
            );
            return ContentRecord::image_failure();
        }

        let Some(remote) = &self.remote else {
            debug!("Remote extraction disabled, image cannot be analyzed");
            return ContentRecord::image_failure();
        };

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let request = GenerateContentRequest::with_image(
            prompts::image_prompt(today),
            &payload,
            prompts::image_schema(),
        );
        let outcome = remote
            .request(&request)
            .await
            .and_then(|raw| ImageExtraction::parse(&raw));

        match outcome {
            Ok(extraction) => extraction.into_record(),
            Err(e) => {
                warn!(
                    { logging::SUBSYSTEM } = "pipeline",
                    { logging::REQUEST_KIND } = "image",
                    { logging::FALLBACK } = "image_failure",
                    { logging::ERROR_MSG } = %e,
                    "Remote image analysis failed"
                );
                ContentRecord::image_failure()
            }
        }
    }
}

#[async_trait]
impl ContentExtractor for ContentProcessor {
    async fn extract(&self, request: &ContentRequest) -> ContentRecord {
        self.process(request).await
    }
}
