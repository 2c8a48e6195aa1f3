//! Gemini structured-generation backend.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use mnemo_core::{logging, Error, Result};

use super::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::client::GenerationBackend;
use crate::config::RemoteConfig;

/// Single-attempt client for `POST /v1beta/models/{model}:generateContent`.
///
/// Retries are not handled here; wrap it in a
/// [`RemoteExtractionClient`](crate::client::RemoteExtractionClient).
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiBackend {
    /// Create a backend from validated remote configuration.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing Gemini backend: url={}, model={}",
            config.base_url, config.model
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    #[instrument(skip(self, request), fields(subsystem = "inference", component = "gemini", op = "generate", model = %self.model))]
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String> {
        let start = Instant::now();

        let mut builder = self.client.post(self.endpoint()).json(request);
        if let Some(ref key) = self.api_key {
            builder = builder.header("x-goog-api-key", key);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(Error::Inference(format!(
                "Gemini returned {}: {}",
                status, message
            )));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let text = envelope
            .first_text()
            .ok_or_else(|| Error::Inference("Response has no candidate text".to_string()))?
            .to_string();

        debug!(
            { logging::PROMPT_LEN } = request.prompt_len(),
            { logging::RESPONSE_LEN } = text.len(),
            { logging::DURATION_MS } = start.elapsed().as_millis() as u64,
            "Generation complete"
        );
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
