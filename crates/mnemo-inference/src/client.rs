//! Remote extraction client: a generation backend plus retry policy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use mnemo_core::{logging, Result};

use crate::gemini::GenerateContentRequest;
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};

/// Backend performing one structured-generation call.
///
/// An attempt fails on network errors, non-success statuses, or a response
/// with no text content. Returns the raw JSON text the model produced.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

/// Issues structured-generation requests with bounded retries.
///
/// Has no fallback of its own: after the last failed attempt it returns
/// [`Error::RetriesExhausted`](mnemo_core::Error::RetriesExhausted).
#[derive(Clone)]
pub struct RemoteExtractionClient {
    backend: Arc<dyn GenerationBackend>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl RemoteExtractionClient {
    /// Client with the default policy (3 attempts, 1s base delay) and real timers.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            policy: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    /// Send `request`, retrying per the policy. Returns the raw response text.
    pub async fn request(&self, request: &GenerateContentRequest) -> Result<String> {
        debug!(
            { logging::MODEL } = self.backend.model_name(),
            { logging::MAX_ATTEMPTS } = self.policy.max_attempts,
            { logging::PROMPT_LEN } = request.prompt_len(),
            "Starting remote extraction"
        );
        self.policy
            .run(self.sleeper.as_ref(), || self.backend.generate(request))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockGenerationBackend, RecordingSleeper};
    use mnemo_core::Error;
    use serde_json::json;
    use std::time::Duration;

    fn request() -> GenerateContentRequest {
        GenerateContentRequest::text("prompt", json!({"type": "OBJECT"}))
    }

    #[tokio::test]
    async fn test_two_failures_then_success() {
        let backend = Arc::new(
            MockGenerationBackend::new()
                .fail_next(2)
                .with_response(r#"{"title":"ok"}"#),
        );
        let sleeper = Arc::new(RecordingSleeper::new());
        let client = RemoteExtractionClient::new(backend.clone()).with_sleeper(sleeper.clone());

        let text = client.request(&request()).await.unwrap();
        assert_eq!(text, r#"{"title":"ok"}"#);
        assert_eq!(backend.call_count(), 3);
        assert_eq!(
            sleeper.delays(),
            vec![Duration::from_millis(1000), Duration::from_millis(2000)]
        );
    }

    #[tokio::test]
    async fn test_all_attempts_fail() {
        let backend = Arc::new(MockGenerationBackend::failing());
        let sleeper = Arc::new(RecordingSleeper::new());
        let client = RemoteExtractionClient::new(backend.clone()).with_sleeper(sleeper.clone());

        let err = client.request(&request()).await.unwrap_err();
        assert!(matches!(err, Error::RetriesExhausted { attempts: 3, .. }));
        assert_eq!(backend.call_count(), 3);
        assert_eq!(sleeper.delays().len(), 2);
    }

    #[tokio::test]
    async fn test_custom_policy() {
        let backend = Arc::new(MockGenerationBackend::failing());
        let sleeper = Arc::new(RecordingSleeper::new());
        let client = RemoteExtractionClient::new(backend.clone())
            .with_policy(RetryPolicy::new(1, Duration::from_millis(10)))
            .with_sleeper(sleeper.clone());

        assert!(client.request(&request()).await.is_err());
        assert_eq!(backend.call_count(), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn test_request_is_forwarded_unchanged() {
        let backend = Arc::new(MockGenerationBackend::new().with_response("{}"));
        let client = RemoteExtractionClient::new(backend.clone())
            .with_sleeper(Arc::new(RecordingSleeper::new()));

        let req = request();
        client.request(&req).await.unwrap();
        assert_eq!(backend.requests(), vec![req]);
    }
}
