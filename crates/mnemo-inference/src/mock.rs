//! Scripted generation backend and fake clock for deterministic tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mnemo_inference::mock::{MockGenerationBackend, RecordingSleeper};
//!
//! let backend = MockGenerationBackend::new()
//!     .fail_next(2)
//!     .with_response(r#"{"title":"T","summary":"S","tags":[]}"#);
//! let sleeper = RecordingSleeper::new();
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use mnemo_core::{Error, Result};

use crate::client::GenerationBackend;
use crate::gemini::GenerateContentRequest;
use crate::retry::Sleeper;

/// Generation backend that replays a script of failures and a fixed response.
#[derive(Clone)]
pub struct MockGenerationBackend {
    response: Arc<Mutex<String>>,
    failures_remaining: Arc<AtomicUsize>,
    always_fail: bool,
    call_log: Arc<Mutex<Vec<GenerateContentRequest>>>,
}

impl MockGenerationBackend {
    /// Backend answering every request with `{}`.
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new("{}".to_string())),
            failures_remaining: Arc::new(AtomicUsize::new(0)),
            always_fail: false,
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Backend whose every attempt fails.
    pub fn failing() -> Self {
        Self {
            always_fail: true,
            ..Self::new()
        }
    }

    /// Set the text returned by successful attempts.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        *self.response.lock().unwrap() = response.into();
        self
    }

    /// Fail the next `n` attempts before succeeding.
    pub fn fail_next(self, n: usize) -> Self {
        self.failures_remaining.store(n, Ordering::SeqCst);
        self
    }

    /// Number of `generate` calls made.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Requests received, in order.
    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.call_log.lock().unwrap().clone()
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String> {
        self.call_log.lock().unwrap().push(request.clone());

        if self.always_fail {
            return Err(Error::Inference("Simulated failure".to_string()));
        }
        let pending = self.failures_remaining.load(Ordering::SeqCst);
        if pending > 0 {
            self.failures_remaining.store(pending - 1, Ordering::SeqCst);
            return Err(Error::Inference("Simulated failure".to_string()));
        }

        Ok(self.response.lock().unwrap().clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Sleeper that records requested delays and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order.
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fail_next_then_succeed() {
        let backend = MockGenerationBackend::new().fail_next(1).with_response("ok");
        let req = GenerateContentRequest::text("p", json!({}));
        assert!(backend.generate(&req).await.is_err());
        assert_eq!(backend.generate(&req).await.unwrap(), "ok");
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_recording_sleeper() {
        let sleeper = RecordingSleeper::new();
        sleeper.sleep(Duration::from_millis(5)).await;
        assert_eq!(sleeper.delays(), vec![Duration::from_millis(5)]);
    }
}
