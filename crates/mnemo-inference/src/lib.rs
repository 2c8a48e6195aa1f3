//! # mnemo-inference
//!
//! Content extraction pipeline for mnemo.
//!
//! This crate provides:
//! - Remote structured generation against a Gemini-style `generateContent` API
//! - Bounded retries with exponential backoff
//! - An offline extractive summarizer for notes
//! - The [`ContentProcessor`] controller that always yields a record
//!
//! ## Feature Flags
//!
//! - `mock`: Expose [`mock::MockGenerationBackend`] and [`mock::RecordingSleeper`]
//!   for deterministic tests in downstream crates.

pub mod client;
pub mod config;
pub mod extraction;
pub mod gemini;
pub mod processor;
pub mod prompts;
pub mod retry;
pub mod summarizer;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-exports
pub use client::{GenerationBackend, RemoteExtractionClient};
pub use config::{ConfigError, RemoteConfig};
pub use gemini::GeminiBackend;
pub use processor::ContentProcessor;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use summarizer::TextSummarizer;

// Re-export core types
pub use mnemo_core::*;
