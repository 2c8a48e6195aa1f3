//! Gemini-style structured generation.
//!
//! Request and response shapes for `generateContent` plus a single-attempt
//! HTTP backend.

mod backend;
pub mod types;

pub use backend::GeminiBackend;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};
