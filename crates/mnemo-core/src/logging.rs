//! Structured logging schema and field name constants for mnemo.
//!
//! All crates use these constants for consistent structured logging fields.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data (sentence scores) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "pipeline", "inference", "store", "cli"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "processor", "gemini", "summarizer", "json_file"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "process", "generate", "summarize", "save"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Item id being operated on.
pub const ITEM_ID: &str = "item_id";

/// Collection id being operated on.
pub const COLLECTION_ID: &str = "collection_id";

/// Request variant ("note", "image", "empty").
pub const REQUEST_KIND: &str = "request_kind";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

/// Number of items loaded or saved.
pub const ITEM_COUNT: &str = "item_count";

// ─── Retry fields ──────────────────────────────────────────────────────────

/// 1-based attempt number.
pub const ATTEMPT: &str = "attempt";

/// Total attempts allowed.
pub const MAX_ATTEMPTS: &str = "max_attempts";

/// Backoff delay before the next attempt, in milliseconds.
pub const DELAY_MS: &str = "delay_ms";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for generation.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Which fallback produced the record ("summarizer", "image_failure").
pub const FALLBACK: &str = "fallback";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
