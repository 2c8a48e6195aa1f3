//! # mnemo-core
//!
//! Core types, traits, and abstractions for mnemo.
//!
//! This crate provides the data model shared by the content pipeline and the
//! persistence layer: requests, extracted records, items, collections, and
//! the traits that connect them.

pub mod data_uri;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use data_uri::ImagePayload;
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
