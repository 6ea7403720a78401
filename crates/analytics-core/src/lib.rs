//! Shared building blocks for the post analytics tools: the post data model,
//! the error type, command-line settings, timestamp handling and report
//! wording.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{AnalyticsError, Result};
