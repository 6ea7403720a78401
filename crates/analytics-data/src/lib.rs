//! Data layer for the post analytics tools.
//!
//! Responsible for loading exported post arrays into the document store and
//! running the aggregate report queries against it.

pub mod analysis;
pub mod analyzer;
pub mod mongo;
pub mod reader;
pub mod store;

pub use analytics_core as core;
