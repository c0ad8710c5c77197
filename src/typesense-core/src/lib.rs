//! Typesense Core Library
//!
//! This crate provides the data model shared by the Typesense client:
//! - Node addressing and client configuration
//! - Collection schemas and collection metadata
//! - Search options and search results
//! - API keys and collection aliases

pub mod config;
pub mod models;
pub mod search;

// Re-export commonly used types
pub use config::ClientConfig;
pub use models::*;
pub use search::{FacetCount, FacetValueCount, Highlight, Hit, SearchOptions, SearchResult};
