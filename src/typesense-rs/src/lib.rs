//! Typesense Client Library
//!
//! HTTP client for the Typesense search server REST API. Every remote
//! capability is one async method on [`Client`]; status codes are mapped to
//! [`ClientError`] variants according to the operation that produced them.

mod client;
mod document;
mod request;
mod response;
pub mod transport;

pub use client::Client;
pub use document::DocumentResponse;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use typesense_core::models::*;
pub use typesense_core::search::{
    FacetCount, FacetValueCount, Highlight, Hit, SearchOptions, SearchResult,
};
pub use typesense_core::ClientConfig;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("typesense connection is not ready")]
    ConnNotReady,

    #[error("collection not found")]
    CollectionNotFound,

    #[error("collection already exists")]
    CollectionDuplicate,

    #[error("collection name is required")]
    CollectionNameRequired,

    #[error("collection fields are required")]
    CollectionFieldsRequired,

    #[error("document id is required")]
    DocumentIdRequired,

    #[error("alias name is required")]
    AliasNameRequired,

    #[error("resource not found")]
    NotFound,

    #[error("unauthorized: invalid or missing api key")]
    Unauthorized,

    #[error("a document with this id already exists")]
    DuplicateId,

    #[error("query is a required field")]
    QueryRequired,

    #[error("query_by is a required field")]
    QueryByRequired,

    #[error("{message}")]
    Api { message: String },

    #[error("unexpected status {status}: {body}")]
    Http { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
